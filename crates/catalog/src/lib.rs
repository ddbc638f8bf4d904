//! Store and product records plus the access policy that gates them.
//!
//! This crate contains business rules only (no IO, no HTTP, no storage).

pub mod input;
pub mod policy;
pub mod product;
pub mod store;

pub use input::NumericInput;
pub use policy::ReadScope;
pub use product::{DEFAULT_PRODUCT_IMAGE, Product, ProductDraft, ProductPatch, ValidProductDraft};
pub use store::{Store, StoreDraft, StorePatch, StoreStatus, ValidStoreDraft};
