//! `storedesk-core`: shared building blocks (ids, error taxonomy, clock).
//!
//! This crate contains no IO and no HTTP concerns.

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entity::Entity;
pub use error::{ServiceError, ServiceResult};
pub use id::{ProductId, StoreId, UserId};
