//! Infrastructure layer: collection persistence, resource services, seeding.

pub mod persistence;
pub mod repository;
pub mod seed;
pub mod services;

pub use persistence::{Collection, CollectionStore, InMemoryStore, JsonFileStore, PersistenceError};
pub use repository::{Repositories, Repository};
pub use seed::{SeededAccount, seed_demo_data};
pub use services::Services;
