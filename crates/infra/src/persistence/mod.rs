//! Whole-collection persistence capability.
//!
//! A backend stores each collection as one ordered sequence of JSON records.
//! `load` of an absent collection yields an empty sequence; `save` overwrites
//! the whole collection and is durable before it returns.

pub mod in_memory;
pub mod json_file;

use std::sync::Arc;

use thiserror::Error;

use storedesk_core::ServiceError;

pub use in_memory::InMemoryStore;
pub use json_file::JsonFileStore;

/// The collections this application persists.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Stores,
    Products,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Stores => "stores",
            Collection::Products => "products",
        }
    }
}

impl core::fmt::Display for Collection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io error on collection '{collection}': {source}")]
    Io {
        collection: Collection,
        #[source]
        source: std::io::Error,
    },

    #[error("collection '{collection}' is not a JSON array of records: {source}")]
    Corrupt {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot encode collection '{collection}': {source}")]
    Encode {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage lock poisoned")]
    LockPoisoned,
}

impl From<PersistenceError> for ServiceError {
    fn from(value: PersistenceError) -> Self {
        tracing::error!("persistence failure: {value}");
        ServiceError::unexpected(value.to_string())
    }
}

/// Key-value persistence of whole collections.
pub trait CollectionStore: Send + Sync {
    fn load(&self, collection: Collection) -> Result<Vec<serde_json::Value>, PersistenceError>;

    fn save(
        &self,
        collection: Collection,
        records: &[serde_json::Value],
    ) -> Result<(), PersistenceError>;
}

impl<S> CollectionStore for Arc<S>
where
    S: CollectionStore + ?Sized,
{
    fn load(&self, collection: Collection) -> Result<Vec<serde_json::Value>, PersistenceError> {
        (**self).load(collection)
    }

    fn save(
        &self,
        collection: Collection,
        records: &[serde_json::Value],
    ) -> Result<(), PersistenceError> {
        (**self).save(collection, records)
    }
}
