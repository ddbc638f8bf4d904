//! Typed view of one collection with serialized writes.
//!
//! Every write is load → mutate in memory → save of the whole collection. One
//! mutex per collection is held across that sequence, so concurrent writers to
//! the same collection are applied one after another instead of losing
//! updates. Reads do not take the lock; backends publish whole collections
//! atomically.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

use serde::{Serialize, de::DeserializeOwned};

use storedesk_auth::User;
use storedesk_catalog::{Product, Store};
use storedesk_core::{Entity, ServiceError, ServiceResult};

use crate::persistence::{Collection, CollectionStore};

pub struct Repository<T> {
    backend: Arc<dyn CollectionStore>,
    collection: Collection,
    write_lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T> Repository<T>
where
    T: Entity + Serialize + DeserializeOwned,
{
    pub fn new(backend: Arc<dyn CollectionStore>, collection: Collection) -> Self {
        Self {
            backend,
            collection,
            write_lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn all(&self) -> ServiceResult<Vec<T>> {
        self.backend
            .load(self.collection)?
            .into_iter()
            .map(|v| serde_json::from_value(v).map_err(ServiceError::from))
            .collect()
    }

    pub fn find(&self, id: &T::Id) -> ServiceResult<Option<T>> {
        Ok(self.all()?.into_iter().find(|r| r.id() == id))
    }

    /// Run `f` over the whole collection under the write lock and persist the
    /// result. Nothing is written when `f` fails.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut Vec<T>) -> ServiceResult<R>) -> ServiceResult<R> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| ServiceError::unexpected(format!("{} write lock poisoned", self.collection)))?;

        let mut records = self.all()?;
        let out = f(&mut records)?;

        let encoded = records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        self.backend.save(self.collection, &encoded)?;
        Ok(out)
    }

    pub fn insert(&self, record: T) -> ServiceResult<T>
    where
        T: Clone,
    {
        self.mutate(|records| {
            records.push(record.clone());
            Ok(record)
        })
    }

    /// Resolve `id` (missing → `NotFound`), then let `f` check and modify it.
    pub fn update(
        &self,
        id: &T::Id,
        f: impl FnOnce(&mut T) -> ServiceResult<()>,
    ) -> ServiceResult<T>
    where
        T: Clone,
    {
        self.mutate(|records| {
            let record = records
                .iter_mut()
                .find(|r| r.id() == id)
                .ok_or(ServiceError::NotFound)?;
            f(record)?;
            Ok(record.clone())
        })
    }

    /// Resolve `id` (missing → `NotFound`), let `check` veto, then remove it.
    pub fn remove(
        &self,
        id: &T::Id,
        check: impl FnOnce(&T) -> ServiceResult<()>,
    ) -> ServiceResult<T> {
        self.mutate(|records| {
            let idx = records
                .iter()
                .position(|r| r.id() == id)
                .ok_or(ServiceError::NotFound)?;
            check(&records[idx])?;
            Ok(records.remove(idx))
        })
    }
}

/// The three collections over one backend.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<Repository<User>>,
    pub stores: Arc<Repository<Store>>,
    pub products: Arc<Repository<Product>>,
}

impl Repositories {
    pub fn new(backend: Arc<dyn CollectionStore>) -> Self {
        Self {
            users: Arc::new(Repository::new(backend.clone(), Collection::Users)),
            stores: Arc::new(Repository::new(backend.clone(), Collection::Stores)),
            products: Arc::new(Repository::new(backend, Collection::Products)),
        }
    }
}
