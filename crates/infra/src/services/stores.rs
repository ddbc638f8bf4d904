use std::sync::Arc;

use storedesk_auth::{Caller, User};
use storedesk_catalog::{Store, StoreDraft, StorePatch, policy};
use storedesk_core::{Clock, ServiceError, ServiceResult, StoreId};

use crate::repository::Repository;

pub struct StoreService {
    stores: Arc<Repository<Store>>,
    users: Arc<Repository<User>>,
    clock: Arc<dyn Clock>,
}

impl StoreService {
    pub fn new(
        stores: Arc<Repository<Store>>,
        users: Arc<Repository<User>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { stores, users, clock }
    }

    pub fn list(&self, caller: &Caller) -> ServiceResult<Vec<Store>> {
        Ok(policy::filter_stores(caller, self.stores.all()?))
    }

    pub fn get(&self, caller: &Caller, id: StoreId) -> ServiceResult<Store> {
        let store = self.stores.find(&id)?.ok_or(ServiceError::NotFound)?;
        policy::require(policy::can_read_store(caller, &store))?;
        Ok(store)
    }

    pub fn create(&self, caller: &Caller, draft: StoreDraft) -> ServiceResult<Store> {
        if !policy::can_create(caller) {
            tracing::warn!(actor = %caller.id, role = %caller.role, "store create denied");
            return Err(ServiceError::Forbidden);
        }
        let valid = draft.validate()?;
        let owner_id = policy::resolve_store_owner(caller, valid.requested_owner.as_deref())?;

        if owner_id != caller.id && self.users.find(&owner_id)?.is_none() {
            return Err(ServiceError::validation("ownerId does not reference an existing user"));
        }

        let store = self
            .stores
            .insert(Store::create(valid, owner_id, self.clock.now()))?;
        tracing::info!(actor = %caller.id, store_id = %store.id, owner_id = %store.owner_id, "store created");
        Ok(store)
    }

    pub fn update(&self, caller: &Caller, id: StoreId, patch: StorePatch) -> ServiceResult<Store> {
        let now = self.clock.now();
        let store = self.stores.update(&id, |store| {
            if !policy::can_mutate_store(caller, store) {
                tracing::warn!(actor = %caller.id, store_id = %id, "store update denied");
                return Err(ServiceError::Forbidden);
            }
            store.apply_patch(&patch, now)
        })?;
        tracing::info!(actor = %caller.id, store_id = %id, "store updated");
        Ok(store)
    }

    /// Products of the deleted store are left in place.
    pub fn delete(&self, caller: &Caller, id: StoreId) -> ServiceResult<Store> {
        let store = self.stores.remove(&id, |store| {
            if !policy::can_mutate_store(caller, store) {
                tracing::warn!(actor = %caller.id, store_id = %id, "store delete denied");
                return Err(ServiceError::Forbidden);
            }
            Ok(())
        })?;
        tracing::info!(actor = %caller.id, store_id = %id, "store deleted");
        Ok(store)
    }
}
