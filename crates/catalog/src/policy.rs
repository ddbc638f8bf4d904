//! Access policy: who may see and who may change which record.
//!
//! Every protected operation asks this module, and only this module. The rules:
//!
//! | role          | read                          | create | update / delete                  |
//! |---------------|-------------------------------|--------|----------------------------------|
//! | `admin`       | everything                    | yes    | everything                       |
//! | `store_owner` | own stores, their products    | yes    | own stores, their products       |
//! | `user`        | everything                    | no     | nothing                          |
//!
//! Product ownership is resolved through the product's `store_id`; a product
//! whose store no longer exists belongs to nobody.
//!
//! - No IO
//! - No panics
//! - Existence checks are the caller's job and come first, so a missing record
//!   is reported as not found rather than forbidden.

use std::collections::HashSet;

use storedesk_auth::{Caller, Role};
use storedesk_core::{ServiceError, ServiceResult, StoreId, UserId};

use crate::{Product, Store};

/// Which slice of a collection a caller may read.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReadScope {
    All,
    /// Stores owned by this user, and the products of those stores.
    OwnedBy(UserId),
}

pub fn read_scope(caller: &Caller) -> ReadScope {
    match caller.role {
        Role::Admin | Role::User => ReadScope::All,
        Role::StoreOwner => ReadScope::OwnedBy(caller.id),
    }
}

/// Turn a policy decision into `Forbidden`.
pub fn require(allowed: bool) -> ServiceResult<()> {
    if allowed { Ok(()) } else { Err(ServiceError::Forbidden) }
}

pub fn can_create(caller: &Caller) -> bool {
    matches!(caller.role, Role::Admin | Role::StoreOwner)
}

/// Decide the owner of a store being created.
///
/// Store owners always own what they create; whatever they send as `ownerId`
/// is not even parsed. Admins must name the owner explicitly.
pub fn resolve_store_owner(caller: &Caller, requested: Option<&str>) -> ServiceResult<UserId> {
    match caller.role {
        Role::StoreOwner => Ok(caller.id),
        Role::Admin => requested
            .ok_or_else(|| ServiceError::validation("ownerId is required"))?
            .parse::<UserId>()
            .map_err(|_| ServiceError::validation("ownerId is not a valid user id")),
        Role::User => Err(ServiceError::Forbidden),
    }
}

pub fn can_mutate_store(caller: &Caller, store: &Store) -> bool {
    match caller.role {
        Role::Admin => true,
        Role::StoreOwner => store.owner_id == caller.id,
        Role::User => false,
    }
}

pub fn owning_store<'a>(product: &Product, stores: &'a [Store]) -> Option<&'a Store> {
    stores.iter().find(|s| s.id == product.store_id)
}

/// Whether `caller` may create a product in `store_id` or change one that lives there.
pub fn can_manage_products_in(caller: &Caller, store_id: StoreId, stores: &[Store]) -> bool {
    match caller.role {
        Role::Admin => true,
        Role::StoreOwner => stores
            .iter()
            .any(|s| s.id == store_id && s.owner_id == caller.id),
        Role::User => false,
    }
}

pub fn can_mutate_product(caller: &Caller, product: &Product, stores: &[Store]) -> bool {
    can_manage_products_in(caller, product.store_id, stores)
}

pub fn can_read_store(caller: &Caller, store: &Store) -> bool {
    match read_scope(caller) {
        ReadScope::All => true,
        ReadScope::OwnedBy(owner) => store.owner_id == owner,
    }
}

pub fn can_read_product(caller: &Caller, product: &Product, stores: &[Store]) -> bool {
    match read_scope(caller) {
        ReadScope::All => true,
        ReadScope::OwnedBy(owner) => {
            owning_store(product, stores).is_some_and(|s| s.owner_id == owner)
        }
    }
}

pub fn owned_store_ids(owner: UserId, stores: &[Store]) -> HashSet<StoreId> {
    stores
        .iter()
        .filter(|s| s.owner_id == owner)
        .map(|s| s.id)
        .collect()
}

pub fn filter_stores(caller: &Caller, stores: Vec<Store>) -> Vec<Store> {
    match read_scope(caller) {
        ReadScope::All => stores,
        ReadScope::OwnedBy(owner) => stores.into_iter().filter(|s| s.owner_id == owner).collect(),
    }
}

pub fn filter_products(caller: &Caller, products: Vec<Product>, stores: &[Store]) -> Vec<Product> {
    match read_scope(caller) {
        ReadScope::All => products,
        ReadScope::OwnedBy(owner) => {
            let owned = owned_store_ids(owner, stores);
            products
                .into_iter()
                .filter(|p| owned.contains(&p.store_id))
                .collect()
        }
    }
}

pub fn can_list_users(caller: &Caller) -> bool {
    caller.is_admin()
}

pub fn can_create_user(caller: &Caller) -> bool {
    caller.is_admin()
}

pub fn can_delete_user(caller: &Caller) -> bool {
    caller.is_admin()
}
