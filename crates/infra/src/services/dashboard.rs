//! Role-specific summary counts.
//!
//! Recomputed from the full collections on every call.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use storedesk_auth::{Caller, Role, User};
use storedesk_catalog::{Product, Store, StoreStatus, policy};
use storedesk_core::{ServiceError, ServiceResult};

use crate::repository::Repository;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DashboardStats {
    Admin(AdminStats),
    StoreOwner(OwnerStats),
    User(ShopperStats),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_users: usize,
    pub total_stores: usize,
    pub total_products: usize,
    pub active_stores: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerStats {
    pub total_stores: usize,
    pub total_products: usize,
    pub total_stock: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopperStats {
    pub available_stores: usize,
    pub available_products: usize,
}

pub struct DashboardService {
    users: Arc<Repository<User>>,
    stores: Arc<Repository<Store>>,
    products: Arc<Repository<Product>>,
}

impl DashboardService {
    pub fn new(
        users: Arc<Repository<User>>,
        stores: Arc<Repository<Store>>,
        products: Arc<Repository<Product>>,
    ) -> Self {
        Self {
            users,
            stores,
            products,
        }
    }

    pub fn summarize(&self, caller: &Caller) -> ServiceResult<DashboardStats> {
        let stores = self.stores.all()?;
        let products = self.products.all()?;

        let stats = match caller.role {
            Role::Admin => DashboardStats::Admin(AdminStats {
                total_users: self.users.all()?.len(),
                total_stores: stores.len(),
                total_products: products.len(),
                active_stores: count_active(&stores),
            }),
            Role::StoreOwner => {
                let owned = policy::owned_store_ids(caller.id, &stores);
                let own_products: Vec<&Product> = products
                    .iter()
                    .filter(|p| owned.contains(&p.store_id))
                    .collect();
                let (total_stock, total_value) = owner_totals(&own_products).ok_or_else(|| {
                    tracing::error!(actor = %caller.id, "owner dashboard totals overflow");
                    ServiceError::unexpected("dashboard totals overflow")
                })?;
                DashboardStats::StoreOwner(OwnerStats {
                    total_stores: owned.len(),
                    total_products: own_products.len(),
                    total_stock,
                    total_value,
                })
            }
            Role::User => DashboardStats::User(ShopperStats {
                available_stores: count_active(&stores),
                available_products: products.len(),
            }),
        };
        Ok(stats)
    }
}

/// Summed stock and stock value, `None` if either overflows.
fn owner_totals(products: &[&Product]) -> Option<(u64, Decimal)> {
    products
        .iter()
        .try_fold((0u64, Decimal::ZERO), |(stock, value), p| {
            Some((
                stock.checked_add(p.stock)?,
                value.checked_add(p.stock_value()?)?,
            ))
        })
}

fn count_active(stores: &[Store]) -> usize {
    stores.iter().filter(|s| s.status == StoreStatus::Active).count()
}
