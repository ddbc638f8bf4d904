use std::sync::Arc;

use storedesk_auth::Caller;
use storedesk_catalog::{Product, ProductDraft, ProductPatch, Store, policy};
use storedesk_core::{Clock, ProductId, ServiceError, ServiceResult};

use crate::repository::Repository;

pub struct ProductService {
    products: Arc<Repository<Product>>,
    stores: Arc<Repository<Store>>,
    clock: Arc<dyn Clock>,
}

impl ProductService {
    pub fn new(
        products: Arc<Repository<Product>>,
        stores: Arc<Repository<Store>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            products,
            stores,
            clock,
        }
    }

    pub fn list(&self, caller: &Caller) -> ServiceResult<Vec<Product>> {
        let stores = self.stores.all()?;
        Ok(policy::filter_products(caller, self.products.all()?, &stores))
    }

    pub fn get(&self, caller: &Caller, id: ProductId) -> ServiceResult<Product> {
        let product = self.products.find(&id)?.ok_or(ServiceError::NotFound)?;
        let stores = self.stores.all()?;
        policy::require(policy::can_read_product(caller, &product, &stores))?;
        Ok(product)
    }

    pub fn create(&self, caller: &Caller, draft: ProductDraft) -> ServiceResult<Product> {
        if !policy::can_create(caller) {
            tracing::warn!(actor = %caller.id, role = %caller.role, "product create denied");
            return Err(ServiceError::Forbidden);
        }
        let valid = draft.validate()?;
        let stores = self.stores.all()?;

        if !policy::can_manage_products_in(caller, valid.store_id, &stores) {
            tracing::warn!(actor = %caller.id, store_id = %valid.store_id, "product create denied");
            return Err(ServiceError::Forbidden);
        }
        if !stores.iter().any(|s| s.id == valid.store_id) {
            return Err(ServiceError::validation("storeId does not reference an existing store"));
        }

        let product = self.products.insert(Product::create(valid, self.clock.now()))?;
        tracing::info!(actor = %caller.id, product_id = %product.id, store_id = %product.store_id, "product created");
        Ok(product)
    }

    pub fn update(&self, caller: &Caller, id: ProductId, patch: ProductPatch) -> ServiceResult<Product> {
        let now = self.clock.now();
        let product = self.products.update(&id, |product| {
            self.ensure_can_mutate(caller, product)?;
            product.apply_patch(&patch, now)
        })?;
        tracing::info!(actor = %caller.id, product_id = %id, "product updated");
        Ok(product)
    }

    pub fn delete(&self, caller: &Caller, id: ProductId) -> ServiceResult<Product> {
        let product = self
            .products
            .remove(&id, |product| self.ensure_can_mutate(caller, product))?;
        tracing::info!(actor = %caller.id, product_id = %id, "product deleted");
        Ok(product)
    }

    /// Reads stores without their lock; the product lock is the only one held.
    fn ensure_can_mutate(&self, caller: &Caller, product: &Product) -> ServiceResult<()> {
        let stores = self.stores.all()?;
        if policy::can_mutate_product(caller, product, &stores) {
            Ok(())
        } else {
            tracing::warn!(actor = %caller.id, product_id = %product.id, "product mutation denied");
            Err(ServiceError::Forbidden)
        }
    }
}
