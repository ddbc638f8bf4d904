use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storedesk_core::{Entity, ProductId, ServiceError, ServiceResult, StoreId};

use crate::input::{NumericInput, required, supplied};

/// Image used when a product is created without one.
pub const DEFAULT_PRODUCT_IMAGE: &str =
    "https://images.pexels.com/photos/230544/pexels-photo-230544.jpeg";

/// A product listed in one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: u64,
    pub category: String,
    pub store_id: StoreId,
    pub image: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Product {
    /// `price × stock` for this product, `None` on overflow.
    pub fn stock_value(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.stock))
    }

    pub fn create(draft: ValidProductDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: ProductId::new(),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            stock: draft.stock,
            category: draft.category,
            store_id: draft.store_id,
            image: draft.image,
            created_at: now,
            updated_at: None,
        }
    }

    /// Merge supplied fields and stamp `updated_at`.
    ///
    /// Numeric fields are parsed up front; a rejected patch changes nothing.
    pub fn apply_patch(&mut self, patch: &ProductPatch, now: DateTime<Utc>) -> ServiceResult<()> {
        let price = patch.price.as_ref().map(|p| p.to_price("price")).transpose()?;
        let stock = patch.stock.as_ref().map(|s| s.to_count("stock")).transpose()?;

        if let Some(name) = supplied(&patch.name) {
            self.name = name.to_string();
        }
        if let Some(description) = supplied(&patch.description) {
            self.description = description.to_string();
        }
        if let Some(category) = supplied(&patch.category) {
            self.category = category.to_string();
        }
        if let Some(image) = supplied(&patch.image) {
            self.image = image.to_string();
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(stock) = stock {
            self.stock = stock;
        }
        self.updated_at = Some(now);
        Ok(())
    }
}

/// Create request for a product, as received.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<NumericInput>,
    pub stock: Option<NumericInput>,
    pub category: Option<String>,
    pub store_id: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidProductDraft {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: u64,
    pub category: String,
    pub store_id: StoreId,
    pub image: String,
}

impl ProductDraft {
    pub fn validate(&self) -> ServiceResult<ValidProductDraft> {
        let name = required(&self.name, "name")?.to_string();
        let description = required(&self.description, "description")?.to_string();
        let price = self
            .price
            .as_ref()
            .ok_or_else(|| ServiceError::validation("price is required"))?
            .to_price("price")?;
        let stock = self
            .stock
            .as_ref()
            .ok_or_else(|| ServiceError::validation("stock is required"))?
            .to_count("stock")?;
        let category = required(&self.category, "category")?.to_string();
        let store_id = required(&self.store_id, "storeId")?.parse::<StoreId>()?;
        let image = supplied(&self.image)
            .unwrap_or(DEFAULT_PRODUCT_IMAGE)
            .to_string();

        Ok(ValidProductDraft {
            name,
            description,
            price,
            stock,
            category,
            store_id,
            image,
        })
    }
}

/// Partial update for a product. The owning store cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<NumericInput>,
    pub stock: Option<NumericInput>,
    pub category: Option<String>,
    pub image: Option<String>,
}
