use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use serde_json::Value;

use storedesk_auth::Caller;
use storedesk_catalog::{Product, ProductDraft, ProductPatch};
use storedesk_core::ProductId;
use storedesk_infra::Services;

use super::common::{blocking, deleted, json_body, path_id};
use crate::app::errors::ApiError;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/:id", get(get_product).put(update_product).delete(delete_product))
}

pub async fn list_products(
    Extension(services): Extension<Services>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = blocking(move || services.products.list(&caller)).await?;
    Ok(Json(products))
}

pub async fn get_product(
    Extension(services): Extension<Services>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id: ProductId = path_id(&id)?;
    let product = blocking(move || services.products.get(&caller, id)).await?;
    Ok(Json(product))
}

pub async fn create_product(
    Extension(services): Extension<Services>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<ProductDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let body = json_body(payload)?;
    let product = blocking(move || services.products.create(&caller, body)).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    Extension(services): Extension<Services>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let id: ProductId = path_id(&id)?;
    let patch = json_body(payload)?;
    let product = blocking(move || services.products.update(&caller, id, patch)).await?;
    Ok(Json(product))
}

pub async fn delete_product(
    Extension(services): Extension<Services>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id: ProductId = path_id(&id)?;
    blocking(move || services.products.delete(&caller, id)).await?;
    Ok(deleted("Product"))
}
