use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use serde_json::Value;

use storedesk_auth::Caller;
use storedesk_catalog::{Store, StoreDraft, StorePatch};
use storedesk_core::StoreId;
use storedesk_infra::Services;

use super::common::{blocking, deleted, json_body, path_id};
use crate::app::errors::ApiError;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_stores).post(create_store))
        .route("/:id", get(get_store).put(update_store).delete(delete_store))
}

pub async fn list_stores(
    Extension(services): Extension<Services>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<Vec<Store>>, ApiError> {
    let stores = blocking(move || services.stores.list(&caller)).await?;
    Ok(Json(stores))
}

pub async fn get_store(
    Extension(services): Extension<Services>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> Result<Json<Store>, ApiError> {
    let id: StoreId = path_id(&id)?;
    let store = blocking(move || services.stores.get(&caller, id)).await?;
    Ok(Json(store))
}

pub async fn create_store(
    Extension(services): Extension<Services>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<StoreDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Store>), ApiError> {
    let body = json_body(payload)?;
    let store = blocking(move || services.stores.create(&caller, body)).await?;
    Ok((StatusCode::CREATED, Json(store)))
}

pub async fn update_store(
    Extension(services): Extension<Services>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    payload: Result<Json<StorePatch>, JsonRejection>,
) -> Result<Json<Store>, ApiError> {
    let id: StoreId = path_id(&id)?;
    let patch = json_body(payload)?;
    let store = blocking(move || services.stores.update(&caller, id, patch)).await?;
    Ok(Json(store))
}

pub async fn delete_store(
    Extension(services): Extension<Services>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id: StoreId = path_id(&id)?;
    blocking(move || services.stores.delete(&caller, id)).await?;
    Ok(deleted("Store"))
}
