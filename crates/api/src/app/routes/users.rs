use axum::{
    Json,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;

use storedesk_auth::{Caller, PublicUser, Registration};
use storedesk_core::UserId;
use storedesk_infra::Services;

use super::common::{blocking, deleted, json_body, path_id};
use crate::app::errors::ApiError;

pub async fn list_users(
    Extension(services): Extension<Services>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let users = blocking(move || services.users.list(&caller)).await?;
    Ok(Json(users))
}

pub async fn create_user(
    Extension(services): Extension<Services>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<Registration>, JsonRejection>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    let body = json_body(payload)?;
    let user = blocking(move || services.users.create(&caller, body)).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn delete_user(
    Extension(services): Extension<Services>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id: UserId = path_id(&id)?;
    blocking(move || services.users.delete(&caller, id)).await?;
    Ok(deleted("User"))
}
