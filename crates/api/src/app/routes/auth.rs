use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;

use storedesk_auth::{AuthSession, Caller, PublicUser, Registration};
use storedesk_infra::Services;

use super::common::{blocking, json_body};
use crate::app::errors::ApiError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login(
    Extension(services): Extension<Services>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthSession>, ApiError> {
    let body = json_body(payload)?;
    let session = blocking(move || services.auth.login(&body.email, &body.password)).await?;
    Ok(Json(session))
}

pub async fn register(
    Extension(services): Extension<Services>,
    payload: Result<Json<Registration>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthSession>), ApiError> {
    let body = json_body(payload)?;
    let session = blocking(move || services.auth.register(body)).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn me(
    Extension(services): Extension<Services>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<PublicUser>, ApiError> {
    let profile = blocking(move || services.auth.profile(&caller)).await?;
    Ok(Json(profile))
}
