use std::str::FromStr;

use axum::{Json, extract::rejection::JsonRejection};
use serde_json::{Value, json};

use storedesk_core::{ServiceError, ServiceResult};

use crate::app::errors::ApiError;

/// Run a service call on the blocking pool; services do file IO and hashing.
pub async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServiceError::unexpected(format!("worker task failed: {e}")))?
        .map_err(ApiError::from)
}

/// Unwrap a JSON body, turning malformed input into a validation error.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError(ServiceError::validation(rejection.body_text())))
}

/// Ids that do not parse cannot name an existing record.
pub fn path_id<T: FromStr>(raw: &str) -> Result<T, ApiError> {
    raw.parse::<T>().map_err(|_| ApiError(ServiceError::NotFound))
}

pub fn deleted(what: &str) -> Json<Value> {
    Json(json!({ "message": format!("{what} deleted successfully") }))
}
