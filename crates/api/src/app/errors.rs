use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use storedesk_core::ServiceError;

/// A `ServiceError` on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        service_error_to_response(self.0)
    }
}

pub fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
        ServiceError::Unauthenticated | ServiceError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        ServiceError::Forbidden => StatusCode::FORBIDDEN,
        ServiceError::NotFound => StatusCode::NOT_FOUND,
        ServiceError::DuplicateEmail => StatusCode::CONFLICT,
        ServiceError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn service_error_to_response(err: ServiceError) -> Response {
    let status = status_for(&err);
    let message = match &err {
        ServiceError::ValidationFailed(msg) => msg.clone(),
        ServiceError::Unexpected(detail) => {
            tracing::error!(detail = %detail, "request failed unexpectedly");
            "internal server error".to_string()
        }
        other => other.to_string(),
    };
    json_error(status, err.code(), message)
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
