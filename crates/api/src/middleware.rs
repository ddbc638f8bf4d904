use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};

use storedesk_auth::AuthService;

use crate::app::errors::ApiError;

#[derive(Clone)]
pub struct AuthState {
    pub auth: Arc<AuthService>,
}

/// Resolve the bearer token into a `Caller` request extension.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let caller = match state.auth.authenticate(extract_bearer(req.headers())) {
        Ok(caller) => caller,
        Err(e) => return ApiError::from(e).into_response(),
    };

    req.extensions_mut().insert(caller);
    next.run(req).await
}

/// The token after `Bearer `, if the header is present and well-formed.
fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
