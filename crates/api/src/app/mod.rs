//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: persistence and service construction from config
//! - `routes/`: HTTP handlers, one file per resource
//! - `errors.rs`: `ServiceError` → status code and JSON body

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use storedesk_infra::Services;

use crate::middleware;

pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router; everything is served under `/api`.
pub fn build_app(services: Services) -> Router {
    let auth_state = middleware::AuthState {
        auth: services.auth.clone(),
    };

    let protected = routes::protected_router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    let api = Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::public_router())
        .merge(protected)
        .layer(Extension(services));

    Router::new().nest("/api", api).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}
