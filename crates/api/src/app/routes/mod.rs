use axum::{
    Router,
    routing::{delete, get, post},
};

pub mod auth;
pub mod common;
pub mod dashboard;
pub mod products;
pub mod stores;
pub mod system;
pub mod users;

/// Routes reachable without a token.
pub fn public_router() -> Router {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
}

/// Routes that require a resolved caller.
pub fn protected_router() -> Router {
    Router::new()
        .route("/auth/me", get(auth::me))
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/:id", delete(users::delete_user))
        .nest("/stores", stores::router())
        .nest("/products", products::router())
        .route("/dashboard/stats", get(dashboard::stats))
}
