use axum::{
    Router,
    routing::{get, post},
};

pub mod assistant;
pub mod auth;
pub mod common;
pub mod dashboard;
pub mod inventory;
pub mod maintenance;
pub mod performance;
pub mod shipments;
pub mod space;
pub mod system;

/// Endpoints reachable without a session.
pub fn public_router() -> Router {
    Router::new()
        .route("/auth/login", post(auth::login))
        .merge(assistant::function_router())
}

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/stream", get(system::stream))
        .route("/dashboard", get(dashboard::overview))
        .nest("/auth", auth::router())
        .nest("/inventory", inventory::router())
        .nest("/shipments", shipments::router())
        .nest("/maintenance", maintenance::router())
        .nest("/space", space::router())
        .nest("/performance", performance::router())
        .nest("/assistant", assistant::router())
}
