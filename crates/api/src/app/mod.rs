//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: data layer, tokens, assistant
//! - `routes/`: HTTP routes + handlers (one file per dashboard area)
//! - `dto.rs`: request/response DTOs and query parsing
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Largest request body accepted; assistant calls carry the whole data set.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &AppConfig) -> Router {
    router_with(Arc::new(services::build_services(config)))
}

/// Router over already-built services.
pub fn router_with(services: Arc<AppServices>) -> Router {
    let auth_state = middleware::AuthState { tokens: services.tokens.clone() };

    // Protected routes: require a valid session token.
    let protected = routes::router()
        .layer(Extension(services.clone()))
        .layer(axum::middleware::from_fn_with_state(auth_state, middleware::auth_middleware));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::public_router().layer(Extension(services)))
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)),
        )
}

pub use services::AppServices;

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;

    fn post(path: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CONTENT_LENGTH, body.len())
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn body_limit_applies_before_routing() {
        let app = build_app(&AppConfig::default());
        // Larger than the cap, smaller than axum's own 2 MB extractor limit.
        let padding = "x".repeat(MAX_BODY_BYTES + 512 * 1024);
        let body = format!(r#"{{"prompt":"hi","data":{{"padding":"{padding}"}}}}"#);

        let res = app.clone().oneshot(post("/functions/ai-assistant", body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);

        // A normal call still reaches the handler (no key configured → 500).
        let res = app
            .oneshot(post("/functions/ai-assistant", r#"{"prompt":"hi","data":{}}"#.to_string()))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
