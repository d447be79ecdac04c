use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, rejection::JsonRejection},
    http::{HeaderName, Method, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use tower_http::cors::{Any, CorsLayer};

use logihub_assistant::{AskRequest, ProxyRequest, WarehouseData};
use logihub_auth::Permission;

use crate::app::errors;
use crate::app::routes::common::CmdAuth;
use crate::app::services::AppServices;
use crate::context::SessionContext;

/// Authenticated widget endpoint.
pub fn router() -> Router {
    Router::new().route("/ask", post(ask))
}

/// Public chat-completion proxy, callable cross-origin.
pub fn function_router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ]);

    Router::new().route("/functions/ai-assistant", post(ai_assistant_function).layer(cors))
}

/// POST /assistant/ask `{ prompt, page? }`
///
/// Sends the current data snapshot to the configured model, or answers from
/// the built-in rules.
pub async fn ask(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<AskRequest>,
) -> Response {
    let request = match CmdAuth::new(body, Permission::ASSISTANT_USE).authorize(&session) {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    let data: WarehouseData = services.data.snapshot().await.into();
    match services.assistant.ask(request, &data, Utc::now()).await {
        Ok(outcome) => Json(outcome).into_response(),
        Err(e) => errors::assistant_error_to_response(e),
    }
}

/// POST /functions/ai-assistant `{ prompt, data, timestamp }`
pub async fn ai_assistant_function(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<ProxyRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::function_error(rejection.body_text()),
    };
    let Some(proxy) = &services.proxy else {
        return errors::function_error("assistant API key is not configured");
    };
    match proxy.handle(request, Utc::now()).await {
        Ok(reply) => Json(reply).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "assistant function failed");
            errors::function_error(e.to_string())
        }
    }
}
