use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;

use crate::app::dto::{LoginRequest, LoginResponse, SessionResponse};
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::SessionContext;

/// Session endpoints behind the auth middleware. `/auth/login` is public.
pub fn router() -> Router {
    Router::new()
        .route("/session", get(session))
        .route("/logout", post(logout))
}

/// POST /auth/login
pub async fn login(Extension(services): Extension<Arc<AppServices>>, Json(body): Json<LoginRequest>) -> Response {
    let user = match services.users.authenticate(body.email.trim(), &body.password) {
        Ok(u) => u,
        Err(e) => return errors::auth_error_to_response(e),
    };

    match services.tokens.issue(&user, Utc::now()) {
        Ok((token, claims)) => {
            tracing::info!(user_id = %user.id, role = %user.role, "session opened");
            Json(LoginResponse { token, user, expires_at: claims.expires_at }).into_response()
        }
        Err(e) => errors::token_error_to_response(e),
    }
}

/// GET /auth/session
pub async fn session(Extension(session): Extension<SessionContext>) -> Json<SessionResponse> {
    Json(SessionResponse { user: session.user(), expires_at: session.claims().expires_at })
}

/// POST /auth/logout
pub async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> StatusCode {
    services.tokens.revoke(session.claims(), Utc::now());
    tracing::info!(user_id = session.user_id(), "session closed");
    StatusCode::NO_CONTENT
}
