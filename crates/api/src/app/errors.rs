use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use logihub_assistant::AssistantError;
use logihub_auth::{AuthError, AuthzError, TokenError};
use logihub_core::DomainError;
use logihub_infra::DataError;

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

pub fn domain_error_to_response(err: DomainError) -> Response {
    let status = match &err {
        DomainError::Validation(_) | DomainError::InvalidId(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::InvariantViolation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
    };
    let message = match &err {
        DomainError::Validation(m)
        | DomainError::InvariantViolation(m)
        | DomainError::InvalidId(m)
        | DomainError::NotFound(m)
        | DomainError::Conflict(m) => m.clone(),
        DomainError::Unauthorized => "unauthorized".to_string(),
    };
    json_error(status, err.code(), message)
}

pub fn data_error_to_response(err: DataError) -> Response {
    match err {
        DataError::Domain(e) => domain_error_to_response(e),
    }
}

pub fn forbidden(err: AuthzError) -> Response {
    json_error(StatusCode::FORBIDDEN, "forbidden", err.to_string())
}

pub fn auth_error_to_response(err: AuthError) -> Response {
    json_error(StatusCode::UNAUTHORIZED, "invalid_credentials", err.to_string())
}

pub fn token_error_to_response(err: TokenError) -> Response {
    match err {
        TokenError::Signing(msg) => json_error(StatusCode::INTERNAL_SERVER_ERROR, "token_error", msg),
        other => json_error(StatusCode::UNAUTHORIZED, "unauthorized", other.to_string()),
    }
}

pub fn assistant_error_to_response(err: AssistantError) -> Response {
    match err {
        AssistantError::EmptyPrompt => json_error(StatusCode::BAD_REQUEST, "validation_error", "prompt is required"),
        AssistantError::InvalidData(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_data", msg),
        AssistantError::Llm(e) => json_error(StatusCode::BAD_GATEWAY, "upstream_error", e.to_string()),
    }
}

/// The assistant function reports every failure as `500 {error}`.
pub fn function_error(message: impl Into<String>) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(json!({ "error": message.into() }))).into_response()
}
