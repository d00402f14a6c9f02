use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use shopdesk_ai::{AiError, GenerationError};
use shopdesk_auth::AuthzError;
use shopdesk_core::DomainError;
use shopdesk_inventory::StoreError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn forbidden(err: AuthzError) -> axum::response::Response {
    json_error(StatusCode::FORBIDDEN, "forbidden", err.to_string())
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        DomainError::Validation(_) => json_error(StatusCode::BAD_REQUEST, "validation_error", message),
        DomainError::InvalidId(_) => json_error(StatusCode::BAD_REQUEST, "invalid_id", message),
        DomainError::InvariantViolation(_) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", message)
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
        DomainError::Conflict(_) => json_error(StatusCode::CONFLICT, "conflict", message),
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::Domain(e) => domain_error_to_response(e),
        StoreError::Backend(msg) => {
            tracing::error!(error = %msg, "inventory store failure");
            json_error(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", msg)
        }
    }
}

pub fn ai_error_to_response(err: AiError) -> axum::response::Response {
    match err {
        AiError::InvalidInput(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_input", msg),
        AiError::Generation(e) => {
            tracing::warn!(error = %e, "generation failed");
            let message = e.to_string();
            match e {
                GenerationError::Timeout(_) => {
                    json_error(StatusCode::GATEWAY_TIMEOUT, "generation_timeout", message)
                }
                GenerationError::NotConfigured => {
                    json_error(StatusCode::SERVICE_UNAVAILABLE, "generation_unavailable", message)
                }
                _ => json_error(StatusCode::BAD_GATEWAY, "generation_failed", message),
            }
        }
    }
}
