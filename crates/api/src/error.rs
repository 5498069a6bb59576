use aula_core::error::CoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::messages;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses of
/// the form `{ "error": <text>, "code": <kind> }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `aula_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Authentication is required or the presented credential was rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A request body that could not be read or parsed.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => {
                let status = match core {
                    CoreError::MissingFields(_)
                    | CoreError::TokenInvalid
                    | CoreError::TokenExpired
                    | CoreError::LogoutFailed => StatusCode::BAD_REQUEST,
                    CoreError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                    CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
                    CoreError::Store(msg) | CoreError::Internal(msg) => {
                        tracing::error!(error = %msg, "Internal core error");
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, core.code(), messages::core_error(core))
            }

            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
