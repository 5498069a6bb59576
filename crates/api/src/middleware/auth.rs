//! Access-token authentication extractor for Axum handlers.

use aula_core::error::CoreError;
use aula_core::identity::Identity;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::messages;
use crate::state::AppState;

/// Authenticated caller resolved from the `Authorization: Bearer` header.
///
/// The identity is re-loaded from the credential store, so a deactivated
/// account is rejected even while its access token is unexpired.
///
/// ```ignore
/// async fn my_handler(AuthUser(user): AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized(messages::CREDENTIALS_NOT_PROVIDED.into()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized(messages::BAD_AUTH_HEADER.into()))?;

        let identity = state
            .sessions
            .authenticate_access(token)
            .await
            .map_err(|e| match e {
                CoreError::TokenInvalid | CoreError::TokenExpired => {
                    AppError::Unauthorized(messages::TOKEN_INVALID.into())
                }
                other => AppError::Core(other),
            })?;

        Ok(AuthUser(identity))
    }
}
