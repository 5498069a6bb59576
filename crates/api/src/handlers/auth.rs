//! Handlers for the `/auth` resource (login, refresh, logout, me).

use aula_core::auth::authenticator::Credentials;
use aula_core::auth::session::LoginOutcome;
use aula_core::auth::token::TokenPair;
use aula_core::error::{CoreError, FieldError};
use aula_core::identity::PublicIdentity;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::messages;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
///
/// Fields are optional so that absent and blank values can be reported
/// separately.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Default, Deserialize)]
pub struct RefreshRequest {
    pub refresh: Option<String>,
}

/// Request body for `POST /auth/logout`. Omitting `refresh`, or the whole
/// body, is allowed.
#[derive(Debug, Default, Deserialize)]
pub struct LogoutRequest {
    pub refresh: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Returns access and refresh tokens
/// plus the public view of the user.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> AppResult<Json<LoginOutcome>> {
    let credentials = Credentials {
        username: input.username.as_deref(),
        password: input.password.as_deref(),
    };
    let outcome = state.sessions.login(credentials).await?;
    Ok(Json(outcome))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for a new pair. The presented token is revoked.
pub async fn refresh(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<RefreshRequest>,
) -> AppResult<Json<TokenPair>> {
    let token = input
        .refresh
        .filter(|t| !t.is_empty())
        .ok_or_else(|| CoreError::MissingFields(vec![FieldError::required("refresh")]))?;

    let pair = state
        .sessions
        .refresh(&token)
        .await
        .map_err(|e| match e {
            CoreError::TokenInvalid | CoreError::TokenExpired => {
                AppError::Unauthorized(messages::TOKEN_INVALID.into())
            }
            other => AppError::Core(other),
        })?;

    Ok(Json(pair))
}

/// POST /api/v1/auth/logout
///
/// Blacklist the supplied refresh token. Succeeds without one.
pub async fn logout(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(input): JsonBody<LogoutRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.sessions.logout(input.refresh.as_deref()).await?;
    tracing::info!(user_id = user.id, "User logged out");

    Ok(Json(MessageResponse {
        message: messages::LOGOUT_SUCCESS,
    }))
}

/// GET /api/v1/auth/me
pub async fn me(State(state): State<AppState>, AuthUser(user): AuthUser) -> Json<PublicIdentity> {
    Json(state.sessions.whoami(&user))
}
