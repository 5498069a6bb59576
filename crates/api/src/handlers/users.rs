//! Handlers for the `/users` resource.
//!
//! Results are scoped to what the caller may see: a director gets its
//! institution, everyone else only themselves.

use aula_core::identity::PublicIdentity;
use aula_core::types::DbId;
use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> AppResult<Json<Vec<PublicIdentity>>> {
    let users = state.sessions.list_visible(&user).await?;
    Ok(Json(users))
}

/// GET /api/v1/users/me
pub async fn me(State(state): State<AppState>, AuthUser(user): AuthUser) -> Json<PublicIdentity> {
    Json(state.sessions.whoami(&user))
}

/// GET /api/v1/users/{id}
///
/// Returns 404 both for unknown ids and for users outside the caller's scope.
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<PublicIdentity>> {
    let found = state.sessions.retrieve(&user, id).await?;
    Ok(Json(found))
}
