pub mod auth;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/me                                         current user (requires auth)
///
/// /users                                           list visible users
/// /users/me                                        current user
/// /users/{id}                                      get one visible user
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout, me).
        .nest("/auth", auth::router())
        // Role/institution scoped user listing.
        .nest("/users", users::router())
}
