//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`. All require auth.
///
/// ```text
/// GET /       -> list_users
/// GET /me     -> me
/// GET /{id}   -> get_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users))
        .route("/me", get(users::me))
        .route("/{id}", get(users::get_user))
}
