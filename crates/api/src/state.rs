use std::sync::Arc;

use aula_core::auth::session::SessionController;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Login/logout/refresh/scoping over the configured stores.
    pub sessions: Arc<SessionController>,
}
