//! Revoked refresh-token model.

use aula_core::types::Timestamp;
use sqlx::FromRow;

/// A row from the `revoked_tokens` table.
///
/// `expires_at` is the revoked token's own expiry; once it passes the row can
/// be pruned because the token would fail validation anyway.
#[derive(Debug, Clone, FromRow)]
pub struct RevokedToken {
    pub jti: String,
    pub expires_at: Timestamp,
    pub revoked_at: Timestamp,
}
