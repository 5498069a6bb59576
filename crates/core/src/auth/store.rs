//! Store traits injected into the auth components.
//!
//! Implementations live in `aula_db` (PostgreSQL) and [`super::memory`].

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::identity::Identity;
use crate::types::{DbId, Timestamp};

/// Read access to user records.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find an identity by username (case-sensitive).
    async fn find_by_username(&self, username: &str) -> CoreResult<Option<Identity>>;

    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<Identity>>;

    /// All identities belonging to an institution, ordered by id.
    async fn list_by_institution(&self, institution_id: DbId) -> CoreResult<Vec<Identity>>;
}

/// The set of revoked refresh-token ids.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Record `jti` as revoked until `expires_at`.
    ///
    /// Must be an atomic set-add. Returns `true` if this call recorded the id
    /// and `false` if it was already present.
    async fn revoke(&self, jti: &str, expires_at: Timestamp) -> CoreResult<bool>;

    async fn is_revoked(&self, jti: &str) -> CoreResult<bool>;

    /// Drop entries whose token expired at or before `now`. Returns the count removed.
    async fn prune_expired(&self, now: Timestamp) -> CoreResult<u64>;
}
