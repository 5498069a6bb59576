//! In-memory store implementations.
//!
//! Used by the test suites and for running the API without a database. Both
//! stores are safe to share across tasks behind an `Arc`.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::auth::store::{CredentialStore, RevocationStore};
use crate::error::CoreResult;
use crate::identity::Identity;
use crate::types::{DbId, Timestamp};

/// Credential store backed by a map keyed on identity id.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    users: RwLock<BTreeMap<DbId, Identity>>,
}

impl MemoryCredentialStore {
    /// Build a store pre-populated with `identities`.
    ///
    /// A later identity with the same id replaces an earlier one.
    pub fn with_identities(identities: impl IntoIterator<Item = Identity>) -> Self {
        let users = identities.into_iter().map(|i| (i.id, i)).collect();
        Self {
            users: RwLock::new(users),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> CoreResult<Option<Identity>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<Identity>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn list_by_institution(&self, institution_id: DbId) -> CoreResult<Vec<Identity>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .filter(|u| u.institution_id == Some(institution_id))
            .cloned()
            .collect())
    }
}

/// Revocation store backed by a `jti -> expires_at` map.
#[derive(Debug, Default)]
pub struct MemoryRevocationStore {
    revoked: RwLock<HashMap<String, Timestamp>>,
}

impl MemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ids currently recorded.
    pub async fn len(&self) -> usize {
        self.revoked.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.revoked.read().await.is_empty()
    }
}

#[async_trait]
impl RevocationStore for MemoryRevocationStore {
    async fn revoke(&self, jti: &str, expires_at: Timestamp) -> CoreResult<bool> {
        let mut revoked = self.revoked.write().await;
        if revoked.contains_key(jti) {
            return Ok(false);
        }
        revoked.insert(jti.to_string(), expires_at);
        Ok(true)
    }

    async fn is_revoked(&self, jti: &str) -> CoreResult<bool> {
        Ok(self.revoked.read().await.contains_key(jti))
    }

    async fn prune_expired(&self, now: Timestamp) -> CoreResult<u64> {
        let mut revoked = self.revoked.write().await;
        let before = revoked.len();
        revoked.retain(|_, expires_at| *expires_at > now);
        Ok((before - revoked.len()) as u64)
    }
}
