//! PostgreSQL-backed implementations of the core store traits.

use async_trait::async_trait;
use aula_core::auth::store::{CredentialStore, RevocationStore};
use aula_core::error::{CoreError, CoreResult};
use aula_core::identity::Identity;
use aula_core::types::{DbId, Timestamp};

use crate::repositories::{RevokedTokenRepo, UserRepo};
use crate::DbPool;

/// Credential and revocation store over a shared connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn store_error(err: sqlx::Error) -> CoreError {
    tracing::warn!(error = %err, "Store query failed");
    CoreError::Store(err.to_string())
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn find_by_username(&self, username: &str) -> CoreResult<Option<Identity>> {
        UserRepo::find_by_username(&self.pool, username)
            .await
            .map_err(store_error)?
            .map(Identity::try_from)
            .transpose()
    }

    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<Identity>> {
        UserRepo::find_by_id(&self.pool, id)
            .await
            .map_err(store_error)?
            .map(Identity::try_from)
            .transpose()
    }

    async fn list_by_institution(&self, institution_id: DbId) -> CoreResult<Vec<Identity>> {
        UserRepo::list_by_institution(&self.pool, institution_id)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(Identity::try_from)
            .collect()
    }
}

#[async_trait]
impl RevocationStore for PgStore {
    async fn revoke(&self, jti: &str, expires_at: Timestamp) -> CoreResult<bool> {
        RevokedTokenRepo::insert(&self.pool, jti, expires_at)
            .await
            .map_err(store_error)
    }

    async fn is_revoked(&self, jti: &str) -> CoreResult<bool> {
        RevokedTokenRepo::exists(&self.pool, jti)
            .await
            .map_err(store_error)
    }

    async fn prune_expired(&self, now: Timestamp) -> CoreResult<u64> {
        RevokedTokenRepo::delete_expired(&self.pool, now)
            .await
            .map_err(store_error)
    }
}
