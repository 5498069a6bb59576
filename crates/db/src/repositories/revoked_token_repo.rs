//! Repository for the `revoked_tokens` table (the refresh-token blacklist).

use aula_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::revoked_token::RevokedToken;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "jti, expires_at, revoked_at";

/// Provides insert, lookup and pruning for revoked token ids.
pub struct RevokedTokenRepo;

impl RevokedTokenRepo {
    /// Record a revoked token id.
    ///
    /// Relies on the primary key for atomicity: concurrent inserts of the same
    /// `jti` leave exactly one row. Returns `true` if this call inserted it.
    pub async fn insert(
        pool: &PgPool,
        jti: &str,
        expires_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO revoked_tokens (jti, expires_at)
             VALUES ($1, $2)
             ON CONFLICT (jti) DO NOTHING",
        )
        .bind(jti)
        .bind(expires_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find a revocation record by token id.
    pub async fn find(pool: &PgPool, jti: &str) -> Result<Option<RevokedToken>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM revoked_tokens WHERE jti = $1");
        sqlx::query_as::<_, RevokedToken>(&query)
            .bind(jti)
            .fetch_optional(pool)
            .await
    }

    /// Whether `jti` has been revoked.
    pub async fn exists(pool: &PgPool, jti: &str) -> Result<bool, sqlx::Error> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM revoked_tokens WHERE jti = $1)")
                .bind(jti)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// Delete records whose token expired at or before `cutoff`. Returns the count deleted.
    pub async fn delete_expired(pool: &PgPool, cutoff: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at <= $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
