//! Repository for the `users` table.

use aula_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, role, institution_id, \
                        is_active, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, role, institution_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(input.institution_id)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// List the users of one institution ordered by ID ascending.
    pub async fn list_by_institution(
        pool: &PgPool,
        institution_id: DbId,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE institution_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(institution_id)
            .fetch_all(pool)
            .await
    }

    /// Soft-deactivate a user by setting `is_active = false`.
    ///
    /// Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE users SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
