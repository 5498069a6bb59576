//! Repository for the `institutions` table.

use aula_core::types::DbId;
use sqlx::PgPool;

use crate::models::institution::{CreateInstitution, Institution};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for institutions.
pub struct InstitutionRepo;

impl InstitutionRepo {
    /// Insert a new institution, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateInstitution,
    ) -> Result<Institution, sqlx::Error> {
        let query = format!(
            "INSERT INTO institutions (name)
             VALUES ($1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Institution>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find an institution by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Institution>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM institutions WHERE id = $1");
        sqlx::query_as::<_, Institution>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
