//! Institution entity model and DTOs.

use aula_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `institutions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Institution {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new institution.
#[derive(Debug, Deserialize)]
pub struct CreateInstitution {
    pub name: String,
}
