//! User entity model and DTOs.

use aula_core::error::CoreError;
use aula_core::identity::Identity;
use aula_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Convert to [`Identity`] and use its public view for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    /// One of `DIRECTOR`, `TEACHER`, `STUDENT`.
    pub role: String,
    pub institution_id: Option<DbId>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<User> for Identity {
    type Error = CoreError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Identity {
            id: user.id,
            role: user.role.parse()?,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            institution_id: user.institution_id,
            is_active: user.is_active,
        })
    }
}

/// DTO for creating a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub institution_id: Option<DbId>,
}
