//! Identities and their public projection.

use std::fmt;

use serde::Serialize;

use crate::roles::Role;
use crate::types::DbId;

/// A user known to the credential store.
///
/// Carries the password hash, so it has no `Serialize` impl and its `Debug`
/// output redacts the hash. Use [`PublicIdentity`] for anything leaving the
/// process.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: DbId,
    pub username: String,
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    pub role: Role,
    pub institution_id: Option<DbId>,
    pub is_active: bool,
}

impl Identity {
    pub fn is_director(&self) -> bool {
        self.role == Role::Director
    }

    /// Projection safe to return to clients.
    pub fn public_view(&self) -> PublicIdentity {
        PublicIdentity::from(self)
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"[redacted]")
            .field("role", &self.role)
            .field("institution_id", &self.institution_id)
            .field("is_active", &self.is_active)
            .finish()
    }
}

/// Identity fields exposed in API responses (no password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicIdentity {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub institution_id: Option<DbId>,
}

impl From<&Identity> for PublicIdentity {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            username: identity.username.clone(),
            email: identity.email.clone(),
            role: identity.role,
            institution_id: identity.institution_id,
        }
    }
}
