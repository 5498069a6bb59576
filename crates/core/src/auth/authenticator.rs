//! Username/password verification.

use std::sync::{Arc, OnceLock};

use crate::auth::password::{hash_password, verify_identity_password, verify_password};
use crate::auth::store::CredentialStore;
use crate::error::{CoreError, CoreResult, FieldError};
use crate::identity::Identity;

/// Login input as received. `None` means the field was absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Credentials<'a> {
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
}

impl<'a> Credentials<'a> {
    pub fn new(username: &'a str, password: &'a str) -> Self {
        Self {
            username: Some(username),
            password: Some(password),
        }
    }

    /// Check presence of both fields, reporting every problem at once.
    fn require(&self) -> CoreResult<(&'a str, &'a str)> {
        let mut problems = Vec::new();
        let username = check_field("username", self.username, &mut problems);
        let password = check_field("password", self.password, &mut problems);

        match (username, password) {
            (Some(u), Some(p)) => Ok((u, p)),
            _ => Err(CoreError::MissingFields(problems)),
        }
    }
}

fn check_field<'a>(
    name: &'static str,
    value: Option<&'a str>,
    problems: &mut Vec<FieldError>,
) -> Option<&'a str> {
    match value {
        None => {
            problems.push(FieldError::required(name));
            None
        }
        Some(v) if v.trim().is_empty() => {
            problems.push(FieldError::blank(name));
            None
        }
        Some(v) => Some(v),
    }
}

/// Verifies credentials against a [`CredentialStore`].
#[derive(Clone)]
pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
}

impl Authenticator {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Return the identity owning `credentials`.
    ///
    /// Unknown usernames, wrong passwords and inactive accounts all fail with
    /// the same [`CoreError::InvalidCredentials`].
    pub async fn authenticate(&self, credentials: Credentials<'_>) -> CoreResult<Identity> {
        let (username, password) = credentials.require()?;

        let Some(identity) = self.store.find_by_username(username).await? else {
            // Burn the same hashing cost as a real check.
            let _ = verify_password(password, dummy_hash());
            tracing::debug!("Login rejected: unknown username");
            return Err(CoreError::InvalidCredentials);
        };

        if !verify_identity_password(&identity, password) {
            tracing::debug!(user_id = identity.id, "Login rejected: wrong password");
            return Err(CoreError::InvalidCredentials);
        }

        if !identity.is_active {
            tracing::info!(user_id = identity.id, "Login rejected: account inactive");
            return Err(CoreError::InvalidCredentials);
        }

        Ok(identity)
    }
}

fn dummy_hash() -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| {
        hash_password("aula-timing-equalizer").unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not build dummy password hash");
            String::new()
        })
    })
}
