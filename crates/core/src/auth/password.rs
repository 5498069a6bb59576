//! Argon2id password hashing and verification.
//!
//! All password hashes use the Argon2id variant with a cryptographically random
//! salt generated via [`OsRng`]. The PHC string format is used for storage so
//! that algorithm parameters and salt are embedded in the hash itself.
//! Verification is constant-time in the argon2 crate.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::identity::Identity;

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string (includes algorithm, params, salt, and hash).
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default(); // Argon2id with default params
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted Argon2id hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Check `plaintext` against an identity's stored credential.
///
/// A stored hash that cannot be parsed never matches; the fault is logged.
pub fn verify_identity_password(identity: &Identity, plaintext: &str) -> bool {
    match verify_password(plaintext, &identity.password_hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::error!(user_id = identity.id, error = %e, "Stored password hash is unusable");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::Role;

    #[test]
    fn test_hash_and_verify() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing should succeed");

        // The hash must be a valid PHC string starting with the argon2id identifier.
        assert!(
            hash.starts_with("$argon2id$"),
            "expected argon2id PHC prefix"
        );

        let verified = verify_password(password, &hash).expect("verify should succeed");
        assert!(verified, "correct password should verify as true");
    }

    #[test]
    fn test_wrong_password_fails() {
        let hash = hash_password("real-password").expect("hashing should succeed");
        let verified = verify_password("wrong-password", &hash).expect("verify should succeed");
        assert!(!verified, "wrong password should verify as false");
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let a = hash_password("same").expect("hashing should succeed");
        let b = hash_password("same").expect("hashing should succeed");
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_stored_hash_never_matches() {
        let identity = Identity {
            id: 1,
            username: "broken".into(),
            email: "broken@example.edu".into(),
            password_hash: "not-a-phc-string".into(),
            role: Role::Student,
            institution_id: None,
            is_active: true,
        };
        assert!(!verify_identity_password(&identity, "anything"));
    }
}
