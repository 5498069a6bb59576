//! Authentication and authorization primitives.
//!
//! - [`store`] -- credential and revocation store traits.
//! - [`memory`] -- in-memory store implementations.
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`authenticator`] -- username/password verification.
//! - [`token`] -- access/refresh token issuance, validation and revocation.
//! - [`scope`] -- role and institution scoped visibility.
//! - [`session`] -- the login/logout/refresh/self/list orchestration layer.

pub mod authenticator;
pub mod memory;
pub mod password;
pub mod scope;
pub mod session;
pub mod store;
pub mod token;
