//! Domain core of the Aula identity service.
//!
//! - [`identity`] -- identities and their public projection.
//! - [`roles`] -- institution roles.
//! - [`error`] -- the domain error taxonomy.
//! - [`auth`] -- credential verification, token lifecycle and access scoping.

pub mod auth;
pub mod error;
pub mod identity;
pub mod roles;
pub mod types;
