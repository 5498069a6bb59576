//! Authentication middleware extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from a Bearer access token.

pub mod auth;
