//! Row models and DTOs, one module per table.

pub mod institution;
pub mod revoked_token;
pub mod user;
