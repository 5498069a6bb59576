//! Aula API server library.
//!
//! Exposes the core building blocks (config, state, error handling, routes,
//! background jobs) so integration tests and the binary entrypoint can both
//! access them.

pub mod background;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod messages;
pub mod middleware;
pub mod routes;
pub mod state;
