//! Village API server library.
//!
//! Exposes the building blocks (config, state, error handling, extractors,
//! handlers, routes, lifecycle) so integration tests and the binary
//! entrypoint share the exact same wiring.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod lifecycle;
pub mod router;
pub mod routes;
pub mod state;
