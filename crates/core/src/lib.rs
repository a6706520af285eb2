//! Domain layer for the village API.
//!
//! Holds the shared id/timestamp aliases, the error taxonomy, and the input
//! rules for buildings and tasks. Nothing here touches the database or HTTP.

pub mod building;
pub mod error;
pub mod task;
pub mod types;
pub mod validation;
