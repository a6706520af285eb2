//! Request handlers for buildings and tasks.
//!
//! Handlers validate input through `village_core`, delegate to the
//! repositories in `village_db`, and map "no such row" results to
//! [`CoreError::NotFound`](village_core::error::CoreError::NotFound).

pub mod building;
pub mod task;
