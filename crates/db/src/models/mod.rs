//! Row structs and request DTOs.
//!
//! Each submodule contains:
//! - `FromRow` + `Serialize` structs matching the table rows
//! - Composite read models with eagerly loaded children
//! - `Deserialize` DTOs for create and update payloads

pub mod building;
pub mod task;
