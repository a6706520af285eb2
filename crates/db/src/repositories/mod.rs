//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument. "No such row" is
//! reported as `Option::None` or `false`; callers decide how to surface it.

pub mod building_repo;
pub mod task_repo;

pub use building_repo::BuildingRepo;
pub use task_repo::TaskRepo;
