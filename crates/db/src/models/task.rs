//! Task models. Task payloads use snake_case keys (`building_id`,
//! `is_completed`).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use village_core::types::{DbId, Timestamp};

use crate::models::building::Building;

/// A row from the `tasks` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub building_id: DbId,
    pub is_completed: bool,
    /// Set when the task is marked complete, cleared when it is reopened.
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A task with a non-owning copy of its parent building.
///
/// `building` is only populated by reads that load it (task create, task
/// list, building list); it is omitted from the JSON otherwise.
#[derive(Debug, Clone, Serialize)]
pub struct TaskWithBuilding {
    #[serde(flatten)]
    pub task: Task,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building: Option<Building>,
}

/// DTO for creating a task under an existing building.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub name: String,
    pub description: String,
    pub building_id: DbId,
    #[serde(default)]
    pub is_completed: bool,
}

/// DTO for a full-replace update of a task's scalar fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTask {
    pub name: String,
    pub description: String,
    pub building_id: DbId,
    #[serde(default)]
    pub is_completed: bool,
}
