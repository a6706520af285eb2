//! Building and building-category models.
//!
//! Building payloads use camelCase keys (`thumbnailPath`, `imagePath`) to
//! match what the client application sends.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use village_core::types::{DbId, Timestamp};

use crate::models::task::TaskWithBuilding;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `buildings` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub thumbnail_path: String,
    pub image_path: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `building_categories` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingCategory {
    pub id: DbId,
    pub building_id: DbId,
    pub text: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A building with its categories and tasks loaded.
///
/// Serializes flat: the building's columns plus `categories` and `tasks`
/// arrays, which are always present (possibly empty).
#[derive(Debug, Clone, Serialize)]
pub struct BuildingDetail {
    #[serde(flatten)]
    pub building: Building,
    pub categories: Vec<BuildingCategory>,
    pub tasks: Vec<TaskWithBuilding>,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a building together with its category labels.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBuilding {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub categories: Vec<String>,
    pub thumbnail_path: String,
    pub image_path: String,
}

/// DTO for a full-replace update.
///
/// All four scalar fields are overwritten and the category set is replaced
/// with `categories`; an empty list clears it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBuilding {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub categories: Vec<String>,
    pub thumbnail_path: String,
    pub image_path: String,
}
