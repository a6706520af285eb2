//! Repository for the `buildings` and `building_categories` tables.

use std::collections::HashMap;

use sqlx::{Sqlite, SqlitePool, Transaction};
use village_core::types::DbId;

use crate::models::building::{
    Building, BuildingCategory, BuildingDetail, CreateBuilding, UpdateBuilding,
};
use crate::models::task::TaskWithBuilding;
use crate::repositories::TaskRepo;

/// Column list for the `buildings` table.
pub(crate) const COLUMNS: &str = "id, name, description, thumbnail_path, image_path, created_at, updated_at";

/// Column list for the `building_categories` table.
const CATEGORY_COLUMNS: &str = "id, building_id, text, created_at, updated_at";

/// Provides CRUD operations for buildings and their category sets.
pub struct BuildingRepo;

impl BuildingRepo {
    /// Insert a building and its category labels in one transaction.
    ///
    /// The returned detail carries the freshly stored categories and an empty
    /// task list.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateBuilding,
    ) -> Result<BuildingDetail, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO buildings (name, description, thumbnail_path, image_path) \
             VALUES (?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        );
        let building = sqlx::query_as::<_, Building>(&insert_query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.thumbnail_path)
            .bind(&input.image_path)
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_categories(&mut tx, building.id, &input.categories).await?;

        tx.commit().await?;

        let categories = Self::list_categories(pool, building.id).await?;
        Ok(BuildingDetail {
            building,
            categories,
            tasks: Vec::new(),
        })
    }

    /// Find a building row by ID without loading children.
    pub async fn find_row(pool: &SqlitePool, id: DbId) -> Result<Option<Building>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM buildings WHERE id = ?");
        sqlx::query_as::<_, Building>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a building by ID with its categories and tasks loaded.
    ///
    /// Tasks are returned without their parent building attached.
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<BuildingDetail>, sqlx::Error> {
        let Some(building) = Self::find_row(pool, id).await? else {
            return Ok(None);
        };

        let categories = Self::list_categories(pool, id).await?;
        let tasks = TaskRepo::list_by_building(pool, id)
            .await?
            .into_iter()
            .map(|task| TaskWithBuilding {
                task,
                building: None,
            })
            .collect();

        Ok(Some(BuildingDetail {
            building,
            categories,
            tasks,
        }))
    }

    /// List every building with categories, tasks, and each task's parent
    /// building loaded. Ordered by ID.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<BuildingDetail>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM buildings ORDER BY id");
        let buildings = sqlx::query_as::<_, Building>(&query)
            .fetch_all(pool)
            .await?;

        if buildings.is_empty() {
            return Ok(Vec::new());
        }

        let category_query =
            format!("SELECT {CATEGORY_COLUMNS} FROM building_categories ORDER BY id");
        let mut categories_by_building: HashMap<DbId, Vec<BuildingCategory>> = HashMap::new();
        for category in sqlx::query_as::<_, BuildingCategory>(&category_query)
            .fetch_all(pool)
            .await?
        {
            categories_by_building
                .entry(category.building_id)
                .or_default()
                .push(category);
        }

        let mut tasks_by_building = HashMap::new();
        for task in TaskRepo::list_rows(pool).await? {
            tasks_by_building
                .entry(task.building_id)
                .or_insert_with(Vec::new)
                .push(task);
        }

        let details = buildings
            .into_iter()
            .map(|building| {
                let categories = categories_by_building
                    .remove(&building.id)
                    .unwrap_or_default();
                let tasks = tasks_by_building
                    .remove(&building.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|task| TaskWithBuilding {
                        task,
                        building: Some(building.clone()),
                    })
                    .collect();
                BuildingDetail {
                    building,
                    categories,
                    tasks,
                }
            })
            .collect();

        Ok(details)
    }

    /// Full-replace update of a building and its category set.
    ///
    /// Runs as one transaction: the four scalar columns are overwritten, all
    /// existing category rows are deleted, and `input.categories` is inserted
    /// fresh under `id`. Returns `false` (and changes nothing) if no building
    /// with `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateBuilding,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "UPDATE buildings SET \
                name = ?, \
                description = ?, \
                thumbnail_path = ?, \
                image_path = ?, \
                updated_at = CURRENT_TIMESTAMP \
             WHERE id = ?",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.thumbnail_path)
        .bind(&input.image_path)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query("DELETE FROM building_categories WHERE building_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        Self::insert_categories(&mut tx, id, &input.categories).await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Delete a building by ID. Categories and tasks are removed by the
    /// `ON DELETE CASCADE` foreign keys.
    ///
    /// Returns `true` if a building was deleted.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM buildings WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Category helpers
    // -----------------------------------------------------------------------

    /// Get all categories attached to a building, in insertion order.
    pub async fn list_categories(
        pool: &SqlitePool,
        building_id: DbId,
    ) -> Result<Vec<BuildingCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {CATEGORY_COLUMNS} FROM building_categories \
             WHERE building_id = ? \
             ORDER BY id"
        );
        sqlx::query_as::<_, BuildingCategory>(&query)
            .bind(building_id)
            .fetch_all(pool)
            .await
    }

    /// Insert one category row per label under `building_id`.
    async fn insert_categories(
        tx: &mut Transaction<'_, Sqlite>,
        building_id: DbId,
        labels: &[String],
    ) -> Result<(), sqlx::Error> {
        for label in labels {
            sqlx::query("INSERT INTO building_categories (building_id, text) VALUES (?, ?)")
                .bind(building_id)
                .bind(label)
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }
}
