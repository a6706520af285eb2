//! Repository for the `tasks` table.

use std::collections::HashMap;

use sqlx::SqlitePool;
use village_core::types::DbId;

use crate::models::building::Building;
use crate::models::task::{CreateTask, Task, TaskWithBuilding, UpdateTask};
use crate::repositories::building_repo::COLUMNS as BUILDING_COLUMNS;

/// Column list for the `tasks` table.
const COLUMNS: &str = "id, name, description, building_id, is_completed, completed_at, \
    created_at, updated_at";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a task under an existing building.
    ///
    /// The insert is guarded by the parent's existence in the same statement,
    /// so a missing (or concurrently deleted) building returns `None` without
    /// inserting anything instead of tripping the foreign key. On success the
    /// task is re-read with its building inside the same transaction.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateTask,
    ) -> Result<Option<TaskWithBuilding>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO tasks (name, description, building_id, is_completed, completed_at) \
             SELECT ?, ?, ?, ?, CASE WHEN ? THEN CURRENT_TIMESTAMP END \
             WHERE EXISTS (SELECT 1 FROM buildings WHERE id = ?) \
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Task>(&insert_query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.building_id)
            .bind(input.is_completed)
            .bind(input.is_completed)
            .bind(input.building_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(task) = inserted else {
            tx.rollback().await?;
            return Ok(None);
        };

        let building_query = format!("SELECT {BUILDING_COLUMNS} FROM buildings WHERE id = ?");
        let building = sqlx::query_as::<_, Building>(&building_query)
            .bind(task.building_id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(TaskWithBuilding { task, building }))
    }

    /// Find a task by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = ?");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every task with its parent building attached, ordered by ID.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<TaskWithBuilding>, sqlx::Error> {
        let tasks = Self::list_rows(pool).await?;
        if tasks.is_empty() {
            return Ok(Vec::new());
        }

        let building_query = format!(
            "SELECT {BUILDING_COLUMNS} FROM buildings \
             WHERE id IN (SELECT DISTINCT building_id FROM tasks)"
        );
        let buildings: HashMap<DbId, Building> = sqlx::query_as::<_, Building>(&building_query)
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(|b| (b.id, b))
            .collect();

        Ok(tasks
            .into_iter()
            .map(|task| {
                let building = buildings.get(&task.building_id).cloned();
                TaskWithBuilding { task, building }
            })
            .collect())
    }

    /// List every task row, ordered by ID.
    pub async fn list_rows(pool: &SqlitePool) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks ORDER BY id");
        sqlx::query_as::<_, Task>(&query).fetch_all(pool).await
    }

    /// List the tasks belonging to one building, ordered by ID.
    pub async fn list_by_building(
        pool: &SqlitePool,
        building_id: DbId,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE building_id = ? ORDER BY id");
        sqlx::query_as::<_, Task>(&query)
            .bind(building_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite a task's name, description, building and completion flag.
    ///
    /// `completed_at` follows the flag: kept (or stamped now) while complete,
    /// cleared when reopened. The new `building_id` is not pre-checked; a
    /// dangling reference fails on the foreign key instead.
    ///
    /// Returns `false` if no task with `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "UPDATE tasks SET \
                name = ?, \
                description = ?, \
                building_id = ?, \
                is_completed = ?, \
                completed_at = CASE WHEN ? THEN COALESCE(completed_at, CURRENT_TIMESTAMP) END, \
                updated_at = CURRENT_TIMESTAMP \
             WHERE id = ?",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.building_id)
        .bind(input.is_completed)
        .bind(input.is_completed)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    /// Delete a task by ID.
    ///
    /// Returns `true` if a task was deleted.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
