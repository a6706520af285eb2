#![allow(dead_code)]

use tempfile::TempDir;
use village_core::types::DbId;
use village_db::models::building::{BuildingDetail, CreateBuilding, UpdateBuilding};
use village_db::models::task::{CreateTask, UpdateTask};
use village_db::DbPool;

/// A migrated SQLite database living in a temporary directory.
///
/// The directory is removed when this value is dropped, so keep it alive for
/// the duration of the test.
pub struct TestDb {
    pub pool: DbPool,
    _dir: TempDir,
}

pub async fn test_db() -> TestDb {
    let dir = TempDir::new().unwrap();
    let pool = village_db::create_pool(&dir.path().join("village.db"))
        .await
        .unwrap();
    village_db::run_migrations(&pool).await.unwrap();
    TestDb { pool, _dir: dir }
}

pub fn new_building(name: &str, categories: &[&str]) -> CreateBuilding {
    CreateBuilding {
        name: name.to_string(),
        description: format!("{name} description"),
        categories: categories.iter().map(|c| c.to_string()).collect(),
        thumbnail_path: format!("{name}_thumb.png"),
        image_path: format!("{name}.png"),
    }
}

pub fn building_update(name: &str, categories: &[&str]) -> UpdateBuilding {
    UpdateBuilding {
        name: name.to_string(),
        description: format!("{name} description"),
        categories: categories.iter().map(|c| c.to_string()).collect(),
        thumbnail_path: format!("{name}_thumb.png"),
        image_path: format!("{name}.png"),
    }
}

pub fn new_task(building_id: DbId, name: &str) -> CreateTask {
    CreateTask {
        name: name.to_string(),
        description: format!("{name} description"),
        building_id,
        is_completed: false,
    }
}

pub fn task_update(building_id: DbId, name: &str, is_completed: bool) -> UpdateTask {
    UpdateTask {
        name: name.to_string(),
        description: format!("{name} description"),
        building_id,
        is_completed,
    }
}

/// Count rows in `table` whose `building_id` matches.
pub async fn count_children(pool: &DbPool, table: &str, building_id: DbId) -> i64 {
    sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM {table} WHERE building_id = ?"
    ))
    .bind(building_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Category labels of a loaded building, in stored order.
pub fn category_texts(detail: &BuildingDetail) -> Vec<&str> {
    detail.categories.iter().map(|c| c.text.as_str()).collect()
}
