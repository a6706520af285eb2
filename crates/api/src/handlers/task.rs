//! Handlers for the `/tasks` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use village_core::error::CoreError;
use village_core::task::{validate_task, ENTITY};
use village_core::{building, types::DbId};
use village_db::models::task::{CreateTask, UpdateTask};
use village_db::repositories::TaskRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ResourceId, ValidJson};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// GET /api/tasks
///
/// Every task with its parent building attached.
pub async fn list_tasks(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tasks = TaskRepo::list(&state.pool).await?;
    Ok(Json(tasks))
}

/// POST /api/tasks
///
/// The referenced building must exist; otherwise nothing is inserted and
/// the response is 404.
pub async fn create_task(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateTask>,
) -> AppResult<impl IntoResponse> {
    validate_task(&input.name)?;

    let task = TaskRepo::create(&state.pool, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: building::ENTITY,
            id: input.building_id,
        }))?;

    tracing::info!(
        task_id = task.task.id,
        building_id = task.task.building_id,
        "Task created",
    );

    Ok(Json(task))
}

/// PUT /api/tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    ValidJson(input): ValidJson<UpdateTask>,
) -> AppResult<impl IntoResponse> {
    validate_task(&input.name)?;

    if !TaskRepo::update(&state.pool, id, &input).await? {
        return Err(not_found(id));
    }

    tracing::info!(
        task_id = id,
        building_id = input.building_id,
        is_completed = input.is_completed,
        "Task updated",
    );

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<impl IntoResponse> {
    if !TaskRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(task_id = id, "Task deleted");

    Ok(StatusCode::NO_CONTENT)
}
