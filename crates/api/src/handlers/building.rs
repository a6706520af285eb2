//! Handlers for the `/buildings` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use village_core::building::{validate_building, ENTITY};
use village_core::error::CoreError;
use village_core::types::DbId;
use village_db::models::building::{CreateBuilding, UpdateBuilding};
use village_db::repositories::BuildingRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ResourceId, ValidJson};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// GET /api/buildings
///
/// Every building with its categories and tasks, ordered by id.
pub async fn list_buildings(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let buildings = BuildingRepo::list(&state.pool).await?;
    Ok(Json(buildings))
}

/// GET /api/buildings/{id}
pub async fn get_building(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<impl IntoResponse> {
    let building = BuildingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(building))
}

/// POST /api/buildings
///
/// Create a building and its category labels in one transaction.
pub async fn create_building(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateBuilding>,
) -> AppResult<impl IntoResponse> {
    validate_building(&input.name)?;

    let building = BuildingRepo::create(&state.pool, &input).await?;

    tracing::info!(
        building_id = building.building.id,
        category_count = building.categories.len(),
        "Building created",
    );

    Ok(Json(building))
}

/// PUT /api/buildings/{id}
///
/// Full replace: scalar fields are overwritten and the category set is
/// swapped for the submitted one.
pub async fn update_building(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    ValidJson(input): ValidJson<UpdateBuilding>,
) -> AppResult<impl IntoResponse> {
    validate_building(&input.name)?;

    if !BuildingRepo::update(&state.pool, id, &input).await? {
        return Err(not_found(id));
    }

    tracing::info!(
        building_id = id,
        category_count = input.categories.len(),
        "Building updated",
    );

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/buildings/{id}
///
/// Categories and tasks go with it.
pub async fn delete_building(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<impl IntoResponse> {
    if !BuildingRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(building_id = id, "Building deleted");

    Ok(StatusCode::NO_CONTENT)
}
