use axum::routing::get;
use axum::Router;

use crate::handlers::building;
use crate::state::AppState;

/// Routes mounted at `/buildings`.
///
/// ```text
/// GET    /        -> list_buildings
/// POST   /        -> create_building
/// GET    /{id}    -> get_building
/// PUT    /{id}    -> update_building
/// DELETE /{id}    -> delete_building
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(building::list_buildings).post(building::create_building),
        )
        .route(
            "/{id}",
            get(building::get_building)
                .put(building::update_building)
                .delete(building::delete_building),
        )
}
