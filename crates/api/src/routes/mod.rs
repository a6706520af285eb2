pub mod building;
pub mod health;
pub mod task;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /healthz                       liveness probe
///
/// /buildings                     list, create
/// /buildings/{id}                get, update, delete
///
/// /tasks                         list, create
/// /tasks/{id}                    update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/buildings", building::router())
        .nest("/tasks", task::router())
}
