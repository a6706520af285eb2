use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// GET /healthz -- liveness only; does not touch the database.
async fn healthz() -> &'static str {
    "ok"
}

pub fn router() -> Router<AppState> {
    Router::new().route("/healthz", get(healthz))
}
