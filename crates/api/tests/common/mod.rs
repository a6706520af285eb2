#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use village_api::config::ServerConfig;
use village_api::router::build_app_router;
use village_api::state::AppState;
use village_db::DbPool;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as the only CORS origin and a 30-second
/// request timeout.
pub fn test_config(db_path: PathBuf) -> ServerConfig {
    ServerConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        jwt_secret: "test-secret".to_string(),
        db_path,
        environment: "test".to_string(),
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        shutdown_grace_secs: 1,
    }
}

/// A fully wired application over a migrated SQLite file in a temporary
/// directory. Keep it alive for the duration of the test.
pub struct TestApp {
    pub router: Router,
    pub pool: DbPool,
    _dir: TempDir,
}

impl TestApp {
    /// A fresh handle on the router, for a single `oneshot` call.
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Build the full application router with all middleware layers, exactly as
/// the binary does.
pub async fn build_test_app() -> TestApp {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("village.db");

    let pool = village_db::create_pool(&db_path).await.unwrap();
    village_db::run_migrations(&pool).await.unwrap();

    let config = test_config(db_path);
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        pool,
        _dir: dir,
    }
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_raw(app, Method::POST, uri, body.to_string()).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_raw(app, Method::PUT, uri, body.to_string()).await
}

/// Send an arbitrary string as a JSON body, for malformed-input tests.
pub async fn send_raw(app: Router, method: Method, uri: &str, body: impl Into<String>) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.into()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// The Mill building used across scenarios.
pub fn mill(categories: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "name": "Mill",
        "description": "Grinds grain",
        "categories": categories,
        "thumbnailPath": "t.png",
        "imagePath": "i.png",
    })
}

/// POST a building and return its id.
pub async fn create_building(app: Router, body: serde_json::Value) -> i64 {
    let response = post_json(app, "/api/buildings", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    body_json(response).await["id"].as_i64().unwrap()
}

/// POST a task and return its id.
pub async fn create_task(app: Router, name: &str, building_id: i64) -> i64 {
    let response = post_json(
        app,
        "/api/tasks",
        serde_json::json!({
            "name": name,
            "description": format!("{name} description"),
            "building_id": building_id,
            "is_completed": false,
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    body_json(response).await["id"].as_i64().unwrap()
}
