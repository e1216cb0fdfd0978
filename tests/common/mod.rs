#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;

use vocab_backend::config::Config;
use vocab_backend::db::Database;

pub struct TestApp {
    pub app: Router,
    pub db: Arc<Database>,
    _temp_dir: TempDir,
}

pub async fn create_test_app() -> TestApp {
    create_test_app_with(false).await
}

pub async fn create_test_app_with(duplicate_location_include_id: bool) -> TestApp {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db = Arc::new(
        Database::open(&db_path)
            .await
            .expect("failed to open test store"),
    );

    let config = Config {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        log_level: "info".to_string(),
        database_path: db_path,
        duplicate_location_include_id,
    };

    let app = vocab_backend::create_app(Arc::clone(&db), config);

    TestApp {
        app,
        db,
        _temp_dir: temp_dir,
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("serializes")))
        .expect("request builds")
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body read");
    serde_json::from_slice(&bytes).expect("body is JSON")
}
