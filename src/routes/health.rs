use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(root))
}

async fn root(State(state): State<AppState>) -> Response {
    let started = Instant::now();
    let probe = sqlx::query("SELECT 1").execute(state.db().pool()).await;
    let latency_ms = started.elapsed().as_millis() as u64;

    let healthy = probe.is_ok();
    let response = HealthResponse {
        status: if healthy { "ok" } else { "degraded" },
        database: if healthy { "connected" } else { "disconnected" },
        latency_ms,
        uptime: state.uptime_seconds(),
        timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status_code, Json(response)).into_response()
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    latency_ms: u64,
    uptime: u64,
    timestamp: String,
}
