mod health;
mod locations;
mod words;

use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::response::AppError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let healthcheck_endpoint = normalize_healthcheck_endpoint(
        std::env::var("HEALTHCHECK_ENDPOINT")
            .ok()
            .as_deref()
            .unwrap_or("/health"),
    );

    let mut app = Router::new()
        .route("/words", get(words::list_words).post(words::create_word))
        .route("/words/full", get(words::words_for_date))
        .route("/words/of-the-day", get(words::words_of_the_day))
        .route("/words/by-language", get(words::words_by_language))
        .route(
            "/locations",
            get(locations::list_locations).post(locations::create_location),
        );

    app = app.nest("/health", health::router());
    if healthcheck_endpoint != "/health" {
        app = app.nest(&healthcheck_endpoint, health::router());
    }

    app.fallback(fallback_handler).with_state(state)
}

fn normalize_healthcheck_endpoint(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "/health".to_string();
    }

    let with_slash = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };

    if with_slash != "/" {
        with_slash.trim_end_matches('/').to_string()
    } else {
        "/health".to_string()
    }
}

async fn fallback_handler() -> Response {
    AppError::not_found("route not found").into_response()
}
