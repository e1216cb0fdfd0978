pub mod config;
pub mod db;
pub mod logging;
pub mod response;
pub mod routes;
pub mod seed;
pub mod state;

use std::sync::Arc;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::db::Database;
use crate::state::AppState;

pub fn create_app(db: Arc<Database>, config: Config) -> axum::Router {
    let state = AppState::new(db, config);

    routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
