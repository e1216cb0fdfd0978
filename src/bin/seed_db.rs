use std::process::ExitCode;

use vocab_backend::config::Config;
use vocab_backend::db::Database;
use vocab_backend::{logging, seed};

/// One-time setup: opens the store (creating the schema if absent) and loads
/// the Mandarin sample rows.
#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    let _log_guard = logging::init_tracing(&config.log_level);

    let db = match Database::open(&config.database_path).await {
        Ok(db) => db,
        Err(err) => {
            tracing::error!(
                error = %err,
                path = %config.database_path.display(),
                "failed to open word store"
            );
            return ExitCode::FAILURE;
        }
    };

    let result = seed::seed_sample_words(&db).await;
    db.close().await;

    match result {
        Ok(_) => {
            tracing::info!(
                path = %config.database_path.display(),
                "database and tables are set up"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "seeding failed");
            ExitCode::FAILURE
        }
    }
}
