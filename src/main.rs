use std::sync::Arc;

use vocab_backend::config::Config;
use vocab_backend::db::Database;
use vocab_backend::logging;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    let _log_guard = logging::init_tracing(&config.log_level);

    let db = match Database::open(&config.database_path).await {
        Ok(db) => Arc::new(db),
        Err(err) => {
            tracing::error!(
                error = %err,
                path = %config.database_path.display(),
                "failed to open word store"
            );
            std::process::exit(1);
        }
    };

    let addr = config.bind_addr();
    let app = vocab_backend::create_app(Arc::clone(&db), config);

    tracing::info!(%addr, path = %db.path().display(), "vocab-backend listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind listener failed");

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    if let Err(err) = server.await {
        tracing::error!(error = %err, "server error");
    }

    tracing::info!("HTTP server stopped, closing word store");
    db.close().await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
