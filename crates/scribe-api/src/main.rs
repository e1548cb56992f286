//! scribe-api binary.

use tracing::info;

use scribe_api::telemetry::{init_tracing, LogConfig};
use scribe_api::{create_router, ApiConfig, AppState};
use scribe_core::logging;
use scribe_db::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let log_config = LogConfig::from_env();
    let _file_guard = init_tracing(&log_config);
    info!(
        log_format = log_config.format_name(),
        log_file = log_config.file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    let config = ApiConfig::from_env();
    let store_path = config.notes_file.display().to_string();
    info!(
        { logging::STORE_PATH } = store_path.as_str(),
        public_dir = %config.public_dir.display(),
        max_body_bytes = config.max_body_bytes,
        "Configuration loaded"
    );

    let db = Database::open(&config.notes_file);

    // Creates the document when missing and refuses to start on a corrupt one.
    let existing = db.notes.list(None).await?;
    info!({ logging::NOTE_COUNT } = existing.len(), "Note store ready");

    let app = create_router(AppState::new(db), &config);

    let addr = config.bind_addr().await?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
