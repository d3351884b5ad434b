//! songlib-api - song library REST service
//!
//! Startup: configuration from the environment, tracing (console plus a JSON
//! log file), database pool and schema, details lookup client, then the HTTP
//! server until SIGINT/SIGTERM.

use std::sync::Arc;

use anyhow::{Context, Result};
use songlib_api::db::PgSongStore;
use songlib_api::services::HttpLyricsClient;
use songlib_api::{build_router, AppState};
use songlib_common::config::Config;
use songlib_common::db::init_database;
use tokio::signal;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load();

    // Buffered file lines are flushed when the guard drops at exit
    let (file_writer, _log_guard) = match config.log_file_location() {
        Some((dir, file_name)) => {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(file_name.to_string_lossy())
                .build(dir)
                .with_context(|| format!("Failed to open log file {}", config.log_file))?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None::<WorkerGuard>),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt::layer())
        .with(file_writer.map(|writer| fmt::layer().json().with_writer(writer)))
        .init();

    info!("Starting songlib-api v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &config.env_file {
        info!(path = %path.display(), "Loaded .env file");
    }
    info!(
        db_host = %config.db_host,
        db_port = config.db_port,
        db_name = %config.db_name,
        external_api = %config.external_api_url,
        log_file = %config.log_file,
        "Configuration loaded"
    );

    let pool = init_database(config.connect_options(), config.db_max_connections)
        .await
        .context("Failed to connect to database")?;
    info!("✓ Connected to database");

    let lookup = HttpLyricsClient::new(config.external_api_url.clone(), config.external_api_timeout())
        .context("Failed to create song details client")?;

    let state = AppState::new(Arc::new(PgSongStore::new(pool)), Arc::new(lookup));
    let app = build_router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("songlib-api listening on http://{}", addr);
    info!("API docs at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
