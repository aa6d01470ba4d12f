//! Study Tool - A study-productivity HTTP service
//!
//! This is the main entry point for the study-tool application.

use std::sync::Arc;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use study_tool::{
    config::Config,
    state::AppState,
    api::create_router,
    services::{JsonFileStore, KeyValueStore, MemoryStore, Notifier},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("study_tool={},tower_http=info", config.log_level()))
        .init();

    info!("Starting study-tool server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, pomodoro={}min",
          config.host, config.port, config.pomodoro_minutes);

    let store: Arc<dyn KeyValueStore> = if config.in_memory {
        info!("Using in-memory store, data will not survive a restart");
        Arc::new(MemoryStore::new())
    } else {
        let store = JsonFileStore::open(&config.data_file)
            .map_err(anyhow::Error::msg)
            .context("Failed to open data file")?;
        info!("Using data file {}", store.path().display());
        Arc::new(store)
    };

    // Create application state, loading stored tasks and flash cards
    let notifier = Notifier::new(config.notification_history);
    let state = Arc::new(AppState::new(config.pomodoro_minutes, store, notifier));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET    /status                 - Health check");
    info!("  GET    /pomodoro               - Timer snapshot");
    info!("  POST   /pomodoro/start|pause|toggle|reset");
    info!("  PUT    /pomodoro/duration      - Set duration in minutes");
    info!("  GET    /tasks, POST /tasks     - List or create tasks");
    info!("  POST   /tasks/:id/toggle, DELETE /tasks/:id");
    info!("  GET    /flash-cards, POST /flash-cards");
    info!("  POST   /flash-cards/:id/flip, DELETE /flash-cards/:id");
    info!("  GET    /notifications          - Recent notifications");
    info!("  GET    /notifications/stream   - Live notifications (SSE)");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    state.shutdown();
    info!("Server shutdown complete");
    Ok(())
}
