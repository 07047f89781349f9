//! Pomodoro - A state-managed countdown timer served over HTTP
//!
//! This is the main entry point for the pomodoro application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use pomodoro::{
    config::Config,
    state::AppState,
    api::create_router,
    services::check_player_available,
    tasks::alarm_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, player={}, sound={}, mute={}",
          config.host, config.port, config.player, config.sound.display(), config.mute);

    // A missing player only silences the alarm
    let alarm = config.alarm();
    if !alarm.muted {
        if let Err(e) = check_player_available(&alarm).await {
            warn!("{}", e);
        }
    }

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone()));

    // Start the alarm listener
    let alarm_state = Arc::clone(&state);
    tokio::spawn(async move {
        alarm_task(alarm_state, alarm).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start-pause  - Start or pause the countdown");
    info!("  POST /give-up      - Stop and reset the current mode");
    info!("  POST /mode/:mode   - Select focus, short-break or long-break");
    info!("  GET  /status       - Current timer view");
    info!("  GET  /events       - Server-sent timer updates");
    info!("  GET  /health       - Health check");

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

    if let Err(e) = state.shutdown() {
        warn!("Failed to stop timer: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
