//! Flight Timer - A suspend-aware flight timer for the GeoFS flight simulator
//!
//! This is the main entry point for the flight-timer application.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::info;

use flight_timer::{
    config::Config,
    persist::{FileStore, TimeStore},
    providers::{FileGameState, GameStateProvider},
    render::ConsoleRenderer,
    state::AppState,
    tasks::{
        control_signal_task, frame_tick_task, render_task, state_poll_task, visibility_task,
    },
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("flight_timer={}", config.log_level()))
        .init();

    info!("Starting flight-timer v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: data_dir={}, state_file={}",
        config.resolve_data_dir().display(),
        config.state_file.display()
    );

    // Create the store and seed the application state from it
    let store = FileStore::new(&config.resolve_data_dir()).map_err(anyhow::Error::msg)?;
    let store: Arc<dyn TimeStore> = Arc::new(store);
    let state = Arc::new(AppState::new(store));

    let provider: Arc<dyn GameStateProvider> =
        Arc::new(FileGameState::new(config.state_file.clone()));

    let (visibility_tx, visibility_rx) = mpsc::channel(16);
    let display_visible = Arc::new(AtomicBool::new(!config.hidden));

    // Start the background tasks
    let frame_state = Arc::clone(&state);
    tokio::spawn(async move {
        frame_tick_task(frame_state).await;
    });

    let poll_state = Arc::clone(&state);
    let poll_provider = Arc::clone(&provider);
    tokio::spawn(async move {
        state_poll_task(poll_state, poll_provider).await;
    });

    let visibility_state = Arc::clone(&state);
    let visibility_provider = Arc::clone(&provider);
    tokio::spawn(async move {
        visibility_task(visibility_state, visibility_provider, visibility_rx).await;
    });

    let render_state = Arc::clone(&state);
    let renderer = Box::new(ConsoleRenderer::new(Arc::clone(&display_visible)));
    tokio::spawn(async move {
        render_task(render_state, renderer).await;
    });

    let control_state = Arc::clone(&state);
    tokio::spawn(async move {
        control_signal_task(control_state, visibility_tx, display_visible).await;
    });

    info!("Controls:");
    info!("  SIGUSR1 - toggle tab visibility (hides suspend the timer)");
    info!("  SIGUSR2 - toggle display show/hide");
    info!("  SIGHUP  - reset the timer");

    shutdown_signal().await;
    info!("Shutdown signal received");

    // Flush the current elapsed time so an orderly exit loses nothing
    if let Err(e) = state.flush(Instant::now()) {
        tracing::error!("Failed to flush flight time on shutdown: {}", e);
    }

    let (last_action, last_action_time) = state.get_last_action();
    if let (Some(action), Some(time)) = (last_action, last_action_time) {
        info!("Last action: {} at {}", action, time);
    }

    info!("Shutdown complete");
    Ok(())
}
