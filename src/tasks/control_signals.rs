//! Control signal background task

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::stream::StreamExt;
use signal_hook::consts::{SIGHUP, SIGUSR1, SIGUSR2};
use signal_hook_tokio::Signals;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{error, info};

use crate::state::{AppState, VisibilityEvent};

/// Background task mapping process signals to user actions
///
/// Terminal stand-ins for the overlay's browser inputs:
/// - SIGUSR1 toggles the simulated tab visibility
/// - SIGUSR2 toggles display visibility (display only, timer untouched)
/// - SIGHUP resets the timer
pub async fn control_signal_task(
    state: Arc<AppState>,
    visibility_tx: mpsc::Sender<VisibilityEvent>,
    display_visible: Arc<AtomicBool>,
) {
    info!("Starting control signal task");

    let mut signals = match Signals::new([SIGUSR1, SIGUSR2, SIGHUP]) {
        Ok(signals) => signals,
        Err(e) => {
            error!("Failed to create control signal handler: {}", e);
            return;
        }
    };

    let mut tab_hidden = false;

    while let Some(signal) = signals.next().await {
        match signal {
            SIGUSR1 => {
                tab_hidden = !tab_hidden;
                let event = if tab_hidden {
                    VisibilityEvent::Hidden
                } else {
                    VisibilityEvent::Visible
                };
                if visibility_tx.send(event).await.is_err() {
                    error!("Visibility channel closed, stopping control signal task");
                    break;
                }
            }
            SIGUSR2 => {
                let shown = !display_visible.load(Ordering::Relaxed);
                display_visible.store(shown, Ordering::Relaxed);
                info!("Display {}", if shown { "shown" } else { "hidden" });
            }
            SIGHUP => {
                if let Err(e) = state.reset(Instant::now()) {
                    error!("Failed to reset timer: {}", e);
                }
            }
            _ => {}
        }
    }
}
