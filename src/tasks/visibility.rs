//! Tab visibility background task

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::providers::GameStateProvider;
use crate::state::{AppState, VisibilityEvent};

/// Background task consuming push visibility events
///
/// Unlike the poll, visibility takes effect immediately: a hide must stop the
/// timer before the next poll tick has a chance to run, and a restore
/// re-probes the simulator synchronously instead of waiting for one.
pub async fn visibility_task(
    state: Arc<AppState>,
    provider: Arc<dyn GameStateProvider>,
    mut events: mpsc::Receiver<VisibilityEvent>,
) {
    info!("Starting visibility task");

    while let Some(event) = events.recv().await {
        if let Err(e) = state.on_visibility(event, provider.as_ref(), Instant::now()) {
            error!("Failed to handle visibility event {:?}: {}", event, e);
        }
    }

    debug!("Visibility channel closed");
}
