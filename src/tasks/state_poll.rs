//! Simulator state poll background task

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval, Instant};
use tracing::{debug, error, info};

use crate::providers::GameStateProvider;
use crate::state::AppState;

/// Fixed period between simulator polls
pub const POLL_PERIOD: Duration = Duration::from_millis(500);

/// Background task polling the simulator for ground/pause flags
///
/// The simulator is not event-driven, so its flags have to be polled. When
/// the capability is unavailable the poll is a no-op and the previous running
/// decision stays frozen; absence is an expected startup condition, not an
/// error.
pub async fn state_poll_task(state: Arc<AppState>, provider: Arc<dyn GameStateProvider>) {
    info!("Starting simulator poll task");

    let mut interval = interval(POLL_PERIOD);
    let mut was_available = false;

    loop {
        interval.tick().await;

        let Some(flags) = provider.probe() else {
            if was_available {
                debug!("Simulator state unavailable, keeping previous running decision");
                was_available = false;
            }
            continue;
        };

        if !was_available {
            debug!("Simulator state available: {:?}", flags);
            was_available = true;
        }

        if let Err(e) = state.apply_game_flags(flags, Instant::now()) {
            error!("Failed to apply simulator flags: {}", e);
        }
    }
}
