//! Per-frame tick background task

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{error, info};

use crate::state::AppState;

/// Frame period, roughly the 60 Hz cadence of a browser animation frame
pub const FRAME_PERIOD: Duration = Duration::from_millis(16);

/// Background task that advances the timer and offers a persist every frame
///
/// The advance itself is gated inside the state machine: while the timer is
/// stopped the tick publishes frames but accumulates nothing.
pub async fn frame_tick_task(state: Arc<AppState>) {
    info!("Starting frame tick task");

    let mut interval = interval(FRAME_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;

        if let Err(e) = state.frame_tick(Instant::now()) {
            error!("Frame tick failed: {}", e);
        }
    }
}
