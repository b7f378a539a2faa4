//! Throttled persistence of the elapsed flight time

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

use super::store::TimeStore;

/// Minimum wall-clock gap between two persisted writes
pub const PERSIST_THROTTLE: Duration = Duration::from_millis(1000);

/// Schedules throttled writes of the elapsed time to a [`TimeStore`]
///
/// The frame tick offers a write on every frame; the scheduler lets at most
/// one through per [`PERSIST_THROTTLE`] interval.
#[derive(Debug)]
pub struct PersistScheduler {
    key: String,
    throttle: Duration,
    last_persist: Option<Instant>,
}

impl PersistScheduler {
    /// Create a scheduler writing under `key` with the default throttle
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            throttle: PERSIST_THROTTLE,
            last_persist: None,
        }
    }

    /// Persist `elapsed_ms` if the throttle interval has passed
    ///
    /// Returns whether a write was performed. The first offer after startup
    /// always writes.
    pub fn maybe_persist(
        &mut self,
        store: &dyn TimeStore,
        elapsed_ms: u64,
        now: Instant,
    ) -> Result<bool, String> {
        if let Some(last) = self.last_persist {
            if now.saturating_duration_since(last) <= self.throttle {
                return Ok(false);
            }
        }
        self.persist_now(store, elapsed_ms, now)?;
        Ok(true)
    }

    /// Persist `elapsed_ms` immediately, bypassing the throttle
    pub fn persist_now(
        &mut self,
        store: &dyn TimeStore,
        elapsed_ms: u64,
        now: Instant,
    ) -> Result<(), String> {
        store.store(&self.key, &elapsed_ms.to_string())?;
        self.last_persist = Some(now);
        debug!("Persisted elapsed time: {} ms", elapsed_ms);
        Ok(())
    }

    /// Delete the persisted value immediately (used by reset)
    pub fn clear(&mut self, store: &dyn TimeStore) -> Result<(), String> {
        store.remove(&self.key)
    }
}

/// Load the previously persisted elapsed time
///
/// An absent key, an unreadable store, or text that does not parse as a
/// non-negative integer all yield zero; nothing here ever propagates an
/// error to the caller.
pub fn load_saved(store: &dyn TimeStore, key: &str) -> Duration {
    let text = match store.load(key) {
        Ok(Some(text)) => text,
        Ok(None) => return Duration::ZERO,
        Err(e) => {
            warn!("Failed to load saved flight time, starting from zero: {}", e);
            return Duration::ZERO;
        }
    };

    match text.trim().parse::<u64>() {
        Ok(ms) => Duration::from_millis(ms),
        Err(_) => {
            warn!("Saved flight time {:?} is not a number, starting from zero", text);
            Duration::ZERO
        }
    }
}
