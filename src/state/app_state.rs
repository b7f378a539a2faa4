//! Shared application state wiring the timer, signals, and persistence

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::persist::{load_saved, PersistScheduler, TimeStore, ELAPSED_KEY};
use crate::providers::{GameFlags, GameStateProvider};
use crate::render::{format_hms, DisplayFrame};

use super::{SuspendConditions, TimerState, VisibilityEvent};

/// Shared state for all background tasks
///
/// Every task goes through the methods here; nothing outside this module
/// mutates the timer directly. Each method locks the state it touches for
/// the duration of one mutation, so a frame tick, a poll tick, and a
/// visibility event interleave without tearing.
pub struct AppState {
    /// The flight timer state machine
    pub timer: Arc<Mutex<TimerState>>,
    /// Last-known suspend conditions fed by the poll and visibility producers
    pub conditions: Arc<Mutex<SuspendConditions>>,
    /// Throttled persistence of the elapsed time
    pub persist: Arc<Mutex<PersistScheduler>>,
    /// Durable store behind the persistence scheduler
    pub store: Arc<dyn TimeStore>,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel publishing display frames to the renderer
    pub display_tx: watch::Sender<DisplayFrame>,
    /// Keep the receiver alive to prevent channel closure
    pub _display_rx: watch::Receiver<DisplayFrame>,
}

impl AppState {
    /// Create the application state, seeding the timer from the store
    ///
    /// An absent or unparseable saved value starts the timer from zero.
    pub fn new(store: Arc<dyn TimeStore>) -> Self {
        let saved = load_saved(store.as_ref(), ELAPSED_KEY);
        if !saved.is_zero() {
            info!("Resuming saved flight time: {}", format_hms(saved.as_millis() as u64));
        }

        let timer = TimerState::with_elapsed(saved);
        let initial = DisplayFrame {
            elapsed_ms: timer.elapsed_ms(),
            running: false,
        };
        let (display_tx, display_rx) = watch::channel(initial);

        Self {
            timer: Arc::new(Mutex::new(timer)),
            conditions: Arc::new(Mutex::new(SuspendConditions::new())),
            persist: Arc::new(Mutex::new(PersistScheduler::new(ELAPSED_KEY))),
            store,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            display_tx,
            _display_rx: display_rx,
        }
    }

    /// One frame: advance the timer, offer a persist, publish the frame
    pub fn frame_tick(&self, now: Instant) -> Result<DisplayFrame, String> {
        let mut timer = self
            .timer
            .lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;
        timer.advance(now);
        let frame = DisplayFrame {
            elapsed_ms: timer.elapsed_ms(),
            running: timer.is_running(),
        };
        drop(timer);

        let mut persist = self
            .persist
            .lock()
            .map_err(|e| format!("Failed to lock persist scheduler: {}", e))?;
        persist.maybe_persist(self.store.as_ref(), frame.elapsed_ms, now)?;
        drop(persist);

        self.publish(frame);
        Ok(frame)
    }

    /// Apply freshly polled ground/pause flags and rederive the run decision
    ///
    /// Returns the derived decision. Called only when the provider actually
    /// answered; an unavailable provider skips this entirely and the previous
    /// decision stays frozen.
    pub fn apply_game_flags(&self, flags: GameFlags, now: Instant) -> Result<bool, String> {
        let mut conditions = self
            .conditions
            .lock()
            .map_err(|e| format!("Failed to lock suspend conditions: {}", e))?;
        conditions.apply_flags(flags);
        let run = conditions.should_run();
        drop(conditions);

        self.set_running(run, now)?;
        Ok(run)
    }

    /// React to a tab visibility transition
    ///
    /// Hiding force-stops the timer at once, regardless of the last known
    /// ground/pause flags. Restoring re-probes the simulator synchronously
    /// rather than waiting for the next poll; if the probe fails the timer
    /// stays stopped until a poll succeeds. A resume restarts the tick
    /// baseline at `now`, so time spent hidden is never counted.
    pub fn on_visibility(
        &self,
        event: VisibilityEvent,
        provider: &dyn GameStateProvider,
        now: Instant,
    ) -> Result<(), String> {
        let mut conditions = self
            .conditions
            .lock()
            .map_err(|e| format!("Failed to lock suspend conditions: {}", e))?;

        let decision = match event {
            VisibilityEvent::Hidden => {
                conditions.tab_hidden = true;
                Some(false)
            }
            VisibilityEvent::Visible => {
                conditions.tab_hidden = false;
                match provider.probe() {
                    Some(flags) => {
                        conditions.apply_flags(flags);
                        Some(conditions.should_run())
                    }
                    None => {
                        debug!("Simulator unavailable on tab restore, leaving timer as-is");
                        None
                    }
                }
            }
        };
        drop(conditions);

        if let Some(run) = decision {
            self.set_running(run, now)?;
        }

        match event {
            VisibilityEvent::Hidden => {
                info!("Tab hidden, timer suspended");
                self.record_action("tab hidden");
            }
            VisibilityEvent::Visible => {
                info!("Tab visible again");
                self.record_action("tab visible");
            }
        }
        Ok(())
    }

    /// Reset the timer to zero and delete the persisted value immediately
    ///
    /// Does not stop the timer: a reset mid-flight keeps counting from zero.
    pub fn reset(&self, now: Instant) -> Result<(), String> {
        let mut timer = self
            .timer
            .lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;
        timer.reset(now);
        let frame = DisplayFrame {
            elapsed_ms: timer.elapsed_ms(),
            running: timer.is_running(),
        };
        drop(timer);

        let mut persist = self
            .persist
            .lock()
            .map_err(|e| format!("Failed to lock persist scheduler: {}", e))?;
        persist.clear(self.store.as_ref())?;
        drop(persist);

        info!("Flight timer reset");
        self.record_action("reset");
        self.publish(frame);
        Ok(())
    }

    /// Write the current elapsed time out immediately, bypassing the throttle
    pub fn flush(&self, now: Instant) -> Result<(), String> {
        let elapsed_ms = {
            let timer = self
                .timer
                .lock()
                .map_err(|e| format!("Failed to lock timer state: {}", e))?;
            timer.elapsed_ms()
        };

        let mut persist = self
            .persist
            .lock()
            .map_err(|e| format!("Failed to lock persist scheduler: {}", e))?;
        persist.persist_now(self.store.as_ref(), elapsed_ms, now)
    }

    /// Current display snapshot of the timer
    pub fn snapshot(&self) -> Result<DisplayFrame, String> {
        let timer = self
            .timer
            .lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;
        Ok(DisplayFrame {
            elapsed_ms: timer.elapsed_ms(),
            running: timer.is_running(),
        })
    }

    /// Subscribe to display frame updates
    pub fn subscribe_display(&self) -> watch::Receiver<DisplayFrame> {
        self.display_tx.subscribe()
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn set_running(&self, run: bool, now: Instant) -> Result<(), String> {
        let mut timer = self
            .timer
            .lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;
        timer.set_running(run, now);
        let frame = DisplayFrame {
            elapsed_ms: timer.elapsed_ms(),
            running: timer.is_running(),
        };
        drop(timer);

        self.publish(frame);
        Ok(())
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    fn publish(&self, frame: DisplayFrame) {
        if let Err(e) = self.display_tx.send(frame) {
            warn!("Failed to publish display frame: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use crate::persist::MemoryStore;

    use super::*;

    struct FixedProvider(Option<GameFlags>);

    impl GameStateProvider for FixedProvider {
        fn probe(&self) -> Option<GameFlags> {
            self.0
        }
    }

    fn airborne() -> GameFlags {
        GameFlags {
            ground_contact: false,
            simulator_paused: false,
        }
    }

    #[test]
    fn seeds_elapsed_from_the_store() {
        let store = Arc::new(MemoryStore::new());
        store.store(ELAPSED_KEY, "65000").unwrap();

        let state = AppState::new(store);
        let frame = state.snapshot().unwrap();

        assert_eq!(frame.elapsed_ms, 65_000);
        assert!(!frame.running);
    }

    #[test]
    fn corrupt_saved_value_starts_from_zero() {
        let store = Arc::new(MemoryStore::new());
        store.store(ELAPSED_KEY, "NaN").unwrap();

        let state = AppState::new(store);
        assert_eq!(state.snapshot().unwrap().elapsed_ms, 0);
    }

    #[test]
    fn ground_contact_suspends_via_poll() {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store);
        let t0 = Instant::now();

        assert!(state.apply_game_flags(airborne(), t0).unwrap());
        assert!(state.snapshot().unwrap().running);

        let grounded = GameFlags {
            ground_contact: true,
            simulator_paused: false,
        };
        assert!(!state.apply_game_flags(grounded, t0 + Duration::from_millis(500)).unwrap());
        assert!(!state.snapshot().unwrap().running);
    }

    #[test]
    fn hidden_time_is_never_counted() {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store);
        let provider = FixedProvider(Some(airborne()));
        let t0 = Instant::now();

        state.apply_game_flags(airborne(), t0).unwrap();
        state.frame_tick(t0 + Duration::from_secs(1)).unwrap();

        // hide, stay hidden for a minute, restore
        state
            .on_visibility(VisibilityEvent::Hidden, &provider, t0 + Duration::from_secs(1))
            .unwrap();
        assert!(!state.snapshot().unwrap().running);

        state
            .on_visibility(VisibilityEvent::Visible, &provider, t0 + Duration::from_secs(61))
            .unwrap();
        assert!(state.snapshot().unwrap().running);

        // the next frame counts only from the restore instant
        let frame = state.frame_tick(t0 + Duration::from_secs(62)).unwrap();
        assert_eq!(frame.elapsed_ms, 2_000);
    }

    #[test]
    fn restore_with_absent_provider_stays_stopped() {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store);
        let present = FixedProvider(Some(airborne()));
        let absent = FixedProvider(None);
        let t0 = Instant::now();

        state.apply_game_flags(airborne(), t0).unwrap();
        state.on_visibility(VisibilityEvent::Hidden, &present, t0).unwrap();
        state
            .on_visibility(VisibilityEvent::Visible, &absent, t0 + Duration::from_secs(5))
            .unwrap();

        // no oracle answer on restore: the forced stop holds until a poll
        assert!(!state.snapshot().unwrap().running);

        state.apply_game_flags(airborne(), t0 + Duration::from_secs(6)).unwrap();
        assert!(state.snapshot().unwrap().running);
    }

    #[test]
    fn reset_clears_the_persisted_key() {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(Arc::clone(&store) as Arc<dyn TimeStore>);
        let t0 = Instant::now();

        state.apply_game_flags(airborne(), t0).unwrap();
        state.frame_tick(t0 + Duration::from_secs(2)).unwrap();
        assert!(store.load(ELAPSED_KEY).unwrap().is_some());

        state.reset(t0 + Duration::from_secs(2)).unwrap();

        assert_eq!(state.snapshot().unwrap().elapsed_ms, 0);
        assert_eq!(store.load(ELAPSED_KEY).unwrap(), None);
        // reset does not stop a running timer
        assert!(state.snapshot().unwrap().running);
    }

    #[test]
    fn flush_bypasses_the_throttle() {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(Arc::clone(&store) as Arc<dyn TimeStore>);
        let t0 = Instant::now();

        state.apply_game_flags(airborne(), t0).unwrap();
        state.frame_tick(t0 + Duration::from_millis(100)).unwrap();
        state.frame_tick(t0 + Duration::from_millis(200)).unwrap();
        state.flush(t0 + Duration::from_millis(200)).unwrap();

        assert_eq!(store.load(ELAPSED_KEY).unwrap(), Some("200".to_string()));
    }
}
