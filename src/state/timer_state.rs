//! Flight timer state machine

use std::time::Duration;
use tokio::time::Instant;

/// Timer state for accumulated flight time
///
/// Time accumulates only between `start` and `stop`; `advance` folds the
/// delta since the previous tick into the total. `last_tick` is set exactly
/// while running.
#[derive(Debug, Clone)]
pub struct TimerState {
    elapsed: Duration,
    running: bool,
    last_tick: Option<Instant>,
}

impl TimerState {
    /// Create a stopped timer with zero elapsed time
    pub fn new() -> Self {
        Self {
            elapsed: Duration::ZERO,
            running: false,
            last_tick: None,
        }
    }

    /// Create a stopped timer seeded with previously accumulated time
    pub fn with_elapsed(elapsed: Duration) -> Self {
        Self {
            elapsed,
            running: false,
            last_tick: None,
        }
    }

    /// Total accumulated flight time
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Total accumulated flight time in whole milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }

    /// Check if the timer is currently accumulating
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begin accumulating; a no-op if already running
    pub fn start(&mut self, now: Instant) {
        if !self.running {
            self.running = true;
            self.last_tick = Some(now);
        }
    }

    /// Stop accumulating; a no-op if already stopped
    pub fn stop(&mut self) {
        self.running = false;
        self.last_tick = None;
    }

    /// Apply the running decision, starting or stopping as needed
    pub fn set_running(&mut self, running: bool, now: Instant) {
        if running {
            self.start(now);
        } else {
            self.stop();
        }
    }

    /// Fold the time since the previous tick into the total
    ///
    /// While stopped this is a no-op: frame callbacks may still arrive
    /// between a stop decision and the next frame.
    pub fn advance(&mut self, now: Instant) {
        if !self.running {
            return;
        }
        if let Some(last) = self.last_tick {
            self.elapsed += now.saturating_duration_since(last);
        }
        self.last_tick = Some(now);
    }

    /// Zero the accumulated time without changing the run state
    ///
    /// If currently running, the tick baseline restarts at `now` so the next
    /// `advance` counts from the reset instant.
    pub fn reset(&mut self, now: Instant) {
        self.elapsed = Duration::ZERO;
        if self.running {
            self.last_tick = Some(now);
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn accumulates_only_while_running() {
        let t0 = Instant::now();
        let mut timer = TimerState::new();

        timer.start(t0);
        timer.advance(t0 + Duration::from_millis(100));
        timer.stop();

        // stopped gap, then a second run
        timer.start(t0 + Duration::from_millis(500));
        timer.advance(t0 + Duration::from_millis(750));

        assert_eq!(timer.elapsed(), Duration::from_millis(350));
    }

    #[test]
    fn advance_while_stopped_is_a_no_op() {
        let t0 = Instant::now();
        let mut timer = TimerState::new();

        timer.advance(t0 + Duration::from_secs(10));

        assert_eq!(timer.elapsed(), Duration::ZERO);
        assert!(!timer.is_running());
        assert!(timer.last_tick.is_none());
    }

    #[test]
    fn double_start_keeps_the_original_baseline() {
        let t0 = Instant::now();
        let mut timer = TimerState::new();

        timer.start(t0);
        // a second start must not move the tick baseline forward
        timer.start(t0 + Duration::from_millis(300));
        timer.advance(t0 + Duration::from_millis(400));

        assert_eq!(timer.elapsed(), Duration::from_millis(400));
    }

    #[test]
    fn running_implies_last_tick_set() {
        let t0 = Instant::now();
        let mut timer = TimerState::new();
        assert!(timer.last_tick.is_none());

        timer.start(t0);
        assert!(timer.last_tick.is_some());

        timer.stop();
        assert!(timer.last_tick.is_none());
    }

    #[test]
    fn reset_zeroes_but_does_not_stop() {
        let t0 = Instant::now();
        let mut timer = TimerState::new();

        timer.start(t0);
        timer.advance(t0 + Duration::from_millis(800));
        timer.reset(t0 + Duration::from_millis(900));

        assert_eq!(timer.elapsed(), Duration::ZERO);
        assert!(timer.is_running());

        // time before the reset instant never re-enters the total
        timer.advance(t0 + Duration::from_millis(1000));
        assert_eq!(timer.elapsed(), Duration::from_millis(100));
    }

    #[test]
    fn reset_while_stopped_stays_stopped() {
        let t0 = Instant::now();
        let mut timer = TimerState::with_elapsed(Duration::from_secs(42));

        timer.reset(t0);

        assert_eq!(timer.elapsed(), Duration::ZERO);
        assert!(!timer.is_running());
        assert!(timer.last_tick.is_none());
    }

    #[test]
    fn out_of_order_tick_never_decreases_elapsed() {
        let t0 = Instant::now();
        let mut timer = TimerState::new();

        timer.start(t0 + Duration::from_millis(500));
        // a tick from before the start baseline saturates to zero
        timer.advance(t0);

        assert_eq!(timer.elapsed(), Duration::ZERO);

        timer.advance(t0 + Duration::from_millis(600));
        assert_eq!(timer.elapsed(), Duration::from_millis(600));
    }
}
