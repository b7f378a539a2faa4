//! Suspend condition aggregation

use crate::providers::GameFlags;

/// Tab visibility transition pushed by the hosting environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityEvent {
    /// The tab became visible
    Visible,
    /// The tab was hidden
    Hidden,
}

/// The three signals that can suspend the timer
///
/// Ephemeral: recomputed from incoming signals, never persisted. Values are
/// allowed to go stale between polls; the decision is re-derived on every
/// signal arrival.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuspendConditions {
    /// Aircraft is touching the ground (from the simulator poll)
    pub ground_contact: bool,
    /// Host simulation is globally paused (from the simulator poll)
    pub simulator_paused: bool,
    /// Hosting tab is not visible (from push visibility events)
    pub tab_hidden: bool,
}

impl SuspendConditions {
    /// Create conditions with nothing suspending
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any suspend condition is active
    pub fn any_suspended(&self) -> bool {
        self.ground_contact || self.simulator_paused || self.tab_hidden
    }

    /// The authoritative running decision: no suspend condition active
    pub fn should_run(&self) -> bool {
        !self.any_suspended()
    }

    /// Record the latest ground/pause flags from the simulator
    pub fn apply_flags(&mut self, flags: GameFlags) {
        self.ground_contact = flags.ground_contact;
        self.simulator_paused = flags.simulator_paused;
    }
}
