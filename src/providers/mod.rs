//! Simulator state providers
//!
//! The simulator is an external oracle that may not be present at all, so the
//! provider is an optional capability: every probe either yields the current
//! flags or reports the capability as unavailable.

pub mod file_state;

pub use file_state::FileGameState;

use serde::Deserialize;

/// Ground/pause flags read from the simulator
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct GameFlags {
    /// Aircraft is touching the ground
    #[serde(default)]
    pub ground_contact: bool,
    /// Simulation is globally paused
    #[serde(default)]
    pub simulator_paused: bool,
}

/// Oracle for the simulated aircraft's state
///
/// `probe` returns `None` while the capability is unavailable. Absence is an
/// expected transient condition (the simulator may still be loading), so
/// consumers freeze their last decision rather than treating it as a failure.
pub trait GameStateProvider: Send + Sync {
    /// Query the simulator; `None` when the capability is unavailable
    fn probe(&self) -> Option<GameFlags>;
}
