//! Flight Timer - A suspend-aware flight timer for the GeoFS flight simulator
//!
//! This library tracks accumulated flight time, suspending the count while
//! the aircraft is on the ground, the simulator is paused, or the hosting tab
//! is hidden, and persists progress across restarts.

pub mod config;
pub mod persist;
pub mod providers;
pub mod render;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use persist::{FileStore, MemoryStore, TimeStore, ELAPSED_KEY};
pub use providers::{FileGameState, GameFlags, GameStateProvider};
pub use render::{ConsoleRenderer, DisplayFrame, RenderAdapter};
pub use state::{AppState, SuspendConditions, TimerState, VisibilityEvent};
pub use utils::signals::shutdown_signal;
