//! State management module
//!
//! This module contains the timer state machine, the suspend-condition
//! aggregation, and the shared application state the tasks operate on.

pub mod app_state;
pub mod suspend;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use suspend::{SuspendConditions, VisibilityEvent};
pub use timer_state::TimerState;
