//! Background tasks module
//!
//! This module contains the background tasks that drive the timer: the
//! per-frame tick, the fixed-period simulator poll, the visibility event
//! consumer, the render consumer, and the control-signal listener.

pub mod control_signals;
pub mod frame_tick;
pub mod render;
pub mod state_poll;
pub mod visibility;

// Re-export main functions
pub use control_signals::control_signal_task;
pub use frame_tick::{frame_tick_task, FRAME_PERIOD};
pub use render::render_task;
pub use state_poll::{state_poll_task, POLL_PERIOD};
pub use visibility::visibility_task;
