//! Display rendering module
//!
//! The core hands a [`DisplayFrame`] to a [`RenderAdapter`] once per frame;
//! everything about how the frame is drawn lives behind that trait.

pub mod console;
pub mod dial;

// Re-export main types
pub use console::ConsoleRenderer;
pub use dial::{format_hms, hand_angles, HandAngles};

/// Snapshot of the timer pushed to the renderer each frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayFrame {
    /// Accumulated flight time in milliseconds
    pub elapsed_ms: u64,
    /// Whether the timer is currently accumulating
    pub running: bool,
}

/// Consumer of per-frame display updates
///
/// `render` is called from the render task on every published frame and must
/// not block.
pub trait RenderAdapter: Send {
    /// Draw one frame
    fn render(&mut self, frame: DisplayFrame);
}
