//! Terminal rendering of the timer overlay

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use super::dial::{format_hms, hand_angles};
use super::{DisplayFrame, RenderAdapter};

/// Renders the timer to stdout, one line per displayed second
///
/// The shared `visible` flag is the terminal stand-in for the overlay's
/// show/hide toggle: it gates output only and never feeds back into the
/// timer. Frames arrive at frame rate; a line is printed only when the
/// rendered text actually changes.
pub struct ConsoleRenderer {
    visible: Arc<AtomicBool>,
    last_line: Option<String>,
}

impl ConsoleRenderer {
    /// Create a renderer gated by the shared visibility flag
    pub fn new(visible: Arc<AtomicBool>) -> Self {
        Self {
            visible,
            last_line: None,
        }
    }
}

impl RenderAdapter for ConsoleRenderer {
    fn render(&mut self, frame: DisplayFrame) {
        if !self.visible.load(Ordering::Relaxed) {
            return;
        }

        let marker = if frame.running { "running" } else { "stopped" };
        let line = format!("{} [{}]", format_hms(frame.elapsed_ms), marker);
        if self.last_line.as_deref() == Some(line.as_str()) {
            return;
        }

        let angles = hand_angles(frame.elapsed_ms);
        debug!(
            "Dial hands: hour={:.1}° minute={:.1}° hour24={:.1}°",
            angles.hour_deg, angles.minute_deg, angles.hour24_deg
        );

        println!("{}", line);
        self.last_line = Some(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_renderer_keeps_no_state() {
        let visible = Arc::new(AtomicBool::new(false));
        let mut renderer = ConsoleRenderer::new(Arc::clone(&visible));

        renderer.render(DisplayFrame {
            elapsed_ms: 65_000,
            running: true,
        });

        assert!(renderer.last_line.is_none());
    }

    #[test]
    fn repeated_frames_render_once() {
        let visible = Arc::new(AtomicBool::new(true));
        let mut renderer = ConsoleRenderer::new(Arc::clone(&visible));

        let frame = DisplayFrame {
            elapsed_ms: 65_000,
            running: true,
        };
        renderer.render(frame);
        assert_eq!(renderer.last_line.as_deref(), Some("00:01:05 [running]"));

        // same displayed second: line is unchanged
        renderer.render(DisplayFrame {
            elapsed_ms: 65_400,
            running: true,
        });
        assert_eq!(renderer.last_line.as_deref(), Some("00:01:05 [running]"));

        renderer.render(DisplayFrame {
            elapsed_ms: 66_000,
            running: true,
        });
        assert_eq!(renderer.last_line.as_deref(), Some("00:01:06 [running]"));
    }

    #[test]
    fn run_state_change_rerenders() {
        let visible = Arc::new(AtomicBool::new(true));
        let mut renderer = ConsoleRenderer::new(visible);

        renderer.render(DisplayFrame {
            elapsed_ms: 1_000,
            running: true,
        });
        renderer.render(DisplayFrame {
            elapsed_ms: 1_000,
            running: false,
        });

        assert_eq!(renderer.last_line.as_deref(), Some("00:00:01 [stopped]"));
    }
}
