//! Clock face arithmetic
//!
//! Pure functions from elapsed milliseconds to the digital readout and the
//! three hand angles of the analog dial. The digital hour field is unbounded;
//! only the dial hands wrap.

/// Format elapsed milliseconds as zero-padded `HH:MM:SS`
///
/// The hour field grows without wrapping, so a 30-hour flight reads `30:..`.
pub fn format_hms(elapsed_ms: u64) -> String {
    let total_seconds = elapsed_ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Angular positions of the three dial hands, in degrees clockwise from 12
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    /// 12-hour hand: 30° per hour, eased by the minutes
    pub hour_deg: f64,
    /// Minute hand: 6° per minute, eased by the seconds
    pub minute_deg: f64,
    /// 24-hour hand: 15° per hour, wrapping modulo 24
    pub hour24_deg: f64,
}

/// Derive the dial hand angles for an elapsed time
pub fn hand_angles(elapsed_ms: u64) -> HandAngles {
    let total_seconds = elapsed_ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    HandAngles {
        hour_deg: ((hours % 12) as f64 + minutes as f64 / 60.0) * 30.0,
        minute_deg: (minutes as f64 + seconds as f64 / 60.0) * 6.0,
        hour24_deg: ((hours % 24) as f64 + minutes as f64 / 60.0) * 15.0,
    }
}
