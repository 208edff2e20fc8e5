//! Timestamp formatting and duration conversion utilities.

use std::time::Duration;

/// Placeholder shown while a duration is still unknown (e.g. before the
/// audio element has reported metadata).
pub const UNKNOWN_TIMESTAMP: &str = "--:--";

/// Format a position in seconds as an `MM:SS` display string.
///
/// Non-finite inputs render as [`UNKNOWN_TIMESTAMP`]. Fractional seconds are
/// truncated toward zero. Positions of an hour or more wrap within the
/// minutes field (a 60-minute modulus); hour-long tracks are a known
/// limitation of the display format, kept for compatibility.
#[must_use]
pub fn format_timestamp(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return UNKNOWN_TIMESTAMP.to_string();
    }

    // Truncation is intentional: 59.9s renders as "00:59".
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = seconds as u64;
    let minutes = (total / 60) % 60;
    let secs = total % 60;

    format!("{minutes:02}:{secs:02}")
}

/// Extension trait for safe Duration conversions and display.
pub trait DurationExt {
    /// Convert duration to milliseconds as u64, saturating at `u64::MAX`.
    ///
    /// In practice, this is always safe because durations exceeding `u64::MAX`
    /// milliseconds would represent ~584 million years.
    fn as_millis_u64(&self) -> u64;

    /// Render the duration as an `MM:SS` display string.
    fn mmss(&self) -> String;
}

impl DurationExt for Duration {
    fn as_millis_u64(&self) -> u64 {
        u64::try_from(self.as_millis()).unwrap_or(u64::MAX)
    }

    fn mmss(&self) -> String {
        format_timestamp(self.as_secs_f64())
    }
}
