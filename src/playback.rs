use std::time::{Duration, Instant};

/// Transport state of the audio player.
///
/// Mirrors what the host media-playback facility reports: the object URL it
/// is playing from, the total duration once metadata is known, the current
/// position, and the paused flag. A fresh state is paused with an unknown
/// duration.
#[derive(Debug, Clone)]
pub struct PlaybackState {
    /// Source URL handed to the player (None until an audio file is selected)
    pub source_url: Option<String>,
    /// Whether playback is paused
    pub is_paused: bool,
    /// Current playback position
    pub position: Duration,
    /// Total track duration (None until the player reports metadata)
    pub duration: Option<Duration>,
    /// When this state was last updated (for interpolation)
    pub updated_at: Instant,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            source_url: None,
            is_paused: true,
            position: Duration::ZERO,
            duration: None,
            updated_at: Instant::now(),
        }
    }
}

impl PlaybackState {
    /// Get interpolated position based on time elapsed since last update.
    #[must_use]
    pub fn interpolated_position(&self) -> Duration {
        if self.is_paused {
            return self.position;
        }

        let interpolated = self.position + self.updated_at.elapsed();

        // Clamp to track duration once it is known
        match self.duration {
            Some(duration) => interpolated.min(duration),
            None => interpolated,
        }
    }

    /// Check if the paused flag differs from `other`.
    #[must_use]
    pub const fn paused_state_changed(&self, other: &Self) -> bool {
        self.is_paused != other.is_paused
    }

    /// Check if a seek occurred (position jumped beyond `threshold` from the
    /// expected interpolated position).
    #[must_use]
    pub fn seek_occurred(&self, new_position: Duration, threshold: Duration) -> bool {
        let expected = self.interpolated_position();

        if new_position > expected {
            new_position - expected > threshold
        } else {
            expected - new_position > threshold
        }
    }
}
