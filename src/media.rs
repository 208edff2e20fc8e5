//! Media file-slot identification and extension validation.

use crate::error::{LrcViewError, Result};
use std::path::Path;

/// Identifies which file slot a user-selected file is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// The audio track handed to the media player
    Audio,
    /// The companion `.lrc` lyric file
    Lyrics,
}

/// Audio container formats the host player is expected to handle.
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "wav", "m4a", "aac"];

const LYRIC_EXTENSIONS: &[&str] = &["lrc"];

impl MediaKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Lyrics => "lyrics",
        }
    }

    #[must_use]
    pub const fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Audio => AUDIO_EXTENSIONS,
            Self::Lyrics => LYRIC_EXTENSIONS,
        }
    }

    /// Check that `path` carries an extension accepted by this slot.
    ///
    /// # Errors
    ///
    /// Returns [`LrcViewError::UnsupportedFile`] when the extension is
    /// missing or not recognized for the slot.
    pub fn validate(&self, path: &Path) -> Result<()> {
        let accepted = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions().contains(&ext.as_str())
            });

        if accepted {
            Ok(())
        } else {
            Err(LrcViewError::UnsupportedFile {
                slot: self.as_str(),
                path: path.to_path_buf(),
                expected: self.extensions().join(", "),
            })
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_accepts_lrc_for_lyrics() {
        assert!(MediaKind::Lyrics.validate(Path::new("song.lrc")).is_ok());
        assert!(MediaKind::Lyrics.validate(Path::new("SONG.LRC")).is_ok());
    }

    #[test]
    fn test_rejects_audio_in_lyrics_slot() {
        let err = MediaKind::Lyrics.validate(Path::new("song.mp3")).unwrap_err();
        assert!(matches!(
            err,
            LrcViewError::UnsupportedFile { slot: "lyrics", .. }
        ));
    }

    #[test]
    fn test_accepts_common_audio_formats() {
        for name in ["a.mp3", "b.flac", "c.ogg", "d.wav", "e.m4a", "f.aac"] {
            assert!(MediaKind::Audio.validate(Path::new(name)).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_rejects_missing_extension() {
        let err = MediaKind::Audio
            .validate(&PathBuf::from("no_extension"))
            .unwrap_err();
        assert!(matches!(err, LrcViewError::UnsupportedFile { .. }));
    }
}
