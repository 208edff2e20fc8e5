use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LrcViewError {
    // Configuration errors
    #[error("Config file not found at {path}. A template has been created - please review it and restart.")]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to parse config file: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    // Lyric file errors
    #[error("Malformed LRC tag on line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("No synchronized lyric lines found in file")]
    NoSyncedLines,

    // File selection errors
    #[error("Unsupported file type for {slot} slot: {path} (expected one of: {expected})")]
    UnsupportedFile {
        slot: &'static str,
        path: PathBuf,
        expected: String,
    },

    // IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LrcViewError>;
