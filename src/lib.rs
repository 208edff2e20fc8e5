pub mod config;
pub mod error;
pub mod lrc;
pub mod media;
pub mod paths;
pub mod playback;
pub mod store;
pub mod time;

pub use config::{Config, DisplayConfig, PlayerConfig};

/// Re-export toml error type for config parsing error handling
pub use toml::de::Error as TomlParseError;
pub use error::{LrcViewError, Result};
pub use lrc::{LrcEntry, LrcFile, LrcLine, LrcTag, LrcTagKey, ParseWarning};
pub use media::MediaKind;
pub use paths::{config_dir, config_path, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
pub use playback::PlaybackState;
pub use store::{AppStore, StoreEvent};
pub use time::{format_timestamp, DurationExt, UNKNOWN_TIMESTAMP};
