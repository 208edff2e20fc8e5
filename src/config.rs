use crate::error::{LrcViewError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub player: PlayerConfig,
}

/// Lyric display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Context lines shown above the highlighted line
    #[serde(default = "default_context_before")]
    pub context_before: usize,
    /// Context lines shown below the highlighted line
    #[serde(default = "default_context_after")]
    pub context_after: usize,
}

const fn default_context_before() -> usize {
    2
}

const fn default_context_after() -> usize {
    4
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            context_before: default_context_before(),
            context_after: default_context_after(),
        }
    }
}

/// Player event handling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// How often the player reports its position
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Position jumps larger than this count as a seek
    #[serde(default = "default_seek_threshold_ms")]
    pub seek_threshold_ms: u64,
}

const fn default_tick_ms() -> u64 {
    100
}

const fn default_seek_threshold_ms() -> u64 {
    2000
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            seek_threshold_ms: default_seek_threshold_ms(),
        }
    }
}

impl PlayerConfig {
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    #[must_use]
    pub const fn seek_threshold(&self) -> Duration {
        Duration::from_millis(self.seek_threshold_ms)
    }
}

impl Config {
    /// Get the config file path (`~/.config/lrcview/config.toml`)
    #[must_use]
    pub fn config_path() -> PathBuf {
        crate::paths::config_path()
    }

    /// Load config from file or create a template on first run
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or
    /// [`LrcViewError::ConfigNotFound`] after writing the template.
    pub fn load_or_create() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent)?;
            }

            fs::write(&config_path, CONFIG_TEMPLATE)?;

            return Err(LrcViewError::ConfigNotFound { path: config_path });
        }

        let content = fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}

const CONFIG_TEMPLATE: &str = r"# lrcview configuration
# ~/.config/lrcview/config.toml

[display]
# Context lines shown around the highlighted lyric line
context_before = 2
context_after = 4

[player]
# How often the player reports its position (milliseconds)
tick_ms = 100
# Position jumps larger than this count as a seek (milliseconds)
seek_threshold_ms = 2000
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.display.context_before, 2);
        assert_eq!(config.display.context_after, 4);
        assert_eq!(config.player.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.player.seek_threshold(), Duration::from_secs(2));
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let config: Config = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.display.context_before, 2);
        assert_eq!(config.player.seek_threshold_ms, 2000);
    }

    #[test]
    fn test_partial_config_uses_field_defaults() {
        let config: Config = toml::from_str("[display]\ncontext_before = 1\n").unwrap();
        assert_eq!(config.display.context_before, 1);
        assert_eq!(config.display.context_after, 4);
        assert_eq!(config.player.tick_ms, 100);
    }
}
