//! Application configuration
//!
//! This module re-exports shared types from tickdown-types and provides
//! persistence and countdown construction for AppConfig.

use std::path::{Path, PathBuf};
use std::time::Duration;

pub use tickdown_types::{AppConfig, Level, LevelLimits, LevelTable};

use super::error::ConfigError;
use crate::countdown::Countdown;

const APP_NAME: &str = "tickdown";
const CONFIG_NAME: &str = "config";

// ─────────────────────────────────────────────────────────────────────────────
// AppConfig Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for AppConfig persistence and countdown presets
pub trait AppConfigExt: Sized {
    fn config_path() -> Result<PathBuf, ConfigError>;
    fn load() -> Self;
    fn try_load() -> Result<Self, ConfigError>;
    fn load_from(path: &Path) -> Result<Self, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn save_to(&self, path: &Path) -> Result<(), ConfigError>;
    fn tick_period(&self) -> Duration;
    fn countdown_for(&self, level: Level) -> Countdown;
}

impl AppConfigExt for AppConfig {
    /// Platform config file location, e.g. `~/.config/tickdown/config.toml`
    fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)?)
    }

    /// Load the stored config, falling back to defaults if it cannot be read
    fn load() -> Self {
        Self::try_load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "using default configuration");
            Self::default()
        })
    }

    fn try_load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Missing files are created with defaults; missing keys take serde defaults
    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Ok(confy::load_path(path)?)
    }

    fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        confy::store_path(path, self).map_err(ConfigError::Save)
    }

    fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms.max(1))
    }

    /// Countdown for one level using the configured time limit and period
    fn countdown_for(&self, level: Level) -> Countdown {
        Countdown::new(self.limits(level).time_limit_secs).period(self.tick_period())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickdown_types::DEFAULT_BAR_WIDTH;

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AppConfig {
            tick_period_ms: 250,
            bar_width: 12,
            ..AppConfig::default()
        };
        config.levels.get_mut(Level::High).time_limit_secs = 20;
        config.levels.get_mut(Level::Low).question_count = 9;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.limits(Level::High).time_limit_secs, 20);
        assert_eq!(loaded.limits(Level::Low).question_count, 9);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "tick_period_ms = 500\n\n[levels.medium]\ntime_limit_secs = 40\nquestion_count = 4\n",
        )
        .unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.tick_period_ms, 500);
        assert_eq!(loaded.bar_width, DEFAULT_BAR_WIDTH);
        assert_eq!(loaded.limits(Level::Medium), LevelLimits::new(40, 4));
        assert_eq!(loaded.limits(Level::Low), Level::Low.default_limits());
        assert_eq!(loaded.limits(Level::High), Level::High.default_limits());
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, AppConfig::default());
    }

    #[test]
    fn test_tick_period_clamps_zero() {
        let config = AppConfig {
            tick_period_ms: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.tick_period(), Duration::from_millis(1));
        assert_eq!(AppConfig::default().tick_period(), Duration::from_secs(1));
    }

    #[test]
    fn test_countdown_for_level_uses_limits() {
        let mut config = AppConfig {
            tick_period_ms: 250,
            ..AppConfig::default()
        };
        config.levels.get_mut(Level::Medium).time_limit_secs = 12;

        let countdown = config.countdown_for(Level::Medium);
        assert_eq!(countdown.seconds(), 12);
        assert_eq!(countdown.tick_period(), Duration::from_millis(250));

        assert_eq!(config.countdown_for(Level::High).seconds(), 30);
    }
}
