//! Shared configuration types for tickdown
//!
//! This crate contains serializable configuration types that are shared between
//! the timer library (tickdown-core) and the command line front end.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─────────────────────────────────────────────────────────────────────────────
// Levels
// ─────────────────────────────────────────────────────────────────────────────

/// Difficulty level. Each level carries its own countdown length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    #[default]
    Low,
    Medium,
    High,
}

impl Level {
    /// All levels in play order
    pub const ALL: [Level; 3] = [Level::Low, Level::Medium, Level::High];

    /// The level that follows this one, or `None` after the last level
    pub fn next(self) -> Option<Level> {
        match self {
            Level::Low => Some(Level::Medium),
            Level::Medium => Some(Level::High),
            Level::High => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::Medium => "medium",
            Level::High => "high",
        }
    }

    /// Built-in limits used when the config does not override them
    pub fn default_limits(self) -> LevelLimits {
        match self {
            Level::Low => LevelLimits::new(60, 5),
            Level::Medium => LevelLimits::new(45, 6),
            Level::High => LevelLimits::new(30, 7),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown level name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLevel(pub String);

impl fmt::Display for UnknownLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown level '{}' (expected low, medium or high)", self.0)
    }
}

impl std::error::Error for UnknownLevel {}

impl FromStr for Level {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Level::Low),
            "medium" => Ok(Level::Medium),
            "high" => Ok(Level::High),
            _ => Err(UnknownLevel(s.to_string())),
        }
    }
}

/// Time limit and question count for one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelLimits {
    /// Countdown length in seconds
    pub time_limit_secs: i64,
    /// Questions asked during the level
    pub question_count: u32,
}

impl LevelLimits {
    pub const fn new(time_limit_secs: i64, question_count: u32) -> Self {
        Self {
            time_limit_secs,
            question_count,
        }
    }
}

/// Per-level limits as stored in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTable {
    #[serde(default = "default_low")]
    pub low: LevelLimits,
    #[serde(default = "default_medium")]
    pub medium: LevelLimits,
    #[serde(default = "default_high")]
    pub high: LevelLimits,
}

fn default_low() -> LevelLimits {
    Level::Low.default_limits()
}

fn default_medium() -> LevelLimits {
    Level::Medium.default_limits()
}

fn default_high() -> LevelLimits {
    Level::High.default_limits()
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            low: default_low(),
            medium: default_medium(),
            high: default_high(),
        }
    }
}

impl LevelTable {
    pub fn get(&self, level: Level) -> LevelLimits {
        match level {
            Level::Low => self.low,
            Level::Medium => self.medium,
            Level::High => self.high,
        }
    }

    pub fn get_mut(&mut self, level: Level) -> &mut LevelLimits {
        match level {
            Level::Low => &mut self.low,
            Level::Medium => &mut self.medium,
            Level::High => &mut self.high,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AppConfig
// ─────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_TICK_PERIOD_MS: u64 = 1000;
pub const DEFAULT_BAR_WIDTH: u16 = 30;

fn default_tick_period_ms() -> u64 {
    DEFAULT_TICK_PERIOD_MS
}

fn default_bar_width() -> u16 {
    DEFAULT_BAR_WIDTH
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Time between two ticks in milliseconds
    #[serde(default = "default_tick_period_ms")]
    pub tick_period_ms: u64,

    /// Number of cells in the rendered countdown bar
    #[serde(default = "default_bar_width")]
    pub bar_width: u16,

    #[serde(default)]
    pub levels: LevelTable,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
            bar_width: DEFAULT_BAR_WIDTH,
            levels: LevelTable::default(),
        }
    }
}

impl AppConfig {
    /// Limits for a level, honoring overrides from the config file
    pub fn limits(&self, level: Level) -> LevelLimits {
        self.levels.get(level)
    }
}
