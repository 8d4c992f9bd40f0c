mod config;
mod error;

pub use config::{AppConfig, AppConfigExt, Level, LevelLimits, LevelTable};
pub use error::ConfigError;
