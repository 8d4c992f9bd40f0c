use std::path::PathBuf;
use std::sync::Arc;

use tickdown_core::{AppConfig, AppConfigExt, TimerRegistry};
use tokio::sync::{Mutex, RwLock};

/// Holds all shared state for the CLI application.
/// This is a lightweight container - logic lives in the individual state types.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<AppConfig>>,
    pub timers: Arc<Mutex<TimerRegistry>>,
    /// Where `set-period` persists the config. `None` uses the platform location.
    pub config_path: Option<PathBuf>,
}

impl CliContext {
    pub fn new() -> Self {
        Self::with_config(AppConfig::load())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            timers: Arc::new(Mutex::new(TimerRegistry::new())),
            config_path: None,
        }
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}
