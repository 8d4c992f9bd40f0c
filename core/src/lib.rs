pub mod context;
pub mod countdown;
pub mod registry;

// Re-exports for convenience
pub use context::{AppConfig, AppConfigExt, ConfigError, Level, LevelLimits};
pub use countdown::{
    CancelHandle, CancelOnDrop, Countdown, CountdownError, DoneCallback, TickCallback,
    TimerState, start_timer,
};
pub use registry::{TimerEntry, TimerId, TimerRegistry};
