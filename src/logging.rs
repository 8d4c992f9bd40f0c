//! File logging for the REPL.
//!
//! Log lines go to `<config dir>/tickdown/tickdown.log`, rotated at 10 MB,
//! so they never mix with countdown output on the terminal. `DEBUG_LOGGING=1`
//! turns on debug events from the tickdown crates. When the file cannot be
//! opened only warnings and errors are shown, on stderr.

use std::path::{Path, PathBuf};

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt};

const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;
const LOG_FILE: &str = "tickdown.log";

/// Install the global subscriber. Hold the returned guard until exit so the
/// background writer flushes.
pub fn init() -> Option<WorkerGuard> {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let opened = log_dir().and_then(|dir| open_log(&dir).map(|appender| (dir, appender)));
    let Some((dir, appender)) = opened else {
        fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(EnvFilter::new("warn"))
            .init();
        return None;
    };

    let (writer, guard) = tracing_appender::non_blocking(appender);
    fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(EnvFilter::new(filter_directive(debug_logging)))
        .init();

    tracing::info!(log_dir = ?dir, debug_logging, "logging to file");
    Some(guard)
}

fn log_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|config| config.join("tickdown"))
}

/// Keeps `tickdown.log` plus one rotated `tickdown.log.1`
fn open_log(dir: &Path) -> Option<BasicRollingFileAppender> {
    let path = dir.join(LOG_FILE);
    let opened = std::fs::create_dir_all(dir).and_then(|()| {
        BasicRollingFileAppender::new(
            &path,
            RollingConditionBasic::new().max_size(MAX_LOG_SIZE),
            1,
        )
    });
    match opened {
        Ok(appender) => Some(appender),
        Err(e) => {
            // No subscriber yet
            eprintln!("cannot open log file {}: {e}", path.display());
            None
        }
    }
}

fn filter_directive(debug_logging: bool) -> &'static str {
    if debug_logging {
        "info,tickdown=debug,tickdown_core=debug"
    } else {
        "info"
    }
}
