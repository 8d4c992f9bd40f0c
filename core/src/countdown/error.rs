//! Error types for countdown operations

use thiserror::Error;

/// Errors when starting a countdown
#[derive(Debug, Error)]
pub enum CountdownError {
    #[error("countdown must be started from within a Tokio runtime")]
    NoRuntime(#[source] tokio::runtime::TryCurrentError),
}
