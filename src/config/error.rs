//! Configuration errors.

use thiserror::Error;

/// Errors that can occur while loading driver configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse driver configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tick_ms must be greater than zero")]
    ZeroTick,

    #[error("max_consecutive_invalid must be greater than zero when set")]
    ZeroInvalidLimit,
}
