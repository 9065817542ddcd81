//! Driver errors.

use crate::fsm::FsmError;
use thiserror::Error;

/// Errors that stop the driver loop.
#[derive(Debug, Error)]
pub enum DriverError<E: std::error::Error + 'static> {
    #[error("hardware I/O failed: {0}")]
    Io(#[source] E),

    #[error("{count} consecutive sensor samples were out of range")]
    TooManyInvalidInputs { count: u32 },

    #[error(transparent)]
    Fsm(#[from] FsmError),
}
