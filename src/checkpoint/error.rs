//! Checkpoint error types.

use crate::fsm::FsmError;
use thiserror::Error;

/// Errors that can occur while saving or restoring a checkpoint.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("failed to encode checkpoint as {format}: {message}")]
    SerializationFailed {
        format: &'static str,
        message: String,
    },

    /// Includes tables that fail validation on load
    #[error("failed to decode {format} checkpoint: {message}")]
    DeserializationFailed {
        format: &'static str,
        message: String,
    },

    #[error("checkpoint version {found} is not supported (expected {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("checkpoint state is invalid: {0}")]
    ValidationFailed(#[from] FsmError),
}
