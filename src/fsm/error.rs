//! FSM errors.

use crate::core::{InputError, StateId};
use thiserror::Error;

/// Errors raised by FSM operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsmError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("state {id} does not exist in the {len}-state table")]
    UnknownState { id: StateId, len: usize },

    #[error("controller at {state} belongs to a different FSM")]
    ForeignController { state: StateId },
}
