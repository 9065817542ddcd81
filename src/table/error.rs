//! Table construction errors.

use crate::core::StateId;
use thiserror::Error;

/// A single invariant violation found while validating a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableViolation {
    #[error("table has no states")]
    EmptyTable,

    #[error("start state {start} is outside the {len}-state table")]
    StartOutOfRange { start: StateId, len: usize },

    #[error("state {state} ('{name}') maps input {input} to {target}, outside the {len}-state table")]
    DanglingNext {
        state: StateId,
        name: String,
        input: u8,
        target: StateId,
        len: usize,
    },

    #[error("state name '{name}' is used by both {first} and {second}")]
    DuplicateName {
        name: String,
        first: StateId,
        second: StateId,
    },
}

/// Errors raised when a transition table cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("invalid transition table: {}", describe(.violations))]
    InvalidTable { violations: Vec<TableViolation> },
}

impl TableError {
    /// Every violation found, in table order.
    pub fn violations(&self) -> &[TableViolation] {
        match self {
            Self::InvalidTable { violations } => violations,
        }
    }
}

fn describe(violations: &[TableViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
