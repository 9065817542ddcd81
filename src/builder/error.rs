//! Build errors for the table builder.

use crate::table::TableError;
use thiserror::Error;

/// Errors that can occur when building transition tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Start state not specified. Call .start(state) before .build()")]
    MissingStart,

    #[error("No states defined. Add at least one state")]
    NoStates,

    #[error(transparent)]
    Table(#[from] TableError),
}
