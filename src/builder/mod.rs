//! Builder API for ergonomic table construction.
//!
//! This module provides a fluent builder and the `state_enum!` macro for
//! writing transition tables without raw row indices.

pub mod error;
pub mod macros;
pub mod table;

pub use error::BuildError;
pub use table::TableBuilder;
