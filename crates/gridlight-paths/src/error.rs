//! Error types for the spanning search.

use std::fmt;

use gridlight_core::{Cell, GridError};
use thiserror::Error;

/// Why a target was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFault {
    /// The cell lies outside the grid.
    OutOfBounds,
    /// The cell is flagged as no-data.
    NoData,
}

impl fmt::Display for TargetFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => write!(f, "outside the grid"),
            Self::NoData => write!(f, "on a no-data cell"),
        }
    }
}

/// Errors arising from the spanning search.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpanningError {
    /// A target is out of bounds or impassable. Raised before any search
    /// state is touched.
    #[error("invalid target {cell}: {reason}")]
    InvalidTarget { cell: Cell, reason: TargetFault },

    /// Run options are out of range.
    #[error("invalid options: {reason}")]
    InvalidOptions { reason: String },

    /// The targets could not all be joined into one tree.
    #[error("targets split into {groups} disconnected groups")]
    Disconnected { groups: usize },

    /// Underlying raster error.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Convenience alias for results carrying a [`SpanningError`].
pub type SpanningResult<T> = Result<T, SpanningError>;
