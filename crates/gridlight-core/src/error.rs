//! Error types for raster construction.

use thiserror::Error;

use crate::geom::{Cell, Dims};

/// Errors arising from raster or cost-grid construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// Attempted to build a raster with zero cells.
    #[error("grid must have at least one cell")]
    EmptyGrid,

    /// A data buffer or mask does not match the declared extent.
    #[error("shape mismatch: expected {expected}, got {actual} values")]
    ShapeMismatch { expected: Dims, actual: usize },

    /// A cost is negative, NaN or infinite on a cell that is not no-data.
    #[error("invalid cost {value} at {cell}: costs must be finite and non-negative")]
    InvalidCost { cell: Cell, value: f64 },

    /// A cell lies outside the raster.
    #[error("cell {cell} is outside the {dims} grid")]
    OutOfBounds { cell: Cell, dims: Dims },
}

/// Convenience alias for results carrying a [`GridError`].
pub type GridResult<T> = Result<T, GridError>;
