//! Error types for evaluation.

use gridlight_core::Dims;
use thiserror::Error;

/// Errors arising from comparing or resampling rasters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Truth, guess and area of interest must share one extent.
    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: Dims, actual: Dims },

    /// The block factor would enlarge cells instead of grouping them.
    #[error("up-sampling not supported (factor {factor}); use a factor of at least 1")]
    Upsampling { factor: usize },

    /// A window or area of interest selects no cells.
    #[error("window selects no cells")]
    EmptyWindow,
}

/// Convenience alias for results carrying an [`EvalError`].
pub type EvalResult<T> = Result<T, EvalError>;
