//! Post-processing and accuracy metrics for inferred grid networks.
//!
//! Turns a distance-to-network raster into a grid mask
//! ([`threshold_distances`]) and scores a predicted mask against ground
//! truth ([`eval_confusion_matrix`]), optionally restricted to an area of
//! interest and counted on coarser cells.

mod confusion;
mod error;
mod resample;
mod threshold;

pub use confusion::{
    AccuracySummary, ConfusionMatrix, EvalOptions, estimate_accuracy, eval_confusion_matrix,
};
pub use error::{EvalError, EvalResult};
pub use resample::{Window, clip, downsample_max};
pub use threshold::threshold_distances;
