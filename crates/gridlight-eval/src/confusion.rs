//! Confusion matrix of a predicted grid raster against ground truth.

use std::fmt;

use gridlight_core::Raster;

use crate::error::{EvalError, EvalResult};
use crate::resample::{Window, clip, downsample_max};

/// Cell counts of a binary prediction against ground truth.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfusionMatrix {
    pub tp: u64,
    pub fp: u64,
    pub tn: u64,
    #[cfg_attr(feature = "serde", serde(rename = "fn"))]
    pub fn_: u64,
}

fn ratio(num: u64, den: u64) -> Option<f64> {
    (den > 0).then(|| num as f64 / den as f64)
}

impl ConfusionMatrix {
    /// Total cells counted.
    pub fn total(&self) -> u64 {
        self.tp + self.fp + self.tn + self.fn_
    }

    /// Share of predicted grid cells that are grid. `None` when nothing
    /// was predicted.
    pub fn precision(&self) -> Option<f64> {
        ratio(self.tp, self.tp + self.fp)
    }

    /// Share of grid cells that were predicted. `None` when the truth has
    /// no grid.
    pub fn recall(&self) -> Option<f64> {
        ratio(self.tp, self.tp + self.fn_)
    }

    /// Share of all cells classified correctly.
    pub fn accuracy(&self) -> Option<f64> {
        ratio(self.tp + self.tn, self.total())
    }

    /// Condense into the two headline numbers.
    pub fn summary(&self) -> AccuracySummary {
        AccuracySummary {
            predicted_correct: self.precision(),
            truth_missed: self.recall().map(|r| 1.0 - r),
        }
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tp={} fp={} tn={} fn={}",
            self.tp, self.fp, self.tn, self.fn_
        )
    }
}

/// Headline accuracy figures.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AccuracySummary {
    /// Share of predicted grid cells that are true grid.
    pub predicted_correct: Option<f64>,
    /// Share of true grid cells the prediction missed.
    pub truth_missed: Option<f64>,
}

/// How to prepare the rasters before counting.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EvalOptions {
    /// Only cells marked `true` are counted. Both rasters are first clipped
    /// to the bounding window of the marked cells.
    pub aoi: Option<Raster<bool>>,
    /// Group `factor × factor` blocks into one cell before counting; a block
    /// is grid when any of its cells is.
    pub cell_factor: Option<usize>,
}

impl EvalOptions {
    pub fn with_aoi(mut self, aoi: Raster<bool>) -> Self {
        self.aoi = Some(aoi);
        self
    }

    pub fn with_cell_factor(mut self, factor: usize) -> Self {
        self.cell_factor = Some(factor);
        self
    }
}

/// Count true/false positives/negatives of `guess` against `truth`.
pub fn eval_confusion_matrix(
    truth: &Raster<bool>,
    guess: &Raster<bool>,
    options: &EvalOptions,
) -> EvalResult<ConfusionMatrix> {
    ensure_same_dims(truth, guess)?;

    let (mut truth, mut guess, mut aoi) = match &options.aoi {
        Some(aoi) => {
            ensure_same_dims(truth, aoi)?;
            let window = Window::bounding(aoi).ok_or(EvalError::EmptyWindow)?;
            (
                clip(truth, window)?,
                clip(guess, window)?,
                Some(clip(aoi, window)?),
            )
        }
        None => (truth.clone(), guess.clone(), None),
    };

    if let Some(factor) = options.cell_factor {
        truth = downsample_max(&truth, factor)?;
        guess = downsample_max(&guess, factor)?;
        aoi = aoi.map(|m| downsample_max(&m, factor)).transpose()?;
    }

    let mut mat = ConfusionMatrix::default();
    for (i, (&t, &g)) in truth.as_slice().iter().zip(guess.as_slice()).enumerate() {
        if aoi.as_ref().is_some_and(|m| !*m.at(i)) {
            continue;
        }
        match (t, g) {
            (true, true) => mat.tp += 1,
            (false, true) => mat.fp += 1,
            (false, false) => mat.tn += 1,
            (true, false) => mat.fn_ += 1,
        }
    }
    log::debug!("confusion matrix over {} cells: {mat}", mat.total());
    Ok(mat)
}

/// Headline figures of `guess` against `truth`, counting every cell.
pub fn estimate_accuracy(truth: &Raster<bool>, guess: &Raster<bool>) -> EvalResult<AccuracySummary> {
    eval_confusion_matrix(truth, guess, &EvalOptions::default()).map(|m| m.summary())
}

fn ensure_same_dims<A, B>(expected: &Raster<A>, actual: &Raster<B>) -> EvalResult<()> {
    if expected.dims() != actual.dims() {
        return Err(EvalError::ShapeMismatch {
            expected: expected.dims(),
            actual: actual.dims(),
        });
    }
    Ok(())
}
