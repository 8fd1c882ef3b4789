use gridlight_core::{Cell, Dims};

pub(crate) const NO_PRED: usize = usize::MAX;

/// Per-cell search tables owned by a single run: tentative distance,
/// predecessor link and settled flag, all addressed by flattened index.
#[derive(Debug, Clone)]
pub(crate) struct SearchState {
    pub(crate) dims: Dims,
    pub(crate) dist: Vec<f64>,
    pub(crate) pred: Vec<usize>,
    pub(crate) settled: Vec<bool>,
}

impl SearchState {
    pub(crate) fn new(dims: Dims) -> Self {
        let len = dims.len();
        Self {
            dims,
            dist: vec![f64::INFINITY; len],
            pred: vec![NO_PRED; len],
            settled: vec![false; len],
        }
    }

    /// Record an improved distance for `idx` reached through `from`.
    #[inline]
    pub(crate) fn relax(&mut self, idx: usize, cost: f64, from: usize) {
        debug_assert!(cost < self.dist[idx]);
        self.dist[idx] = cost;
        self.pred[idx] = from;
    }

    #[inline]
    pub(crate) fn pred_of(&self, idx: usize) -> Option<usize> {
        match self.pred[idx] {
            NO_PRED => None,
            p => Some(p),
        }
    }

    #[inline]
    pub(crate) fn cell(&self, idx: usize) -> Cell {
        self.dims.cell(idx)
    }
}

/// Approximate bytes of per-cell state a spanning run over `dims` allocates
/// up front: distance, predecessor, settled and on-tree flags, and the
/// component table. Frontier growth is not included.
pub fn estimate_memory(dims: Dims) -> usize {
    let per_cell = std::mem::size_of::<f64>()
        + std::mem::size_of::<usize>()
        + 2 * std::mem::size_of::<bool>()
        + std::mem::size_of::<u32>();
    dims.len() * per_cell
}
