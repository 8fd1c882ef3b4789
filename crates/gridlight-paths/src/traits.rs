use gridlight_core::{Cell, Dims};

/// Implicit weighted graph over the cells of a raster.
///
/// Implementors compute adjacency on demand; nothing is materialised. Edge
/// costs must be finite and non-negative.
pub trait CostGraph {
    /// Extent of the underlying raster. Every cell produced by
    /// [`neighbors`](Self::neighbors) lies inside it.
    fn dims(&self) -> Dims;

    /// Whether `c` is inside the raster and may appear on a path.
    fn is_passable(&self, c: Cell) -> bool;

    /// Append the passable neighbours of `c` and the cost of the edge to
    /// each into `buf`, in increasing flattened-index order. The caller
    /// clears `buf` before calling.
    fn neighbors(&self, c: Cell, buf: &mut Vec<(Cell, f64)>);

    /// Cost of the edge between adjacent cells, or `None` if they are not
    /// connected.
    fn cost(&self, from: Cell, to: Cell) -> Option<f64>;
}
