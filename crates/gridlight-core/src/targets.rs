//! The [`TargetSet`]: cells that must end up connected.

use std::collections::BTreeSet;

use crate::geom::Cell;
use crate::raster::Raster;

/// A set of distinct target cells, kept in row-major order.
///
/// Duplicates are collapsed on construction. Bounds and passability are
/// checked by whoever consumes the set against a concrete grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSet {
    cells: Vec<Cell>,
}

impl TargetSet {
    /// Collect targets from any sequence of cells.
    pub fn new(cells: impl IntoIterator<Item = Cell>) -> Self {
        let set: BTreeSet<Cell> = cells.into_iter().collect();
        Self {
            cells: set.into_iter().collect(),
        }
    }

    /// Every `true` cell of a mask.
    pub fn from_mask(mask: &Raster<bool>) -> Self {
        Self {
            cells: mask.iter().filter(|(_, v)| **v).map(|(c, _)| c).collect(),
        }
    }

    /// Every cell of `raster` equal to `value` (a thresholded target raster
    /// marks settlements with `1.0`).
    pub fn from_values(raster: &Raster<f64>, value: f64) -> Self {
        Self {
            cells: raster
                .iter()
                .filter(|(_, v)| **v == value)
                .map(|(c, _)| c)
                .collect(),
        }
    }

    /// Number of targets.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether there are no targets.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `cell` is a target.
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.binary_search(&cell).is_ok()
    }

    /// Targets in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate targets in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }
}

impl FromIterator<Cell> for TargetSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Dims;

    #[test]
    fn duplicates_collapse_and_sort() {
        let t = TargetSet::new([Cell::new(2, 0), Cell::new(0, 1), Cell::new(2, 0)]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.as_slice(), &[Cell::new(0, 1), Cell::new(2, 0)]);
        assert!(t.contains(Cell::new(2, 0)));
        assert!(!t.contains(Cell::new(1, 1)));
    }

    #[test]
    fn from_mask_collects_true_cells() {
        let mut mask = Raster::filled(Dims::new(3, 3), false);
        mask.set(Cell::new(2, 2), true);
        mask.set(Cell::new(0, 1), true);
        let t = TargetSet::from_mask(&mask);
        assert_eq!(t.as_slice(), &[Cell::new(0, 1), Cell::new(2, 2)]);
    }

    #[test]
    fn from_values_matches_exactly() {
        let r = Raster::from_rows(vec![vec![0.0, 1.0], vec![1.0, 0.5]]).unwrap();
        let t = TargetSet::from_values(&r, 1.0);
        assert_eq!(t.as_slice(), &[Cell::new(0, 1), Cell::new(1, 0)]);
    }
}
