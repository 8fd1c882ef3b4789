//! The [`CostGrid`]: a validated traversal-cost surface.
//!
//! Every passable cell carries a finite, non-negative cost. Cells flagged in
//! the no-data mask are impassable and never appear on any path. Validation
//! happens once at construction so traversal never has to re-check values.

use crate::error::{GridError, GridResult};
use crate::geom::{Cell, Dims};
use crate::raster::Raster;

// ---------------------------------------------------------------------------
// Transform
// ---------------------------------------------------------------------------

/// Affine mapping from grid indices to map coordinates.
///
/// Coefficients follow the usual raster convention:
/// `x = a * col + b * row + c` and `y = d * col + e * row + f`.
/// The search itself only uses grid indices; the transform travels with the
/// grid so outputs can be placed back on the map.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Transform {
    /// Unit cells with the origin at the top-left corner.
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 0.0,
        e: 1.0,
        f: 0.0,
    };

    /// North-up transform with square-ish pixels of `(width, height)` and the
    /// top-left corner at `(x0, y0)`. `height` is usually negative.
    pub const fn north_up(x0: f64, y0: f64, width: f64, height: f64) -> Self {
        Self {
            a: width,
            b: 0.0,
            c: x0,
            d: 0.0,
            e: height,
            f: y0,
        }
    }

    /// Map coordinates of a (possibly fractional) grid position.
    #[inline]
    pub fn apply(&self, row: f64, col: f64) -> (f64, f64) {
        (
            self.a * col + self.b * row + self.c,
            self.d * col + self.e * row + self.f,
        )
    }

    /// Map coordinates of the centre of `cell`.
    #[inline]
    pub fn cell_center(&self, cell: Cell) -> (f64, f64) {
        self.apply(cell.row as f64 + 0.5, cell.col as f64 + 0.5)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ---------------------------------------------------------------------------
// CostGrid
// ---------------------------------------------------------------------------

/// An immutable cost surface with a no-data mask.
#[derive(Debug, Clone)]
pub struct CostGrid {
    costs: Raster<f64>,
    nodata: Raster<bool>,
    transform: Transform,
}

impl CostGrid {
    /// Build a cost grid where every cell is passable.
    ///
    /// Fails with [`GridError::InvalidCost`] on the first negative or
    /// non-finite value, or [`GridError::EmptyGrid`] for a zero-sized raster.
    pub fn new(costs: Raster<f64>) -> GridResult<Self> {
        let nodata = Raster::filled(costs.dims(), false);
        Self::with_nodata(costs, nodata)
    }

    /// Build a cost grid with an explicit no-data mask (`true` = impassable).
    ///
    /// Values under the mask are ignored; every other value must be finite
    /// and non-negative.
    pub fn with_nodata(costs: Raster<f64>, nodata: Raster<bool>) -> GridResult<Self> {
        let dims = costs.dims();
        if dims.is_empty() {
            return Err(GridError::EmptyGrid);
        }
        if nodata.dims() != dims {
            return Err(GridError::ShapeMismatch {
                expected: dims,
                actual: nodata.dims().len(),
            });
        }
        for ((cell, &value), &masked) in costs.iter().zip(nodata.as_slice()) {
            if !masked && !(value.is_finite() && value >= 0.0) {
                return Err(GridError::InvalidCost { cell, value });
            }
        }
        Ok(Self {
            costs,
            nodata,
            transform: Transform::IDENTITY,
        })
    }

    /// Build a cost grid treating every cell equal to `nodata_value` as
    /// no-data. A NaN `nodata_value` masks NaN cells.
    pub fn from_nodata_value(costs: Raster<f64>, nodata_value: f64) -> GridResult<Self> {
        let nodata = costs.map(|_, &v| {
            if nodata_value.is_nan() {
                v.is_nan()
            } else {
                v == nodata_value
            }
        });
        Self::with_nodata(costs, nodata)
    }

    /// Attach a spatial transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// The extent of the grid.
    #[inline]
    pub fn dims(&self) -> Dims {
        self.costs.dims()
    }

    /// The spatial transform.
    #[inline]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Cost of `cell`, or `None` if it is out of bounds or no-data.
    #[inline]
    pub fn cost(&self, cell: Cell) -> Option<f64> {
        let i = self.dims().index(cell)?;
        self.cost_at(i)
    }

    /// Cost at a flattened index, or `None` for no-data. Panics if out of
    /// bounds.
    #[inline]
    pub fn cost_at(&self, idx: usize) -> Option<f64> {
        if *self.nodata.at(idx) {
            None
        } else {
            Some(*self.costs.at(idx))
        }
    }

    /// Whether `cell` is inside the grid and not no-data.
    #[inline]
    pub fn is_passable(&self, cell: Cell) -> bool {
        self.cost(cell).is_some()
    }

    /// Whether `cell` is inside the grid but flagged as no-data.
    #[inline]
    pub fn is_nodata(&self, cell: Cell) -> bool {
        self.nodata.get(cell).copied().unwrap_or(false)
    }

    /// The raw cost raster (values under the mask are unspecified).
    pub fn costs(&self) -> &Raster<f64> {
        &self.costs
    }

    /// The no-data mask.
    pub fn nodata_mask(&self) -> &Raster<bool> {
        &self.nodata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(rows: usize, cols: usize, v: f64) -> Raster<f64> {
        Raster::filled(Dims::new(rows, cols), v)
    }

    #[test]
    fn rejects_negative_cost() {
        let mut r = uniform(2, 2, 1.0);
        r.set(Cell::new(1, 0), -0.5);
        let err = CostGrid::new(r).unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidCost {
                cell: Cell::new(1, 0),
                value: -0.5
            }
        );
    }

    #[test]
    fn rejects_non_finite_cost() {
        let mut r = uniform(2, 2, 1.0);
        r.set(Cell::new(0, 1), f64::INFINITY);
        assert!(CostGrid::new(r).is_err());
    }

    #[test]
    fn masked_cells_may_hold_anything() {
        let mut r = uniform(2, 2, 1.0);
        r.set(Cell::new(0, 1), f64::NAN);
        let mut mask = Raster::filled(r.dims(), false);
        mask.set(Cell::new(0, 1), true);
        let g = CostGrid::with_nodata(r, mask).unwrap();
        assert_eq!(g.cost(Cell::new(0, 1)), None);
        assert!(g.is_nodata(Cell::new(0, 1)));
        assert_eq!(g.cost(Cell::new(0, 0)), Some(1.0));
    }

    #[test]
    fn nodata_value_masks_matching_cells() {
        let mut r = uniform(3, 3, 2.0);
        r.set(Cell::new(1, 1), -1.0);
        let g = CostGrid::from_nodata_value(r, -1.0).unwrap();
        assert!(!g.is_passable(Cell::new(1, 1)));
        assert!(g.is_passable(Cell::new(0, 0)));
        assert!(!g.is_passable(Cell::new(3, 0)));
    }

    #[test]
    fn rejects_empty_and_mismatched() {
        assert_eq!(
            CostGrid::new(uniform(0, 3, 1.0)).unwrap_err(),
            GridError::EmptyGrid
        );
        let mask = Raster::filled(Dims::new(1, 1), false);
        assert!(matches!(
            CostGrid::with_nodata(uniform(2, 2, 1.0), mask),
            Err(GridError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn transform_cell_center() {
        let t = Transform::north_up(100.0, 50.0, 10.0, -10.0);
        assert_eq!(t.cell_center(Cell::new(0, 0)), (105.0, 45.0));
        assert_eq!(t.cell_center(Cell::new(2, 1)), (115.0, 25.0));
    }
}
