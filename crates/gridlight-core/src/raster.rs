//! The [`Raster`] type: an owned, row-major 2D array.
//!
//! Unlike a shared view, a `Raster` owns its buffer outright, so a read-only
//! raster can be handed to several independent runs across threads.

use crate::error::{GridError, GridResult};
use crate::geom::{Cell, Dims, DimsIter};

/// A row-major 2D array of `T` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster<T> {
    data: Vec<T>,
    dims: Dims,
}

impl<T: Clone> Raster<T> {
    /// Create a raster of the given extent with every cell set to `value`.
    pub fn filled(dims: Dims, value: T) -> Self {
        Self {
            data: vec![value; dims.len()],
            dims,
        }
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: T) {
        for v in self.data.iter_mut() {
            *v = value.clone();
        }
    }
}

impl<T> Raster<T> {
    /// Wrap a row-major buffer. Fails if `data.len()` is not `rows * cols`.
    pub fn from_vec(dims: Dims, data: Vec<T>) -> GridResult<Self> {
        if data.len() != dims.len() {
            return Err(GridError::ShapeMismatch {
                expected: dims,
                actual: data.len(),
            });
        }
        Ok(Self { data, dims })
    }

    /// Build a raster from nested rows. Fails if the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<T>>) -> GridResult<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        let dims = Dims::new(nrows, ncols);
        let mut data = Vec::with_capacity(dims.len());
        for row in rows {
            if row.len() != ncols {
                return Err(GridError::ShapeMismatch {
                    expected: dims,
                    actual: data.len() + row.len(),
                });
            }
            data.extend(row);
        }
        Self::from_vec(dims, data)
    }

    /// Build a raster by evaluating `f` for every cell in row-major order.
    pub fn from_fn(dims: Dims, mut f: impl FnMut(Cell) -> T) -> Self {
        Self {
            data: dims.iter().map(&mut f).collect(),
            dims,
        }
    }

    /// The extent of this raster.
    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    /// Whether `c` lies inside the raster.
    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        self.dims.contains(c)
    }

    /// Value at `c`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, c: Cell) -> Option<&T> {
        self.dims.index(c).map(|i| &self.data[i])
    }

    /// Value at a flattened index. Panics if out of bounds.
    #[inline]
    pub fn at(&self, idx: usize) -> &T {
        &self.data[idx]
    }

    /// Set the value at `c`. Returns `false` (and does nothing) if `c` is
    /// out of bounds.
    pub fn set(&mut self, c: Cell, value: T) -> bool {
        match self.dims.index(c) {
            Some(i) => {
                self.data[i] = value;
                true
            }
            None => false,
        }
    }

    /// The underlying row-major buffer.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the raster, returning its row-major buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Apply `f` to every value, producing a new raster of the same extent.
    pub fn map<U>(&self, mut f: impl FnMut(Cell, &T) -> U) -> Raster<U> {
        Raster {
            data: self
                .dims
                .iter()
                .zip(self.data.iter())
                .map(|(c, v)| f(c, v))
                .collect(),
            dims: self.dims,
        }
    }

    /// Row-major iterator over `(Cell, &T)` pairs.
    pub fn iter(&self) -> RasterIter<'_, T> {
        RasterIter {
            cells: self.dims.iter(),
            values: self.data.iter(),
        }
    }
}

impl Raster<bool> {
    /// Number of `true` cells.
    pub fn count_true(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }
}

// ---------------------------------------------------------------------------
// RasterIter
// ---------------------------------------------------------------------------

/// Iterator over `(Cell, &T)` pairs in a [`Raster`].
pub struct RasterIter<'a, T> {
    cells: DimsIter,
    values: std::slice::Iter<'a, T>,
}

impl<'a, T> Iterator for RasterIter<'a, T> {
    type Item = (Cell, &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        Some((self.cells.next()?, self.values.next()?))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raster_filled_and_get() {
        let r = Raster::filled(Dims::new(3, 4), 1.5);
        assert_eq!(r.dims(), Dims::new(3, 4));
        assert_eq!(r.get(Cell::new(2, 3)), Some(&1.5));
        assert_eq!(r.get(Cell::new(3, 0)), None);
    }

    #[test]
    fn raster_set_out_of_bounds_is_noop() {
        let mut r = Raster::filled(Dims::new(2, 2), 0u8);
        assert!(r.set(Cell::new(1, 1), 9));
        assert!(!r.set(Cell::new(5, 5), 9));
        assert_eq!(r.as_slice(), &[0, 0, 0, 9]);
    }

    #[test]
    fn raster_from_vec_checks_length() {
        let err = Raster::from_vec(Dims::new(2, 2), vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, GridError::ShapeMismatch { actual: 3, .. }));
    }

    #[test]
    fn raster_from_rows_rejects_ragged() {
        assert!(Raster::from_rows(vec![vec![1, 2], vec![3]]).is_err());
        let r = Raster::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(r.get(Cell::new(1, 0)), Some(&3));
    }

    #[test]
    fn raster_map_and_iter() {
        let r = Raster::from_fn(Dims::new(2, 3), |c| c.row * 10 + c.col);
        let doubled = r.map(|_, &v| v * 2);
        assert_eq!(doubled.get(Cell::new(1, 2)), Some(&24));
        let cells: Vec<_> = r.iter().map(|(c, _)| c).collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[4], Cell::new(1, 1));
    }

    #[test]
    fn raster_fill_and_count() {
        let mut r = Raster::filled(Dims::new(2, 2), false);
        r.set(Cell::new(0, 1), true);
        assert_eq!(r.count_true(), 1);
        r.fill(true);
        assert_eq!(r.count_true(), 4);
    }
}
