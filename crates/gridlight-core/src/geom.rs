//! Geometry primitives: [`Cell`] and [`Dims`].
//!
//! A [`Cell`] is a signed `(row, col)` coordinate so that neighbour offsets
//! can step outside the grid and be filtered afterwards. [`Dims`] is the
//! `rows × cols` extent of a raster and owns the flattened row-major
//! addressing shared by every per-cell table in the workspace.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// An integer grid coordinate. Row grows down, column grows right.
///
/// Ordering is row-major, which is the same order as the flattened index
/// produced by [`Dims::index`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new cell.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a cell shifted by (dr, dc).
    #[inline]
    pub const fn shift(self, dr: i32, dc: i32) -> Self {
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// Whether `other` differs from `self` on both axes.
    #[inline]
    pub fn is_diagonal_to(self, other: Cell) -> bool {
        self.row != other.row && self.col != other.col
    }

    /// The four orthogonal neighbours (up, right, down, left).
    #[inline]
    pub fn neighbors_4(self) -> [Cell; 4] {
        [
            self.shift(-1, 0),
            self.shift(0, 1),
            self.shift(1, 0),
            self.shift(0, -1),
        ]
    }

    /// All eight neighbours in row-major order, which is also increasing
    /// flattened-index order for in-bounds cells.
    #[inline]
    pub fn neighbors_8(self) -> [Cell; 8] {
        [
            self.shift(-1, -1),
            self.shift(-1, 0),
            self.shift(-1, 1),
            self.shift(0, -1),
            self.shift(0, 1),
            self.shift(1, -1),
            self.shift(1, 0),
            self.shift(1, 1),
        ]
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl Add for Cell {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Cell {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

// ---------------------------------------------------------------------------
// Dims
// ---------------------------------------------------------------------------

/// The `rows × cols` extent of a raster.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dims {
    pub rows: usize,
    pub cols: usize,
}

impl Dims {
    /// Create a new extent.
    #[inline]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells.
    #[inline]
    pub const fn len(self) -> usize {
        self.rows * self.cols
    }

    /// Whether the extent has no cells.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether `c` lies inside the extent.
    #[inline]
    pub fn contains(self, c: Cell) -> bool {
        c.row >= 0 && c.col >= 0 && (c.row as usize) < self.rows && (c.col as usize) < self.cols
    }

    /// Convert a cell to its flattened row-major index. Returns `None` if
    /// out of bounds.
    #[inline]
    pub fn index(self, c: Cell) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some(c.row as usize * self.cols + c.col as usize)
    }

    /// Convert a flattened index back to a cell.
    #[inline]
    pub fn cell(self, idx: usize) -> Cell {
        Cell::new((idx / self.cols) as i32, (idx % self.cols) as i32)
    }

    /// Row-major iterator over every cell.
    #[inline]
    pub fn iter(self) -> DimsIter {
        DimsIter {
            dims: self,
            next: 0,
        }
    }
}

impl IntoIterator for Dims {
    type Item = Cell;
    type IntoIter = DimsIter;
    #[inline]
    fn into_iter(self) -> DimsIter {
        self.iter()
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

// ---------------------------------------------------------------------------
// DimsIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the cells of a [`Dims`].
#[derive(Clone, Debug)]
pub struct DimsIter {
    dims: Dims,
    next: usize,
}

impl Iterator for DimsIter {
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Cell> {
        if self.next >= self.dims.len() {
            return None;
        }
        let c = self.dims.cell(self.next);
        self.next += 1;
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dims.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DimsIter {}
