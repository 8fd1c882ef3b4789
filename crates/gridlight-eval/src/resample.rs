//! Clipping and block down-sampling of rasters.

use gridlight_core::{Cell, Dims, Raster};

use crate::error::{EvalError, EvalResult};

/// A rectangular block of cells: top-left corner plus extent.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Window {
    pub origin: Cell,
    pub dims: Dims,
}

impl Window {
    pub const fn new(origin: Cell, dims: Dims) -> Self {
        Self { origin, dims }
    }

    /// Smallest window holding every `true` cell of `mask`, or `None` for
    /// an all-false mask.
    pub fn bounding(mask: &Raster<bool>) -> Option<Self> {
        let mut cells = mask.iter().filter(|(_, v)| **v).map(|(c, _)| c);
        let first = cells.next()?;
        let (mut lo, mut hi) = (first, first);
        for c in cells {
            lo.row = lo.row.min(c.row);
            lo.col = lo.col.min(c.col);
            hi.row = hi.row.max(c.row);
            hi.col = hi.col.max(c.col);
        }
        let dims = Dims::new((hi.row - lo.row + 1) as usize, (hi.col - lo.col + 1) as usize);
        Some(Self::new(lo, dims))
    }

    /// Whether `c` lies inside the window.
    pub fn contains(&self, c: Cell) -> bool {
        self.dims.contains(c - self.origin)
    }
}

/// Copy the part of `raster` covered by `window`.
///
/// The window is first cut down to the raster's extent; if nothing is
/// left, the result is [`EvalError::EmptyWindow`].
pub fn clip<T: Clone>(raster: &Raster<T>, window: Window) -> EvalResult<Raster<T>> {
    let r0 = window.origin.row.max(0);
    let c0 = window.origin.col.max(0);
    let r1 = (window.origin.row + window.dims.rows as i32).min(raster.rows() as i32);
    let c1 = (window.origin.col + window.dims.cols as i32).min(raster.cols() as i32);
    if r1 <= r0 || c1 <= c0 {
        return Err(EvalError::EmptyWindow);
    }
    let mut data = Vec::with_capacity(((r1 - r0) * (c1 - c0)) as usize);
    for row in r0..r1 {
        for col in c0..c1 {
            if let Some(v) = raster.get(Cell::new(row, col)) {
                data.push(v.clone());
            }
        }
    }
    let dims = Dims::new((r1 - r0) as usize, (c1 - c0) as usize);
    Raster::from_vec(dims, data).map_err(|_| EvalError::EmptyWindow)
}

/// Group `factor × factor` blocks into one cell that is `true` when any
/// cell of the block is. Partial blocks at the right and bottom edges are
/// kept, so the result has `ceil(rows / factor) × ceil(cols / factor)`
/// cells.
pub fn downsample_max(raster: &Raster<bool>, factor: usize) -> EvalResult<Raster<bool>> {
    if factor == 0 {
        return Err(EvalError::Upsampling { factor });
    }
    if factor == 1 {
        return Ok(raster.clone());
    }
    let dims = Dims::new(raster.rows().div_ceil(factor), raster.cols().div_ceil(factor));
    let mut out = Raster::filled(dims, false);
    for (c, &v) in raster.iter() {
        if v {
            let f = factor as i32;
            out.set(Cell::new(c.row / f, c.col / f), true);
        }
    }
    log::trace!("downsampled {} to {} by {factor}", raster.dims(), dims);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(rows: &[&str]) -> Raster<bool> {
        Raster::from_rows(
            rows.iter()
                .map(|r| r.chars().map(|ch| ch == '#').collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn bounding_window_covers_true_cells() {
        let m = mask(&["....", ".#..", "...#", "...."]);
        let w = Window::bounding(&m).unwrap();
        assert_eq!(w, Window::new(Cell::new(1, 1), Dims::new(2, 3)));
        assert!(w.contains(Cell::new(2, 3)));
        assert!(!w.contains(Cell::new(0, 1)));
        assert_eq!(Window::bounding(&mask(&["..", ".."])), None);
    }

    #[test]
    fn clip_cuts_to_raster() {
        let r = Raster::from_fn(Dims::new(3, 3), |c| c.row * 3 + c.col);
        let w = Window::new(Cell::new(1, 1), Dims::new(5, 5));
        let out = clip(&r, w).unwrap();
        assert_eq!(out.dims(), Dims::new(2, 2));
        assert_eq!(out.as_slice(), &[4, 5, 7, 8]);
        let outside = Window::new(Cell::new(3, 0), Dims::new(1, 1));
        assert_eq!(clip(&r, outside), Err(EvalError::EmptyWindow));
    }

    #[test]
    fn downsample_keeps_partial_blocks() {
        let m = mask(&["#....", ".....", ".....", "....#"]);
        let out = downsample_max(&m, 2).unwrap();
        assert_eq!(out.dims(), Dims::new(2, 3));
        assert_eq!(out.as_slice(), &[true, false, false, false, false, true]);
    }

    #[test]
    fn zero_factor_is_rejected() {
        let m = mask(&["#"]);
        assert_eq!(downsample_max(&m, 0), Err(EvalError::Upsampling { factor: 0 }));
        assert_eq!(downsample_max(&m, 1).unwrap(), m);
    }
}
