use std::f64::consts::SQRT_2;

use gridlight_core::{Cell, CostGrid, Dims};

use crate::traits::CostGraph;

/// Which neighbours a cell is connected to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connectivity {
    /// Orthogonal neighbours only.
    Four,
    /// Orthogonal and diagonal neighbours.
    #[default]
    Eight,
}

/// A [`CostGrid`] seen as an implicit graph.
///
/// An orthogonal edge costs the mean of its two endpoint cells; a diagonal
/// edge costs that mean times √2, so a straight diagonal run approximates
/// Euclidean distance in cell widths. Out-of-bounds and no-data neighbours
/// are filtered out, never reported.
///
/// The grid validates its costs when it is built, so constructing the
/// adapter cannot fail.
#[derive(Debug, Clone, Copy)]
pub struct GridGraph<'a> {
    grid: &'a CostGrid,
    connectivity: Connectivity,
}

impl<'a> GridGraph<'a> {
    /// 8-connected view of `grid`.
    pub fn new(grid: &'a CostGrid) -> Self {
        Self {
            grid,
            connectivity: Connectivity::Eight,
        }
    }

    /// Same view with a different neighbourhood.
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// The wrapped grid.
    pub fn grid(&self) -> &'a CostGrid {
        self.grid
    }

    /// The neighbourhood in use.
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    #[inline]
    fn edge_cost(from: f64, to: f64, diagonal: bool) -> f64 {
        let mean = (from + to) * 0.5;
        if diagonal { mean * SQRT_2 } else { mean }
    }
}

impl CostGraph for GridGraph<'_> {
    #[inline]
    fn dims(&self) -> Dims {
        self.grid.dims()
    }

    #[inline]
    fn is_passable(&self, c: Cell) -> bool {
        self.grid.is_passable(c)
    }

    fn neighbors(&self, c: Cell, buf: &mut Vec<(Cell, f64)>) {
        let Some(here) = self.grid.cost(c) else {
            return;
        };
        let mut push = |n: Cell| {
            if let Some(there) = self.grid.cost(n) {
                buf.push((n, Self::edge_cost(here, there, c.is_diagonal_to(n))));
            }
        };
        match self.connectivity {
            Connectivity::Eight => c.neighbors_8().into_iter().for_each(&mut push),
            Connectivity::Four => {
                // up, left, right, down keeps increasing index order
                let [up, right, down, left] = c.neighbors_4();
                [up, left, right, down].into_iter().for_each(&mut push);
            }
        }
    }

    fn cost(&self, from: Cell, to: Cell) -> Option<f64> {
        let d = to - from;
        let adjacent = match self.connectivity {
            Connectivity::Eight => d.row.abs() <= 1 && d.col.abs() <= 1 && d != Cell::ZERO,
            Connectivity::Four => d.row.abs() + d.col.abs() == 1,
        };
        if !adjacent {
            return None;
        }
        let a = self.grid.cost(from)?;
        let b = self.grid.cost(to)?;
        Some(Self::edge_cost(a, b, from.is_diagonal_to(to)))
    }
}
