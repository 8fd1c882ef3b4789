//! The extracted network: a deduplicated set of grid edges forming a tree
//! (or a forest when the targets could not all be joined).

use std::collections::{BTreeMap, BTreeSet};

use gridlight_core::{Cell, Dims, Raster, Transform};
use thiserror::Error;

/// An undirected edge between two adjacent cells, stored with its endpoints
/// in row-major order so both directions compare equal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    a: Cell,
    b: Cell,
}

impl Edge {
    pub fn new(x: Cell, y: Cell) -> Self {
        if x <= y { Self { a: x, b: y } } else { Self { a: y, b: x } }
    }

    /// The endpoint that comes first in row-major order.
    #[inline]
    pub fn a(&self) -> Cell {
        self.a
    }

    /// The endpoint that comes last in row-major order.
    #[inline]
    pub fn b(&self) -> Cell {
        self.b
    }
}

/// A structural problem found by [`Network::verify`] or
/// [`SpanningReport::verify`](crate::SpanningReport::verify).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkDefect {
    #[error("edge {a}-{b} closes a cycle")]
    Cycle { a: Cell, b: Cell },
    #[error("branch ends at {cell}, which is not a target")]
    DanglingLeaf { cell: Cell },
    /// The targets on one tree are not exactly the members of one group.
    #[error("targets joined around {cell} do not match their component")]
    GroupMismatch { cell: Cell },
}

/// Grid edges selected as "on the network", with their costs.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    dims: Dims,
    targets: Vec<Cell>,
    edges: BTreeMap<Edge, f64>,
    total_cost: f64,
}

impl Network {
    /// A network with no edges.
    pub fn empty(dims: Dims, targets: Vec<Cell>) -> Self {
        Self {
            dims,
            targets,
            edges: BTreeMap::new(),
            total_cost: 0.0,
        }
    }

    /// Build a network from `(from, to, cost)` triples. An edge listed in
    /// both directions is kept once.
    pub fn from_edges(
        dims: Dims,
        mut targets: Vec<Cell>,
        edges: impl IntoIterator<Item = (Cell, Cell, f64)>,
    ) -> Self {
        targets.sort_unstable();
        targets.dedup();
        let edges: BTreeMap<Edge, f64> = edges
            .into_iter()
            .map(|(x, y, w)| (Edge::new(x, y), w))
            .collect();
        let total_cost = edges.values().sum();
        Self {
            dims,
            targets,
            edges,
            total_cost,
        }
    }

    /// Extent of the grid the network lives on.
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// The targets the network was asked to connect, row-major.
    pub fn targets(&self) -> &[Cell] {
        &self.targets
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether there are no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Sum of all edge costs.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Edges with their costs, in edge order.
    pub fn edges(&self) -> impl Iterator<Item = (Edge, f64)> + '_ {
        self.edges.iter().map(|(&e, &w)| (e, w))
    }

    /// Whether the edge between `x` and `y` is on the network.
    pub fn contains_edge(&self, x: Cell, y: Cell) -> bool {
        self.edges.contains_key(&Edge::new(x, y))
    }

    /// Every cell touched by an edge.
    pub fn cells(&self) -> BTreeSet<Cell> {
        self.edges.keys().flat_map(|e| [e.a, e.b]).collect()
    }

    /// Neighbour lists of every cell touched by an edge.
    pub fn adjacency(&self) -> BTreeMap<Cell, Vec<Cell>> {
        let mut adj: BTreeMap<Cell, Vec<Cell>> = BTreeMap::new();
        for e in self.edges.keys() {
            adj.entry(e.a).or_default().push(e.b);
            adj.entry(e.b).or_default().push(e.a);
        }
        for list in adj.values_mut() {
            list.sort_unstable();
        }
        adj
    }

    /// Cells of each connected tree, trees ordered by their first cell.
    pub fn trees(&self) -> Vec<Vec<Cell>> {
        let adj = self.adjacency();
        let mut seen = BTreeSet::new();
        let mut trees = Vec::new();
        let mut stack = Vec::new();
        for &start in adj.keys() {
            if !seen.insert(start) {
                continue;
            }
            let mut tree = vec![start];
            stack.push(start);
            while let Some(c) = stack.pop() {
                for &n in &adj[&c] {
                    if seen.insert(n) {
                        tree.push(n);
                        stack.push(n);
                    }
                }
            }
            tree.sort_unstable();
            trees.push(tree);
        }
        trees
    }

    /// Boolean raster marking every cell on an edge.
    pub fn rasterize(&self) -> Raster<bool> {
        let mut out = Raster::filled(self.dims, false);
        for e in self.edges.keys() {
            out.set(e.a, true);
            out.set(e.b, true);
        }
        out
    }

    /// Edge endpoints as map coordinates of the cell centres.
    pub fn segments(&self, transform: &Transform) -> Vec<[(f64, f64); 2]> {
        self.edges
            .keys()
            .map(|e| [transform.cell_center(e.a), transform.cell_center(e.b)])
            .collect()
    }

    /// Check that the edge set is a forest whose every leaf is a target.
    pub fn verify(&self) -> Result<(), NetworkDefect> {
        let cells: Vec<Cell> = self.cells().into_iter().collect();
        let mut parent: Vec<usize> = (0..cells.len()).collect();
        let slot = |c: Cell| cells.binary_search(&c).unwrap_or_default();

        fn root(parent: &mut [usize], mut i: usize) -> usize {
            while parent[i] != i {
                parent[i] = parent[parent[i]];
                i = parent[i];
            }
            i
        }

        for e in self.edges.keys() {
            let ra = root(&mut parent, slot(e.a));
            let rb = root(&mut parent, slot(e.b));
            if ra == rb {
                return Err(NetworkDefect::Cycle { a: e.a, b: e.b });
            }
            parent[ra.max(rb)] = ra.min(rb);
        }

        for (cell, nbrs) in self.adjacency() {
            if nbrs.len() == 1 && self.targets.binary_search(&cell).is_err() {
                return Err(NetworkDefect::DanglingLeaf { cell });
            }
        }
        Ok(())
    }
}
