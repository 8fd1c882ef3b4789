//! Least-cost spanning networks over raster cost surfaces.
//!
//! Given a [`CostGrid`](gridlight_core::CostGrid) and a set of target cells,
//! this crate finds a cheap tree of grid edges that joins every target:
//!
//! - **Spanning search** from all targets at once ([`connect`], [`SpanningRun`])
//! - **Dijkstra** multi-source distance rasters ([`distance_map`])
//! - **Network** extraction, validation and rasterisation ([`Network`])
//!
//! The search runs over any [`CostGraph`]; [`GridGraph`] adapts a cost grid
//! with 4- or 8-connectivity.
//!
//! # Example
//!
//! ```
//! use gridlight_core::{Cell, CostGrid, Dims, Raster, TargetSet};
//! use gridlight_paths::{GridGraph, SpanningOptions, connect};
//!
//! let grid = CostGrid::new(Raster::filled(Dims::new(5, 5), 1.0)).unwrap();
//! let targets: TargetSet = [Cell::new(0, 0), Cell::new(4, 4)].into_iter().collect();
//! let report = connect(&GridGraph::new(&grid), &targets, SpanningOptions::default()).unwrap();
//! assert!(report.is_connected());
//! assert_eq!(report.network().len(), 4);
//! ```

mod components;
mod dijkstra;
mod error;
mod frontier;
mod neighbors;
mod network;
mod options;
mod spanning;
mod state;
mod traits;

pub use components::ComponentId;
pub use dijkstra::distance_map;
pub use error::{SpanningError, SpanningResult, TargetFault};
pub use frontier::{Frontier, FrontierEntry};
pub use neighbors::{Connectivity, GridGraph};
pub use network::{Edge, Network, NetworkDefect};
pub use options::SpanningOptions;
pub use spanning::{ConnectionEvent, Outcome, SpanningReport, SpanningRun, Step, connect};
pub use state::estimate_memory;
pub use traits::CostGraph;
