//! **gridlight-core**: raster primitives for grid-network inference.
//!
//! This crate provides the foundational types shared across the *gridlight*
//! workspace: cell coordinates and raster extents, an owned row-major
//! raster, the validated cost surface the search runs over, and the set of
//! target cells that must be connected.

pub mod cost;
pub mod error;
pub mod geom;
pub mod raster;
pub mod targets;

pub use cost::{CostGrid, Transform};
pub use error::{GridError, GridResult};
pub use geom::{Cell, Dims, DimsIter};
pub use raster::{Raster, RasterIter};
pub use targets::TargetSet;
