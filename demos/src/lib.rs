//! Synthetic road landscape used by the `gridlight-demo` binary.
//!
//! Demonstrates: cost-surface generation, target sampling, the spanning
//! search, and a plain-text rendering of the resulting network.

use std::fmt::Write as _;

use gridlight_core::{Cell, CostGrid, Dims, GridResult, Raster, TargetSet};
use gridlight_paths::{Outcome, SpanningReport};
use rand::{Rng, RngExt};

/// Cost of a cell on a road.
pub const ROAD_COST: f64 = 1.0;
/// Cost of a cell off the road network.
pub const LAND_COST: f64 = 8.0;

/// Knobs for [`generate_landscape`].
#[derive(Debug, Clone)]
pub struct LandscapeConfig {
    pub dims: Dims,
    /// Number of random-walk roads.
    pub roads: usize,
    /// Number of no-data lakes.
    pub lakes: usize,
    /// Cells carved per lake.
    pub lake_size: usize,
}

impl LandscapeConfig {
    /// Road and lake counts scaled to the area of `dims`.
    pub fn for_dims(dims: Dims) -> Self {
        let area = dims.len().max(1);
        Self {
            dims,
            roads: (area / 300).clamp(2, 40),
            lakes: (area / 1500).clamp(1, 10),
            lake_size: (area / 100).clamp(4, 200),
        }
    }
}

/// Pick one of the four orthogonal neighbours of `c` at random.
fn step(c: Cell, rng: &mut impl Rng) -> Cell {
    match rng.random_range(0..4u32) {
        0 => c.shift(0, 1),
        1 => c.shift(0, -1),
        2 => c.shift(1, 0),
        _ => c.shift(-1, 0),
    }
}

fn random_cell(dims: Dims, rng: &mut impl Rng) -> Cell {
    Cell::new(
        rng.random_range(0..dims.rows as i32),
        rng.random_range(0..dims.cols as i32),
    )
}

/// Build a cost surface: cheap roads laid by biased random walks across
/// expensive land, with a few no-data lakes (NaN) carved by drunk walks.
pub fn generate_landscape(config: &LandscapeConfig, rng: &mut impl Rng) -> GridResult<CostGrid> {
    let dims = config.dims;
    let mut costs = Raster::filled(dims, LAND_COST);
    if dims.is_empty() {
        return CostGrid::new(costs);
    }

    for _ in 0..config.roads {
        // Roads keep heading one way with occasional turns, which reads as
        // a road rather than a blob.
        let mut pos = random_cell(dims, rng);
        let mut heading = step(Cell::ZERO, rng);
        for _ in 0..(dims.rows + dims.cols) {
            costs.set(pos, ROAD_COST);
            if rng.random_range(0..6u32) == 0 {
                heading = step(Cell::ZERO, rng);
            }
            let next = pos + heading;
            if !dims.contains(next) {
                break;
            }
            pos = next;
        }
    }

    for _ in 0..config.lakes {
        let mut pos = random_cell(dims, rng);
        let mut carved = 0;
        for _ in 0..config.lake_size * 4 {
            if carved >= config.lake_size {
                break;
            }
            if costs.get(pos).is_some_and(|v| !v.is_nan()) {
                costs.set(pos, f64::NAN);
                carved += 1;
            }
            let next = step(pos, rng);
            if dims.contains(next) {
                pos = next;
            }
        }
    }

    CostGrid::from_nodata_value(costs, f64::NAN)
}

/// Sample up to `count` distinct passable cells, favouring road cells the
/// way settlements cluster along roads.
pub fn sample_targets(grid: &CostGrid, count: usize, rng: &mut impl Rng) -> TargetSet {
    let dims = grid.dims();
    let passable = dims.iter().filter(|&c| grid.is_passable(c)).count();
    let want = count.min(passable);
    let mut cells = std::collections::BTreeSet::new();
    let mut attempts = 0;
    while cells.len() < want && attempts < want * 200 {
        attempts += 1;
        let c = random_cell(dims, rng);
        let on_road = grid.cost(c) == Some(ROAD_COST);
        if grid.is_passable(c) && (on_road || rng.random::<f64>() < 0.3) {
            cells.insert(c);
        }
    }
    TargetSet::new(cells)
}

/// ASCII map: `T` target, `#` network, `~` no-data, `=` road, `.` land.
pub fn render(grid: &CostGrid, targets: &TargetSet, report: &SpanningReport) -> String {
    let on_network = report.network().rasterize();
    let dims = grid.dims();
    let mut out = String::with_capacity(dims.len() + dims.rows);
    for row in 0..dims.rows as i32 {
        for col in 0..dims.cols as i32 {
            let c = Cell::new(row, col);
            let ch = if targets.contains(c) {
                'T'
            } else if on_network.get(c) == Some(&true) {
                '#'
            } else if grid.is_nodata(c) {
                '~'
            } else if grid.cost(c) == Some(ROAD_COST) {
                '='
            } else {
                '.'
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

/// Multi-line run summary.
pub fn summary(report: &SpanningReport) -> String {
    let net = report.network();
    let mut s = String::new();
    let _ = writeln!(s, "targets     : {}", net.targets().len());
    let _ = writeln!(s, "edges       : {}", net.len());
    let _ = writeln!(s, "total cost  : {:.2}", net.total_cost());
    let _ = writeln!(s, "settled     : {}", report.settled());
    let outcome = match report.outcome() {
        Outcome::Connected => "connected".to_string(),
        Outcome::Stopped { groups } => format!("stopped early ({groups} groups)"),
        Outcome::Disconnected { groups } => format!("disconnected ({groups} groups)"),
    };
    let _ = writeln!(s, "outcome     : {outcome}");
    for ev in report.connections() {
        let _ = writeln!(
            s,
            "  #{:<3} {}-{}  path {:.2}  added {:.2}",
            ev.order, ev.via.0, ev.via.1, ev.path_cost, ev.added_cost
        );
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridlight_paths::{GridGraph, SpanningOptions, connect};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn landscape(seed: u64) -> CostGrid {
        let config = LandscapeConfig::for_dims(Dims::new(30, 60));
        generate_landscape(&config, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn same_seed_same_landscape() {
        let a = landscape(3);
        let b = landscape(3);
        assert_eq!(a.nodata_mask(), b.nodata_mask());
        assert_eq!(
            a.costs().iter().filter(|(_, v)| **v == ROAD_COST).count(),
            b.costs().iter().filter(|(_, v)| **v == ROAD_COST).count()
        );
    }

    #[test]
    fn landscape_has_roads_and_lakes() {
        let g = landscape(5);
        assert!(g.costs().iter().any(|(_, v)| *v == ROAD_COST));
        assert!(g.nodata_mask().count_true() > 0);
    }

    #[test]
    fn targets_are_passable_and_distinct() {
        let g = landscape(9);
        let t = sample_targets(&g, 12, &mut StdRng::seed_from_u64(1));
        assert!(!t.is_empty() && t.len() <= 12);
        assert!(t.iter().all(|c| g.is_passable(c)));
    }

    #[test]
    fn render_draws_every_cell() {
        let g = landscape(2);
        let t = sample_targets(&g, 6, &mut StdRng::seed_from_u64(2));
        let report = connect(&GridGraph::new(&g), &t, SpanningOptions::default()).unwrap();
        let map = render(&g, &t, &report);
        assert_eq!(map.lines().count(), 30);
        assert!(map.lines().all(|l| l.chars().count() == 60));
        assert_eq!(map.matches('T').count(), t.len());
        assert!(summary(&report).contains("edges"));
    }
}
