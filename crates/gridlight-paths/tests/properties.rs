use gridlight_core::{Cell, CostGrid, Dims, Raster, TargetSet};
use gridlight_paths::{GridGraph, Outcome, SpanningOptions, connect, distance_map};
use proptest::prelude::*;

/// Cost raster, no-data mask and targets for a small random scenario.
fn scenario() -> impl Strategy<Value = (CostGrid, TargetSet)> {
    (3usize..10, 3usize..10).prop_flat_map(|(rows, cols)| {
        let n = rows * cols;
        (
            prop::collection::vec(0.1f64..10.0, n),
            prop::collection::vec(prop::bool::weighted(0.15), n),
            prop::collection::vec((0..rows as i32, 0..cols as i32), 0..6),
        )
            .prop_map(move |(costs, holes, picks)| {
                let dims = Dims::new(rows, cols);
                let costs = Raster::from_vec(dims, costs).unwrap();
                let holes = Raster::from_vec(dims, holes).unwrap();
                let grid = CostGrid::with_nodata(costs, holes).unwrap();
                let targets: TargetSet = picks
                    .into_iter()
                    .map(Cell::from)
                    .filter(|&c| grid.is_passable(c))
                    .collect();
                (grid, targets)
            })
    })
}

/// Weight of a minimum spanning forest over the targets, with each pair
/// weighted by its shortest-path cost.
fn metric_mst_cost(graph: &GridGraph<'_>, targets: &TargetSet) -> f64 {
    let cells = targets.as_slice();
    let mut pairs = Vec::new();
    for (i, &from) in cells.iter().enumerate() {
        let d = distance_map(graph, &[from], f64::INFINITY);
        for (j, &to) in cells.iter().enumerate().skip(i + 1) {
            let w = *d.get(to).unwrap();
            if w.is_finite() {
                pairs.push((w, i, j));
            }
        }
    }
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut parent: Vec<usize> = (0..cells.len()).collect();
    fn root(parent: &mut [usize], mut i: usize) -> usize {
        while parent[i] != i {
            i = parent[i];
        }
        i
    }
    let mut total = 0.0;
    for (w, i, j) in pairs {
        let (ri, rj) = (root(&mut parent, i), root(&mut parent, j));
        if ri != rj {
            parent[ri] = rj;
            total += w;
        }
    }
    total
}

proptest! {
    #[test]
    fn network_is_a_forest_with_target_leaves((grid, targets) in scenario()) {
        let graph = GridGraph::new(&grid);
        let report = connect(&graph, &targets, SpanningOptions::default()).unwrap();
        prop_assert!(report.verify().is_ok());
        prop_assert!(!matches!(report.outcome(), Outcome::Stopped { .. }), "outcome should not be Stopped");
        for cell in report.network().cells() {
            prop_assert!(grid.is_passable(cell));
        }
    }

    #[test]
    fn groups_partition_the_targets((grid, targets) in scenario()) {
        let graph = GridGraph::new(&grid);
        let report = connect(&graph, &targets, SpanningOptions::default()).unwrap();
        let mut members: Vec<Cell> = report
            .groups()
            .iter()
            .flat_map(|(_, m)| m.iter().copied())
            .collect();
        members.sort_unstable();
        prop_assert_eq!(members.as_slice(), targets.as_slice());
        let groups = report.groups().len();
        prop_assert_eq!(report.is_connected(), groups <= 1);
        // Every merge removes exactly one group.
        prop_assert_eq!(report.connections().len() + groups.max(1), targets.len().max(1));
    }

    #[test]
    fn two_targets_cost_their_shortest_path((grid, targets) in scenario()) {
        prop_assume!(targets.len() >= 2);
        let pair: TargetSet = targets.iter().take(2).collect();
        let graph = GridGraph::new(&grid);
        let report = connect(&graph, &pair, SpanningOptions::default()).unwrap();
        let d = distance_map(&graph, &pair.as_slice()[..1], f64::INFINITY);
        let best = *d.get(pair.as_slice()[1]).unwrap();
        if best.is_finite() {
            prop_assert!(report.is_connected());
            prop_assert!((report.network().total_cost() - best).abs() < 1e-6);
        } else {
            prop_assert_eq!(report.outcome(), Outcome::Disconnected { groups: 2 });
            prop_assert!(report.network().is_empty());
        }
    }

    #[test]
    fn repeated_runs_agree((grid, targets) in scenario()) {
        let graph = GridGraph::new(&grid);
        let a = connect(&graph, &targets, SpanningOptions::default()).unwrap();
        let b = connect(&graph, &targets, SpanningOptions::default()).unwrap();
        prop_assert_eq!(a.network(), b.network());
        prop_assert_eq!(a.groups(), b.groups());
    }

    #[test]
    fn cost_is_bounded_by_target_mst((grid, targets) in scenario()) {
        let graph = GridGraph::new(&grid);
        let report = connect(&graph, &targets, SpanningOptions::default()).unwrap();
        let mst = metric_mst_cost(&graph, &targets);
        let merged: f64 = report.connections().iter().map(|e| e.path_cost).sum();
        prop_assert!((merged - mst).abs() < 1e-6, "merges cost {merged}, mst {mst}");
        prop_assert!(report.network().total_cost() <= mst + 1e-6);
    }
}
