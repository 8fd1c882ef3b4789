use gridlight_core::{Cell, Raster};

use crate::frontier::Frontier;
use crate::state::SearchState;
use crate::traits::CostGraph;

/// Least accumulated cost from the nearest of `sources` to every cell.
///
/// Sources outside the grid or on impassable cells are skipped. Cells whose
/// cost would exceed `max_cost`, and cells no source can reach, are
/// `f64::INFINITY` in the result.
pub fn distance_map<G: CostGraph>(graph: &G, sources: &[Cell], max_cost: f64) -> Raster<f64> {
    let dims = graph.dims();
    let mut state = SearchState::new(dims);
    let mut open = Frontier::new();

    for &src in sources {
        if let Some(si) = dims.index(src) {
            if graph.is_passable(src) && state.dist[si] > 0.0 {
                state.dist[si] = 0.0;
                open.push(0.0, si);
            }
        }
    }

    let mut nbuf = Vec::with_capacity(8);
    while let Some(current) = open.pop_min() {
        let ci = current.idx;
        if state.settled[ci] || current.cost != state.dist[ci] {
            continue;
        }
        state.settled[ci] = true;

        let cp = state.cell(ci);
        nbuf.clear();
        graph.neighbors(cp, &mut nbuf);
        for &(np, w) in nbuf.iter() {
            let Some(ni) = dims.index(np) else {
                continue;
            };
            let tentative = current.cost + w;
            if tentative > max_cost || tentative >= state.dist[ni] {
                continue;
            }
            state.relax(ni, tentative, ci);
            open.push(tentative, ni);
        }
    }

    log::trace!("distance map: {} pushes over {} cells", open.pushes(), dims.len());
    Raster::from_fn(dims, |c| dims.index(c).map_or(f64::INFINITY, |i| state.dist[i]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbors::{Connectivity, GridGraph};
    use gridlight_core::{CostGrid, Dims};

    fn grid(rows: Vec<Vec<f64>>) -> CostGrid {
        CostGrid::new(Raster::from_rows(rows).unwrap()).unwrap()
    }

    #[test]
    fn costs_accumulate_from_nearest_source() {
        let g = grid(vec![vec![1.0; 5]]);
        let graph = GridGraph::new(&g);
        let d = distance_map(&graph, &[Cell::new(0, 0), Cell::new(0, 4)], f64::INFINITY);
        assert_eq!(d.as_slice(), &[0.0, 1.0, 2.0, 1.0, 0.0]);
    }

    #[test]
    fn cheap_detour_wins() {
        // A costly middle row forces the 4-connected path around it.
        let g = grid(vec![
            vec![1.0, 1.0, 1.0],
            vec![1.0, 9.0, 1.0],
            vec![1.0, 1.0, 1.0],
        ]);
        let graph = GridGraph::new(&g).with_connectivity(Connectivity::Four);
        let d = distance_map(&graph, &[Cell::new(1, 0)], f64::INFINITY);
        assert_eq!(d.get(Cell::new(1, 2)), Some(&4.0));
        assert_eq!(d.get(Cell::new(1, 1)), Some(&5.0));
    }

    #[test]
    fn max_cost_and_nodata_leave_infinity() {
        let mut costs = Raster::filled(Dims::new(1, 6), 1.0);
        costs.set(Cell::new(0, 3), f64::NAN);
        let g = CostGrid::from_nodata_value(costs, f64::NAN).unwrap();
        let graph = GridGraph::new(&g);
        let d = distance_map(&graph, &[Cell::new(0, 0)], 1.5);
        assert_eq!(d.get(Cell::new(0, 1)), Some(&1.0));
        assert!(d.get(Cell::new(0, 2)).unwrap().is_infinite());
        assert!(d.get(Cell::new(0, 5)).unwrap().is_infinite());
    }

    #[test]
    fn invalid_sources_are_ignored() {
        let g = grid(vec![vec![1.0; 3]]);
        let graph = GridGraph::new(&g);
        let d = distance_map(&graph, &[Cell::new(5, 5)], f64::INFINITY);
        assert!(d.as_slice().iter().all(|v| v.is_infinite()));
    }
}
