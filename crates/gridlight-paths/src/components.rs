//! Component tracking for the spanning search.
//!
//! Every target founds its own component, named after the target's
//! flattened index. Non-target cells join the component of whichever
//! search front reaches them first, recorded as the index of the *seed*
//! target (its region). Merges happen on seeds through a disjoint-set
//! forest with path halving; the surviving id is always the smaller one.

use gridlight_core::{Cell, Dims};

const NO_REGION: u32 = u32::MAX;

/// Identifier of a component: the flattened index of its founding target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentId(pub usize);

/// Per-run component table and disjoint-set forest over targets.
#[derive(Debug, Clone)]
pub(crate) struct ComponentTracker {
    dims: Dims,
    // flattened indices of the targets, ascending
    seeds: Vec<usize>,
    parent: Vec<u32>,
    size: Vec<usize>,
    // per cell: ordinal of the seed whose front reached it
    region: Vec<u32>,
    count: usize,
    largest: usize,
}

impl ComponentTracker {
    /// Start with one singleton component per target.
    ///
    /// `seeds` must be ascending, distinct and inside `dims`.
    pub(crate) fn new(dims: Dims, seeds: Vec<usize>) -> Self {
        debug_assert!(seeds.windows(2).all(|w| w[0] < w[1]));
        let mut region = vec![NO_REGION; dims.len()];
        for (ord, &idx) in seeds.iter().enumerate() {
            region[idx] = ord as u32;
        }
        let n = seeds.len();
        Self {
            dims,
            parent: (0..n as u32).collect(),
            size: vec![1; n],
            region,
            count: n,
            largest: usize::from(n > 0),
            seeds,
        }
    }

    /// Record that the front holding `from` reached `to` first (or with a
    /// strictly better cost), so `to` now belongs to the same seed.
    #[inline]
    pub(crate) fn inherit(&mut self, to: usize, from: usize) {
        debug_assert_ne!(self.region[from], NO_REGION);
        self.region[to] = self.region[from];
    }

    /// The target whose front reached `idx`, if any.
    pub(crate) fn seed_of(&self, idx: usize) -> Option<Cell> {
        match self.region[idx] {
            NO_REGION => None,
            ord => Some(self.dims.cell(self.seeds[ord as usize])),
        }
    }

    /// Current component of the cell at flattened index `idx`, or `None`
    /// if the search has not reached it.
    pub(crate) fn find(&mut self, idx: usize) -> Option<ComponentId> {
        match self.region[idx] {
            NO_REGION => None,
            ord => {
                let root = self.root(ord);
                Some(ComponentId(self.seeds[root as usize]))
            }
        }
    }

    /// Merge two components. Returns the surviving (smaller) id; merging a
    /// component with itself is a no-op.
    ///
    /// Panics if either id does not name a target.
    pub(crate) fn union(&mut self, a: ComponentId, b: ComponentId) -> ComponentId {
        let ra = self.root(self.ordinal(a));
        let rb = self.root(self.ordinal(b));
        if ra == rb {
            return ComponentId(self.seeds[ra as usize]);
        }
        // Ordinals follow index order, so the smaller ordinal is the
        // smaller id.
        let (keep, gone) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent[gone as usize] = keep;
        self.size[keep as usize] += self.size[gone as usize];
        self.largest = self.largest.max(self.size[keep as usize]);
        self.count -= 1;
        ComponentId(self.seeds[keep as usize])
    }

    /// Number of surviving components.
    #[inline]
    pub(crate) fn count(&self) -> usize {
        self.count
    }

    /// Number of targets in the largest component.
    #[inline]
    pub(crate) fn largest(&self) -> usize {
        self.largest
    }

    /// Number of targets tracked.
    #[inline]
    pub(crate) fn targets(&self) -> usize {
        self.seeds.len()
    }

    /// Targets grouped by component, groups ordered by id and members in
    /// row-major order.
    pub(crate) fn groups(&mut self) -> Vec<(ComponentId, Vec<Cell>)> {
        let mut by_root: Vec<Vec<Cell>> = vec![Vec::new(); self.seeds.len()];
        for ord in 0..self.seeds.len() as u32 {
            let root = self.root(ord);
            by_root[root as usize].push(self.dims.cell(self.seeds[ord as usize]));
        }
        by_root
            .into_iter()
            .enumerate()
            .filter(|(_, members)| !members.is_empty())
            .map(|(root, members)| (ComponentId(self.seeds[root]), members))
            .collect()
    }

    fn ordinal(&self, id: ComponentId) -> u32 {
        match self.seeds.binary_search(&id.0) {
            Ok(ord) => ord as u32,
            Err(_) => panic!("{id:?} does not name a target"),
        }
    }

    fn root(&mut self, mut ord: u32) -> u32 {
        while self.parent[ord as usize] != ord {
            let grand = self.parent[self.parent[ord as usize] as usize];
            self.parent[ord as usize] = grand;
            ord = grand;
        }
        ord
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> ComponentTracker {
        // targets at flat indices 2, 5, 9 in a 4x4 grid
        ComponentTracker::new(Dims::new(4, 4), vec![2, 5, 9])
    }

    #[test]
    fn targets_start_as_singletons() {
        let mut t = tracker();
        assert_eq!(t.count(), 3);
        assert_eq!(t.largest(), 1);
        assert_eq!(t.find(5), Some(ComponentId(5)));
        assert_eq!(t.find(0), None);
        assert_eq!(t.seed_of(0), None);
    }

    #[test]
    fn discovered_cells_inherit_seed() {
        let mut t = tracker();
        t.inherit(6, 5);
        t.inherit(7, 6);
        assert_eq!(t.find(7), Some(ComponentId(5)));
        assert_eq!(t.seed_of(7), Some(Cell::new(1, 1)));
    }

    #[test]
    fn union_keeps_smaller_id() {
        let mut t = tracker();
        assert_eq!(t.union(ComponentId(9), ComponentId(5)), ComponentId(5));
        assert_eq!(t.find(9), Some(ComponentId(5)));
        assert_eq!(t.union(ComponentId(9), ComponentId(2)), ComponentId(2));
        assert_eq!(t.find(5), Some(ComponentId(2)));
        assert_eq!(t.count(), 1);
        assert_eq!(t.largest(), 3);
    }

    #[test]
    fn union_with_self_is_noop() {
        let mut t = tracker();
        assert_eq!(t.union(ComponentId(5), ComponentId(5)), ComponentId(5));
        assert_eq!(t.count(), 3);
    }

    #[test]
    fn groups_follow_component_order() {
        let mut t = tracker();
        t.union(ComponentId(9), ComponentId(2));
        let groups = t.groups();
        assert_eq!(
            groups,
            vec![
                (ComponentId(2), vec![Cell::new(0, 2), Cell::new(2, 1)]),
                (ComponentId(5), vec![Cell::new(1, 1)]),
            ]
        );
    }
}
