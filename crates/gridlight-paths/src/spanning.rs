//! Many-to-many spanning search.
//!
//! One shared Dijkstra runs from every target at once. Each cell is settled
//! exactly once and belongs to the front that reached it with the lowest
//! cost, so the settled cells partition into one shortest-path tree per
//! target. Wherever two trees of different components touch, the grid edge
//! between them is a candidate *bridge* whose cost is the full
//! target-to-target path through that edge.
//!
//! Bridges are applied cheapest first, Kruskal style, as soon as the
//! frontier minimum reaches their cost: any bridge not yet discovered still
//! has an unsettled endpoint, so it cannot be cheaper. Applying a bridge
//! materialises the predecessor chains from both endpoints back to their
//! targets, adds the bridge edge itself, and unions the two components. The
//! run ends when a single component holds every target, when the requested
//! share of targets is joined, or when the frontier empties.
//!
//! The chains are sub-paths of the shortest-path trees and every bridge
//! joins two different components, so the materialised edges always form a
//! forest whose leaves are targets.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use gridlight_core::{Cell, Dims, TargetSet};

use crate::components::{ComponentId, ComponentTracker};
use crate::error::{SpanningError, SpanningResult, TargetFault};
use crate::frontier::Frontier;
use crate::network::{Edge, Network, NetworkDefect};
use crate::options::SpanningOptions;
use crate::state::{SearchState, estimate_memory};
use crate::traits::CostGraph;

// ---------------------------------------------------------------------------
// Public result types
// ---------------------------------------------------------------------------

/// A merge of two components, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionEvent {
    /// Position in the merge sequence, starting at 0.
    pub order: usize,
    /// The two components that met.
    pub joined: (ComponentId, ComponentId),
    /// The component that survived the merge.
    pub merged: ComponentId,
    /// Settled cells on either side of the meeting edge.
    pub via: (Cell, Cell),
    /// Least cost of the target-to-target path through the meeting edge.
    pub path_cost: f64,
    /// Cost of the edges this merge added to the network.
    pub added_cost: f64,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// All targets are in one tree (trivially so for fewer than two).
    Connected,
    /// The requested share of targets was joined and the run stopped.
    Stopped { groups: usize },
    /// The frontier emptied with the targets still split into groups.
    Disconnected { groups: usize },
}

/// Result of a spanning run: the network plus how the targets grouped.
#[derive(Debug, Clone)]
pub struct SpanningReport {
    network: Network,
    groups: Vec<(ComponentId, Vec<Cell>)>,
    outcome: Outcome,
    connections: Vec<ConnectionEvent>,
    settled: usize,
}

impl SpanningReport {
    /// The tree, or forest if the run did not connect everything.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// How the run ended.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Whether every target is in a single tree.
    pub fn is_connected(&self) -> bool {
        self.outcome == Outcome::Connected
    }

    /// Targets grouped by final component, ordered by component id.
    pub fn groups(&self) -> &[(ComponentId, Vec<Cell>)] {
        &self.groups
    }

    /// Merge events in the order they were applied. Empty when recording
    /// was switched off.
    pub fn connections(&self) -> &[ConnectionEvent] {
        &self.connections
    }

    /// Number of cells the search settled.
    pub fn settled(&self) -> usize {
        self.settled
    }

    /// Check the network is a forest with target leaves, and that the
    /// targets on each tree are exactly the members of one multi-target
    /// group.
    pub fn verify(&self) -> Result<(), NetworkDefect> {
        self.network.verify()?;
        let targets = self.network.targets();
        let spanned: Vec<Vec<Cell>> = self
            .network
            .trees()
            .into_iter()
            .map(|tree| {
                tree.into_iter()
                    .filter(|c| targets.binary_search(c).is_ok())
                    .collect()
            })
            .collect();
        let expected: Vec<&Vec<Cell>> = self
            .groups
            .iter()
            .map(|(_, members)| members)
            .filter(|m| m.len() > 1)
            .collect();

        let stray = spanned
            .iter()
            .find(|s| !expected.contains(s))
            .or_else(|| expected.iter().copied().find(|e| !spanned.contains(e)));
        if let Some(cell) = stray.and_then(|cells| cells.first()) {
            return Err(NetworkDefect::GroupMismatch { cell: *cell });
        }
        Ok(())
    }

    /// The network, provided every target ended up in one tree.
    pub fn into_tree(self) -> SpanningResult<Network> {
        match self.outcome {
            Outcome::Connected => Ok(self.network),
            Outcome::Stopped { groups } | Outcome::Disconnected { groups } => {
                Err(SpanningError::Disconnected { groups })
            }
        }
    }

    /// Consume the report, keeping only the network.
    pub fn into_network(self) -> Network {
        self.network
    }
}

/// What a single [`SpanningRun::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// More work remains.
    Continue,
    /// Stopping condition met: all targets joined, or the requested share.
    Connected,
    /// Nothing left to expand.
    Exhausted,
}

// ---------------------------------------------------------------------------
// Bridges
// ---------------------------------------------------------------------------

/// Candidate connection through the grid edge `lo`–`hi` (flattened indices,
/// `lo < hi`).
#[derive(Debug, Clone, Copy)]
struct Bridge {
    cost: f64,
    weight: f64,
    lo: usize,
    hi: usize,
}

impl Ord for Bridge {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap on (cost, lo, hi).
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.lo.cmp(&self.lo))
            .then_with(|| other.hi.cmp(&self.hi))
    }
}

impl PartialOrd for Bridge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Bridge {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Bridge {}

// ---------------------------------------------------------------------------
// SpanningRun
// ---------------------------------------------------------------------------

/// One spanning search, advanced one frontier pop at a time.
///
/// All search state belongs to the run; the graph is only read. A caller
/// can stop between any two steps and still [`finish`](Self::finish) with a
/// consistent forest.
pub struct SpanningRun<'g, G: CostGraph> {
    graph: &'g G,
    dims: Dims,
    targets: Vec<Cell>,
    options: SpanningOptions,
    state: SearchState,
    tracker: ComponentTracker,
    frontier: Frontier,
    bridges: BinaryHeap<Bridge>,
    on_tree: Vec<bool>,
    edges: BTreeMap<Edge, f64>,
    connections: Vec<ConnectionEvent>,
    merges: usize,
    nbuf: Vec<(Cell, f64)>,
    settled: usize,
    next_progress: usize,
    done: Option<Step>,
}

impl<'g, G: CostGraph> SpanningRun<'g, G> {
    /// Validate the targets and options and seed the frontier with every
    /// target at cost 0.
    ///
    /// Fails before allocating any search state if a target is out of
    /// bounds or on a no-data cell.
    pub fn new(
        graph: &'g G,
        targets: &TargetSet,
        options: SpanningOptions,
    ) -> SpanningResult<Self> {
        options.validate()?;
        let dims = graph.dims();
        let mut seeds = Vec::with_capacity(targets.len());
        for cell in targets.iter() {
            let Some(idx) = dims.index(cell) else {
                return Err(SpanningError::InvalidTarget {
                    cell,
                    reason: TargetFault::OutOfBounds,
                });
            };
            if !graph.is_passable(cell) {
                return Err(SpanningError::InvalidTarget {
                    cell,
                    reason: TargetFault::NoData,
                });
            }
            seeds.push(idx);
        }

        let mut state = SearchState::new(dims);
        let mut frontier = Frontier::new();
        // Nothing to connect below two targets: leave the frontier empty.
        if seeds.len() >= 2 {
            for &idx in &seeds {
                state.dist[idx] = 0.0;
                frontier.push(0.0, idx);
            }
        }

        log::info!(
            "spanning run: {} grid, {} targets, ~{:.1} MiB of search state",
            dims,
            seeds.len(),
            estimate_memory(dims) as f64 / (1024.0 * 1024.0)
        );

        Ok(Self {
            graph,
            dims,
            targets: targets.as_slice().to_vec(),
            state,
            tracker: ComponentTracker::new(dims, seeds),
            frontier,
            bridges: BinaryHeap::new(),
            on_tree: vec![false; dims.len()],
            edges: BTreeMap::new(),
            connections: Vec::new(),
            merges: 0,
            nbuf: Vec::with_capacity(8),
            settled: 0,
            next_progress: options.progress_step as usize,
            options,
            done: None,
        })
    }

    /// Number of components still separate.
    pub fn component_count(&self) -> usize {
        self.tracker.count()
    }

    /// Number of targets in the largest component.
    pub fn largest_component(&self) -> usize {
        self.tracker.largest()
    }

    /// Number of cells settled so far.
    pub fn settled(&self) -> usize {
        self.settled
    }

    /// Current component of `cell`, or `None` if the search has not
    /// reached it.
    pub fn component_of(&mut self, cell: Cell) -> Option<ComponentId> {
        let idx = self.dims.index(cell)?;
        self.tracker.find(idx)
    }

    /// Target whose search front claimed `cell`, or `None` if the search
    /// has not reached it.
    pub fn nearest_target(&self, cell: Cell) -> Option<Cell> {
        let idx = self.dims.index(cell)?;
        self.tracker.seed_of(idx)
    }

    /// Cost of the network materialised so far.
    pub fn tree_cost(&self) -> f64 {
        self.edges.values().sum()
    }

    /// Apply every due bridge, then settle the next frontier cell.
    pub fn step(&mut self) -> Step {
        if let Some(done) = self.done {
            return done;
        }
        if self.goal_reached() {
            return self.conclude(Step::Connected);
        }

        let horizon = self.frontier.peek_cost();
        while let Some(bridge) = self.bridges.peek().copied() {
            if horizon.is_some_and(|f| bridge.cost > f) {
                break;
            }
            self.bridges.pop();
            self.apply(bridge);
            if self.goal_reached() {
                return self.conclude(Step::Connected);
            }
        }

        let Some(entry) = self.frontier.pop_min() else {
            return self.conclude(Step::Exhausted);
        };
        let ci = entry.idx;
        if self.state.settled[ci] || entry.cost != self.state.dist[ci] {
            // stale
            return Step::Continue;
        }
        self.settle(ci, entry.cost);
        Step::Continue
    }

    /// Step until the run ends.
    pub fn run(&mut self) -> Step {
        loop {
            match self.step() {
                Step::Continue => {}
                done => return done,
            }
        }
    }

    /// Stop here and extract whatever network has been built.
    pub fn finish(mut self) -> SpanningReport {
        let groups = self.tracker.groups();
        let count = groups.len();
        let outcome = if count <= 1 {
            Outcome::Connected
        } else if self.done == Some(Step::Exhausted) {
            Outcome::Disconnected { groups: count }
        } else {
            Outcome::Stopped { groups: count }
        };
        match outcome {
            Outcome::Connected => log::info!(
                "spanning run connected {} targets with {} edges",
                self.targets.len(),
                self.edges.len()
            ),
            Outcome::Stopped { groups } => log::info!(
                "spanning run stopped with {} of {} targets joined ({groups} groups)",
                self.tracker.largest(),
                self.targets.len()
            ),
            Outcome::Disconnected { groups } => log::warn!(
                "grid exhausted: {} targets remain in {groups} disconnected groups",
                self.targets.len()
            ),
        }

        let network = Network::from_edges(
            self.dims,
            self.targets,
            self.edges.into_iter().map(|(e, w)| (e.a(), e.b(), w)),
        );
        debug_assert!(network.verify().is_ok());
        SpanningReport {
            network,
            groups,
            outcome,
            connections: self.connections,
            settled: self.settled,
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn goal_reached(&self) -> bool {
        let total = self.tracker.targets();
        if total < 2 || self.tracker.count() == 1 {
            return true;
        }
        self.options.stop_fraction < 1.0
            && self.tracker.largest() as f64 >= self.options.stop_fraction * total as f64
    }

    fn conclude(&mut self, step: Step) -> Step {
        self.done = Some(step);
        step
    }

    fn settle(&mut self, ci: usize, cost: f64) {
        self.state.settled[ci] = true;
        self.settled += 1;
        self.report_progress();

        let cp = self.state.cell(ci);
        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.graph.neighbors(cp, &mut nbuf);

        for &(np, w) in nbuf.iter() {
            let Some(ni) = self.dims.index(np) else {
                continue;
            };
            if self.state.settled[ni] {
                // Both ends are final: record the meeting edge once.
                if self.tracker.find(ci) != self.tracker.find(ni) {
                    self.bridges.push(Bridge {
                        cost: cost + w + self.state.dist[ni],
                        weight: w,
                        lo: ci.min(ni),
                        hi: ci.max(ni),
                    });
                }
                continue;
            }
            let tentative = cost + w;
            if tentative > self.options.max_cost || tentative >= self.state.dist[ni] {
                continue;
            }
            self.state.relax(ni, tentative, ci);
            self.tracker.inherit(ni, ci);
            self.frontier.push(tentative, ni);
        }

        self.nbuf = nbuf;
    }

    fn apply(&mut self, bridge: Bridge) {
        let (Some(ca), Some(cb)) = (self.tracker.find(bridge.lo), self.tracker.find(bridge.hi))
        else {
            debug_assert!(false, "bridge endpoints must be settled");
            return;
        };
        if ca == cb {
            return;
        }

        let before = self.tree_cost();
        self.materialize(bridge.lo);
        self.materialize(bridge.hi);
        let (lo, hi) = (self.state.cell(bridge.lo), self.state.cell(bridge.hi));
        self.edges.insert(Edge::new(lo, hi), bridge.weight);
        let merged = self.tracker.union(ca, cb);
        debug_assert!(merged == ca.min(cb));

        log::debug!(
            "connected {:?} and {:?} via {lo}-{hi} at cost {:.3} ({} components left)",
            ca,
            cb,
            bridge.cost,
            self.tracker.count()
        );

        if self.options.record_connections {
            self.connections.push(ConnectionEvent {
                order: self.merges,
                joined: (ca, cb),
                merged,
                via: (lo, hi),
                path_cost: bridge.cost,
                added_cost: self.tree_cost() - before,
            });
        }
        self.merges += 1;
    }

    /// Add the predecessor chain from `idx` back to its target, stopping
    /// early at the first cell already on the network.
    fn materialize(&mut self, mut idx: usize) {
        while !self.on_tree[idx] {
            self.on_tree[idx] = true;
            let Some(p) = self.state.pred_of(idx) else {
                break;
            };
            let (a, b) = (self.state.cell(idx), self.state.cell(p));
            let w = self
                .graph
                .cost(a, b)
                .unwrap_or_else(|| self.state.dist[idx] - self.state.dist[p]);
            self.edges.insert(Edge::new(a, b), w);
            idx = p;
        }
    }

    fn report_progress(&mut self) {
        let step = self.options.progress_step as usize;
        if step == 0 || self.dims.is_empty() {
            return;
        }
        let pct = self.settled * 100 / self.dims.len();
        if pct >= self.next_progress {
            log::debug!("settled {pct}% of cells ({} merges)", self.merges);
            self.next_progress = (pct / step + 1) * step;
        }
    }
}

/// Connect all `targets` on `graph` with a least-cost spanning network.
///
/// Returns a forest (see [`SpanningReport::outcome`]) rather than an error
/// when the grid does not link every target.
pub fn connect<G: CostGraph>(
    graph: &G,
    targets: &TargetSet,
    options: SpanningOptions,
) -> SpanningResult<SpanningReport> {
    let mut run = SpanningRun::new(graph, targets, options)?;
    run.run();
    Ok(run.finish())
}
