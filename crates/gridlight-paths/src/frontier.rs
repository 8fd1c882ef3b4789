//! Re-insertable min-priority queue over `(cost, cell index)` pairs.
//!
//! There is no decrease-key: a cell whose tentative cost improves is simply
//! pushed again and the outdated entry stays in the heap. Consumers discard
//! stale pops by comparing the popped cost with their own distance table.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// One frontier entry.
#[derive(Clone, Copy, Debug)]
pub struct FrontierEntry {
    pub cost: f64,
    pub idx: usize,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest cost first, and
        // the lowest flattened index among equal costs.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

/// Min-priority frontier with lazy deletion.
#[derive(Debug, Default, Clone)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    pushes: usize,
}

impl Frontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `idx` at `cost`. Older entries for the same index are kept.
    #[inline]
    pub fn push(&mut self, cost: f64, idx: usize) {
        self.pushes += 1;
        self.heap.push(FrontierEntry { cost, idx });
    }

    /// Remove and return the cheapest entry.
    #[inline]
    pub fn pop_min(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }

    /// Cost of the cheapest entry without removing it.
    #[inline]
    pub fn peek_cost(&self) -> Option<f64> {
        self.heap.peek().map(|e| e.cost)
    }

    /// Number of queued entries, stale ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether nothing is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total pushes since creation.
    pub fn pushes(&self) -> usize {
        self.pushes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_cost_order() {
        let mut f = Frontier::new();
        f.push(3.0, 1);
        f.push(0.5, 7);
        f.push(2.0, 4);
        let order: Vec<_> = std::iter::from_fn(|| f.pop_min()).map(|e| e.idx).collect();
        assert_eq!(order, vec![7, 4, 1]);
    }

    #[test]
    fn ties_break_on_lowest_index() {
        let mut f = Frontier::new();
        f.push(1.0, 9);
        f.push(1.0, 2);
        f.push(1.0, 5);
        assert_eq!(f.pop_min().map(|e| e.idx), Some(2));
        assert_eq!(f.pop_min().map(|e| e.idx), Some(5));
        assert_eq!(f.pop_min().map(|e| e.idx), Some(9));
        assert!(f.pop_min().is_none());
    }

    #[test]
    fn keeps_stale_duplicates() {
        let mut f = Frontier::new();
        f.push(5.0, 3);
        f.push(2.0, 3);
        assert_eq!(f.len(), 2);
        assert_eq!(f.peek_cost(), Some(2.0));
        let first = f.pop_min().unwrap();
        let second = f.pop_min().unwrap();
        assert_eq!((first.cost, first.idx), (2.0, 3));
        assert_eq!((second.cost, second.idx), (5.0, 3));
        assert_eq!(f.pushes(), 2);
    }
}
