use std::cmp::Ordering;

use petgraph::graph::NodeIndex;

#[derive(Copy, Clone, PartialEq)]
pub(super) struct State {
    pub(super) cost: f64,
    pub(super) node: NodeIndex,
}

// Costs are finite sums of finite weights
impl Eq for State {}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap),
        // lower node index first on equal cost
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BinaryHeap;

    use super::*;

    #[test]
    fn heap_pops_cheapest_then_lowest_index() {
        let mut heap = BinaryHeap::new();
        heap.push(State {
            cost: 5.0,
            node: NodeIndex::new(0),
        });
        heap.push(State {
            cost: 1.0,
            node: NodeIndex::new(7),
        });
        heap.push(State {
            cost: 1.0,
            node: NodeIndex::new(3),
        });

        let order: Vec<usize> = std::iter::from_fn(|| heap.pop())
            .map(|state| state.node.index())
            .collect();
        assert_eq!(order, vec![3, 7, 0]);
    }
}
