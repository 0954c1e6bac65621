//! Frontier containers for the searches in [crate::search] and the heuristic used to order them.
use crate::{Cost, Position};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

/// First-in first-out frontier used by breadth-first search.
#[derive(Clone, Debug)]
pub struct FifoFrontier<N> {
    queue: VecDeque<N>,
}

impl<N> Default for FifoFrontier<N> {
    fn default() -> Self {
        FifoFrontier {
            queue: VecDeque::new(),
        }
    }
}

impl<N> FifoFrontier<N> {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn push(&mut self, item: N) {
        self.queue.push_back(item);
    }
    pub fn pop(&mut self) -> Option<N> {
        self.queue.pop_front()
    }
}

struct SmallestCostHolder<T, K> {
    estimated_cost: K,
    cost: K,
    sequence: usize,
    item: T,
}

impl<T, K: PartialEq> Eq for SmallestCostHolder<T, K> {}

impl<T, K: PartialEq> PartialEq for SmallestCostHolder<T, K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost)
            && self.cost.eq(&other.cost)
            && self.sequence == other.sequence
    }
}

impl<T, K: Ord> PartialOrd for SmallestCostHolder<T, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, K: Ord> Ord for SmallestCostHolder<T, K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // First orders per estimated cost, then favours the larger accumulated cost (the node
        // closer to the goal) and finally the earlier insertion
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| self.cost.cmp(&other.cost))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Min-priority frontier used by uniform-cost and A* search. Items are popped by smallest
/// priority; ties go to the larger accumulated cost and then to the item pushed first.
pub struct PriorityFrontier<T, K> {
    heap: BinaryHeap<SmallestCostHolder<T, K>>,
    pushed: usize,
}

impl<T, K: Ord> Default for PriorityFrontier<T, K> {
    fn default() -> Self {
        PriorityFrontier {
            heap: BinaryHeap::new(),
            pushed: 0,
        }
    }
}

impl<T, K: Ord> PriorityFrontier<T, K> {
    pub fn new() -> Self {
        Self::default()
    }
    /// Pushes `item` reached with accumulated `cost` under the given `priority`. Stale entries
    /// for the same item are not removed.
    pub fn push(&mut self, item: T, cost: K, priority: K) {
        self.heap.push(SmallestCostHolder {
            estimated_cost: priority,
            cost,
            sequence: self.pushed,
            item,
        });
        self.pushed += 1;
    }
    /// Removes the entry with the smallest priority, returning the item and its accumulated cost.
    pub fn pop(&mut self) -> Option<(T, K)> {
        self.heap.pop().map(|holder| (holder.item, holder.cost))
    }
}

/// Manhattan distance scaled by `factor`, truncated towards zero. Admissible for factors up to
/// 1.0 as long as every step costs at least one unit.
pub fn manhattan_heuristic(p1: &Position, p2: &Position, factor: f32) -> Cost {
    let distance = p1.manhattan_distance(p2);
    if factor == 1.0 {
        Cost::Finite(distance)
    } else {
        Cost::Finite((distance as f64 * factor as f64) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order() {
        let mut frontier = FifoFrontier::new();
        frontier.push(1);
        frontier.push(2);
        frontier.push(3);
        assert_eq!(frontier.pop(), Some(1));
        assert_eq!(frontier.pop(), Some(2));
        assert_eq!(frontier.pop(), Some(3));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn priority_pops_smallest() {
        let mut frontier = PriorityFrontier::new();
        frontier.push('a', 5, 7);
        frontier.push('b', 1, 2);
        frontier.push('c', 3, 4);
        assert_eq!(frontier.pop(), Some(('b', 1)));
        assert_eq!(frontier.pop(), Some(('c', 3)));
        assert_eq!(frontier.pop(), Some(('a', 5)));
        assert_eq!(frontier.pop(), None);
    }

    /// Equal priorities favour the larger accumulated cost, then insertion order.
    #[test]
    fn priority_tie_breaking() {
        let mut frontier = PriorityFrontier::new();
        frontier.push("first", 1, 4);
        frontier.push("deeper", 3, 4);
        frontier.push("second", 1, 4);
        assert_eq!(frontier.pop().map(|x| x.0), Some("deeper"));
        assert_eq!(frontier.pop().map(|x| x.0), Some("first"));
        assert_eq!(frontier.pop().map(|x| x.0), Some("second"));
    }

    #[test]
    fn heuristic_scaling() {
        let a = Position::new(0, 0);
        let b = Position::new(2, 3);
        assert_eq!(manhattan_heuristic(&a, &b, 1.0), Cost::Finite(5));
        assert_eq!(manhattan_heuristic(&a, &b, 0.5), Cost::Finite(2));
        assert_eq!(manhattan_heuristic(&a, &b, 2.0), Cost::Finite(10));
        assert_eq!(manhattan_heuristic(&b, &b, 1.0), Cost::Finite(0));
    }
}
