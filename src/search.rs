//! Generic search cores shared by the grid solvers. The best-first core is a variant of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
//! that seeds the start with its own cost and reports how many nodes it expanded.
use crate::frontier::{FifoFrontier, PriorityFrontier};
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::trace;
use num_traits::Zero;
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Parent index of the start node.
const NO_PARENT: usize = usize::MAX;

/// Result of a search core: the path with its cost if one was found and the number of
/// expansions performed either way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome<N, C> {
    pub path: Option<(Vec<N>, C)>,
    pub nodes_expanded: usize,
}

/// Walks the parent indices from `start` back to the node without parent and returns the nodes
/// in root-first order.
fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut i = start;
    let mut path: Vec<N> = std::iter::from_fn(|| {
        parents.get_index(i).map(|(node, value)| {
            i = parent(value);
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Breadth-first search. Nodes are marked as visited when they are enqueued so each node is
/// expanded at most once. The returned cost is the number of edges on the path.
pub fn breadth_first<N, FN, IN, FS>(
    start: &N,
    mut successors: FN,
    mut success: FS,
) -> SearchOutcome<N, usize>
where
    N: Eq + Hash + Clone,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = N>,
    FS: FnMut(&N) -> bool,
{
    let mut frontier = FifoFrontier::new();
    frontier.push(0);
    // Doubles as the visited set
    let mut parents: FxIndexMap<N, usize> = FxIndexMap::default();
    parents.insert(start.clone(), NO_PARENT);
    let mut nodes_expanded = 0;
    while let Some(index) = frontier.pop() {
        nodes_expanded += 1;
        let successors = {
            let Some((node, _)) = parents.get_index(index) else {
                continue;
            };
            if success(node) {
                let path = reverse_path(&parents, |&p| p, index);
                let edges = path.len() - 1;
                return SearchOutcome {
                    path: Some((path, edges)),
                    nodes_expanded,
                };
            }
            successors(node)
        };
        for successor in successors {
            if let Vacant(e) = parents.entry(successor) {
                let n = e.index();
                e.insert(index);
                frontier.push(n);
            }
        }
    }
    trace!("Frontier exhausted after {} expansions", nodes_expanded);
    SearchOutcome {
        path: None,
        nodes_expanded,
    }
}

/// Best-first search ordered by accumulated cost plus `heuristic`. With a zero heuristic this
/// is uniform-cost search. `start_cost` seeds the accumulated cost of the start node.
///
/// Improved routes to a node are pushed again without removing the old entry; when the old entry
/// is popped later it no longer matches the best recorded cost and is skipped without counting
/// as an expansion.
pub fn best_first<N, C, FN, IN, FH, FS>(
    start: &N,
    start_cost: C,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> SearchOutcome<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut frontier = PriorityFrontier::new();
    frontier.push(0, start_cost, start_cost + heuristic(start));
    let mut parents: FxIndexMap<N, (usize, C)> = FxIndexMap::default();
    parents.insert(start.clone(), (NO_PARENT, start_cost));
    let mut nodes_expanded = 0;
    while let Some((index, cost)) = frontier.pop() {
        let successors = {
            let Some((node, &(_, c))) = parents.get_index(index) else {
                continue;
            };
            // We may have inserted a node several times into the frontier if we found
            // a better way to access it. Only the entry carrying the best cost is expanded.
            if cost > c {
                continue;
            }
            nodes_expanded += 1;
            if success(node) {
                let path = reverse_path(&parents, |&(p, _)| p, index);
                return SearchOutcome {
                    path: Some((path, cost)),
                    nodes_expanded,
                };
            }
            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let h; // heuristic(&successor)
            let n; // index for successor
            match parents.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }
            frontier.push(n, new_cost, new_cost + h);
        }
    }
    trace!("Frontier exhausted after {} expansions", nodes_expanded);
    SearchOutcome {
        path: None,
        nodes_expanded,
    }
}
