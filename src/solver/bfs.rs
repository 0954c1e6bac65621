use std::time::Instant;

use crate::search::breadth_first;
use crate::solver::{blocked_start, log_result, GridSolver, SearchResult};
use crate::{CityGrid, Cost, Position, TimeStep};

/// Breadth-first search. Finds a path with the fewest moves and ignores terrain costs while
/// searching; the reported cost is computed afterwards from the cells on the path.
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsSolver;

impl GridSolver for BfsSolver {
    fn name(&self) -> &'static str {
        "bfs"
    }

    fn heuristic(&self, _: &Position, _: &Position) -> Cost {
        Cost::Finite(0)
    }

    fn find_path_at(
        &self,
        grid: &CityGrid,
        start: Position,
        goal: Position,
        time_step: TimeStep,
    ) -> SearchResult {
        let before = Instant::now();
        if let Some(result) = blocked_start(self.name(), grid, start, goal, before) {
            return result;
        }
        let outcome = breadth_first(
            &start,
            |node| {
                grid.neighbors_at(*node, time_step)
                    .into_iter()
                    .map(|(p, _)| p)
            },
            |point| *point == goal,
        );
        let result = match outcome.path {
            Some((path, _)) => SearchResult {
                total_cost: self.path_cost(grid, &path),
                path: Some(path),
                nodes_expanded: outcome.nodes_expanded,
                elapsed: before.elapsed(),
            },
            None => SearchResult::failure(outcome.nodes_expanded, before.elapsed()),
        };
        log_result(self.name(), start, goal, &result);
        result
    }
}
