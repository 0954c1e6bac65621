use crate::{solver::GridSolver, Cost, Position};

/// Uniform-cost search: best-first search on accumulated cost alone.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    fn name(&self) -> &'static str {
        "ucs"
    }

    fn heuristic(&self, _: &Position, _: &Position) -> Cost {
        Cost::Finite(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CityGrid;

    /// Asserts that the optimal 5 cell solution is found.
    #[test]
    fn solve_simple_problem() {
        let grid = CityGrid::parse("S..\n.#.\n..G");
        let result = DijkstraSolver.solve(&grid);
        assert_eq!(result.path_len(), Some(5));
        assert_eq!(result.total_cost, Cost::Finite(5));
        let path = result.path.unwrap_or_default();
        assert_eq!(path.first(), Some(&Position::new(0, 0)));
        assert_eq!(path.last(), Some(&Position::new(2, 2)));
        assert!(path.windows(2).all(|w| w[0].is_adjacent(&w[1])));
    }

    #[test]
    fn weighted_detour() {
        // The direct corridor costs 1 + 5 + 5 + 1, the detour 1 + 1 + 1 + 1 + 1 + 1
        let grid = CityGrid::parse(
            "S55G\n\
             ....",
        );
        let result = DijkstraSolver.solve(&grid);
        assert_eq!(result.total_cost, Cost::Finite(6));
        assert_eq!(result.path_len(), Some(6));
    }

    #[test]
    fn idempotent() {
        let grid = CityGrid::parse("S.3.\n.#2.\n..#G\n4...");
        let first = DijkstraSolver.solve(&grid);
        let second = DijkstraSolver.solve(&grid);
        assert_eq!(first.path, second.path);
        assert_eq!(first.total_cost, second.total_cost);
        assert_eq!(first.nodes_expanded, second.nodes_expanded);
    }
}
