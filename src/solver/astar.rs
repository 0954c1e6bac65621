use crate::frontier::manhattan_heuristic;
use crate::{solver::GridSolver, Cost, Position};

/// A* search with the Manhattan distance as heuristic.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    /// Scales the heuristic. At 1.0 the heuristic is admissible on grids whose cells cost at
    /// least 1; larger values give weighted A*, which expands fewer nodes but may return
    /// more expensive paths.
    pub heuristic_factor: f32,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
        }
    }

    pub fn with_heuristic_factor(heuristic_factor: f32) -> AstarSolver {
        AstarSolver { heuristic_factor }
    }
}

impl Default for AstarSolver {
    fn default() -> Self {
        AstarSolver::new()
    }
}

impl GridSolver for AstarSolver {
    fn name(&self) -> &'static str {
        "a_star"
    }

    /// Manhattan distance times the heuristic factor.
    fn heuristic(&self, p1: &Position, p2: &Position) -> Cost {
        manhattan_heuristic(p1, p2, self.heuristic_factor)
    }
}
