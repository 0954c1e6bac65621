//! # city_pathfinding
//!
//! Pathfinding for a single delivery agent on a 4-connected city grid with weighted terrain.
//! Provides [breadth-first](solver::bfs::BfsSolver),
//! [uniform-cost](solver::dijkstra::DijkstraSolver) and [A*](solver::astar::AstarSolver) search
//! over a shared [CityGrid], which also keeps a schedule of dynamic obstacles that block cells
//! only at given time steps. [ReplanningScenario] shows how a route is repaired when an
//! obstacle appears on it while the agent is underway.
//!
//! Maps are read from the plain text format of the [city_maps] crate:
//!
//! ```
//! use city_pathfinding::{CityGrid, Cost, GridSolver, AstarSolver};
//!
//! let grid = CityGrid::parse("S..\n.#.\n..G");
//! let result = AstarSolver::new().solve(&grid);
//! assert_eq!(result.path.map(|p| p.len()), Some(5));
//! assert_eq!(result.total_cost, Cost::Finite(5));
//! ```
pub mod city_grid;
pub mod cost;
pub mod error;
pub mod frontier;
pub mod position;
pub mod replan;
pub mod search;
pub mod solver;

pub use city_grid::CityGrid;
pub use cost::Cost;
pub use error::{PlannerError, Result};
pub use position::Position;
pub use replan::{ReplanOutcome, ReplanReport, ReplanningScenario};
pub use solver::astar::AstarSolver;
pub use solver::bfs::BfsSolver;
pub use solver::dijkstra::DijkstraSolver;
pub use solver::{Algorithm, GridSolver, SearchResult};

/// Discrete time at which dynamic obstacles are scheduled. Static planning happens at step 0.
pub type TimeStep = u32;

/// Inline capacity of neighbour lists, one slot per 4-connected direction.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Number of planned moves the agent makes before an obstacle is injected during replanning.
pub const DEFAULT_ADVANCE_STEPS: usize = 4;
