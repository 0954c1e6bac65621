use crate::error::PlannerError;
use crate::search::best_first;
use crate::{CityGrid, Cost, Position, TimeStep};
use core::fmt;
use log::{debug, info, warn};
use std::str::FromStr;
use std::time::{Duration, Instant};

pub mod astar;
pub mod bfs;
pub mod dijkstra;

use astar::AstarSolver;
use bfs::BfsSolver;
use dijkstra::DijkstraSolver;

/// Outcome of a single search call.
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// Cells from start to goal, both included. [None] if the goal could not be reached.
    pub path: Option<Vec<Position>>,
    /// Sum of the costs of all cells on the path, start included.
    pub total_cost: Cost,
    pub nodes_expanded: usize,
    pub elapsed: Duration,
}

impl SearchResult {
    /// The result of a search that did not find a path.
    pub fn failure(nodes_expanded: usize, elapsed: Duration) -> SearchResult {
        SearchResult {
            path: None,
            total_cost: Cost::Infinite,
            nodes_expanded,
            elapsed,
        }
    }

    /// The result of a search that was never started.
    pub fn not_started() -> SearchResult {
        SearchResult::failure(0, Duration::ZERO)
    }

    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }

    /// Number of cells on the path.
    pub fn path_len(&self) -> Option<usize> {
        self.path.as_ref().map(Vec::len)
    }

    /// Number of moves on the path.
    pub fn edge_count(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len().saturating_sub(1))
    }
}

pub trait GridSolver {
    fn name(&self) -> &'static str;

    /// Estimate of the remaining cost from `p1` to `p2`.
    fn heuristic(&self, p1: &Position, p2: &Position) -> Cost;

    /// Searches from `start` to `goal`, treating the dynamic obstacles of `time_step` as blocked.
    /// The default implementation is a best-first search ordered by accumulated cost plus
    /// [heuristic](Self::heuristic), seeded with the cost of the start cell.
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
        let outcome = best_first(
            &start,
            grid.cost(start),
            |node| grid.neighbors_at(*node, time_step),
            |point| self.heuristic(point, &goal),
            |point| *point == goal,
        );
        let elapsed = before.elapsed();
        let result = match outcome.path {
            Some((path, total_cost)) => SearchResult {
                path: Some(path),
                total_cost,
                nodes_expanded: outcome.nodes_expanded,
                elapsed,
            },
            None => SearchResult::failure(outcome.nodes_expanded, elapsed),
        };
        log_result(self.name(), start, goal, &result);
        result
    }

    /// Searches at time step 0.
    fn find_path(&self, grid: &CityGrid, start: Position, goal: Position) -> SearchResult {
        self.find_path_at(grid, start, goal, 0)
    }

    /// Searches between optional endpoints. A missing start or goal yields a failed result
    /// without running the search.
    fn find_path_between(
        &self,
        grid: &CityGrid,
        start: Option<Position>,
        goal: Option<Position>,
        time_step: TimeStep,
    ) -> SearchResult {
        match (start, goal) {
            (Some(start), Some(goal)) => self.find_path_at(grid, start, goal, time_step),
            _ => {
                warn!("{}: start or goal is undefined, not searching", self.name());
                SearchResult::not_started()
            }
        }
    }

    /// Searches from the grid's start to its goal at time step 0.
    fn solve(&self, grid: &CityGrid) -> SearchResult {
        self.find_path_between(grid, grid.start_pos, grid.goal_pos, 0)
    }

    /// Sum of the costs of every cell on `path`, start included.
    fn path_cost(&self, grid: &CityGrid, path: &[Position]) -> Cost {
        path.iter().map(|p| grid.cost(*p)).sum()
    }
}

/// A start cell with infinite cost (a wall or outside the grid) admits no finite path, so the
/// search fails before expanding anything.
pub(crate) fn blocked_start(
    name: &str,
    grid: &CityGrid,
    start: Position,
    goal: Position,
    before: Instant,
) -> Option<SearchResult> {
    if grid.cost(start).is_finite() {
        return None;
    }
    warn!("{}: start {} is blocked, not searching", name, start);
    let result = SearchResult::failure(0, before.elapsed());
    log_result(name, start, goal, &result);
    Some(result)
}

pub(crate) fn log_result(name: &str, start: Position, goal: Position, result: &SearchResult) {
    match &result.path {
        Some(path) => info!(
            "{}: path of {} cells with cost {} from {} to {}",
            name,
            path.len(),
            result.total_cost,
            start,
            goal
        ),
        None => info!("{}: {} is not reachable from {}", name, goal, start),
    }
    debug!(
        "{}: {} nodes expanded in {:.2?}",
        name, result.nodes_expanded, result.elapsed
    );
}

/// The available search strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    BreadthFirst,
    UniformCost,
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::BreadthFirst,
        Algorithm::UniformCost,
        Algorithm::AStar,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::BreadthFirst => "bfs",
            Algorithm::UniformCost => "ucs",
            Algorithm::AStar => "a_star",
        }
    }

    pub fn solver(&self) -> Box<dyn GridSolver> {
        match self {
            Algorithm::BreadthFirst => Box::new(BfsSolver),
            Algorithm::UniformCost => Box::new(DijkstraSolver),
            Algorithm::AStar => Box::new(AstarSolver::new()),
        }
    }
}

impl FromStr for Algorithm {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Algorithm::BreadthFirst),
            "ucs" | "dijkstra" => Ok(Algorithm::UniformCost),
            "a_star" | "astar" | "a*" => Ok(Algorithm::AStar),
            _ => Err(PlannerError::UnknownAlgorithm(s.to_owned())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
