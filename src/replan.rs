//! Scripted replanning run: plan with A*, walk part of the plan, block the next planned cell and
//! plan again from where the agent stands.
use crate::solver::{astar::AstarSolver, GridSolver, SearchResult};
use crate::{CityGrid, Position, TimeStep, DEFAULT_ADVANCE_STEPS};
use core::fmt;
use itertools::Itertools;
use log::{info, warn};

/// How a replanning run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplanOutcome {
    /// No path from the start to the goal existed in the first place.
    InitialPlanFailed,
    /// The agent reached the goal before an obstacle could be placed on its path.
    ReachedGoal,
    Replanned,
    /// The injected obstacle cut the agent off from the goal.
    ReplanFailed,
}

/// Everything that happened during a replanning run. [fmt::Display] renders it as a readable
/// trace.
#[derive(Clone, Debug)]
pub struct ReplanReport {
    pub initial: SearchResult,
    /// Cells the agent moved to, in order.
    pub walked: Vec<Position>,
    /// Where the agent stands when the obstacle appears.
    pub position: Option<Position>,
    /// The blocked cell and the time step it was scheduled at.
    pub injected: Option<(Position, TimeStep)>,
    /// The part of the initial plan the agent had not walked yet.
    pub remaining: Vec<Position>,
    pub replanned: Option<SearchResult>,
    pub outcome: ReplanOutcome,
}

impl ReplanReport {
    fn new(initial: SearchResult, outcome: ReplanOutcome) -> ReplanReport {
        ReplanReport {
            initial,
            walked: Vec::new(),
            position: None,
            injected: None,
            remaining: Vec::new(),
            replanned: None,
            outcome,
        }
    }

    pub fn steps_taken(&self) -> usize {
        self.walked.len()
    }

    /// The multi-line human-readable trace of the run.
    pub fn trace(&self) -> String {
        self.to_string()
    }
}

fn format_path(path: &[Position]) -> String {
    format!("[{}]", path.iter().join(", "))
}

fn write_result(f: &mut fmt::Formatter, result: &SearchResult) -> fmt::Result {
    if let Some(path) = &result.path {
        writeln!(f, "  path: {}", format_path(path))?;
    }
    writeln!(f, "  cost: {}", result.total_cost)?;
    writeln!(f, "  nodes expanded: {}", result.nodes_expanded)
}

impl fmt::Display for ReplanReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "=== Dynamic replanning ===")?;
        writeln!(f, "[1] Initial plan with A*")?;
        if self.outcome == ReplanOutcome::InitialPlanFailed {
            return writeln!(f, "  no path to the goal, giving up");
        }
        write_result(f, &self.initial)?;

        writeln!(f, "[2] Following the plan")?;
        for (i, p) in self.walked.iter().enumerate() {
            writeln!(f, "  step {}: moved to {}", i + 1, p)?;
        }
        if let Some(position) = self.position {
            writeln!(f, "  at {} after {} steps", position, self.steps_taken())?;
        }

        writeln!(f, "[3] Obstacle check")?;
        let Some((blocked, time_step)) = self.injected else {
            return writeln!(f, "  nothing left to block, the goal has been reached");
        };
        writeln!(f, "  new obstacle at {} (time step {})", blocked, time_step)?;
        writeln!(f, "  remaining plan: {}", format_path(&self.remaining))?;

        match self.position {
            Some(position) => writeln!(f, "[4] Replanning from {} with A*", position)?,
            None => writeln!(f, "[4] Replanning with A*")?,
        }
        match &self.replanned {
            Some(result) if result.is_found() => {
                write_result(f, result)?;
                writeln!(f, "Replanning done, continuing on the new path")
            }
            _ => writeln!(f, "  no path around the obstacle"),
        }
    }
}

/// Runs a single plan, walk, block, replan cycle with A*.
#[derive(Clone, Debug)]
pub struct ReplanningScenario {
    pub solver: AstarSolver,
    /// Number of planned moves the agent makes before the obstacle appears.
    pub advance_steps: usize,
}

impl Default for ReplanningScenario {
    fn default() -> Self {
        ReplanningScenario {
            solver: AstarSolver::new(),
            advance_steps: DEFAULT_ADVANCE_STEPS,
        }
    }
}

impl ReplanningScenario {
    pub fn new() -> ReplanningScenario {
        Self::default()
    }

    pub fn with_advance_steps(advance_steps: usize) -> ReplanningScenario {
        ReplanningScenario {
            advance_steps,
            ..Self::default()
        }
    }

    /// Runs the scenario between the grid's start and goal. The injected obstacle stays in the
    /// grid's dynamic schedule afterwards; [ReplanReport::injected] tells where.
    pub fn run(&self, grid: &mut CityGrid) -> ReplanReport {
        let (start, goal) = (grid.start_pos, grid.goal_pos);
        self.run_between(grid, start, goal)
    }

    pub fn run_between(
        &self,
        grid: &mut CityGrid,
        start: Option<Position>,
        goal: Option<Position>,
    ) -> ReplanReport {
        let initial = self.solver.find_path_between(grid, start, goal, 0);
        let (Some(goal), Some(path)) = (goal, initial.path.clone()) else {
            warn!("Replanning: no initial path found");
            return ReplanReport::new(initial, ReplanOutcome::InitialPlanFailed);
        };
        info!(
            "Replanning: initial path of {} cells, cost {}",
            path.len(),
            initial.total_cost
        );

        let steps = self.advance_steps.min(path.len() - 1);
        let mut report = ReplanReport::new(initial, ReplanOutcome::ReachedGoal);
        report.walked = path[1..=steps].to_vec();
        let position = path[steps];
        report.position = Some(position);
        report.remaining = path[steps + 1..].to_vec();
        info!("Replanning: agent moved {} steps to {}", steps, position);

        let Some(&blocked) = report.remaining.first() else {
            info!("Replanning: goal reached, nothing to block");
            return report;
        };
        let time_step = steps as TimeStep;
        grid.add_dynamic_obstacle(blocked, time_step);
        report.injected = Some((blocked, time_step));
        info!(
            "Replanning: obstacle at {} (time step {}), replanning from {}",
            blocked, time_step, position
        );

        let replanned = self.solver.find_path_at(grid, position, goal, time_step);
        report.outcome = if replanned.is_found() {
            ReplanOutcome::Replanned
        } else {
            warn!("Replanning: no path around {}", blocked);
            ReplanOutcome::ReplanFailed
        };
        report.replanned = Some(replanned);
        report
    }
}
