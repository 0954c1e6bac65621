use crate::error::{PlannerError, Result};
use crate::{Cost, Position, TimeStep, N_SMALLVEC_SIZE};
use city_maps::{MapLayout, Tile};
use core::fmt;
use fxhash::{FxHashMap, FxHashSet};
use grid_util::grid::{SimpleValueGrid, ValueGrid};
use log::{debug, warn};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;
use std::path::Path;
use std::str::FromStr;

/// [CityGrid] holds the per-cell traversal costs of a rectangular city map in a
/// [SimpleValueGrid], the set of statically blocked cells and a schedule of dynamic obstacles
/// that block a cell only at specific time steps. Connected components of the static map are
/// tracked in a [UnionFind] structure so that unreachable goals can be recognised without
/// flood-filling.
#[derive(Clone, Debug)]
pub struct CityGrid {
    pub grid: SimpleValueGrid<Cost>,
    pub static_obstacles: FxHashSet<Position>,
    pub dynamic_obstacles: FxHashMap<TimeStep, Vec<Position>>,
    pub start_pos: Option<Position>,
    pub goal_pos: Option<Position>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl CityGrid {
    /// Creates a grid in which every cell is standard terrain of cost 1.
    pub fn new(width: usize, height: usize) -> CityGrid {
        let mut city = CityGrid {
            grid: SimpleValueGrid::new(width, height, Cost::ONE),
            static_obstacles: FxHashSet::default(),
            dynamic_obstacles: FxHashMap::default(),
            start_pos: None,
            goal_pos: None,
            components: UnionFind::new(width * height),
            components_dirty: false,
        };
        city.generate_components();
        city
    }

    pub fn from_layout(layout: &MapLayout) -> CityGrid {
        let mut city = CityGrid::new(layout.width, layout.height);
        for row in 0..layout.height {
            for col in 0..layout.width {
                let pos = Position::from((row, col));
                match layout.tile(row, col) {
                    Some(Tile::Wall) => city.add_static_obstacle(pos),
                    Some(Tile::Open(c)) => city.set_cost(pos, Cost::Finite(c as u32)),
                    None => {}
                }
            }
        }
        city.start_pos = layout.start.map(Position::from);
        city.goal_pos = layout.goal.map(Position::from);
        city.update();
        debug!(
            "Loaded {}x{} city with {} static obstacles",
            city.width(),
            city.height(),
            city.static_obstacles.len()
        );
        city
    }

    /// Builds a grid from map text, see [city_maps] for the format.
    pub fn parse(text: &str) -> CityGrid {
        CityGrid::from_layout(&MapLayout::parse(text))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<CityGrid> {
        Ok(CityGrid::from_layout(&MapLayout::load(path)?))
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Start and goal, or the configuration error describing which one is missing.
    pub fn endpoints(&self) -> Result<(Position, Position)> {
        let start = self.start_pos.ok_or(PlannerError::MissingStart)?;
        let goal = self.goal_pos.ok_or(PlannerError::MissingGoal)?;
        Ok((start, goal))
    }

    pub fn is_valid(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.height()
            && (pos.col as usize) < self.width()
    }

    /// Movement cost of entering `pos`, [Cost::Infinite] outside of the grid.
    pub fn cost(&self, pos: Position) -> Cost {
        if self.is_valid(pos) {
            self.grid.get(pos.col, pos.row)
        } else {
            Cost::Infinite
        }
    }

    /// Sets the cost of a cell. An infinite cost turns the cell into a static obstacle, a finite
    /// one clears it. Positions outside of the grid are ignored.
    pub fn set_cost(&mut self, pos: Position, cost: Cost) {
        if !self.is_valid(pos) {
            warn!("Ignoring cost update outside of the grid at {}", pos);
            return;
        }
        let was_blocked = self.static_obstacles.contains(&pos);
        if cost.is_infinite() {
            self.static_obstacles.insert(pos);
        } else {
            self.static_obstacles.remove(&pos);
        }
        if was_blocked != cost.is_infinite() {
            self.components_dirty = true;
        }
        self.grid.set(pos.col, pos.row, cost);
    }

    pub fn add_static_obstacle(&mut self, pos: Position) {
        self.set_cost(pos, Cost::Infinite);
    }

    /// Whether `pos` is blocked at `time_step`: outside of the grid, statically blocked or
    /// scheduled as a dynamic obstacle for exactly that step.
    pub fn is_obstacle(&self, pos: Position, time_step: TimeStep) -> bool {
        !self.is_valid(pos)
            || self.static_obstacles.contains(&pos)
            || self
                .dynamic_obstacles
                .get(&time_step)
                .is_some_and(|blocked| blocked.contains(&pos))
    }

    /// Passable 4-connected neighbours of `pos` at time step 0 together with the cost of entering
    /// each of them.
    pub fn neighbors(&self, pos: Position) -> SmallVec<[(Position, Cost); N_SMALLVEC_SIZE]> {
        self.neighbors_at(pos, 0)
    }

    /// Like [neighbors](Self::neighbors), but checks the dynamic obstacles of `time_step`.
    pub fn neighbors_at(
        &self,
        pos: Position,
        time_step: TimeStep,
    ) -> SmallVec<[(Position, Cost); N_SMALLVEC_SIZE]> {
        pos.neumann_neighborhood()
            .into_iter()
            .filter(|&p| !self.is_obstacle(p, time_step))
            .map(|p| (p, self.cost(p)))
            .collect()
    }

    /// Schedules `pos` as blocked at `time_step`.
    pub fn add_dynamic_obstacle(&mut self, pos: Position, time_step: TimeStep) {
        debug!("Dynamic obstacle added at {} for time step {}", pos, time_step);
        self.dynamic_obstacles
            .entry(time_step)
            .or_default()
            .push(pos);
    }

    /// Removes one scheduled occurrence of `pos` at `time_step`, dropping the time step entirely
    /// once nothing is scheduled for it. Returns whether anything was removed.
    pub fn remove_dynamic_obstacle(&mut self, pos: Position, time_step: TimeStep) -> bool {
        let Some(blocked) = self.dynamic_obstacles.get_mut(&time_step) else {
            return false;
        };
        let Some(ix) = blocked.iter().position(|p| *p == pos) else {
            return false;
        };
        blocked.remove(ix);
        if blocked.is_empty() {
            self.dynamic_obstacles.remove(&time_step);
        }
        debug!("Dynamic obstacle removed at {} for time step {}", pos, time_step);
        true
    }

    /// Positions scheduled as blocked at `time_step`.
    pub fn dynamic_obstacles_at(&self, time_step: TimeStep) -> &[Position] {
        self.dynamic_obstacles
            .get(&time_step)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn get_ix(&self, pos: &Position) -> usize {
        pos.row as usize * self.width() + pos.col as usize
    }

    /// Retrieves the component id a given [Position] belongs to.
    pub fn get_component(&self, pos: &Position) -> Option<usize> {
        self.is_valid(*pos)
            .then(|| self.components.find(self.get_ix(pos)))
    }

    /// Checks if start and goal are connected on the static map. Dynamic obstacles are ignored, so
    /// a reachable goal can still be cut off at a given time step. A statically blocked start or
    /// goal is never reachable.
    pub fn reachable(&self, start: &Position, goal: &Position) -> bool {
        if !self.is_valid(*start) || !self.is_valid(*goal) {
            return false;
        }
        if self.static_obstacles.contains(start) || self.static_obstacles.contains(goal) {
            return false;
        }
        if start == goal {
            return true;
        }
        self.components
            .equiv(self.get_ix(start), self.get_ix(goal))
    }

    /// Checks if start and goal are not connected on the static map.
    pub fn unreachable(&self, start: &Position, goal: &Position) -> bool {
        !self.reachable(start, goal)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up passable 4-connected neighbours to the
    /// same components.
    pub fn generate_components(&mut self) {
        let w = self.width();
        let h = self.height();
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for row in 0..h as i32 {
            for col in 0..w as i32 {
                let pos = Position::new(row, col);
                if self.static_obstacles.contains(&pos) {
                    continue;
                }
                let parent_ix = self.get_ix(&pos);
                for n in [Position::new(row + 1, col), Position::new(row, col + 1)] {
                    if self.is_valid(n) && !self.static_obstacles.contains(&n) {
                        let ix = self.get_ix(&n);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }
}

impl FromStr for CityGrid {
    type Err = PlannerError;

    fn from_str(text: &str) -> Result<CityGrid> {
        Ok(CityGrid::parse(text))
    }
}

impl fmt::Display for CityGrid {
    /// Renders the grid in map notation. Dynamic obstacles of time step 0 are drawn as `*`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.height() as i32 {
            let line: String = (0..self.width() as i32)
                .map(|col| {
                    let pos = Position::new(row, col);
                    if Some(pos) == self.start_pos {
                        'S'
                    } else if Some(pos) == self.goal_pos {
                        'G'
                    } else if self.static_obstacles.contains(&pos) {
                        '#'
                    } else if self.is_obstacle(pos, 0) {
                        '*'
                    } else {
                        match self.cost(pos) {
                            Cost::Finite(1) => '.',
                            Cost::Finite(c) => char::from_digit(c, 10).unwrap_or('+'),
                            Cost::Infinite => '#',
                        }
                    }
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_matches_parse() {
        let city: CityGrid = "S.\n#G".parse().unwrap();
        assert_eq!(city.to_string(), CityGrid::parse("S.\n#G").to_string());
    }

    #[test]
    fn parse_costs_and_obstacles() {
        let city = CityGrid::parse("S3#\n.9G\n");
        assert_eq!(city.width(), 3);
        assert_eq!(city.height(), 2);
        assert_eq!(city.start_pos, Some(Position::new(0, 0)));
        assert_eq!(city.goal_pos, Some(Position::new(1, 2)));
        assert_eq!(city.cost(Position::new(0, 0)), Cost::Finite(1));
        assert_eq!(city.cost(Position::new(0, 1)), Cost::Finite(3));
        assert_eq!(city.cost(Position::new(1, 1)), Cost::Finite(9));
        assert_eq!(city.cost(Position::new(0, 2)), Cost::Infinite);
        assert!(city.static_obstacles.contains(&Position::new(0, 2)));
        assert_eq!(city.to_string(), "S3#\n.9G\n");
    }

    #[test]
    fn out_of_bounds() {
        let city = CityGrid::new(2, 3);
        assert!(city.is_valid(Position::new(2, 1)));
        for p in [(-1, 0), (0, -1), (3, 0), (0, 2)] {
            let p = Position::from(p);
            assert!(!city.is_valid(p));
            assert!(city.is_obstacle(p, 0));
            assert_eq!(city.cost(p), Cost::Infinite);
        }
    }

    #[test]
    fn neighbors_order_and_cost() {
        let mut city = CityGrid::parse("...\n.2.\n.#.\n");
        let center = Position::new(1, 1);
        let n = city.neighbors(center);
        assert_eq!(
            n.as_slice(),
            &[
                (Position::new(0, 1), Cost::ONE),
                (Position::new(1, 0), Cost::ONE),
                (Position::new(1, 2), Cost::ONE),
            ]
        );
        // Entering the centre costs its own terrain cost
        assert!(city
            .neighbors(Position::new(0, 1))
            .contains(&(center, Cost::Finite(2))));
        city.add_dynamic_obstacle(Position::new(0, 1), 0);
        assert_eq!(city.neighbors(center).len(), 2);
        // Corner cells have two neighbours at most
        assert_eq!(city.neighbors(Position::new(0, 0)).len(), 1);
    }

    #[test]
    fn dynamic_obstacles_are_time_indexed() {
        let mut city = CityGrid::new(4, 4);
        let p = Position::new(1, 2);
        city.add_dynamic_obstacle(p, 3);
        assert!(city.is_obstacle(p, 3));
        for t in [0, 1, 2, 4, 100] {
            assert!(!city.is_obstacle(p, t));
        }
        assert_eq!(city.neighbors(Position::new(1, 1)).len(), 4);
        assert_eq!(city.neighbors_at(Position::new(1, 1), 3).len(), 3);
        assert_eq!(city.dynamic_obstacles_at(3), &[p]);
    }

    #[test]
    fn remove_dynamic_obstacle_drops_empty_step() {
        let mut city = CityGrid::new(3, 3);
        let a = Position::new(0, 1);
        let b = Position::new(2, 1);
        city.add_dynamic_obstacle(a, 5);
        city.add_dynamic_obstacle(b, 5);
        assert!(city.remove_dynamic_obstacle(a, 5));
        assert!(city.dynamic_obstacles.contains_key(&5));
        assert!(!city.remove_dynamic_obstacle(a, 5));
        assert!(!city.remove_dynamic_obstacle(b, 4));
        assert!(city.remove_dynamic_obstacle(b, 5));
        assert!(!city.dynamic_obstacles.contains_key(&5));
        assert!(city.dynamic_obstacles_at(5).is_empty());
    }

    /// Tests whether cells are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // |.#.|
        // |.#.|
        let mut city = CityGrid::new(3, 2);
        city.add_static_obstacle(Position::new(0, 1));
        city.add_static_obstacle(Position::new(1, 1));
        assert!(city.components_dirty);
        city.update();
        let p1 = Position::new(0, 0);
        let p2 = Position::new(1, 0);
        let p3 = Position::new(0, 2);
        assert!(city.reachable(&p1, &p2));
        assert!(city.unreachable(&p1, &p3));
        assert_eq!(city.get_component(&p1), city.get_component(&p2));
        assert_ne!(city.get_component(&p1), city.get_component(&p3));
        assert_eq!(city.get_component(&Position::new(5, 5)), None);
    }

    /// Asserts that the two corners are connected on a 4-grid but not through a diagonal gap.
    #[test]
    fn reachable_without_diagonals() {
        let city = CityGrid::parse("S..\n.#.\n..G");
        assert!(city.reachable(&Position::new(0, 0), &Position::new(2, 2)));
        let city = CityGrid::parse("S#\n#G");
        assert!(city.unreachable(&Position::new(0, 0), &Position::new(1, 1)));
    }

    #[test]
    fn blocked_endpoint_unreachable() {
        let mut city = CityGrid::parse("S..\n...");
        let p = Position::new(0, 0);
        city.add_static_obstacle(p);
        city.update();
        assert!(city.unreachable(&p, &p));
        assert!(city.unreachable(&p, &Position::new(1, 2)));
        assert!(city.reachable(&Position::new(0, 1), &Position::new(0, 1)));
    }

    #[test]
    fn endpoints() {
        assert!(CityGrid::parse("S.G").endpoints().is_ok());
        assert!(matches!(
            CityGrid::parse("..G").endpoints(),
            Err(PlannerError::MissingStart)
        ));
        assert!(matches!(
            CityGrid::parse("S..").endpoints(),
            Err(PlannerError::MissingGoal)
        ));
    }
}
