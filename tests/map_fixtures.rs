//! Runs every algorithm and the replanning scenario on every map under `maps/`.
use city_maps::{get_map, get_map_names};
use city_pathfinding::{
    Algorithm, CityGrid, Cost, GridSolver, ReplanOutcome, ReplanningScenario,
};

fn load(name: &str) -> CityGrid {
    CityGrid::from_layout(&get_map(name).expect("fixture should load"))
}

/// Cheapest path costs of the fixtures, start cell included.
const EXPECTED_COSTS: [(&str, Option<u32>); 5] = [
    ("dynamic", Some(12)),
    ("large", Some(66)),
    ("medium", Some(30)),
    ("small", Some(5)),
    ("unreachable", None),
];

#[test]
fn fixtures_are_discovered() {
    let names = get_map_names().expect("maps directory should be readable");
    for (name, _) in EXPECTED_COSTS {
        assert!(names.iter().any(|n| n == name), "missing fixture {name}");
    }
}

#[test]
fn verify_solution_costs() {
    for (name, expected) in EXPECTED_COSTS {
        let grid = load(name);
        let (start, goal) = grid.endpoints().expect("fixture has start and goal");
        assert_eq!(grid.reachable(&start, &goal), expected.is_some(), "{name}");
        for algorithm in [Algorithm::UniformCost, Algorithm::AStar] {
            let result = algorithm.solver().solve(&grid);
            println!(
                "{name} {algorithm}: cost {}, {} expanded",
                result.total_cost, result.nodes_expanded
            );
            assert_eq!(result.total_cost.value(), expected, "{name} {algorithm}");
        }
        let bfs = Algorithm::BreadthFirst.solver().solve(&grid);
        assert_eq!(bfs.is_found(), expected.is_some(), "{name}");
        if let (Some(path), Some(expected)) = (&bfs.path, expected) {
            assert!(bfs.total_cost >= Cost::Finite(expected));
            assert_eq!(bfs.total_cost, Algorithm::BreadthFirst.solver().path_cost(&grid, path));
        }
    }
}

#[test]
fn astar_expands_no_more_than_ucs() {
    for (name, _) in EXPECTED_COSTS {
        let grid = load(name);
        let ucs = Algorithm::UniformCost.solver().solve(&grid);
        let astar = Algorithm::AStar.solver().solve(&grid);
        assert!(astar.nodes_expanded <= ucs.nodes_expanded, "{name}");
    }
}

#[test]
fn replanning_on_fixtures() {
    for (name, expected) in EXPECTED_COSTS {
        let mut grid = load(name);
        let report = ReplanningScenario::new().run(&mut grid);
        println!("{}", report);
        match expected {
            None => assert_eq!(report.outcome, ReplanOutcome::InitialPlanFailed),
            Some(_) => {
                assert_ne!(report.outcome, ReplanOutcome::InitialPlanFailed, "{name}");
                if let (Some((blocked, _)), Some(path)) = (
                    report.injected,
                    report.replanned.as_ref().and_then(|r| r.path.as_ref()),
                ) {
                    assert!(!path.contains(&blocked), "{name}");
                    assert_eq!(path.first(), report.position.as_ref());
                    assert_eq!(path.last(), grid.goal_pos.as_ref());
                }
            }
        }
    }
}

/// The dynamic fixture has a detour around every cell of its initial route.
#[test]
fn dynamic_fixture_replans() {
    let mut grid = load("dynamic");
    let report = ReplanningScenario::new().run(&mut grid);
    assert_eq!(report.outcome, ReplanOutcome::Replanned);
    assert_eq!(report.steps_taken(), 4);
    let (blocked, time_step) = report.injected.expect("an obstacle is injected");
    assert_eq!(time_step, 4);
    assert_eq!(grid.dynamic_obstacles_at(4), &[blocked]);
}
