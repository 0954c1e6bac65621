use city_pathfinding::{AstarSolver, BfsSolver, CityGrid, DijkstraSolver, GridSolver};

// Breadth-first search crosses the expensive district in the middle because it only counts
// moves, while uniform-cost and A* search go around it. The heuristic_factor can be raised
// above 1.0 for weighted A*, which usually expands fewer nodes at the risk of a worse path.

fn main() {
    let grid = CityGrid::parse(
        "S.........\n\
         .99999999.\n\
         .99999999.\n\
         .99999999.\n\
         .........G",
    );
    println!("{}", grid);
    let solvers: [(&str, Box<dyn GridSolver>); 4] = [
        ("BFS", Box::new(BfsSolver)),
        ("Dijkstra", Box::new(DijkstraSolver)),
        ("A*", Box::new(AstarSolver::new())),
        ("Weighted A* (1.5)", Box::new(AstarSolver::with_heuristic_factor(1.5))),
    ];
    for (name, solver) in solvers {
        let result = solver.solve(&grid);
        println!(
            "{name}: cost {}, {} moves, {} nodes expanded",
            result.total_cost,
            result.edge_count().unwrap_or_default(),
            result.nodes_expanded
        );
    }
}
