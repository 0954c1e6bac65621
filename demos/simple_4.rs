use city_pathfinding::{Algorithm, CityGrid};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  G|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - G marks the goal
//
// Nodes have a 4-neighborhood

fn main() {
    let grid = CityGrid::parse("S..\n.#.\n..G");
    println!("{}", grid);
    for algorithm in Algorithm::ALL {
        let result = algorithm.solver().solve(&grid);
        println!(
            "{}: cost {}, {} nodes expanded",
            algorithm, result.total_cost, result.nodes_expanded
        );
        for p in result.path.unwrap_or_default() {
            println!("{}", p);
        }
    }
}
