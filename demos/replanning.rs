use city_pathfinding::{CityGrid, ReplanningScenario};

// The agent plans a route with A*, walks four steps, finds the next cell of its route blocked
// and plans again from where it stands. Run with RUST_LOG=info to see the log output as well.

fn main() {
    env_logger::init();
    let mut grid = CityGrid::parse(
        "S.......\n\
         .##.###.\n\
         .#.....2\n\
         .#.###.2\n\
         ...#...G",
    );
    println!("{}", grid);
    let report = ReplanningScenario::new().run(&mut grid);
    println!("{}", report);
    if let Some((blocked, time_step)) = report.injected {
        println!("Obstacles at time step {time_step}: {:?}", grid.dynamic_obstacles_at(time_step));
        grid.remove_dynamic_obstacle(blocked, time_step);
    }
}
