//! Command line front end: loads a city map and runs one search algorithm or the replanning demo.
//!
//! # Usage
//!
//! ```bash
//! city_planner --map maps/city.txt --algo a_star
//! city_planner --map maps/city.txt --algo dynamic_demo --advance 3
//! city_planner --map maps/city.txt --algo ucs --block 2,3@0
//! ```
//!
//! Set `RUST_LOG=debug` for search statistics on stderr.

use std::env;
use std::process;

use city_pathfinding::{
    Algorithm, CityGrid, PlannerError, Position, ReplanningScenario, TimeStep,
    DEFAULT_ADVANCE_STEPS,
};
use itertools::Itertools;

const DYNAMIC_DEMO: &str = "dynamic_demo";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("city_planner", String::as_str);
    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage(program);
            process::exit(1);
        }
    };

    if let Err(e) = run(config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

enum Mode {
    Search(Algorithm),
    Replan,
}

struct Config {
    map_path: String,
    mode: Mode,
    advance_steps: usize,
    blocks: Vec<(Position, TimeStep)>,
}

fn parse_args(args: &[String]) -> Result<Config, String> {
    let mut map_path = None;
    let mut mode = None;
    let mut advance_steps = DEFAULT_ADVANCE_STEPS;
    let mut blocks = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--map" | "-m" => {
                map_path = Some(value(args, &mut i)?.to_string());
            }
            "--algo" | "-a" => {
                let name = value(args, &mut i)?;
                mode = Some(if name == DYNAMIC_DEMO {
                    Mode::Replan
                } else {
                    Mode::Search(name.parse().map_err(|e: PlannerError| e.to_string())?)
                });
            }
            "--advance" => {
                let steps = value(args, &mut i)?;
                advance_steps = steps
                    .parse()
                    .map_err(|_| format!("Invalid step count: {}", steps))?;
            }
            "--block" => {
                blocks.push(parse_block(value(args, &mut i)?)?);
            }
            "--help" | "-h" => {
                return Err("Help requested".to_string());
            }
            _ => {
                return Err(format!("Unknown argument: {}", args[i]));
            }
        }
        i += 1;
    }

    Ok(Config {
        map_path: map_path.ok_or("Missing --map argument")?,
        mode: mode.ok_or("Missing --algo argument")?,
        advance_steps,
        blocks,
    })
}

/// Returns the value following the flag at `i` and advances `i` past it.
fn value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, String> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing value for {}", flag))
}

/// Parses `row,col@step`; the step defaults to 0 when omitted.
fn parse_block(text: &str) -> Result<(Position, TimeStep), String> {
    let invalid = || format!("Invalid obstacle '{}', expected row,col[@step]", text);
    let (cell, step) = match text.split_once('@') {
        Some((cell, step)) => (cell, step.parse().map_err(|_| invalid())?),
        None => (text, 0),
    };
    let (row, col) = cell.split_once(',').ok_or_else(invalid)?;
    let row = row.trim().parse().map_err(|_| invalid())?;
    let col = col.trim().parse().map_err(|_| invalid())?;
    Ok((Position::new(row, col), step))
}

fn print_usage(program: &str) {
    eprintln!(
        r#"
Usage: {program} --map <FILE> --algo <ALGORITHM> [OPTIONS]

Algorithms:
    bfs             Breadth-first search (fewest moves)
    ucs             Uniform-cost search (cheapest path)
    a_star          A* search with Manhattan heuristic (cheapest path)
    {DYNAMIC_DEMO}    Plan, walk, block the next cell and replan with A*

Options:
    -m, --map <FILE>          Map file to load
    -a, --algo <ALGORITHM>    Algorithm to run
    --advance <N>             Steps walked before the obstacle appears (default {DEFAULT_ADVANCE_STEPS})
    --block <ROW,COL[@STEP]>  Schedule a dynamic obstacle, may be repeated
    -h, --help                Show this help
"#
    );
}

fn run(config: Config) -> city_pathfinding::Result<()> {
    let mut grid = CityGrid::from_file(&config.map_path)?;
    let (start, goal) = grid.endpoints()?;
    for (pos, step) in &config.blocks {
        grid.add_dynamic_obstacle(*pos, *step);
    }

    println!("Map loaded: {}x{}", grid.width(), grid.height());
    println!("Start position: {}", start);
    println!("Goal position: {}", goal);
    println!();

    match config.mode {
        Mode::Replan => {
            let scenario = ReplanningScenario::with_advance_steps(config.advance_steps);
            print!("{}", scenario.run(&mut grid));
        }
        Mode::Search(algorithm) => {
            let result = algorithm.solver().solve(&grid);
            println!("Algorithm: {}", algorithm.name().to_uppercase());
            println!(
                "Path Found: {}",
                if result.is_found() { "Yes" } else { "No" }
            );
            if let Some(path) = &result.path {
                println!(" -> Path Cost: {}", result.total_cost);
                println!(" -> Path Length: {}", path.len());
                println!(" -> Path: [{}]", path.iter().join(", "));
            } else if grid.unreachable(&start, &goal) {
                println!(" -> Start and goal are not connected on the static map");
            }
            println!("Nodes Expanded: {}", result.nodes_expanded);
            println!("Time Taken: {:.6} seconds", result.elapsed.as_secs_f64());
        }
    }
    Ok(())
}
