//! Parsing of the plain text city map format and discovery of the map fixtures under `maps/`.
//!
//! A map has one row per line and one character per column:
//! `S` is the start, `G` the goal, `#` an impassable cell, a digit `2`-`9` a cell with that
//! traversal cost and anything else (`.`, `1`, `0`, letters...) a standard cell of cost 1.
//! Blank lines are skipped and do not count as rows.
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Environment variable that overrides the directory searched by [get_map_names] and [get_map].
pub const MAPS_DIR_VAR: &str = "CITY_MAPS_DIR";
const DEFAULT_MAPS_DIR: &str = "maps";
const MAP_EXTENSION: &str = "txt";

#[derive(Error, Debug)]
pub enum MapError {
    #[error("could not read map file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no map named '{0}' in the map directory")]
    UnknownMap(String),
    #[error("could not walk map directory: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, MapError>;

/// A single parsed cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Passable terrain with the given traversal cost (1 to 9).
    Open(u8),
    Wall,
}

impl Tile {
    pub fn from_char(c: char) -> Tile {
        match c {
            '#' => Tile::Wall,
            '2'..='9' => Tile::Open(c.to_digit(10).map_or(1, |d| d as u8)),
            _ => Tile::Open(1),
        }
    }
}

/// Row-major tiles of a rectangular map together with the optional start and goal cells, both
/// given as `(row, col)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapLayout {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Tile>,
    pub start: Option<(usize, usize)>,
    pub goal: Option<(usize, usize)>,
}

impl MapLayout {
    /// Parses map text. Never fails: unknown characters become standard terrain. The width is
    /// taken from the first row, shorter rows are padded with standard terrain and longer rows
    /// are cut off.
    pub fn parse(text: &str) -> MapLayout {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let height = rows.len();
        let mut tiles = Vec::with_capacity(width * height);
        let mut start = None;
        let mut goal = None;
        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != width {
                warn!("Map row {row} has {len} cells, expected {width}");
            }
            for (col, c) in line.chars().take(width).enumerate() {
                match c {
                    'S' => start = Some((row, col)),
                    'G' => goal = Some((row, col)),
                    _ => {}
                }
                tiles.push(Tile::from_char(c));
            }
            for _ in len..width {
                tiles.push(Tile::Open(1));
            }
        }
        MapLayout {
            width,
            height,
            tiles,
            start,
            goal,
        }
    }

    /// Reads and parses a map file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<MapLayout> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(MapLayout::parse(&text))
    }

    pub fn tile(&self, row: usize, col: usize) -> Option<Tile> {
        if row < self.height && col < self.width {
            self.tiles.get(row * self.width + col).copied()
        } else {
            None
        }
    }
}

/// The directory holding the map fixtures, `maps/` unless overridden through [MAPS_DIR_VAR].
pub fn maps_dir() -> PathBuf {
    std::env::var_os(MAPS_DIR_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MAPS_DIR))
}

/// Names of all map fixtures, relative to [maps_dir] and without extension, in sorted order.
pub fn get_map_names() -> Result<Vec<String>> {
    let root = maps_dir();
    let mut names = Vec::new();
    for entry in WalkDir::new(&root) {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|e| e.to_str()) != Some(MAP_EXTENSION)
        {
            continue;
        }
        if let Ok(rel_path) = path.with_extension("").strip_prefix(&root) {
            let name = rel_path
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Loads the named fixture from [maps_dir].
pub fn get_map(name: &str) -> Result<MapLayout> {
    if get_map_names()?.iter().any(|n| n == name) {
        MapLayout::load(maps_dir().join(format!("{name}.{MAP_EXTENSION}")))
    } else {
        Err(MapError::UnknownMap(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_symbols() {
        let layout = MapLayout::parse("S.#\n29G\nx01\n");
        assert_eq!(layout.width, 3);
        assert_eq!(layout.height, 3);
        assert_eq!(layout.start, Some((0, 0)));
        assert_eq!(layout.goal, Some((1, 2)));
        assert_eq!(layout.tile(0, 0), Some(Tile::Open(1)));
        assert_eq!(layout.tile(0, 2), Some(Tile::Wall));
        assert_eq!(layout.tile(1, 0), Some(Tile::Open(2)));
        assert_eq!(layout.tile(1, 1), Some(Tile::Open(9)));
        // Unknown characters and '0' fall back to standard terrain
        assert_eq!(layout.tile(2, 0), Some(Tile::Open(1)));
        assert_eq!(layout.tile(2, 1), Some(Tile::Open(1)));
        assert_eq!(layout.tile(3, 0), None);
    }

    /// Blank lines are not rows, so the goal below sits on row 1.
    #[test]
    fn skips_blank_lines() {
        let layout = MapLayout::parse("\nS.\n\n  \n.G\n\n");
        assert_eq!(layout.height, 2);
        assert_eq!(layout.start, Some((0, 0)));
        assert_eq!(layout.goal, Some((1, 1)));
    }

    #[test]
    fn ragged_rows_follow_first_row_width() {
        let layout = MapLayout::parse("S...\n#\n..G..#");
        assert_eq!(layout.width, 4);
        assert_eq!(layout.tiles.len(), 12);
        assert_eq!(layout.tile(1, 0), Some(Tile::Wall));
        assert_eq!(layout.tile(1, 3), Some(Tile::Open(1)));
        assert_eq!(layout.tile(2, 3), Some(Tile::Open(1)));
        assert_eq!(layout.goal, Some((2, 2)));
    }

    #[test]
    fn empty_map() {
        let layout = MapLayout::parse("");
        assert_eq!(layout.width, 0);
        assert_eq!(layout.height, 0);
        assert!(layout.start.is_none() && layout.goal.is_none());
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = MapLayout::load("does/not/exist.txt");
        assert!(matches!(result, Err(MapError::Io { .. })));
    }
}
