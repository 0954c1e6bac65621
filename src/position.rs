use core::fmt;

/// A cell on the grid, addressed as (row, column). Rows grow downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Position {
        Position { row, col }
    }

    pub fn manhattan_distance(&self, other: &Position) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// The 4-connected neighbourhood in the order up, down, left, right. Points may lie
    /// outside of any grid.
    pub fn neumann_neighborhood(&self) -> [Position; 4] {
        [
            Position::new(self.row - 1, self.col),
            Position::new(self.row + 1, self.col),
            Position::new(self.row, self.col - 1),
            Position::new(self.row, self.col + 1),
        ]
    }

    /// Whether the two positions share an edge.
    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Position {
        Position::new(row, col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Position {
        Position::new(row as i32, col as i32)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan() {
        let p = Position::new(1, 2);
        assert_eq!(p.manhattan_distance(&Position::new(4, -2)), 7);
        assert_eq!(p.manhattan_distance(&p), 0);
    }

    #[test]
    fn neighborhood_order() {
        let n = Position::new(0, 0).neumann_neighborhood();
        assert_eq!(
            n,
            [(-1, 0).into(), (1, 0).into(), (0, -1).into(), (0, 1).into()]
        );
        assert!(n.iter().all(|p| p.is_adjacent(&Position::new(0, 0))));
    }
}
