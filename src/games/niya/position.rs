//! Board coordinates for the 4x4 grid.

use serde::{Deserialize, Serialize};

/// Number of rows (and columns) on the board.
pub const SIDE: usize = 4;

/// Number of board positions.
pub const CELLS: usize = SIDE * SIDE;

/// A (row, col) position on the board.
///
/// The flat board index is `row * 4 + col`. It is unrelated to the
/// identity of the tile lying there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "(u8, u8)", try_from = "(u8, u8)")]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Creates a position, or `None` when either coordinate is off the board.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        if row < SIDE && col < SIDE {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Creates a position from a flat board index (0-15).
    pub fn from_index(index: usize) -> Option<Self> {
        if index < CELLS {
            Self::new(index / SIDE, index % SIDE)
        } else {
            None
        }
    }

    /// Row (0-3).
    pub fn row(self) -> usize {
        self.row as usize
    }

    /// Column (0-3).
    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Flat board index (0-15), row-major.
    pub fn index(self) -> usize {
        self.row() * SIDE + self.col()
    }

    /// All 16 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..CELLS).map(|index| Position {
            row: (index / SIDE) as u8,
            col: (index % SIDE) as u8,
        })
    }

    /// Parses `"r c"`, `"r,c"` or `"(r, c)"`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s
            .split(|c: char| c == ',' || c.is_whitespace() || c == '(' || c == ')')
            .filter(|p| !p.is_empty());
        let row = parts.next()?.parse().ok()?;
        let col = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Self::new(row, col)
    }
}

impl From<Position> for (u8, u8) {
    fn from(pos: Position) -> Self {
        (pos.row, pos.col)
    }
}

impl TryFrom<(u8, u8)> for Position {
    type Error = String;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        Position::new(row as usize, col as usize)
            .ok_or_else(|| format!("({}, {}) is off the board", row, col))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
