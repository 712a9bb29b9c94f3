//! Move validation errors for Niya.

use super::Position;

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The coordinates are off the 4x4 board.
    #[display("Position ({}, {}) is off the board", row, col)]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// The opening move must satisfy `(row * col) % 3 == 0`.
    #[display("{} is not a legal opening move", _0)]
    OpeningRestricted(Position),

    /// The tile at the position was already claimed.
    #[display("Tile at {} is already taken", _0)]
    TileTaken(Position),

    /// The tile shares neither plant nor poem with the last claimed tile.
    #[display("Tile at {} shares no category with the last claimed tile", _0)]
    NoSharedCategory(Position),
}

impl std::error::Error for MoveError {}
