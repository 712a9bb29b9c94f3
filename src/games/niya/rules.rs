//! Move legality for Niya.
//!
//! Pure functions over the board, shared by the authoritative game state
//! and every hypothetical state the search explores.

mod win;

pub use win::{WIN_LINES, is_winner};

use super::position::CELLS;
use super::{MoveError, Player, Position, Tile};

/// Checks the opening rule: the first tile must satisfy `(row * col) % 3 == 0`.
pub fn is_opening_legal(pos: Position) -> bool {
    (pos.row() * pos.col()) % 3 == 0
}

/// Checks whether `pos` may be claimed given the previously claimed tile.
///
/// With no previous tile only the opening rule applies. Otherwise the tile
/// must be free and share a plant or a poem with the previous tile.
pub fn check_move(
    board: &[Tile; CELLS],
    last_placed: Option<Position>,
    pos: Position,
) -> Result<(), MoveError> {
    let Some(previous) = last_placed else {
        return if is_opening_legal(pos) {
            Ok(())
        } else {
            Err(MoveError::OpeningRestricted(pos))
        };
    };

    let candidate = &board[pos.index()];
    if !candidate.is_free() {
        return Err(MoveError::TileTaken(pos));
    }
    if !candidate.shares_category(&board[previous.index()]) {
        return Err(MoveError::NoSharedCategory(pos));
    }
    Ok(())
}

/// Legal moves in row-major order, derived from scratch.
///
/// Empty once a winner exists or all tiles are claimed. This does not
/// decide the forced loss for a side left without moves; see
/// [`State`](super::State) for that.
pub fn derive_legal_moves(
    board: &[Tile; CELLS],
    last_placed: Option<Position>,
    winner: Option<Player>,
    moves_made: u8,
) -> Vec<Position> {
    if winner.is_some() || moves_made as usize >= CELLS {
        return Vec::new();
    }
    Position::all()
        .filter(|&pos| check_move(board, last_placed, pos).is_ok())
        .collect()
}
