//! Exhaustive negamax search with alpha-beta pruning.
//!
//! Niya games last at most 16 moves, so the search always runs to the end
//! of the game and only terminal positions are scored. No depth limit or
//! static evaluation is needed.

use super::SearchError;
use crate::games::niya::{Player, Position, State};
use tracing::{debug, instrument};

/// Bound used in place of infinity. Terminal values never exceed 17.
pub const SCORE_BOUND: i32 = 100;

/// Best root move and its value from the searching player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Chosen move.
    pub position: Position,
    /// Negamax value of the move.
    pub value: i32,
    /// Number of positions visited.
    pub nodes: u64,
}

/// Selects the best move for `perspective`.
///
/// Deterministic: among equally valued moves the first in row-major order
/// is chosen.
pub fn select_move(perspective: Player, state: &State) -> Result<Position, SearchError> {
    evaluate(perspective, state).map(|outcome| outcome.position)
}

/// Searches every legal move of `state` with a full window and returns the
/// strictly best one.
#[instrument(skip(state), fields(moves_made = state.moves_made()))]
pub fn evaluate(perspective: Player, state: &State) -> Result<SearchOutcome, SearchError> {
    let mut nodes = 0;
    let mut best: Option<(Position, i32)> = None;

    for &position in state.legal_moves() {
        let mut child = state.clone();
        if child.apply_move(position).is_err() {
            continue;
        }
        let value = -search(perspective, &child, -1, -SCORE_BOUND, SCORE_BOUND, &mut nodes);
        if best.is_none_or(|(_, best_value)| value > best_value) {
            best = Some((position, value));
        }
    }

    let (position, value) = best.ok_or(SearchError::NoLegalMoves)?;
    debug!(%position, value, nodes, "Search complete");
    Ok(SearchOutcome {
        position,
        value,
        nodes,
    })
}

/// Negamax value of `state` for `perspective`, scaled by `sign`.
///
/// `sign` is `1` when `perspective` is to move and `-1` otherwise.
pub fn negamax(perspective: Player, state: &State, sign: i32, alpha: i32, beta: i32) -> i32 {
    let mut nodes = 0;
    search(perspective, state, sign, alpha, beta, &mut nodes)
}

fn search(
    perspective: Player,
    state: &State,
    sign: i32,
    mut alpha: i32,
    beta: i32,
    nodes: &mut u64,
) -> i32 {
    *nodes += 1;
    if state.winner().is_some() || !state.has_remaining() {
        return sign * state.terminal_value(perspective);
    }

    let mut best = -SCORE_BOUND;
    for &position in state.legal_moves() {
        let mut child = state.clone();
        if child.apply_move(position).is_err() {
            continue;
        }
        let value = -search(perspective, &child, -sign, -beta, -alpha, nodes);
        best = best.max(value);
        alpha = alpha.max(best);
        if alpha >= beta {
            break;
        }
    }
    best
}
