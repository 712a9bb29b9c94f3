//! Legal moves invariant: the cached list is a pure function of the board.

use super::super::{State, rules};
use super::Invariant;

/// Invariant: the cached legal moves equal a from-scratch derivation over
/// (board, last claimed tile, winner).
pub struct LegalMovesInvariant;

impl Invariant<State> for LegalMovesInvariant {
    fn holds(state: &State) -> bool {
        let derived = rules::derive_legal_moves(
            state.board(),
            state.last_placed(),
            state.winner(),
            state.moves_made(),
        );
        derived == state.legal_moves() && (state.winner().is_none() || derived.is_empty())
    }

    fn description() -> &'static str {
        "Legal moves match a fresh derivation and are empty once a winner exists"
    }
}
