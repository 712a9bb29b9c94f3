//! Turn parity invariant: the last claimed tile belongs to the previous mover.

use super::super::{Player, State};
use super::Invariant;

/// Invariant: the last claimed tile is owned by the player whose turn it
/// was before the most recent move, and exists iff a move was made.
pub struct TurnParityInvariant;

impl Invariant<State> for TurnParityInvariant {
    fn holds(state: &State) -> bool {
        match (state.last_placed(), state.moves_made()) {
            (None, 0) => true,
            (Some(pos), made) if made > 0 => {
                state.tile(pos).owner() == Some(Player::for_parity(made - 1))
            }
            _ => false,
        }
    }

    fn description() -> &'static str {
        "Players alternate and the last claimed tile belongs to the previous mover"
    }
}
