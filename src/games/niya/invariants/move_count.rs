//! Move count invariant: the counter matches the claimed tiles.

use super::super::State;
use super::Invariant;

/// Invariant: `moves_made` equals the number of claimed tiles.
pub struct MoveCountInvariant;

impl Invariant<State> for MoveCountInvariant {
    fn holds(state: &State) -> bool {
        let claimed = state.board().iter().filter(|tile| !tile.is_free()).count();
        claimed == state.moves_made() as usize
    }

    fn description() -> &'static str {
        "Move counter equals the number of claimed tiles"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::niya::{Layout, Position};

    #[test]
    fn test_empty_game_holds() {
        assert!(MoveCountInvariant::holds(&State::new(Layout::classic())));
    }

    #[test]
    fn test_single_move_holds() {
        let mut state = State::new(Layout::classic());
        state.apply_move(Position::new(3, 3).unwrap()).unwrap();
        assert!(MoveCountInvariant::holds(&state));
    }

    #[test]
    fn test_counter_drift_violates() {
        let mut state = State::new(Layout::classic());
        state.apply_move(Position::new(3, 3).unwrap()).unwrap();
        state.moves_made = 2;
        assert!(!MoveCountInvariant::holds(&state));
    }
}
