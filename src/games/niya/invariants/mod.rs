//! First-class invariants for Niya states.
//!
//! Invariants are logical properties that must hold for every reachable
//! state. They are checked after each move in debug builds and can be
//! tested independently.

mod legal_moves;
mod move_count;
mod turn_parity;

pub use legal_moves::LegalMovesInvariant;
pub use move_count::MoveCountInvariant;
pub use turn_parity::TurnParityInvariant;

use super::State;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn check_one<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

fn finish(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check_one::<S, I1>(state, &mut violations);
        check_one::<S, I2>(state, &mut violations);
        finish(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check_one::<S, I1>(state, &mut violations);
        check_one::<S, I2>(state, &mut violations);
        check_one::<S, I3>(state, &mut violations);
        finish(violations)
    }
}

/// All Niya state invariants as a composable set.
pub type NiyaInvariants = (MoveCountInvariant, LegalMovesInvariant, TurnParityInvariant);

/// Asserts that all state invariants hold (debug builds only).
pub fn assert_invariants(state: &State) {
    debug_assert!(
        NiyaInvariants::check_all(state).is_ok(),
        "Invariant violation: {:?}",
        NiyaInvariants::check_all(state)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::niya::{Layout, Player, Position};

    fn played(moves: &[(usize, usize)]) -> State {
        let mut state = State::new(Layout::classic());
        for &(row, col) in moves {
            state.apply_move(Position::new(row, col).unwrap()).unwrap();
        }
        state
    }

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        assert!(NiyaInvariants::check_all(&played(&[])).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        // Classic layout: (0,0) MAPLE/SUN, (2,0) MAPLE/RAIN, (2,3) IRIS/RAIN.
        let state = played(&[(0, 0), (2, 0), (2, 3)]);
        assert!(NiyaInvariants::check_all(&state).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let mut state = played(&[(0, 0)]);
        state.board[15].claim(Player::Black);

        let violations = NiyaInvariants::check_all(&state).unwrap_err();
        assert!(
            violations
                .iter()
                .any(|v| v.description == MoveCountInvariant::description())
        );
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (MoveCountInvariant, TurnParityInvariant);
        assert!(TwoInvariants::check_all(&played(&[(0, 0), (0, 3)])).is_ok());
    }
}
