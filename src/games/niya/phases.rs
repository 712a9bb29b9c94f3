//! Outcome of a finished game.

use super::Player;
use serde::{Deserialize, Serialize};

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player won the game.
    Winner(Player),
    /// All 16 tiles were claimed without a winner.
    Tie,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Tie => None,
        }
    }

    /// Returns true if the game was a tie.
    pub fn is_tie(&self) -> bool {
        matches!(self, Outcome::Tie)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "{} Wins!", player),
            Outcome::Tie => write!(f, "A Tie!"),
        }
    }
}
