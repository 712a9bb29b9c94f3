//! Move selection for automated players.
//!
//! Two strategies are available: an exhaustive negamax search with
//! alpha-beta pruning that plays perfectly, and a casual strategy that
//! picks uniformly among the legal moves without any lookahead.

mod casual;
mod negamax;

pub use casual::pick_casual;
pub use negamax::{SCORE_BOUND, SearchOutcome, evaluate, negamax, select_move};

/// Error raised when no move can be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SearchError {
    /// The state has no legal moves: the game is over.
    #[display("No legal moves to search")]
    NoLegalMoves,

    /// The casual strategy was given an empty candidate list.
    #[display("No candidate moves to choose from")]
    NoCandidates,
}

impl std::error::Error for SearchError {}
