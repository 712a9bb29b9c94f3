//! Strictly Niya library - the Niya tile game with a perfect-play engine
//!
//! Niya is played on a 4x4 grid of tiles, each printed with a plant and a
//! poem. Players alternately claim tiles; every tile after the first must
//! share a plant or a poem with the tile claimed just before it. Four in a
//! row, column, diagonal or 2x2 square wins.
//!
//! # Architecture
//!
//! - **Games**: tiles, layouts, the rule engine and state snapshots
//! - **Search**: exhaustive negamax with alpha-beta pruning, plus a casual
//!   random strategy
//! - **Executor**: runs searches on the tokio blocking pool
//! - **Session**: turn control between human and engine seats
//!
//! # Example
//!
//! ```
//! use strictly_niya::{Layout, Player, Position, State};
//!
//! let mut state = State::new(Layout::classic());
//! state.apply_move(Position::new(0, 0).unwrap()).unwrap();
//! assert_eq!(state.current_player(), Player::Black);
//! assert!(state.is_legal(Position::new(0, 3).unwrap()));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod executor;
mod games;
mod search;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, NiyaConfig};

// Crate-level exports - Executor
pub use executor::{EngineError, EngineReply, SearchExecutor, SearchRequest, Ticket, run_request};

// Crate-level exports - Search
pub use search::{
    SCORE_BOUND, SearchError, SearchOutcome, evaluate, negamax, pick_casual, select_move,
};

// Crate-level exports - Session management
pub use session::{
    ControlMode, Seat, Session, SessionCommand, SessionError, SessionEvent, SessionStatus,
};

// Crate-level exports - Game types
pub use games::niya::{
    CELLS, Color, Invariant, InvariantSet, InvariantViolation, Layout, LayoutError,
    LegalMovesInvariant, MoveCountInvariant, MoveError, NiyaInvariants, Outcome, Plant, Player,
    Poem, Position, SIDE, Snapshot, SnapshotError, State, Tile, TileSnapshot, TurnParityInvariant,
    WIN_LINES, derive_legal_moves, is_opening_legal, is_winner,
};
