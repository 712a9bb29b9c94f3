//! Niya: a two-player tile game on a 4x4 grid.
//!
//! Each tile carries a plant and a poem. After the opening move, a player
//! may only claim a free tile sharing a category with the tile claimed just
//! before. Four tiles in a row, column, diagonal or 2x2 square win.

mod action;
mod invariants;
mod layout;
mod phases;
mod position;
mod rules;
mod snapshot;
mod state;
mod types;

pub use action::MoveError;
pub use invariants::{
    Invariant, InvariantSet, InvariantViolation, LegalMovesInvariant, MoveCountInvariant,
    NiyaInvariants, TurnParityInvariant,
};
pub use layout::{Layout, LayoutError};
pub use phases::Outcome;
pub use position::{CELLS, Position, SIDE};
pub use rules::{WIN_LINES, derive_legal_moves, is_opening_legal, is_winner};
pub use snapshot::{Color, Snapshot, SnapshotError, TileSnapshot};
pub use state::State;
pub use types::{Plant, Player, Poem, Tile};
