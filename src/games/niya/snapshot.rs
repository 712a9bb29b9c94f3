//! Serializable snapshot of a game state.
//!
//! The snapshot is the form a state takes when it crosses into the search
//! executor: plain data, copied by value, with the last claimed tile named
//! by identity rather than by reference.

use super::position::CELLS;
use super::{Plant, Player, Poem, Position, State, Tile};
use serde::{Deserialize, Serialize};

/// Tile color on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Color {
    /// Unclaimed, or no winner.
    #[default]
    None,
    /// Claimed by Red.
    Red,
    /// Claimed by Black.
    Black,
}

impl From<Option<Player>> for Color {
    fn from(player: Option<Player>) -> Self {
        match player {
            None => Color::None,
            Some(Player::Red) => Color::Red,
            Some(Player::Black) => Color::Black,
        }
    }
}

impl From<Color> for Option<Player> {
    fn from(color: Color) -> Self {
        match color {
            Color::None => None,
            Color::Red => Some(Player::Red),
            Color::Black => Some(Player::Black),
        }
    }
}

/// One tile on the wire: `{ color, plant, poem, idx }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSnapshot {
    /// Owner of the tile.
    pub color: Color,
    /// Plant category (0-3).
    pub plant: u8,
    /// Poem category (0-3).
    pub poem: u8,
    /// Tile identity, `plant * 4 + poem`.
    pub idx: u8,
}

impl From<&Tile> for TileSnapshot {
    fn from(tile: &Tile) -> Self {
        Self {
            color: tile.owner().into(),
            plant: tile.plant() as u8,
            poem: tile.poem() as u8,
            idx: tile.id(),
        }
    }
}

impl TryFrom<TileSnapshot> for Tile {
    type Error = SnapshotError;

    fn try_from(snap: TileSnapshot) -> Result<Self, Self::Error> {
        if snap.plant > 3 || snap.poem > 3 {
            return Err(SnapshotError::CategoryOutOfRange {
                plant: snap.plant,
                poem: snap.poem,
            });
        }
        let mut tile = Tile::new(Plant::from_bits(snap.plant), Poem::from_bits(snap.poem));
        if tile.id() != snap.idx {
            return Err(SnapshotError::IdentityMismatch {
                idx: snap.idx,
                plant: snap.plant,
                poem: snap.poem,
            });
        }
        if let Some(player) = Option::<Player>::from(snap.color) {
            tile.claim(player);
        }
        Ok(tile)
    }
}

/// Snapshot of a complete state.
///
/// Legal moves are not part of the snapshot; they are recomputed when the
/// snapshot is turned back into a [`State`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Winner, or `NONE`.
    pub winner: Color,
    /// Number of moves played.
    pub moves_made: u8,
    /// The 16 tiles in row-major board order.
    pub board: Vec<TileSnapshot>,
    /// The most recently claimed tile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<TileSnapshot>,
}

impl Snapshot {
    /// Serializes the snapshot as JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::Json(e.to_string()))
    }

    /// Parses a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::Json(e.to_string()))
    }
}

/// Error raised when a snapshot does not describe a reachable state.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SnapshotError {
    /// The board must hold 16 tiles.
    #[display("Snapshot board must have 16 tiles, got {}", _0)]
    WrongBoardLength(usize),

    /// A category value outside 0..=3.
    #[display("Tile categories out of range: plant {}, poem {}", plant, poem)]
    CategoryOutOfRange {
        /// Plant value.
        plant: u8,
        /// Poem value.
        poem: u8,
    },

    /// The identity does not encode the categories.
    #[display("Tile identity {} does not match plant {} and poem {}", idx, plant, poem)]
    IdentityMismatch {
        /// Identity on the wire.
        idx: u8,
        /// Plant value.
        plant: u8,
        /// Poem value.
        poem: u8,
    },

    /// The same tile appears twice.
    #[display("Tile {} appears more than once", _0)]
    DuplicateTile(u8),

    /// The move counter disagrees with the claimed tiles.
    #[display("movesMade is {} but {} tiles are claimed", moves_made, claimed)]
    MoveCountMismatch {
        /// Counter on the wire.
        moves_made: u8,
        /// Number of colored tiles.
        claimed: usize,
    },

    /// Moves were played but no previous tile was given.
    #[display("Snapshot has moves but no previous tile")]
    MissingPrevious,

    /// A previous tile was given before any move.
    #[display("Snapshot has a previous tile but no moves")]
    UnexpectedPrevious,

    /// The previous tile is not claimed by the player who moved last.
    #[display("Previous tile {} was not claimed by the last mover", _0)]
    PreviousNotClaimed(u8),

    /// Malformed JSON.
    #[display("Invalid snapshot JSON: {}", _0)]
    Json(String),
}

impl std::error::Error for SnapshotError {}

impl State {
    /// Captures the state as plain data.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            winner: self.winner.into(),
            moves_made: self.moves_made,
            board: self.board.iter().map(TileSnapshot::from).collect(),
            previous: self.last_placed.map(|pos| TileSnapshot::from(self.tile(pos))),
        }
    }
}

impl TryFrom<Snapshot> for State {
    type Error = SnapshotError;

    fn try_from(snapshot: Snapshot) -> Result<Self, Self::Error> {
        if snapshot.board.len() != CELLS {
            return Err(SnapshotError::WrongBoardLength(snapshot.board.len()));
        }

        let mut seen = [false; CELLS];
        let mut board = [Tile::new(Plant::Maple, Poem::Sun); CELLS];
        for (slot, &snap) in board.iter_mut().zip(&snapshot.board) {
            let tile = Tile::try_from(snap)?;
            let mark = &mut seen[tile.id() as usize];
            if *mark {
                return Err(SnapshotError::DuplicateTile(tile.id()));
            }
            *mark = true;
            *slot = tile;
        }

        let claimed = board.iter().filter(|tile| !tile.is_free()).count();
        if claimed != snapshot.moves_made as usize {
            return Err(SnapshotError::MoveCountMismatch {
                moves_made: snapshot.moves_made,
                claimed,
            });
        }

        let last_placed = match (snapshot.previous, snapshot.moves_made) {
            (None, 0) => None,
            (None, _) => return Err(SnapshotError::MissingPrevious),
            (Some(_), 0) => return Err(SnapshotError::UnexpectedPrevious),
            (Some(previous), made) => {
                let last_mover = Player::for_parity(made - 1);
                let found = Position::all().find(|&pos| {
                    let tile = &board[pos.index()];
                    tile.id() == previous.idx && tile.owner() == Some(last_mover)
                });
                Some(found.ok_or(SnapshotError::PreviousNotClaimed(previous.idx))?)
            }
        };

        Ok(State::from_parts(
            board,
            snapshot.moves_made,
            snapshot.winner.into(),
            last_placed,
        ))
    }
}
