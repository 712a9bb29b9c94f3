//! Core domain types for Niya.

use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Player {
    /// Red (moves first).
    Red,
    /// Black (moves second).
    Black,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Red => Player::Black,
            Player::Black => Player::Red,
        }
    }

    /// Player to move after `moves_made` moves.
    pub fn for_parity(moves_made: u8) -> Self {
        if moves_made % 2 == 0 {
            Player::Red
        } else {
            Player::Black
        }
    }
}

/// Plant category printed on a tile.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[repr(u8)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Plant {
    /// Maple.
    Maple = 0,
    /// Cherry blossom.
    Cherry = 1,
    /// Pine.
    Pine = 2,
    /// Iris.
    Iris = 3,
}

impl Plant {
    /// Plant encoded by the low two bits of `bits`.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 3 {
            0 => Plant::Maple,
            1 => Plant::Cherry,
            2 => Plant::Pine,
            _ => Plant::Iris,
        }
    }
}

/// Poem category printed on a tile.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[repr(u8)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Poem {
    /// Rising sun.
    Sun = 0,
    /// Bird.
    Bird = 1,
    /// Rain cloud.
    Rain = 2,
    /// Poem paper.
    Paper = 3,
}

impl Poem {
    /// Poem encoded by the low two bits of `bits`.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 3 {
            0 => Poem::Sun,
            1 => Poem::Bird,
            2 => Poem::Rain,
            _ => Poem::Paper,
        }
    }
}

/// One of the 16 tiles: a fixed (plant, poem) pair and the player that
/// claimed it, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    plant: Plant,
    poem: Poem,
    owner: Option<Player>,
}

impl Tile {
    /// Creates an unclaimed tile.
    pub fn new(plant: Plant, poem: Poem) -> Self {
        Self {
            plant,
            poem,
            owner: None,
        }
    }

    /// Creates the unclaimed tile with identity `id` (`plant * 4 + poem`).
    pub fn from_id(id: u8) -> Option<Self> {
        if id >= 16 {
            return None;
        }
        Some(Self::new(Plant::from_bits(id >> 2), Poem::from_bits(id)))
    }

    /// Tile identity (0-15). Encodes the categories, not the board position.
    pub fn id(&self) -> u8 {
        ((self.plant as u8) << 2) + self.poem as u8
    }

    /// Returns the plant category.
    pub fn plant(&self) -> Plant {
        self.plant
    }

    /// Returns the poem category.
    pub fn poem(&self) -> Poem {
        self.poem
    }

    /// Returns the player that claimed this tile.
    pub fn owner(&self) -> Option<Player> {
        self.owner
    }

    /// Checks if nobody has claimed the tile yet.
    pub fn is_free(&self) -> bool {
        self.owner.is_none()
    }

    /// Checks whether the tiles share a plant or a poem.
    pub fn shares_category(&self, other: &Tile) -> bool {
        self.plant == other.plant || self.poem == other.poem
    }

    /// Claims the tile for `player`. Returns false if it was already taken.
    pub(crate) fn claim(&mut self, player: Player) -> bool {
        if self.owner.is_some() {
            return false;
        }
        self.owner = Some(player);
        true
    }

    /// Two-letter label: plant initial followed by poem initial.
    pub fn short_label(&self) -> String {
        let plant = self.plant.to_string();
        let poem = self.poem.to_string();
        format!("{}{}", &plant[..1], &poem[..1])
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.plant, self.poem)
    }
}
