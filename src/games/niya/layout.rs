//! Tile layouts: which tile lies on which board position.

use super::position::CELLS;
use super::{Plant, Poem, Tile};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{instrument, warn};

/// Error raised when a list of tile identities is not a permutation of 0..16.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum LayoutError {
    /// Layouts hold exactly 16 tiles.
    #[display("Layout must have 16 tiles, got {}", _0)]
    WrongLength(usize),

    /// A tile identity outside 0..=15.
    #[display("Tile identity {} is out of range (0-15)", _0)]
    OutOfRange(u8),

    /// The same tile appears twice.
    #[display("Tile identity {} appears more than once", _0)]
    Duplicate(u8),

    /// Text that is neither an identity nor a `plant:poem` pair.
    #[display("Cannot parse tile '{}'", _0)]
    Unparseable(String),
}

impl std::error::Error for LayoutError {}

/// A validated permutation of the 16 tile identities, in row-major board order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout {
    ids: [u8; CELLS],
}

impl Layout {
    /// Validates `ids` as a permutation of 0..16.
    pub fn new(ids: &[u8]) -> Result<Self, LayoutError> {
        if ids.len() != CELLS {
            return Err(LayoutError::WrongLength(ids.len()));
        }
        let mut seen = [false; CELLS];
        let mut out = [0u8; CELLS];
        for (slot, &id) in out.iter_mut().zip(ids) {
            let Some(mark) = seen.get_mut(id as usize) else {
                return Err(LayoutError::OutOfRange(id));
            };
            if *mark {
                return Err(LayoutError::Duplicate(id));
            }
            *mark = true;
            *slot = id;
        }
        Ok(Self { ids: out })
    }

    /// A uniformly random layout.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut ids: [u8; CELLS] = std::array::from_fn(|i| i as u8);
        ids.shuffle(rng);
        Self { ids }
    }

    /// Uses `ids` when they form a valid layout, otherwise a random one.
    #[instrument(skip(rng))]
    pub fn from_ids_or_random<R: Rng + ?Sized>(ids: Option<&[u8]>, rng: &mut R) -> Self {
        match ids.map(Self::new) {
            Some(Ok(layout)) => layout,
            Some(Err(e)) => {
                warn!(error = %e, "Invalid layout, falling back to a random one");
                Self::random(rng)
            }
            None => Self::random(rng),
        }
    }

    /// Plants run across the columns and poems down the rows.
    pub fn classic() -> Self {
        let ids = std::array::from_fn(|i| ((i % 4) * 4 + i / 4) as u8);
        Self { ids }
    }

    /// Parses 16 identities (`"0, 5, 12, ..."`) or 16 `plant:poem` pairs
    /// (`"maple:sun cherry:sun ..."`), separated by commas or whitespace.
    pub fn parse(s: &str) -> Result<Self, LayoutError> {
        let ids = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(parse_tile)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&ids)
    }

    /// Tile identities in board order.
    pub fn ids(&self) -> &[u8; CELLS] {
        &self.ids
    }

    /// Unclaimed tiles in board order.
    pub fn tiles(&self) -> [Tile; CELLS] {
        self.ids
            .map(|id| Tile::new(Plant::from_bits(id >> 2), Poem::from_bits(id)))
    }
}

fn parse_tile(token: &str) -> Result<u8, LayoutError> {
    if let Ok(id) = token.parse::<u8>() {
        return Ok(id);
    }
    let (plant, poem) = token
        .split_once(':')
        .ok_or_else(|| LayoutError::Unparseable(token.to_string()))?;
    let plant: Plant = plant
        .parse()
        .map_err(|_| LayoutError::Unparseable(token.to_string()))?;
    let poem: Poem = poem
        .parse()
        .map_err(|_| LayoutError::Unparseable(token.to_string()))?;
    Ok(Tile::new(plant, poem).id())
}
