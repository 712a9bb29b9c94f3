//! Casual strategy: a uniformly random legal move.

use super::SearchError;
use crate::games::niya::Position;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Picks one of `candidates` uniformly at random.
pub fn pick_casual<R: Rng + ?Sized>(
    candidates: &[Position],
    rng: &mut R,
) -> Result<Position, SearchError> {
    candidates.choose(rng).copied().ok_or(SearchError::NoCandidates)
}
