//! Asynchronous search executor.
//!
//! Searches are CPU-bound, so they run on the tokio blocking pool. A request
//! carries only plain data (a snapshot or a candidate list) and the reply
//! comes back over a channel tagged with the ticket of the turn it answers.

use crate::games::niya::{Player, Position, Snapshot, SnapshotError, State};
use crate::search::{self, SearchError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

/// Identifies one engine turn.
///
/// The generation changes on every restart, so replies to a previous game
/// never match the current ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    /// Game generation the request belongs to.
    pub generation: u64,
    /// Player the engine is moving for.
    pub seat: Player,
}

/// Work handed to the executor.
#[derive(Debug, Clone)]
pub enum SearchRequest {
    /// Exhaustive search from the snapshot, for `perspective`.
    Strong {
        /// Player to find a move for.
        perspective: Player,
        /// State to search, copied by value.
        snapshot: Snapshot,
    },
    /// Uniform choice among the candidates.
    Casual {
        /// Moves to choose from.
        candidates: Vec<Position>,
    },
}

/// Why the engine produced no move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum EngineError {
    /// The snapshot did not describe a valid state.
    #[display("Invalid snapshot: {}", _0)]
    Snapshot(SnapshotError),

    /// The search found nothing to play.
    #[display("Search failed: {}", _0)]
    Search(SearchError),
}

impl std::error::Error for EngineError {}

/// Reply to a [`SearchRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineReply {
    /// Ticket of the request this answers.
    pub ticket: Ticket,
    /// Chosen move.
    pub result: Result<Position, EngineError>,
}

/// Runs search requests off the caller's task and reports back on a channel.
#[derive(Debug)]
pub struct SearchExecutor {
    replies: mpsc::UnboundedSender<EngineReply>,
    rng: StdRng,
}

impl SearchExecutor {
    /// Creates an executor replying on `replies`.
    ///
    /// With a seed, casual picks are reproducible.
    pub fn new(replies: mpsc::UnboundedSender<EngineReply>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { replies, rng }
    }

    /// Creates an executor together with the receiving end of its replies.
    pub fn channel(seed: Option<u64>) -> (Self, mpsc::UnboundedReceiver<EngineReply>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx, seed), rx)
    }

    /// Starts `request` on the blocking pool. Must be called from within a
    /// tokio runtime.
    #[instrument(skip(self, request), fields(generation = ticket.generation, seat = %ticket.seat))]
    pub fn dispatch(&mut self, ticket: Ticket, request: SearchRequest) {
        let seed: u64 = self.rng.random();
        let replies = self.replies.clone();
        debug!("Dispatching search");

        tokio::task::spawn_blocking(move || {
            let result = run_request(request, seed);
            if let Err(e) = &result {
                warn!(error = %e, "Engine produced no move");
            }
            if replies.send(EngineReply { ticket, result }).is_err() {
                debug!("Reply receiver dropped, discarding engine reply");
            }
        });
    }
}

/// Executes a request synchronously.
pub fn run_request(request: SearchRequest, seed: u64) -> Result<Position, EngineError> {
    match request {
        SearchRequest::Strong {
            perspective,
            snapshot,
        } => {
            let state = State::try_from(snapshot)?;
            Ok(search::select_move(perspective, &state)?)
        }
        SearchRequest::Casual { candidates } => {
            let mut rng = StdRng::seed_from_u64(seed);
            Ok(search::pick_casual(&candidates, &mut rng)?)
        }
    }
}
