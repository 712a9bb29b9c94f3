//! Session and turn control.
//!
//! A [`Session`] owns the authoritative game state and alternates turns
//! between two seats. Human seats wait for [`Session::submit_move`];
//! engine seats hand a snapshot to the [`SearchExecutor`] and apply the
//! move from the matching [`EngineReply`].

use crate::executor::{EngineReply, SearchExecutor, SearchRequest, Ticket};
use crate::games::niya::{Layout, MoveError, Outcome, Player, Position, State, Tile};
use crate::search::pick_casual;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// How a seat's moves are produced.
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
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ControlMode {
    /// Moves are submitted from outside.
    Human,
    /// Exhaustive search.
    Strong,
    /// Uniformly random legal move.
    Random,
}

impl ControlMode {
    /// Checks if the engine plays this seat.
    pub fn is_engine(self) -> bool {
        !matches!(self, ControlMode::Human)
    }
}

/// A player color and how it is controlled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seat {
    /// Color of the seat.
    pub player: Player,
    /// Control mode of the seat.
    pub mode: ControlMode,
}

/// Where the session is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum SessionStatus {
    /// Not started yet.
    Uninitialized,
    /// Waiting for a human move.
    AwaitingHuman,
    /// Waiting for the engine's reply.
    AwaitingEngine,
    /// The game is over.
    Done,
}

/// Notifications for the presentation layer.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A new turn began.
    TurnStarted {
        /// State at the start of the turn.
        state: State,
        /// Player to move.
        player: Player,
        /// How that player moves.
        mode: ControlMode,
    },
    /// A move was applied.
    MovePlayed {
        /// Player that moved.
        player: Player,
        /// Claimed position.
        position: Position,
        /// Claimed tile.
        tile: Tile,
    },
    /// A submitted move was refused.
    MoveRejected {
        /// Requested position.
        position: Option<Position>,
        /// Reason.
        error: MoveError,
    },
    /// The game ended.
    Finished {
        /// Final state.
        state: State,
        /// Winner or tie.
        outcome: Outcome,
    },
}

/// Commands from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Human move at (row, col).
    Submit {
        /// Row (0-3).
        row: usize,
        /// Column (0-3).
        col: usize,
    },
    /// Start over with the given tile identities, or a random layout.
    Restart {
        /// Tile identities in board order.
        layout: Option<Vec<u8>>,
    },
    /// Stop the session.
    Quit,
}

/// Error returned when a human move is not accepted.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// The session is not waiting for a human move.
    #[display("Not awaiting a human move (status: {})", _0)]
    NotAwaitingHuman(SessionStatus),

    /// The rules refused the move.
    #[display("Move rejected: {}", _0)]
    Rejected(MoveError),
}

impl std::error::Error for SessionError {}

/// A single game between two seats.
#[derive(Debug)]
pub struct Session {
    red: Seat,
    black: Seat,
    state: State,
    status: SessionStatus,
    generation: u64,
    pending: Option<Ticket>,
    executor: SearchExecutor,
    events: mpsc::UnboundedSender<SessionEvent>,
    rng: StdRng,
}

impl Session {
    /// Creates a session on `layout`. Call [`Session::start`] to begin.
    #[instrument(skip(layout, executor, events))]
    pub fn new(
        red: ControlMode,
        black: ControlMode,
        layout: Layout,
        executor: SearchExecutor,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        info!("Creating session");
        Self {
            red: Seat {
                player: Player::Red,
                mode: red,
            },
            black: Seat {
                player: Player::Black,
                mode: black,
            },
            state: State::new(layout),
            status: SessionStatus::Uninitialized,
            generation: 0,
            pending: None,
            executor,
            events,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeds the generator used for random restart layouts.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// The authoritative game state.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Current status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Restart counter.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Ticket of the outstanding engine request, if any.
    pub fn pending(&self) -> Option<Ticket> {
        self.pending
    }

    /// Seat of `player`.
    pub fn seat(&self, player: Player) -> Seat {
        match player {
            Player::Red => self.red,
            Player::Black => self.black,
        }
    }

    /// Begins the first turn. Does nothing once started.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn start(&mut self) {
        if self.status != SessionStatus::Uninitialized {
            debug!(status = %self.status, "Session already started");
            return;
        }
        info!(red = %self.red.mode, black = %self.black.mode, "Starting game");
        self.advance_turn();
    }

    /// Moves to the next turn: finishes the game, waits for a human, or
    /// dispatches an engine request.
    #[instrument(skip(self), fields(generation = self.generation, moves_made = self.state.moves_made()))]
    pub fn advance_turn(&mut self) {
        if let Some(outcome) = self.state.outcome() {
            self.finish(outcome);
            return;
        }

        let seat = self.seat(self.state.current_player());
        self.emit(SessionEvent::TurnStarted {
            state: self.state.clone(),
            player: seat.player,
            mode: seat.mode,
        });

        let request = match seat.mode {
            ControlMode::Human => {
                debug!(player = %seat.player, "Awaiting human move");
                self.status = SessionStatus::AwaitingHuman;
                return;
            }
            ControlMode::Strong => SearchRequest::Strong {
                perspective: seat.player,
                snapshot: self.state.snapshot(),
            },
            ControlMode::Random => SearchRequest::Casual {
                candidates: self.state.legal_moves().to_vec(),
            },
        };

        let ticket = Ticket {
            generation: self.generation,
            seat: seat.player,
        };
        self.status = SessionStatus::AwaitingEngine;
        if self.pending == Some(ticket) {
            debug!("Engine request already outstanding");
            return;
        }
        debug!(player = %seat.player, mode = %seat.mode, "Awaiting engine move");
        self.pending = Some(ticket);
        self.executor.dispatch(ticket, request);
    }

    /// Submits a human move.
    ///
    /// Accepted only while awaiting a human. A refused move changes nothing.
    #[instrument(skip(self))]
    pub fn submit_move(&mut self, row: usize, col: usize) -> Result<(), SessionError> {
        if self.status != SessionStatus::AwaitingHuman {
            warn!(status = %self.status, "Move submitted out of turn");
            return Err(SessionError::NotAwaitingHuman(self.status));
        }
        let Some(position) = Position::new(row, col) else {
            let error = MoveError::OutOfBounds { row, col };
            self.reject(None, error.clone());
            return Err(SessionError::Rejected(error));
        };
        self.play(position).map_err(SessionError::Rejected)
    }

    /// Applies an engine reply if it answers the outstanding request.
    ///
    /// Returns true when a move was played. Stale replies are discarded.
    #[instrument(skip(self, reply), fields(generation = reply.ticket.generation, seat = %reply.ticket.seat))]
    pub fn handle_engine_reply(&mut self, reply: EngineReply) -> bool {
        if self.status != SessionStatus::AwaitingEngine || self.pending != Some(reply.ticket) {
            debug!(status = %self.status, "Discarding stale engine reply");
            return false;
        }
        self.pending = None;

        let position = match reply.result {
            Ok(position) => position,
            Err(e) => {
                warn!(error = %e, "Engine failed, playing a random legal move");
                match pick_casual(self.state.legal_moves(), &mut self.rng) {
                    Ok(position) => position,
                    Err(e) => {
                        warn!(error = %e, "No fallback move available");
                        return false;
                    }
                }
            }
        };
        self.play(position).is_ok()
    }

    /// Starts a new game. Invalid layouts fall back to a random one.
    ///
    /// Outstanding engine replies become stale.
    #[instrument(skip(self))]
    pub fn restart(&mut self, layout: Option<&[u8]>) {
        let layout = match layout {
            Some(ids) => Layout::from_ids_or_random(Some(ids), &mut self.rng),
            None => Layout::random(&mut self.rng),
        };
        self.generation += 1;
        self.pending = None;
        self.state = State::new(layout);
        self.status = SessionStatus::Uninitialized;
        info!(generation = self.generation, "Restarting game");
        self.start();
    }

    /// Drives the session from commands and engine replies until `Quit`
    /// or until the command channel closes. Returns the session.
    pub async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<SessionCommand>,
        mut replies: mpsc::UnboundedReceiver<EngineReply>,
    ) -> Self {
        self.start();
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(SessionCommand::Submit { row, col }) => {
                        if let Err(e) = self.submit_move(row, col) {
                            debug!(error = %e, "Submit refused");
                        }
                    }
                    Some(SessionCommand::Restart { layout }) => self.restart(layout.as_deref()),
                    Some(SessionCommand::Quit) | None => break,
                },
                Some(reply) = replies.recv() => {
                    self.handle_engine_reply(reply);
                }
            }
        }
        info!(generation = self.generation, "Session stopped");
        self
    }

    fn play(&mut self, position: Position) -> Result<(), MoveError> {
        let player = self.state.current_player();
        if let Err(e) = self.state.apply_move(position) {
            self.reject(Some(position), e.clone());
            return Err(e);
        }
        info!(%player, %position, "Move played");
        self.emit(SessionEvent::MovePlayed {
            player,
            position,
            tile: *self.state.tile(position),
        });
        self.advance_turn();
        Ok(())
    }

    fn reject(&self, position: Option<Position>, error: MoveError) {
        warn!(?position, error = %error, "Move rejected");
        self.emit(SessionEvent::MoveRejected { position, error });
    }

    fn finish(&mut self, outcome: Outcome) {
        self.status = SessionStatus::Done;
        self.pending = None;
        info!(%outcome, moves_made = self.state.moves_made(), "Game over");
        self.emit(SessionEvent::Finished {
            state: self.state.clone(),
            outcome,
        });
    }

    fn emit(&self, event: SessionEvent) {
        if self.events.send(event).is_err() {
            debug!("Event receiver dropped");
        }
    }
}
