//! Game state and rule engine for Niya.

use super::invariants::assert_invariants;
use super::position::CELLS;
use super::rules;
use super::{Layout, MoveError, Outcome, Player, Position, Tile};
use tracing::{instrument, trace};

/// Complete game state: the 16 tiles, move counter, last claimed tile,
/// winner and the current legal moves.
///
/// Cloning deep-copies every tile. The last claimed tile is stored as a
/// board position, so a clone always refers to its own tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub(super) board: [Tile; CELLS],
    pub(super) moves_made: u8,
    pub(super) winner: Option<Player>,
    pub(super) last_placed: Option<Position>,
    pub(super) legal_moves: Vec<Position>,
}

impl State {
    /// Creates a fresh game on the given layout.
    #[instrument]
    pub fn new(layout: Layout) -> Self {
        let mut state = Self {
            board: layout.tiles(),
            moves_made: 0,
            winner: None,
            last_placed: None,
            legal_moves: Vec::new(),
        };
        state.recompute_legal_moves();
        state
    }

    /// Rebuilds a state from raw parts, then derives its legal moves.
    pub(super) fn from_parts(
        board: [Tile; CELLS],
        moves_made: u8,
        winner: Option<Player>,
        last_placed: Option<Position>,
    ) -> Self {
        let mut state = Self {
            board,
            moves_made,
            winner,
            last_placed,
            legal_moves: Vec::new(),
        };
        state.recompute_legal_moves();
        state
    }

    /// Returns the tiles in row-major board order.
    pub fn board(&self) -> &[Tile; CELLS] {
        &self.board
    }

    /// Returns the tile at `pos`.
    pub fn tile(&self, pos: Position) -> &Tile {
        &self.board[pos.index()]
    }

    /// Number of moves played so far.
    pub fn moves_made(&self) -> u8 {
        self.moves_made
    }

    /// The winner, if one has been decided.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Position of the most recently claimed tile.
    pub fn last_placed(&self) -> Option<Position> {
        self.last_placed
    }

    /// Positions the player to move may claim, in row-major order.
    pub fn legal_moves(&self) -> &[Position] {
        &self.legal_moves
    }

    /// Player to move: Red after an even number of moves, Black otherwise.
    pub fn current_player(&self) -> Player {
        Player::for_parity(self.moves_made)
    }

    /// Checks if any tile is still unclaimed.
    pub fn has_remaining(&self) -> bool {
        (self.moves_made as usize) < CELLS
    }

    /// Checks if the game has ended by a win or a full board.
    pub fn is_over(&self) -> bool {
        self.winner.is_some() || !self.has_remaining()
    }

    /// Returns the outcome once the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.winner {
            Some(player) => Some(Outcome::Winner(player)),
            None if !self.has_remaining() => Some(Outcome::Tie),
            None => None,
        }
    }

    /// Validates a move without applying it.
    pub fn check_move(&self, pos: Position) -> Result<(), MoveError> {
        rules::check_move(&self.board, self.last_placed, pos)
    }

    /// Checks whether `pos` may be claimed under the placement rules.
    pub fn is_legal(&self, pos: Position) -> bool {
        self.check_move(pos).is_ok()
    }

    /// Claims `pos` for the player to move.
    ///
    /// On success the winner is checked for the mover, the move counter
    /// advances, `pos` becomes the last claimed tile and legal moves are
    /// recomputed. On failure nothing changes.
    pub fn apply_move(&mut self, pos: Position) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        self.check_move(pos)?;

        let player = self.current_player();
        if !self.board[pos.index()].claim(player) {
            return Err(MoveError::TileTaken(pos));
        }
        if rules::is_winner(&self.board, player) {
            self.winner = Some(player);
        }
        self.moves_made += 1;
        self.last_placed = Some(pos);
        self.recompute_legal_moves();
        trace!(%pos, ?player, moves_made = self.moves_made, "Move applied");

        assert_invariants(self);

        Ok(())
    }

    /// Recomputes the legal moves.
    ///
    /// A side to move left without any legal move while tiles remain loses:
    /// the winner becomes its opponent. A full board keeps the current winner.
    pub fn recompute_legal_moves(&mut self) {
        self.legal_moves = rules::derive_legal_moves(
            &self.board,
            self.last_placed,
            self.winner,
            self.moves_made,
        );
        if self.winner.is_none() && self.has_remaining() && self.legal_moves.is_empty() {
            self.winner = Some(self.current_player().opponent());
        }
    }

    /// Value of a finished game from `perspective`.
    ///
    /// Zero for a tie, otherwise `17 - moves_made`, positive when
    /// `perspective` won. Quicker wins score higher.
    pub fn terminal_value(&self, perspective: Player) -> i32 {
        let value = CELLS as i32 + 1 - self.moves_made as i32;
        match self.winner {
            None => 0,
            Some(winner) if winner == perspective => value,
            Some(_) => -value,
        }
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Free tiles show their plant and poem initials, claimed tiles show
    /// `RR` or `BB`, and legal moves are marked with `*`.
    pub fn display(&self) -> String {
        let mut result = String::from("     0    1    2    3\n");
        for row in 0..4 {
            result.push_str(&format!("{}  ", row));
            for col in 0..4 {
                let Some(pos) = Position::new(row, col) else {
                    continue;
                };
                let tile = self.tile(pos);
                let label = match tile.owner() {
                    Some(Player::Red) => "RR".to_string(),
                    Some(Player::Black) => "BB".to_string(),
                    None => tile.short_label(),
                };
                let hint = if self.legal_moves.contains(&pos) { '*' } else { ' ' };
                result.push_str(&format!("[{}{}]", label, hint));
            }
            result.push('\n');
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::niya::{Plant, Poem};

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    fn sample() -> State {
        State::new(Layout::new(&[7, 1, 15, 5, 13, 2, 9, 12, 0, 4, 8, 10, 11, 14, 3, 6]).unwrap())
    }

    #[test]
    fn test_new_game() {
        let state = sample();
        assert_eq!(state.moves_made(), 0);
        assert_eq!(state.current_player(), Player::Red);
        assert_eq!(state.winner(), None);
        assert_eq!(state.legal_moves().len(), 12);
        assert_eq!(state.outcome(), None);
    }

    #[test]
    fn test_apply_move_updates_everything() {
        let mut state = sample();
        state.apply_move(pos(0, 1)).unwrap();
        assert_eq!(state.moves_made(), 1);
        assert_eq!(state.current_player(), Player::Black);
        assert_eq!(state.last_placed(), Some(pos(0, 1)));
        assert_eq!(state.tile(pos(0, 1)).owner(), Some(Player::Red));
        // (0, 1) is tile 1: MAPLE/BIRD.
        for &m in state.legal_moves() {
            let tile = state.tile(m);
            assert!(tile.is_free());
            assert!(tile.plant() == Plant::Maple || tile.poem() == Poem::Bird);
        }
    }

    #[test]
    fn test_rejected_move_leaves_state_untouched() {
        let mut state = sample();
        let before = state.clone();
        assert_eq!(state.apply_move(pos(1, 2)), Err(MoveError::OpeningRestricted(pos(1, 2))));
        assert_eq!(state, before);

        state.apply_move(pos(0, 1)).unwrap();
        let before = state.clone();
        assert_eq!(state.apply_move(pos(0, 1)), Err(MoveError::TileTaken(pos(0, 1))));
        assert_eq!(state, before);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut state = sample();
        state.apply_move(pos(0, 1)).unwrap();
        let mut copy = state.clone();
        let next = copy.legal_moves()[0];
        copy.apply_move(next).unwrap();
        assert_eq!(state.moves_made(), 1);
        assert!(state.tile(next).is_free());
        assert_eq!(state.last_placed(), Some(pos(0, 1)));
    }

    #[test]
    fn test_terminal_value() {
        let mut state = sample();
        assert_eq!(state.terminal_value(Player::Red), 0);
        state.winner = Some(Player::Red);
        state.moves_made = 7;
        assert_eq!(state.terminal_value(Player::Red), 10);
        assert_eq!(state.terminal_value(Player::Black), -10);
    }

    #[test]
    fn test_display_marks_hints() {
        let state = sample();
        let text = state.display();
        // (0, 0) is tile 7: CHERRY/PAPER, a legal opening.
        assert!(text.contains("[CP*]"));
        // (1, 1) is tile 2: MAPLE/RAIN, not a legal opening.
        assert!(text.contains("[MR ]"));
    }
}
