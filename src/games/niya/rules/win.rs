//! Win detection logic for Niya.

use super::super::position::CELLS;
use super::super::{Player, Tile};

/// Winning lines keyed by head position.
///
/// A line wins when the head and its three listed positions all belong to
/// the same player. Together the entries cover the four rows, the four
/// columns, both diagonals and the nine 2x2 squares.
pub static WIN_LINES: [&[[usize; 3]]; CELLS] = [
    &[[1, 2, 3], [5, 10, 15], [4, 8, 12], [1, 4, 5]],
    &[[2, 5, 6], [5, 9, 13]],
    &[[3, 6, 7], [6, 10, 14]],
    &[[6, 9, 12], [7, 11, 15]],
    &[[5, 6, 7], [5, 8, 9]],
    &[[6, 9, 10]],
    &[[7, 10, 11]],
    &[],
    &[[9, 10, 11], [9, 12, 13]],
    &[[10, 13, 14]],
    &[[11, 14, 15]],
    &[],
    &[[13, 14, 15]],
    &[],
    &[],
    &[],
];

/// Checks whether `player` owns every tile of at least one winning line.
pub fn is_winner(board: &[Tile; CELLS], player: Player) -> bool {
    let owns = |index: usize| board[index].owner() == Some(player);
    WIN_LINES.iter().enumerate().any(|(head, lines)| {
        owns(head) && lines.iter().any(|line| line.iter().all(|&index| owns(index)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::niya::Layout;

    fn claim_all(board: &mut [Tile; CELLS], indices: &[usize], player: Player) {
        for &index in indices {
            assert!(board[index].claim(player));
        }
    }

    #[test]
    fn test_no_winner_empty_board() {
        let board = Layout::classic().tiles();
        assert!(!is_winner(&board, Player::Red));
        assert!(!is_winner(&board, Player::Black));
    }

    #[test]
    fn test_table_has_nineteen_lines() {
        let total: usize = WIN_LINES.iter().map(|lines| lines.len()).sum();
        assert_eq!(total, 19);
    }

    #[test]
    fn test_winner_top_row() {
        let mut board = Layout::classic().tiles();
        claim_all(&mut board, &[0, 1, 2, 3], Player::Red);
        assert!(is_winner(&board, Player::Red));
        assert!(!is_winner(&board, Player::Black));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let mut board = Layout::classic().tiles();
        claim_all(&mut board, &[3, 6, 9, 12], Player::Black);
        assert!(is_winner(&board, Player::Black));
    }

    #[test]
    fn test_winner_center_square() {
        let mut board = Layout::classic().tiles();
        claim_all(&mut board, &[5, 6, 9, 10], Player::Red);
        assert!(is_winner(&board, Player::Red));
    }

    #[test]
    fn test_no_winner_mixed_line() {
        let mut board = Layout::classic().tiles();
        claim_all(&mut board, &[12, 13, 14], Player::Red);
        claim_all(&mut board, &[15], Player::Black);
        assert!(!is_winner(&board, Player::Red));
    }
}
