//! Static position evaluation.
//!
//! Scores are in centipawns from the side-to-move's perspective: positive
//! favours the player about to move.
//!
//! Components:
//!   1. Material balance
//!   2. Terminal bonus (checkmate / stalemate / dead draw)

use crate::engine::attacks::is_in_check;
use crate::engine::board::Board;
use crate::engine::status::is_insufficient_material;
use crate::engine::types::Move;

/// Infinity sentinel. Larger than any reachable score.
pub const INF: i32 = 100_000;

/// Checkmate magnitude. The search subtracts the ply so closer mates score
/// higher.
pub const MATE: i32 = INF / 2;

/// Is this score a forced-mate score?
#[inline]
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE - 500
}

// =========================================================================
// Evaluation
// =========================================================================

/// Material sum over live pieces, relative to the side to move.
pub fn material(board: &Board) -> i32 {
    let perspective = board.turn().sign();
    board
        .live_pieces()
        .map(|(_, p)| p.value() * p.color.sign() * perspective)
        .sum()
}

/// Score of a finished game, or `None` while play continues. `legal` must be
/// the legal moves of the side to move.
pub fn terminal_score(board: &Board, legal: &[Move]) -> Option<i32> {
    if legal.is_empty() {
        return Some(if is_in_check(board) { -MATE } else { 0 });
    }
    if is_insufficient_material(board) {
        return Some(0);
    }
    None
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::movegen::legal_moves;

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    #[test]
    fn starting_position_is_level() {
        assert_eq!(material(&Board::starting()), 0);
    }

    #[test]
    fn extra_queen_for_side_to_move() {
        assert_eq!(material(&board("4k3/8/8/8/8/8/8/3QK3 w - -")), 900);
        assert_eq!(material(&board("4k3/8/8/8/8/8/8/3QK3 b - -")), -900);
    }

    #[test]
    fn black_material_counts_for_black() {
        let b = board("3qk3/8/8/8/8/8/8/4K3 b - -");
        assert_eq!(material(&b), 900);
    }

    #[test]
    fn kings_are_not_counted() {
        assert_eq!(material(&board("4k3/8/8/8/8/8/8/4K3 w - -")), 0);
    }

    #[test]
    fn captured_pieces_are_not_counted() {
        let mut b = Board::starting();
        let queen = b.index_at(crate::engine::types::Square::new(4, 8)).unwrap();
        b.piece_mut(queen).capture();
        assert_eq!(material(&b), 900);
    }

    #[test]
    fn checkmate_scores_against_side_to_move() {
        let b = board("rnb1kbnr/pppp1ppp/4p3/8/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq -");
        let legal = legal_moves(&b);
        assert_eq!(terminal_score(&b, &legal), Some(-MATE));
    }

    #[test]
    fn stalemate_scores_zero() {
        let b = board("7k/5Q2/6K1/8/8/8/8/8 b - -");
        let legal = legal_moves(&b);
        assert_eq!(terminal_score(&b, &legal), Some(0));
    }

    #[test]
    fn insufficient_material_scores_zero() {
        let b = board("8/8/4k3/8/8/3KB3/8/8 w - -");
        let legal = legal_moves(&b);
        assert!(!legal.is_empty());
        assert_eq!(terminal_score(&b, &legal), Some(0));
    }

    #[test]
    fn ongoing_game_has_no_terminal_score() {
        let b = Board::starting();
        assert_eq!(terminal_score(&b, &legal_moves(&b)), None);
    }

    #[test]
    fn mate_score_detection() {
        assert!(is_mate_score(MATE));
        assert!(is_mate_score(MATE - 10));
        assert!(is_mate_score(-(MATE - 10)));
        assert!(!is_mate_score(500));
        assert!(!is_mate_score(0));
        assert!(MATE < INF);
    }
}
