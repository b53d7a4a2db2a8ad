//! Attack and check detection.
//!
//! A square is attacked when some live piece of the attacking colour could
//! land on it by its movement pattern. Sliders need a clear path; pawns attack
//! their two forward diagonals, never the square straight ahead.

use crate::engine::board::Board;
use crate::engine::movegen::pawn_attack_squares;
use crate::engine::piece::{Movement, Piece};
use crate::engine::types::{Color, Occupancy, Square};

/// Is `sq` attacked by any piece of colour `by`?
pub fn is_square_attacked(board: &Board, sq: Square, by: Color) -> bool {
    board
        .live_pieces()
        .any(|(_, piece)| piece.color == by && attacks_square(board, piece, sq))
}

/// Is the king of `color` attacked? A colour without a king never is.
pub fn is_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(king) => is_square_attacked(board, king, !color),
        None => false,
    }
}

/// Is the side to move in check?
#[inline]
pub fn is_in_check(board: &Board) -> bool {
    is_check(board, board.turn())
}

/// Does `piece` attack `target`?
pub fn attacks_square(board: &Board, piece: &Piece, target: Square) -> bool {
    if piece.is_captured() || piece.position == target {
        return false;
    }
    match piece.movement() {
        Movement::Pawn => pawn_attack_squares(piece.color, piece.position).contains(&target),
        Movement::Walk {
            directions,
            sliding,
        } => directions.iter().any(|&(df, dr)| {
            let mut sq = piece.position;
            loop {
                sq = sq.offset(df, dr);
                if sq == target {
                    return true;
                }
                if !sliding || board.occupied(sq) != Occupancy::Empty {
                    return false;
                }
            }
        }),
    }
}

// =========================================================================
// Tests
// =========================================================================
