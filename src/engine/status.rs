//! Game status of a position.

use crate::engine::attacks::is_in_check;
use crate::engine::board::Board;
use crate::engine::movegen::has_legal_move;
use crate::engine::types::{DrawReason, GameStatus, PieceKind};

/// Status for the side to move.
pub fn game_status(board: &Board) -> GameStatus {
    let in_check = is_in_check(board);
    if !has_legal_move(board) {
        return if in_check {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        };
    }
    if is_insufficient_material(board) {
        return GameStatus::Draw(DrawReason::InsufficientMaterial);
    }
    if in_check {
        GameStatus::Check
    } else {
        GameStatus::Active
    }
}

/// Only kings remain, plus at most one bishop or knight in total.
pub fn is_insufficient_material(board: &Board) -> bool {
    let mut minors = 0;
    for (_, piece) in board.live_pieces() {
        match piece.kind {
            PieceKind::King => {}
            PieceKind::Bishop | PieceKind::Knight => minors += 1,
            _ => return false,
        }
    }
    minors <= 1
}
