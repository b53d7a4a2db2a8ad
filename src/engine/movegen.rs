//! Legal move generation.
//!
//! Pipeline:
//!   1. Generate pseudo-legal destinations per piece (ignoring pins / check).
//!   2. Filter: apply the move to a scratch copy, verify the mover's king is
//!      not attacked, drop the copy.
//!
//! Castling is validated separately by the castle handler and appended to the
//! king's list.

use crate::engine::attacks;
use crate::engine::board::Board;
use crate::engine::castle;
use crate::engine::piece::{Movement, Piece};
use crate::engine::types::{Color, Move, Occupancy, PieceKind, Square};

// =========================================================================
// Public API
// =========================================================================

/// Generate all legal moves for the side to move, in piece order.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let turn = board.turn();
    let mut moves = Vec::with_capacity(64);
    for (index, piece) in board.live_pieces() {
        if piece.color == turn {
            moves.extend(legal_moves_for(board, index));
        }
    }
    moves
}

/// Legal moves of the piece at `index`, whatever the side to move.
pub fn legal_moves_for(board: &Board, index: usize) -> Vec<Move> {
    let piece = *board.piece(index);
    let mut moves = Vec::new();
    for to in pseudo_legal_targets(board, index) {
        let mv = Move::new(piece.kind, piece.position, to);
        if !leaves_king_attacked(board, index, &mv) {
            moves.push(mv);
        }
    }
    if piece.kind == PieceKind::King {
        moves.extend(castle::castle_moves(board, index));
    }
    moves
}

/// Whether the side to move has at least one legal move.
pub fn has_legal_move(board: &Board) -> bool {
    let turn = board.turn();
    board
        .live_pieces()
        .filter(|(_, p)| p.color == turn)
        .any(|(index, _)| !legal_moves_for(board, index).is_empty())
}

/// Apply `mv` to a scratch copy and test the mover's king.
fn leaves_king_attacked(board: &Board, index: usize, mv: &Move) -> bool {
    let color = board.piece(index).color;
    let mut scratch = board.clone();
    scratch.commit(index, mv);
    attacks::is_check(&scratch, color)
}

// =========================================================================
// Pseudo-legal generation
// =========================================================================

/// Destinations the piece at `index` can reach by its movement pattern,
/// ignoring whether its own king ends up attacked. Captured pieces have none.
pub fn pseudo_legal_targets(board: &Board, index: usize) -> Vec<Square> {
    let piece = board.piece(index);
    let mut targets = Vec::new();
    if piece.is_captured() {
        return targets;
    }
    match piece.movement() {
        Movement::Walk {
            directions,
            sliding,
        } => walk(board, piece, directions, sliding, &mut targets),
        Movement::Pawn => pawn_targets(board, piece, &mut targets),
    }
    targets
}

fn walk(
    board: &Board,
    piece: &Piece,
    directions: &[(i8, i8)],
    sliding: bool,
    targets: &mut Vec<Square>,
) {
    for &(df, dr) in directions {
        let mut sq = piece.position;
        loop {
            sq = sq.offset(df, dr);
            match board.occupied(sq) {
                Occupancy::Empty => targets.push(sq),
                Occupancy::Occupied(color) => {
                    if color != piece.color {
                        targets.push(sq);
                    }
                    break;
                }
                Occupancy::OffBoard => break,
            }
            if !sliding {
                break;
            }
        }
    }
}

fn pawn_targets(board: &Board, pawn: &Piece, targets: &mut Vec<Square>) {
    let forward = pawn.color.forward();

    // --- Single push ---
    let one = pawn.position.offset(0, forward);
    let one_empty = board.occupied(one) == Occupancy::Empty;
    if one_empty {
        targets.push(one);
    }

    // --- Captures and en passant ---
    for df in [-1, 1] {
        let diag = pawn.position.offset(df, forward);
        match board.occupied(diag) {
            Occupancy::Occupied(color) if color != pawn.color => targets.push(diag),
            Occupancy::Empty if en_passant_victim(board, pawn, diag).is_some() => {
                targets.push(diag)
            }
            _ => {}
        }
    }

    // --- Double push ---
    let start_rank = pawn.color.home_rank() + forward;
    if pawn.can_double_move && pawn.position.rank == start_rank && one_empty {
        let two = one.offset(0, forward);
        if board.occupied(two) == Occupancy::Empty {
            targets.push(two);
        }
    }
}

/// Index of the enemy pawn a pawn would take by moving diagonally onto the
/// empty square `target`: it stands beside the mover, on the target's file,
/// and double-moved on the previous ply.
pub(crate) fn en_passant_victim(board: &Board, pawn: &Piece, target: Square) -> Option<usize> {
    let beside = Square::new(target.file, pawn.position.rank);
    board.find(PieceKind::Pawn, beside).filter(|&i| {
        let victim = board.piece(i);
        victim.color != pawn.color && victim.can_en_passant
    })
}

/// Squares attacked by a pawn of `color` standing on `from`.
pub(crate) fn pawn_attack_squares(color: Color, from: Square) -> [Square; 2] {
    let forward = color.forward();
    [from.offset(-1, forward), from.offset(1, forward)]
}

// =========================================================================
// Tests
// =========================================================================
