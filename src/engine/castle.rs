//! Castling as one compound move.
//!
//! A king moving two files along its rank castles towards the rook on the
//! corner of that side. Both pieces must still carry `can_castle`, the squares
//! between them must be empty, and the king's start, transit and destination
//! squares must not be attacked.

use crate::engine::attacks::is_square_attacked;
use crate::engine::board::Board;
use crate::engine::piece::Piece;
use crate::engine::types::{ChessError, Move, Occupancy, PieceKind, Square};

/// Does moving `piece` to `to` have the shape of a castling move?
pub fn is_castling_attempt(piece: &Piece, to: Square) -> bool {
    piece.kind == PieceKind::King
        && to.rank == piece.position.rank
        && (to.file - piece.position.file).abs() == 2
}

/// Castling moves available to the king at `king_index`, king side first.
pub fn castle_moves(board: &Board, king_index: usize) -> Vec<Move> {
    let king = board.piece(king_index);
    [2, -2]
        .into_iter()
        .map(|df| king.position.offset(df, 0))
        .filter(|&to| validate(board, king_index, to).is_ok())
        .map(|to| Move::new(PieceKind::King, king.position, to))
        .collect()
}

/// Castle the king at `king_index` onto `to` after checking every
/// precondition, including whose turn it is.
pub fn castle(board: &mut Board, king_index: usize, to: Square) -> Result<(), ChessError> {
    let king = board.piece(king_index);
    if king.color != board.turn() {
        let mv = Move::new(PieceKind::King, king.position, to);
        return Err(ChessError::illegal(
            &mv,
            format!("it is {}'s turn", board.turn()),
        ));
    }
    let rook_index = validate(board, king_index, to)?;
    execute(board, king_index, rook_index, to);
    Ok(())
}

/// Castle without the safety checks. The rook must still be there.
pub fn force_castle(board: &mut Board, king_index: usize, to: Square) -> Result<(), ChessError> {
    let rook_index = corner_rook(board, king_index, to)?;
    execute(board, king_index, rook_index, to);
    Ok(())
}

/// Check all castling preconditions except the turn, returning the index of
/// the rook that takes part.
pub fn validate(board: &Board, king_index: usize, to: Square) -> Result<usize, ChessError> {
    let king = *board.piece(king_index);
    let mv = Move::new(PieceKind::King, king.position, to);

    if !is_castling_attempt(&king, to) || !to.is_on_board() {
        return Err(ChessError::illegal(&mv, "not a castling move"));
    }
    if !king.can_castle {
        return Err(ChessError::illegal(&mv, "king has already moved"));
    }
    let rook_index = corner_rook(board, king_index, to)?;
    let rook = board.piece(rook_index);
    if !rook.can_castle {
        return Err(ChessError::illegal(&mv, "rook has already moved"));
    }
    let dir = (to.file - king.position.file).signum();
    if (rook.position.file - to.file) * dir <= 0 {
        return Err(ChessError::illegal(&mv, "king would pass the rook"));
    }

    let mut sq = king.position.offset(dir, 0);
    while sq != rook.position {
        if board.occupied(sq) != Occupancy::Empty {
            return Err(ChessError::illegal(
                &mv,
                format!("{sq} is between king and rook"),
            ));
        }
        sq = sq.offset(dir, 0);
    }

    let enemy = !king.color;
    for sq in [king.position, king.position.offset(dir, 0), to] {
        if is_square_attacked(board, sq, enemy) {
            return Err(ChessError::illegal(&mv, format!("{sq} is attacked")));
        }
    }

    Ok(rook_index)
}

/// The same-coloured rook on the corner the king is heading for.
fn corner_rook(board: &Board, king_index: usize, to: Square) -> Result<usize, ChessError> {
    let king = board.piece(king_index);
    let rook_file = if to.file > king.position.file { 8 } else { 1 };
    board
        .find(PieceKind::Rook, Square::new(rook_file, king.position.rank))
        .filter(|&i| board.piece(i).color == king.color)
        .ok_or_else(|| {
            let mv = Move::new(PieceKind::King, king.position, to);
            ChessError::illegal(&mv, "no rook to castle with")
        })
}

fn execute(board: &mut Board, king_index: usize, rook_index: usize, to: Square) {
    for piece in board.pieces_mut() {
        piece.can_en_passant = false;
    }

    let from = board.piece(king_index).position;
    let dir = (to.file - from.file).signum();

    let king = board.piece_mut(king_index);
    king.position = to;
    king.can_castle = false;

    let rook = board.piece_mut(rook_index);
    rook.position = from.offset(dir, 0);
    rook.can_castle = false;

    board.flip_turn();
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::Color;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn king_and_rook() -> Board {
        let mut b = Board::empty(Color::White);
        b.add(Piece::unmoved(PieceKind::King, Color::White, Square::new(5, 1)));
        b.add(Piece::unmoved(PieceKind::Rook, Color::White, Square::new(8, 1)));
        b.add(Piece::new(PieceKind::King, Color::Black, Square::new(5, 8)));
        b
    }

    #[test]
    fn king_side_castle_relocates_both_pieces() {
        let mut b = king_and_rook();
        b.make_move(&Move::new(PieceKind::King, Square::new(5, 1), Square::new(7, 1)))
            .unwrap();

        let king = b.piece(0);
        let rook = b.piece(1);
        assert_eq!(king.position, Square::new(7, 1));
        assert_eq!(rook.position, Square::new(6, 1));
        assert!(!king.can_castle);
        assert!(!rook.can_castle);
        assert_eq!(b.turn(), Color::Black);
    }

    #[test]
    fn queen_side_castle() {
        let mut b = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq -").unwrap();
        b.make_move(&Move::new(PieceKind::King, sq("e8"), sq("c8")))
            .unwrap();
        assert_eq!(b.to_fen(), "2kr3r/8/8/8/8/8/8/R3K2R w KQ -");
    }

    #[test]
    fn castling_clears_en_passant_flags() {
        let mut b = Board::from_fen("4k3/1p6/8/8/8/8/8/R3K2R b KQ -").unwrap();
        b.make_move(&Move::new(PieceKind::Pawn, sq("b7"), sq("b5")))
            .unwrap();
        assert_eq!(b.en_passant_target(), Some(sq("b6")));

        b.make_move(&Move::new(PieceKind::King, sq("e1"), sq("g1")))
            .unwrap();
        assert!(b.live_pieces().all(|(_, p)| !p.can_en_passant));
        assert_eq!(b.to_fen(), "4k3/8/8/1p6/8/8/8/R4RK1 b - -");
    }

    #[test]
    fn moved_king_cannot_castle() {
        let mut b = king_and_rook();
        b.piece_mut(0).can_castle = false;
        let err = castle(&mut b, 0, Square::new(7, 1)).unwrap_err();
        assert!(matches!(err, ChessError::IllegalMove { .. }));
        assert_eq!(b.piece(0).position, Square::new(5, 1));
    }

    #[test]
    fn moved_rook_cannot_castle() {
        let mut b = king_and_rook();
        b.piece_mut(1).can_castle = false;
        assert!(validate(&b, 0, Square::new(7, 1)).is_err());
    }

    #[test]
    fn missing_rook_cannot_castle() {
        let mut b = king_and_rook();
        b.piece_mut(1).capture();
        assert!(validate(&b, 0, Square::new(7, 1)).is_err());
        assert!(force_castle(&mut b, 0, Square::new(7, 1)).is_err());
    }

    #[test]
    fn enemy_rook_in_corner_does_not_count() {
        let mut b = Board::empty(Color::White);
        b.add(Piece::unmoved(PieceKind::King, Color::White, sq("e1")));
        b.add(Piece::unmoved(PieceKind::Rook, Color::Black, sq("h1")));
        assert!(validate(&b, 0, sq("g1")).is_err());
    }

    #[test]
    fn occupied_between_squares_block() {
        let mut b = king_and_rook();
        b.add(Piece::new(PieceKind::Knight, Color::White, sq("g1")));
        assert!(validate(&b, 0, sq("g1")).is_err());
    }

    #[test]
    fn queen_side_needs_b_file_empty() {
        let mut b = Board::empty(Color::White);
        b.add(Piece::unmoved(PieceKind::King, Color::White, sq("e1")));
        b.add(Piece::unmoved(PieceKind::Rook, Color::White, sq("a1")));
        assert_eq!(validate(&b, 0, sq("c1")), Ok(1));
        b.add(Piece::new(PieceKind::Knight, Color::White, sq("b1")));
        assert!(validate(&b, 0, sq("c1")).is_err());
    }

    #[test]
    fn attacked_transit_square_blocks() {
        let mut b = king_and_rook();
        b.add(Piece::new(PieceKind::Rook, Color::Black, sq("f8")));
        let err = castle(&mut b, 0, sq("g1")).unwrap_err();
        assert!(matches!(err, ChessError::IllegalMove { .. }));
    }

    #[test]
    fn attacked_destination_blocks() {
        let mut b = king_and_rook();
        b.add(Piece::new(PieceKind::Bishop, Color::Black, sq("e3")));
        assert!(validate(&b, 0, sq("g1")).is_err());
    }

    #[test]
    fn castling_out_of_check_is_illegal() {
        let mut b = king_and_rook();
        b.add(Piece::new(PieceKind::Rook, Color::Black, sq("e5")));
        assert!(validate(&b, 0, sq("g1")).is_err());
    }

    #[test]
    fn castling_out_of_turn_is_illegal() {
        let mut b = king_and_rook();
        b.set_turn(Color::Black);
        assert!(castle(&mut b, 0, sq("g1")).is_err());
        assert_eq!(b.piece(1).position, sq("h1"));
    }

    #[test]
    fn force_castle_ignores_attacks() {
        let mut b = king_and_rook();
        b.add(Piece::new(PieceKind::Rook, Color::Black, sq("f8")));
        force_castle(&mut b, 0, sq("g1")).unwrap();
        assert_eq!(b.piece(0).position, sq("g1"));
        assert_eq!(b.piece(1).position, sq("f1"));
    }

    #[test]
    fn enumerates_both_sides() {
        let b = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -").unwrap();
        let king = b.index_at(sq("e1")).unwrap();
        let moves: Vec<Square> = castle_moves(&b, king).into_iter().map(|m| m.to).collect();
        assert_eq!(moves, vec![sq("g1"), sq("c1")]);
    }
}
