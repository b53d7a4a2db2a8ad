//! Committing moves to a `Board`.
//!
//! `make_move` validates against the check-filtered legal set before touching
//! the board; `force_move` skips that check for moves already known to be
//! legal. Both leave the board untouched when they return an error.

use crate::engine::board::Board;
use crate::engine::castle;
use crate::engine::movegen;
use crate::engine::types::{ChessError, Move, PieceKind};

impl Board {
    /// Play a move for the side to move.
    ///
    /// Fails with `PieceNotFound` when no live piece of `mv.piece` stands on
    /// `mv.from`, and with `IllegalMove` when the destination is not in that
    /// piece's legal set (or a castling precondition fails).
    pub fn make_move(&mut self, mv: &Move) -> Result<(), ChessError> {
        let index = self.resolve(mv)?;
        let piece = *self.piece(index);

        if piece.color != self.turn() {
            return Err(ChessError::illegal(
                mv,
                format!("it is {}'s turn", self.turn()),
            ));
        }
        if castle::is_castling_attempt(&piece, mv.to) {
            return castle::castle(self, index, mv.to);
        }
        if !movegen::legal_moves_for(self, index)
            .iter()
            .any(|legal| legal.same_path(mv))
        {
            return Err(ChessError::illegal(mv, "destination is not reachable"));
        }

        self.commit(index, mv);
        Ok(())
    }

    /// Play a move without checking legality. Only the piece lookup and the
    /// promotion tag are validated.
    pub fn force_move(&mut self, mv: &Move) -> Result<(), ChessError> {
        let index = self.resolve(mv)?;
        if castle::is_castling_attempt(self.piece(index), mv.to) {
            return castle::force_castle(self, index, mv.to);
        }
        self.commit(index, mv);
        Ok(())
    }

    fn resolve(&self, mv: &Move) -> Result<usize, ChessError> {
        if let Some(promo) = mv.promotion
            && !promo.is_promotion_target()
        {
            return Err(ChessError::illegal(
                mv,
                format!("cannot promote to {promo}"),
            ));
        }
        self.find(mv.piece, mv.from)
            .ok_or(ChessError::PieceNotFound {
                kind: mv.piece,
                square: mv.from,
            })
    }

    /// Relocate the piece at `index`, handling captures, en passant and
    /// promotion, then pass the turn. Castling is not handled here.
    pub(crate) fn commit(&mut self, index: usize, mv: &Move) {
        let mover = *self.piece(index);

        // ---- Capture ----
        let victim = match self.index_at(mv.to) {
            Some(i) if self.piece(i).color != mover.color => Some(i),
            Some(_) => None,
            None if mover.kind == PieceKind::Pawn && mv.from.file != mv.to.file => {
                movegen::en_passant_victim(self, &mover, mv.to)
            }
            None => None,
        };
        if let Some(i) = victim {
            self.piece_mut(i).capture();
        }

        // ---- En-passant rights last one ply ----
        for piece in self.pieces_mut() {
            piece.can_en_passant = false;
        }

        // ---- Move the piece ----
        let far_rank = (!mover.color).home_rank();
        let piece = self.piece_mut(index);
        piece.position = mv.to;
        piece.can_castle = false;
        if piece.kind == PieceKind::Pawn {
            piece.can_double_move = false;
            piece.can_en_passant = (mv.to.rank - mv.from.rank).abs() == 2;
            if mv.to.rank == far_rank {
                piece.kind = mv.promotion.unwrap_or(PieceKind::Queen);
                piece.can_en_passant = false;
            }
        }

        self.flip_turn();
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::piece::Piece;
    use crate::engine::types::{Color, Square};

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn mv(text: &str) -> Move {
        Move::from_book_notation(text).unwrap()
    }

    #[test]
    fn simple_capture_tombstones_victim() {
        let mut b = Board::empty(Color::White);
        b.add(Piece::new(PieceKind::Rook, Color::White, Square::new(1, 1)));
        b.add(Piece::new(PieceKind::Knight, Color::Black, Square::new(2, 1)));

        b.make_move(&mv("ra1-b1")).unwrap();

        assert_eq!(b.pieces().len(), 2);
        assert_eq!(b.piece(0).position, Square::new(2, 1));
        assert_eq!(b.piece(1).position, Square::CAPTURED);
        assert_eq!(b.turn(), Color::Black);
    }

    #[test]
    fn missing_piece_is_reported() {
        let mut b = Board::starting();
        let err = b.make_move(&mv("rh8-h7")).unwrap_err();
        assert!(matches!(err, ChessError::PieceNotFound { .. }));

        // Right square, wrong kind.
        let err = b.make_move(&mv("be2-e4")).unwrap_err();
        assert_eq!(
            err,
            ChessError::PieceNotFound {
                kind: PieceKind::Bishop,
                square: sq("e2"),
            }
        );
    }

    #[test]
    fn unreachable_destination_is_illegal() {
        let mut b = Board::starting();
        let before = b.clone();
        let err = b.make_move(&mv("ra1-d4")).unwrap_err();
        assert!(matches!(err, ChessError::IllegalMove { .. }));
        assert_eq!(b, before, "board must be untouched after an error");
    }

    #[test]
    fn moving_out_of_turn_is_illegal() {
        let mut b = Board::starting();
        let err = b.make_move(&mv("pe7-e5")).unwrap_err();
        assert!(matches!(err, ChessError::IllegalMove { .. }));
        assert_eq!(b.turn(), Color::White);
    }

    #[test]
    fn moving_into_check_is_illegal() {
        let mut b = Board::from_fen("4k3/8/8/8/8/8/3r4/4K3 w - -").unwrap();
        let before = b.clone();
        let err = b.make_move(&mv("ke1-e2")).unwrap_err();
        assert!(matches!(err, ChessError::IllegalMove { .. }));
        assert_eq!(b, before);
    }

    #[test]
    fn en_passant_capture_removes_passed_pawn() {
        let mut b = Board::empty(Color::White);
        let mut black = Piece::new(PieceKind::Pawn, Color::Black, Square::new(2, 5));
        black.can_en_passant = true;
        b.add(black);
        b.add(Piece::new(PieceKind::Pawn, Color::White, Square::new(3, 5)));

        b.make_move(&Move::new(PieceKind::Pawn, Square::new(3, 5), Square::new(2, 6)))
            .unwrap();

        assert_eq!(b.piece(0).position, Square::CAPTURED);
        assert_eq!(b.piece(1).position, Square::new(2, 6));
    }

    #[test]
    fn en_passant_right_expires_after_one_ply() {
        let mut b = Board::starting();
        b.make_move(&mv("pe2-e4")).unwrap();
        assert!(b.piece_at(sq("e4")).unwrap().can_en_passant);
        assert_eq!(b.en_passant_target(), Some(sq("e3")));

        b.make_move(&mv("ng8-f6")).unwrap();
        assert!(!b.piece_at(sq("e4")).unwrap().can_en_passant);
        assert_eq!(b.en_passant_target(), None);
    }

    #[test]
    fn at_most_one_pawn_can_be_taken_en_passant() {
        let mut b = Board::starting();
        for text in ["pe2-e4", "pd7-d5", "pe4-e5", "pf7-f5"] {
            b.make_move(&mv(text)).unwrap();
            let flagged = b.live_pieces().filter(|(_, p)| p.can_en_passant).count();
            assert!(flagged <= 1);
        }
        b.make_move(&mv("pe5-f6")).unwrap();
        assert!(b.piece_at(sq("f5")).is_none());
        assert_eq!(
            b.to_fen(),
            "rnbqkbnr/ppp1p1pp/5P2/3p4/8/8/PPPP1PPP/RNBQKBNR b KQkq -"
        );
    }

    #[test]
    fn double_move_only_once() {
        let mut b = Board::starting();
        b.make_move(&mv("pa2-a3")).unwrap();
        b.make_move(&mv("pa7-a6")).unwrap();
        let err = b.make_move(&mv("pa3-a5")).unwrap_err();
        assert!(matches!(err, ChessError::IllegalMove { .. }));
    }

    #[test]
    fn promotion_defaults_to_queen() {
        let mut b = Board::from_fen("7k/P7/8/8/8/8/8/4K3 w - -").unwrap();
        b.make_move(&mv("pa7-a8")).unwrap();
        let promoted = b.piece_at(sq("a8")).unwrap();
        assert_eq!(promoted.kind, PieceKind::Queen);
        assert_eq!(promoted.value(), 900);
    }

    #[test]
    fn promotion_to_requested_kind() {
        let mut b = Board::from_fen("7k/P7/8/8/8/8/8/4K3 w - -").unwrap();
        let promo =
            Move::with_promotion(PieceKind::Pawn, sq("a7"), sq("a8"), PieceKind::Knight);
        b.make_move(&promo).unwrap();
        assert_eq!(b.piece_at(sq("a8")).unwrap().kind, PieceKind::Knight);
    }

    #[test]
    fn promotion_to_king_is_rejected() {
        let mut b = Board::from_fen("7k/P7/8/8/8/8/8/4K3 w - -").unwrap();
        let before = b.clone();
        let promo = Move::with_promotion(PieceKind::Pawn, sq("a7"), sq("a8"), PieceKind::King);
        assert!(matches!(
            b.make_move(&promo),
            Err(ChessError::IllegalMove { .. })
        ));
        assert_eq!(b, before);
    }

    #[test]
    fn moving_rook_loses_castling_right() {
        let mut b = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -").unwrap();
        b.make_move(&mv("rh1-h2")).unwrap();
        b.make_move(&mv("ra8-b8")).unwrap();
        b.make_move(&mv("rh2-h1")).unwrap();
        assert_eq!(b.to_fen(), "1r2k2r/8/8/8/8/8/8/R3K2R b Qk -");
    }

    #[test]
    fn force_move_skips_legality() {
        let mut b = Board::starting();
        b.force_move(&mv("pe2-e5")).unwrap();
        assert!(b.piece_at(sq("e5")).is_some());
        assert_eq!(b.turn(), Color::Black);

        let err = b.force_move(&mv("qd4-d5")).unwrap_err();
        assert!(matches!(err, ChessError::PieceNotFound { .. }));
    }

    #[test]
    fn turn_flips_once_per_move() {
        let mut b = Board::starting();
        b.make_move(&mv("ng1-f3")).unwrap();
        assert_eq!(b.turn(), Color::Black);
        b.make_move(&mv("ng8-f6")).unwrap();
        assert_eq!(b.turn(), Color::White);
    }
}
