//! Piece-list board representation.
//!
//! `Board` stores every piece that ever stood on it in a `Vec`. Captured
//! pieces stay in the list at `Square::CAPTURED`, so a piece index stays
//! valid for the whole game. Besides the pieces the board only tracks whose
//! turn it is; castling and en-passant state live on the pieces themselves.

use std::fmt;

use crate::engine::piece::Piece;
use crate::engine::types::{ChessError, Color, Occupancy, PieceKind, Square};

/// Back rank layout from the a-file to the h-file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Placement, side to move, castling and en-passant fields of the start position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -";

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// A chess position: an ordered piece collection plus the side to move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pieces: Vec<Piece>,
    turn: Color,
}

impl Board {
    /// A board with no pieces.
    pub fn empty(turn: Color) -> Self {
        Board {
            pieces: Vec::new(),
            turn,
        }
    }

    /// Standard starting position, White to move.
    pub fn starting() -> Self {
        let mut pieces = Vec::with_capacity(32);
        for color in [Color::White, Color::Black] {
            let home = color.home_rank();
            for (file, &kind) in (1..).zip(BACK_RANK.iter()) {
                pieces.push(Piece::unmoved(kind, color, Square::new(file, home)));
            }
            for file in 1..=8 {
                let sq = Square::new(file, home + color.forward());
                pieces.push(Piece::unmoved(PieceKind::Pawn, color, sq));
            }
        }
        Board {
            pieces,
            turn: Color::White,
        }
    }

    /// Append a piece, returning its index.
    pub fn add(&mut self, piece: Piece) -> usize {
        self.pieces.push(piece);
        self.pieces.len() - 1
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// All pieces, captured ones included.
    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    #[inline]
    pub fn piece(&self, index: usize) -> &Piece {
        &self.pieces[index]
    }

    #[inline]
    pub(crate) fn piece_mut(&mut self, index: usize) -> &mut Piece {
        &mut self.pieces[index]
    }

    #[inline]
    pub(crate) fn pieces_mut(&mut self) -> &mut [Piece] {
        &mut self.pieces
    }

    /// Whose turn it is.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn set_turn(&mut self, turn: Color) {
        self.turn = turn;
    }

    #[inline]
    pub(crate) fn flip_turn(&mut self) {
        self.turn = !self.turn;
    }

    /// Pieces still on the board, with their indices.
    pub fn live_pieces(&self) -> impl Iterator<Item = (usize, &Piece)> {
        self.pieces
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_captured())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// What stands on `sq`. Squares outside the board report `OffBoard`.
    pub fn occupied(&self, sq: Square) -> Occupancy {
        if !sq.is_on_board() {
            return Occupancy::OffBoard;
        }
        match self.piece_at(sq) {
            Some(piece) => Occupancy::Occupied(piece.color),
            None => Occupancy::Empty,
        }
    }

    /// Index of the live piece on `sq`.
    pub fn index_at(&self, sq: Square) -> Option<usize> {
        if !sq.is_on_board() {
            return None;
        }
        self.pieces.iter().position(|p| p.position == sq)
    }

    /// The live piece on `sq`.
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.index_at(sq).map(|i| &self.pieces[i])
    }

    /// Index of the live piece of `kind` standing on `sq`.
    pub fn find(&self, kind: PieceKind, sq: Square) -> Option<usize> {
        self.index_at(sq).filter(|&i| self.pieces[i].kind == kind)
    }

    /// Square of the king of `color`, if it has one.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.live_pieces()
            .find(|(_, p)| p.kind == PieceKind::King && p.color == color)
            .map(|(_, p)| p.position)
    }

    /// The square behind the pawn that just double-moved, if any.
    pub fn en_passant_target(&self) -> Option<Square> {
        self.live_pieces()
            .find(|(_, p)| p.can_en_passant)
            .map(|(_, p)| p.position.offset(0, -p.color.forward()))
    }

    /// Whether `color` keeps the right to castle towards the rook on `rook_file`.
    pub fn has_castling_right(&self, color: Color, rook_file: i8) -> bool {
        let Some(king) = self
            .live_pieces()
            .map(|(_, p)| p)
            .find(|p| p.kind == PieceKind::King && p.color == color)
        else {
            return false;
        };
        if !king.can_castle {
            return false;
        }
        let rook_sq = Square::new(rook_file, king.position.rank);
        self.piece_at(rook_sq).is_some_and(|p| {
            p.kind == PieceKind::Rook && p.color == color && p.can_castle
        })
    }

    // -----------------------------------------------------------------------
    // Board display (8×8 text grid)
    // -----------------------------------------------------------------------

    /// Render the board as an 8-line string (rank 8 at top), useful for debugging.
    pub fn board_string(&self) -> String {
        let mut s = String::with_capacity(200);
        for rank in (1..=8).rev() {
            s.push((b'0' + rank as u8) as char);
            s.push(' ');
            for file in 1..=8 {
                let ch = match self.piece_at(Square::new(file, rank)) {
                    Some(p) => p.kind.to_char(p.color),
                    None => '.',
                };
                s.push(ch);
                if file < 8 {
                    s.push(' ');
                }
            }
            s.push('\n');
        }
        s.push_str("  a b c d e f g h");
        s
    }
}

// ---------------------------------------------------------------------------
// FEN parsing & generation
// ---------------------------------------------------------------------------

impl Board {
    /// Parse a FEN string. The half-move clock and full-move number are
    /// optional and ignored.
    ///
    /// Pawns on their start rank may double-move, the castling field grants
    /// `can_castle` to the king and the matching corner rook, and the
    /// en-passant field marks the pawn standing in front of the target.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 4 && fields.len() != 6 {
            return Err(ChessError::InvalidFen(format!(
                "expected 4 or 6 fields, got {}",
                fields.len()
            )));
        }

        let mut board = Board::empty(Color::White);

        // ----- Field 1: Piece placement -----
        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(ChessError::InvalidFen(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 8 - rank_idx as i8;
            let mut file: i8 = 1;
            for ch in rank_str.chars() {
                if file > 8 {
                    return Err(ChessError::InvalidFen(format!(
                        "too many squares in rank {rank}"
                    )));
                }
                if let Some(digit) = ch.to_digit(10) {
                    if !(1..=8).contains(&digit) {
                        return Err(ChessError::InvalidFen(format!(
                            "invalid empty count '{ch}' in rank {rank}"
                        )));
                    }
                    file += digit as i8;
                } else if let Some(kind) = PieceKind::from_tag(ch) {
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let mut piece = Piece::new(kind, color, Square::new(file, rank));
                    piece.can_double_move =
                        kind == PieceKind::Pawn && rank == color.home_rank() + color.forward();
                    board.add(piece);
                    file += 1;
                } else {
                    return Err(ChessError::InvalidFen(format!(
                        "invalid character '{ch}' in piece placement"
                    )));
                }
            }
            if file != 9 {
                return Err(ChessError::InvalidFen(format!(
                    "rank {rank} has {} squares instead of 8",
                    file - 1
                )));
            }
        }

        // Validate exactly one king per side.
        for color in [Color::White, Color::Black] {
            let kings = board
                .live_pieces()
                .filter(|(_, p)| p.kind == PieceKind::King && p.color == color)
                .count();
            if kings != 1 {
                return Err(ChessError::InvalidFen(format!(
                    "{color} has {kings} kings (expected 1)"
                )));
            }
        }

        // ----- Field 2: Side to move -----
        board.turn = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(ChessError::InvalidFen(format!(
                    "invalid side to move: '{other}'"
                )));
            }
        };

        // ----- Field 3: Castling availability -----
        if fields[2] != "-" {
            for c in fields[2].chars() {
                let (color, rook_file) = match c {
                    'K' => (Color::White, 8),
                    'Q' => (Color::White, 1),
                    'k' => (Color::Black, 8),
                    'q' => (Color::Black, 1),
                    _ => {
                        return Err(ChessError::InvalidFen(format!(
                            "invalid castling string: '{}'",
                            fields[2]
                        )));
                    }
                };
                board.grant_castling(color, rook_file)?;
            }
        }

        // ----- Field 4: En passant target square -----
        if fields[3] != "-" {
            let target = Square::from_algebraic(fields[3]).ok_or_else(|| {
                ChessError::InvalidFen(format!("invalid en passant square: '{}'", fields[3]))
            })?;
            let pawn_sq = match target.rank {
                3 => target.offset(0, 1),
                6 => target.offset(0, -1),
                _ => {
                    return Err(ChessError::InvalidFen(format!(
                        "en passant square {} is not on rank 3 or 6",
                        fields[3]
                    )));
                }
            };
            let index = board
                .find(PieceKind::Pawn, pawn_sq)
                .ok_or_else(|| {
                    ChessError::InvalidFen(format!(
                        "no pawn in front of en passant square {}",
                        fields[3]
                    ))
                })?;
            board.pieces[index].can_en_passant = true;
        }

        Ok(board)
    }

    fn grant_castling(&mut self, color: Color, rook_file: i8) -> Result<(), ChessError> {
        let home = color.home_rank();
        let king = self
            .pieces
            .iter()
            .position(|p| p.kind == PieceKind::King && p.color == color && p.position.rank == home);
        let rook = self
            .find(PieceKind::Rook, Square::new(rook_file, home))
            .filter(|&i| self.pieces[i].color == color);
        match (king, rook) {
            (Some(k), Some(r)) => {
                self.pieces[k].can_castle = true;
                self.pieces[r].can_castle = true;
                Ok(())
            }
            _ => Err(ChessError::InvalidFen(format!(
                "{color} castling right without king and rook on the home rank"
            ))),
        }
    }

    /// Canonical position key: the placement, side to move, castling and
    /// en-passant fields of the FEN.
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(80);

        // ----- Field 1: Piece placement -----
        for rank in (1..=8).rev() {
            let mut empty_count = 0u8;
            for file in 1..=8 {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push((b'0' + empty_count) as char);
                            empty_count = 0;
                        }
                        fen.push(piece.kind.to_char(piece.color));
                    }
                    None => {
                        empty_count += 1;
                    }
                }
            }
            if empty_count > 0 {
                fen.push((b'0' + empty_count) as char);
            }
            if rank > 1 {
                fen.push('/');
            }
        }

        // ----- Field 2: Side to move -----
        fen.push(' ');
        fen.push(match self.turn {
            Color::White => 'w',
            Color::Black => 'b',
        });

        // ----- Field 3: Castling -----
        fen.push(' ');
        let before = fen.len();
        for (color, rook_file, c) in [
            (Color::White, 8, 'K'),
            (Color::White, 1, 'Q'),
            (Color::Black, 8, 'k'),
            (Color::Black, 1, 'q'),
        ] {
            if self.has_castling_right(color, rook_file) {
                fen.push(c);
            }
        }
        if fen.len() == before {
            fen.push('-');
        }

        // ----- Field 4: En passant -----
        fen.push(' ');
        match self.en_passant_target() {
            Some(sq) => fen.push_str(&sq.to_algebraic()),
            None => fen.push('-'),
        }

        fen
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
