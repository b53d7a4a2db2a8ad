use std::fmt;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// The two sides in a chess game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Signed form used by the evaluator: White = +1, Black = -1.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank on which this colour's pieces start (1 or 8).
    #[inline]
    pub const fn home_rank(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => 8,
        }
    }

    /// Rank direction in which this colour's pawns advance.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

// ---------------------------------------------------------------------------
// PieceKind
// ---------------------------------------------------------------------------

/// The six piece kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    /// Material value in centipawns.
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0, // never captured, never counted
        }
    }

    /// Lowercase tag letter used in move text ("pe2-e4").
    pub fn tag(self) -> char {
        match self {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        }
    }

    /// Parse a tag letter (case-insensitive).
    pub fn from_tag(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'k' => Some(PieceKind::King),
            'q' => Some(PieceKind::Queen),
            'r' => Some(PieceKind::Rook),
            'b' => Some(PieceKind::Bishop),
            'n' => Some(PieceKind::Knight),
            'p' => Some(PieceKind::Pawn),
            _ => None,
        }
    }

    /// FEN letter: uppercase for white, lowercase for black.
    pub fn to_char(self, color: Color) -> char {
        match color {
            Color::White => self.tag().to_ascii_uppercase(),
            Color::Black => self.tag(),
        }
    }

    /// Whether a pawn may promote to this kind.
    pub fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::King => write!(f, "king"),
            PieceKind::Queen => write!(f, "queen"),
            PieceKind::Rook => write!(f, "rook"),
            PieceKind::Bishop => write!(f, "bishop"),
            PieceKind::Knight => write!(f, "knight"),
            PieceKind::Pawn => write!(f, "pawn"),
        }
    }
}

// ---------------------------------------------------------------------------
// Square
// ---------------------------------------------------------------------------

/// A board coordinate. Files and ranks run 1..=8 on the board; anything else
/// is off the board. `Square::CAPTURED` (0,0) is where taken pieces live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    pub file: i8,
    pub rank: i8,
}

impl Square {
    /// Sentinel position of a captured piece.
    pub const CAPTURED: Square = Square { file: 0, rank: 0 };

    #[inline]
    pub const fn new(file: i8, rank: i8) -> Self {
        Square { file, rank }
    }

    #[inline]
    pub fn is_on_board(self) -> bool {
        (1..=8).contains(&self.file) && (1..=8).contains(&self.rank)
    }

    #[inline]
    pub fn offset(self, df: i8, dr: i8) -> Self {
        Square::new(self.file + df, self.rank + dr)
    }

    /// Parse algebraic notation like "e4".
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file < 8 && rank < 8 {
            Some(Square::new(file as i8 + 1, rank as i8 + 1))
        } else {
            None
        }
    }

    /// Convert to algebraic notation. Off-board squares render as "-".
    pub fn to_algebraic(self) -> String {
        if !self.is_on_board() {
            return "-".to_string();
        }
        let file = (b'a' + (self.file - 1) as u8) as char;
        let rank = (b'0' + self.rank as u8) as char;
        format!("{file}{rank}")
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

// ---------------------------------------------------------------------------
// Occupancy
// ---------------------------------------------------------------------------

/// Result of asking the board what stands on a square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occupancy {
    Empty,
    Occupied(Color),
    OffBoard,
}

impl Occupancy {
    /// Integer view: +1 white, -1 black, 0 empty, -2 off the board.
    pub fn sign(self) -> i32 {
        match self {
            Occupancy::Empty => 0,
            Occupancy::Occupied(color) => color.sign(),
            Occupancy::OffBoard => -2,
        }
    }
}

// ---------------------------------------------------------------------------
// Move
// ---------------------------------------------------------------------------

/// A move as submitted to or produced by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub piece: PieceKind,
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(piece: PieceKind, from: Square, to: Square) -> Self {
        Move {
            piece,
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(piece: PieceKind, from: Square, to: Square, promotion: PieceKind) -> Self {
        Move {
            piece,
            from,
            to,
            promotion: Some(promotion),
        }
    }

    /// Same begin and end squares, ignoring piece tag and promotion.
    pub fn same_path(&self, other: &Move) -> bool {
        self.from == other.from && self.to == other.to
    }

    /// Parse book notation: a piece letter and a hyphen-joined square pair,
    /// e.g. "pe2-e4" or "ng1-f3".
    pub fn from_book_notation(s: &str) -> Result<Self, ChessError> {
        let invalid = || ChessError::InvalidNotation(s.to_string());
        let mut chars = s.chars();
        let piece = chars
            .next()
            .and_then(PieceKind::from_tag)
            .ok_or_else(invalid)?;
        let (from, to) = chars.as_str().split_once('-').ok_or_else(invalid)?;
        let from = Square::from_algebraic(from).ok_or_else(invalid)?;
        let to = Square::from_algebraic(to).ok_or_else(invalid)?;
        Ok(Move::new(piece, from, to))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}-{}", self.piece.tag(), self.from, self.to)?;
        if let Some(promo) = self.promotion {
            write!(f, "={}", promo.tag())?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// GameStatus
// ---------------------------------------------------------------------------

/// Current status of a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    Check,
    Checkmate,
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    pub fn as_str(&self) -> &str {
        match self {
            GameStatus::Active => "active",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
            GameStatus::Draw(reason) => reason.as_str(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::Draw(_)
        )
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reason for a draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawReason {
    InsufficientMaterial,
}

impl DrawReason {
    pub fn as_str(&self) -> &str {
        match self {
            DrawReason::InsufficientMaterial => "insufficient_material",
        }
    }
}

// ---------------------------------------------------------------------------
// ChessError
// ---------------------------------------------------------------------------

/// Domain errors for the chess engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    #[error("no live {kind} on {square}")]
    PieceNotFound { kind: PieceKind, square: Square },

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("illegal move: {from} -> {to}: {reason}")]
    IllegalMove {
        from: Square,
        to: Square,
        reason: String,
    },

    #[error("invalid square notation: {0}")]
    InvalidSquare(String),

    #[error("invalid move notation: {0}")]
    InvalidNotation(String),

    #[error("invalid FEN string: {0}")]
    InvalidFen(String),

    #[error("game is already over: {0}")]
    GameOver(String),
}

impl ChessError {
    pub(crate) fn illegal(mv: &Move, reason: impl Into<String>) -> Self {
        ChessError::IllegalMove {
            from: mv.from,
            to: mv.to,
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn color_toggle_and_sign() {
        assert_eq!(!Color::White, Color::Black);
        assert_eq!(!Color::Black, Color::White);
        assert_eq!(Color::White.sign(), 1);
        assert_eq!(Color::Black.sign(), -1);
    }

    #[test]
    fn piece_kind_values() {
        assert_eq!(PieceKind::Pawn.value(), 100);
        assert_eq!(PieceKind::Knight.value(), 320);
        assert_eq!(PieceKind::Bishop.value(), 330);
        assert_eq!(PieceKind::Rook.value(), 500);
        assert_eq!(PieceKind::Queen.value(), 900);
        assert_eq!(PieceKind::King.value(), 0);
    }

    #[test]
    fn piece_kind_tags() {
        for c in ['k', 'q', 'r', 'b', 'n', 'p'] {
            let kind = PieceKind::from_tag(c).unwrap();
            assert_eq!(kind.tag(), c);
            assert_eq!(PieceKind::from_tag(c.to_ascii_uppercase()), Some(kind));
        }
        assert_eq!(PieceKind::from_tag('x'), None);
        assert_eq!(PieceKind::Knight.to_char(Color::White), 'N');
        assert_eq!(PieceKind::Knight.to_char(Color::Black), 'n');
    }

    #[test]
    fn square_from_algebraic() {
        assert_eq!(Square::from_algebraic("a1"), Some(Square::new(1, 1)));
        assert_eq!(Square::from_algebraic("h8"), Some(Square::new(8, 8)));
        assert_eq!(Square::from_algebraic("e4"), Some(Square::new(5, 4)));
    }

    #[test]
    fn square_from_algebraic_invalid() {
        assert_eq!(Square::from_algebraic(""), None);
        assert_eq!(Square::from_algebraic("a"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a0"), None);
        assert_eq!(Square::from_algebraic("e44"), None);
    }

    #[test]
    fn square_to_algebraic() {
        assert_eq!(Square::new(1, 1).to_algebraic(), "a1");
        assert_eq!(Square::new(8, 8).to_algebraic(), "h8");
        assert_eq!(Square::new(5, 4).to_algebraic(), "e4");
        assert_eq!(Square::CAPTURED.to_algebraic(), "-");
    }

    #[test]
    fn square_bounds() {
        assert!(Square::new(1, 8).is_on_board());
        assert!(!Square::CAPTURED.is_on_board());
        assert!(!Square::new(9, 1).is_on_board());
        assert!(!Square::new(4, -1).is_on_board());
        assert_eq!(sq("e2").offset(0, 2), sq("e4"));
    }

    #[test]
    fn occupancy_sign() {
        assert_eq!(Occupancy::Occupied(Color::White).sign(), 1);
        assert_eq!(Occupancy::Occupied(Color::Black).sign(), -1);
        assert_eq!(Occupancy::Empty.sign(), 0);
        assert_eq!(Occupancy::OffBoard.sign(), -2);
    }

    #[test]
    fn move_book_notation() {
        let mv = Move::from_book_notation("pe2-e4").unwrap();
        assert_eq!(mv, Move::new(PieceKind::Pawn, sq("e2"), sq("e4")));
        let mv = Move::from_book_notation("ng8-f6").unwrap();
        assert_eq!(mv.piece, PieceKind::Knight);
        assert_eq!(mv.to, sq("f6"));
    }

    #[test]
    fn move_book_notation_invalid() {
        for bad in ["", "p", "xe2-e4", "pe2e4", "pe2-e9", "pz2-e4"] {
            assert!(
                matches!(
                    Move::from_book_notation(bad),
                    Err(ChessError::InvalidNotation(_))
                ),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn move_display() {
        let mv = Move::new(PieceKind::Pawn, sq("e2"), sq("e4"));
        assert_eq!(mv.to_string(), "pe2-e4");
        let promo = Move::with_promotion(PieceKind::Pawn, sq("a7"), sq("a8"), PieceKind::Knight);
        assert_eq!(promo.to_string(), "pa7-a8=n");
    }

    #[test]
    fn game_status_strings() {
        assert_eq!(GameStatus::Active.as_str(), "active");
        assert_eq!(GameStatus::Check.as_str(), "check");
        assert_eq!(GameStatus::Checkmate.as_str(), "checkmate");
        assert_eq!(GameStatus::Stalemate.as_str(), "stalemate");
        assert_eq!(
            GameStatus::Draw(DrawReason::InsufficientMaterial).as_str(),
            "insufficient_material"
        );
    }

    #[test]
    fn game_status_is_game_over() {
        assert!(!GameStatus::Active.is_game_over());
        assert!(!GameStatus::Check.is_game_over());
        assert!(GameStatus::Checkmate.is_game_over());
        assert!(GameStatus::Stalemate.is_game_over());
        assert!(GameStatus::Draw(DrawReason::InsufficientMaterial).is_game_over());
    }

    #[test]
    fn error_messages() {
        let err = ChessError::PieceNotFound {
            kind: PieceKind::Rook,
            square: sq("h8"),
        };
        assert_eq!(err.to_string(), "no live rook on h8");
        let mv = Move::new(PieceKind::Rook, sq("a1"), sq("d4"));
        assert_eq!(
            ChessError::illegal(&mv, "not reachable").to_string(),
            "illegal move: a1 -> d4: not reachable"
        );
    }
}
