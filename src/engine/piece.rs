//! Pieces and their movement descriptors.
//!
//! Every kind except the pawn moves by walking a fixed table of unit vectors,
//! either one step (king, knight) or repeatedly until blocked (queen, rook,
//! bishop). Pawns get a dedicated rule in the move generator.

use crate::engine::types::{Color, PieceKind, Square};

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
    (2, 1),
    (-2, 1),
    (2, -1),
    (-2, -1),
];

/// How a piece kind moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    /// Walk each vector once, or repeatedly when `sliding`.
    Walk {
        directions: &'static [(i8, i8)],
        sliding: bool,
    },
    /// Forward push, double push, diagonal captures and en passant.
    Pawn,
}

impl PieceKind {
    pub fn movement(self) -> Movement {
        match self {
            PieceKind::King => Movement::Walk {
                directions: &ALL_DIRECTIONS,
                sliding: false,
            },
            PieceKind::Queen => Movement::Walk {
                directions: &ALL_DIRECTIONS,
                sliding: true,
            },
            PieceKind::Rook => Movement::Walk {
                directions: &ORTHOGONAL,
                sliding: true,
            },
            PieceKind::Bishop => Movement::Walk {
                directions: &DIAGONAL,
                sliding: true,
            },
            PieceKind::Knight => Movement::Walk {
                directions: &KNIGHT_JUMPS,
                sliding: false,
            },
            PieceKind::Pawn => Movement::Pawn,
        }
    }
}

/// A piece on (or captured from) the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub position: Square,
    pub color: Color,
    /// Unmoved king or rook.
    pub can_castle: bool,
    /// Pawn that double-moved on the previous ply.
    pub can_en_passant: bool,
    /// Pawn that has not moved yet.
    pub can_double_move: bool,
}

impl Piece {
    /// A piece with all state flags cleared.
    pub fn new(kind: PieceKind, color: Color, position: Square) -> Self {
        Piece {
            kind,
            position,
            color,
            can_castle: false,
            can_en_passant: false,
            can_double_move: false,
        }
    }

    /// A piece in its initial state: pawns may double-move, kings and rooks
    /// may castle.
    pub fn unmoved(kind: PieceKind, color: Color, position: Square) -> Self {
        Piece {
            can_castle: matches!(kind, PieceKind::King | PieceKind::Rook),
            can_double_move: kind == PieceKind::Pawn,
            ..Piece::new(kind, color, position)
        }
    }

    #[inline]
    pub fn is_captured(&self) -> bool {
        self.position == Square::CAPTURED
    }

    #[inline]
    pub fn value(&self) -> i32 {
        self.kind.value()
    }

    #[inline]
    pub fn movement(&self) -> Movement {
        self.kind.movement()
    }

    pub(crate) fn capture(&mut self) {
        self.position = Square::CAPTURED;
        self.can_castle = false;
        self.can_en_passant = false;
        self.can_double_move = false;
    }
}
