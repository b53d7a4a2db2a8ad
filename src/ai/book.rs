//! Opening book.
//!
//! A static table from the canonical position key (`Board::to_fen`) to a set
//! of known replies. On a hit one reply is picked at random and search is
//! skipped entirely.

use std::collections::HashMap;
use std::sync::OnceLock;

use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::engine::board::Board;
use crate::engine::movegen::legal_moves;
use crate::engine::types::{ChessError, Move};

use super::engine::AiEngine;

/// Built-in lines: the start position and the usual first replies.
const STANDARD_LINES: &[(&str, &[&str])] = &[
    // Start position.
    (
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -",
        &["pe2-e4", "pd2-d4"],
    ),
    // 1. e4
    (
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3",
        &["pe7-e5", "pc7-c5", "pe7-e6"],
    ),
    // 1. d4
    (
        "rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b KQkq d3",
        &["pd7-d5", "ng8-f6"],
    ),
    // 1. c4
    (
        "rnbqkbnr/pppppppp/8/8/2P5/8/PP1PPPPP/RNBQKBNR b KQkq c3",
        &["pe7-e5", "ng8-f6"],
    ),
    // 1. Nf3
    (
        "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b KQkq -",
        &["pd7-d5", "ng8-f6"],
    ),
    // 1. e4 e5
    (
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6",
        &["ng1-f3"],
    ),
    // 1. e4 e5 2. Nf3
    (
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq -",
        &["nb8-c6"],
    ),
    // 1. d4 d5
    (
        "rnbqkbnr/ppp1pppp/8/3p4/3P4/8/PPP1PPPP/RNBQKBNR w KQkq d6",
        &["pc2-c4", "ng1-f3"],
    ),
];

/// Position key → candidate replies.
#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    entries: HashMap<String, Vec<Move>>,
}

impl OpeningBook {
    /// Build a book from (position, replies) pairs. Positions may be given
    /// as four- or six-field FEN; they are normalised to the canonical key.
    pub fn from_entries<'a, I, R>(entries: I) -> Result<Self, ChessError>
    where
        I: IntoIterator<Item = (&'a str, R)>,
        R: IntoIterator<Item = &'a str>,
    {
        let mut book = OpeningBook::default();
        for (fen, replies) in entries {
            let key = Board::from_fen(fen)?.to_fen();
            let moves = replies
                .into_iter()
                .map(Move::from_book_notation)
                .collect::<Result<Vec<_>, _>>()?;
            book.entries.entry(key).or_default().extend(moves);
        }
        Ok(book)
    }

    /// The built-in book, parsed once.
    pub fn standard() -> &'static OpeningBook {
        static BOOK: OnceLock<OpeningBook> = OnceLock::new();
        BOOK.get_or_init(|| {
            let lines = STANDARD_LINES
                .iter()
                .map(|(fen, replies)| (*fen, replies.iter().copied()));
            OpeningBook::from_entries(lines).unwrap_or_else(|e| {
                warn!(error = %e, "built-in opening book rejected; running without one");
                OpeningBook::default()
            })
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replies listed for the position, if any.
    pub fn lookup(&self, board: &Board) -> Option<&[Move]> {
        self.entries.get(&board.to_fen()).map(Vec::as_slice)
    }

    /// A uniformly random reply for the position.
    pub fn choose(&self, board: &Board) -> Option<Move> {
        let replies = self.lookup(board)?;
        let mut rng = rand::thread_rng();
        replies.choose(&mut rng).copied()
    }
}

// =========================================================================
// BookAi
// =========================================================================

/// Plays from the opening book while it has an answer, then searches.
pub struct BookAi<E> {
    book: OpeningBook,
    fallback: E,
}

impl<E: AiEngine> BookAi<E> {
    pub fn new(book: OpeningBook, fallback: E) -> Self {
        Self { book, fallback }
    }

    /// The built-in book in front of `fallback`.
    pub fn standard(fallback: E) -> Self {
        Self::new(OpeningBook::standard().clone(), fallback)
    }
}

impl<E: AiEngine> AiEngine for BookAi<E> {
    fn best_move(&self, board: &Board) -> Result<Move, ChessError> {
        if let Some(mv) = self.book.choose(board) {
            if legal_moves(board)
                .iter()
                .any(|legal| legal.piece == mv.piece && legal.same_path(&mv))
            {
                debug!(%mv, "opening book hit");
                return Ok(mv);
            }
            warn!(%mv, fen = %board.to_fen(), "book reply is not legal here");
        }
        self.fallback.best_move(board)
    }

    fn name(&self) -> &str {
        "BookAi"
    }
}

// =========================================================================
// Tests
// =========================================================================
