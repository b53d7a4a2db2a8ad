//! The single live game.
//!
//! A `Session` owns the one `Board` of the process together with the AI that
//! plays against the submitted moves. It is only ever touched from the worker
//! thread.

use tracing::{debug, warn};

use crate::ai::AiEngine;
use crate::engine::board::Board;
use crate::engine::status::game_status;
use crate::engine::types::{ChessError, GameStatus, Move, PieceKind, Square};

/// An opponent move as it arrives from outside: squares and an optional
/// promotion, with the piece kind still to be resolved from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl MoveRequest {
    /// Parse algebraic squares ("e2") and a promotion letter ("q").
    pub fn parse(from: &str, to: &str, promotion: Option<&str>) -> Result<Self, ChessError> {
        let square = |s: &str| {
            Square::from_algebraic(s).ok_or_else(|| ChessError::InvalidSquare(s.to_string()))
        };
        let promotion = promotion
            .map(|p| {
                let mut chars = p.chars();
                match (chars.next().and_then(PieceKind::from_tag), chars.next()) {
                    (Some(kind), None) => Ok(kind),
                    _ => Err(ChessError::InvalidNotation(p.to_string())),
                }
            })
            .transpose()?;
        Ok(MoveRequest {
            from: square(from)?,
            to: square(to)?,
            promotion,
        })
    }
}

/// Result of one exchange: the engine's reply (if the game was still going)
/// and the position afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub reply: Option<Move>,
    pub status: GameStatus,
    pub fen: String,
}

/// Status and key of the current position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub status: GameStatus,
    pub fen: String,
}

pub struct Session {
    board: Board,
    ai: Box<dyn AiEngine>,
}

impl Session {
    /// A session at the starting position.
    pub fn new(ai: Box<dyn AiEngine>) -> Self {
        Self::with_board(Board::starting(), ai)
    }

    pub fn with_board(board: Board, ai: Box<dyn AiEngine>) -> Self {
        Session { board, ai }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn engine_name(&self) -> &str {
        self.ai.name()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: game_status(&self.board),
            fen: self.board.to_fen(),
        }
    }

    /// Back to the starting position.
    pub fn reset(&mut self) -> Snapshot {
        self.board = Board::starting();
        debug!("board reset");
        self.snapshot()
    }

    /// Apply the opponent's move, then pick and apply the engine's reply.
    ///
    /// The opponent move is validated like any other move; on error the
    /// board is unchanged. When the opponent's move ends the game there is
    /// no reply.
    pub fn play(&mut self, request: MoveRequest) -> Result<MoveOutcome, ChessError> {
        let before = game_status(&self.board);
        if before.is_game_over() {
            return Err(ChessError::GameOver(before.to_string()));
        }

        let kind = self
            .board
            .piece_at(request.from)
            .map(|p| p.kind)
            .ok_or(ChessError::EmptySquare(request.from))?;
        let opponent = Move {
            piece: kind,
            from: request.from,
            to: request.to,
            promotion: request.promotion,
        };
        let previous = self.board.clone();
        if let Err(e) = self.board.make_move(&opponent) {
            warn!(mv = %opponent, error = %e, "rejected move");
            return Err(e);
        }
        debug!(mv = %opponent, "opponent moved");

        let status = game_status(&self.board);
        if status.is_game_over() {
            return Ok(MoveOutcome {
                reply: None,
                status,
                fen: self.board.to_fen(),
            });
        }

        let reply = match self.reply() {
            Ok(reply) => reply,
            Err(e) => {
                warn!(mv = %opponent, error = %e, "no engine reply, move taken back");
                self.board = previous;
                return Err(e);
            }
        };

        let Snapshot { status, fen } = self.snapshot();
        Ok(MoveOutcome {
            reply: Some(reply),
            status,
            fen,
        })
    }

    /// Pick the engine's move and apply it. The board is untouched on error.
    fn reply(&mut self) -> Result<Move, ChessError> {
        let reply = self.ai.best_move(&self.board)?;
        self.board.force_move(&reply)?;
        debug!(mv = %reply, engine = self.ai.name(), "engine replied");
        Ok(reply)
    }
}

// =========================================================================
// Tests
// =========================================================================
