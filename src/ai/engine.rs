//! AI Engine — trait definition and MinimaxAi.
//!
//! The `AiEngine` trait defines the interface for all AI engines.
//! Two implementations are provided:
//!   - `MinimaxAi` — fixed-depth negamax search with alpha-beta pruning.
//!   - `BookAi`    — opening book first, search on a miss (see `ai::book`).

use std::time::Instant;

use tracing::debug;

use crate::engine::board::Board;
use crate::engine::movegen::legal_moves;
use crate::engine::status::game_status;
use crate::engine::types::{ChessError, Move};

use super::evaluation::{INF, is_mate_score, material, terminal_score};

/// Search depth used when none is configured.
pub const DEFAULT_DEPTH: u32 = 4;

// =========================================================================
// AiEngine trait
// =========================================================================

/// The AI engine interface.
pub trait AiEngine: Send + Sync {
    /// Select a move for the side to move. Fails with `GameOver` when there
    /// is none.
    fn best_move(&self, board: &Board) -> Result<Move, ChessError>;

    /// Human-readable name for this engine.
    fn name(&self) -> &str;
}

// =========================================================================
// MinimaxAi — Negamax with alpha-beta pruning
// =========================================================================

/// Search statistics.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub depth: u32,
    pub score: i32,
    pub time_ms: u64,
}

#[derive(Default)]
struct SearchContext {
    nodes: u64,
}

/// Negamax with alpha-beta pruning.
///
/// Returns the score from the side-to-move's perspective. Every child is
/// searched on its own copy of the board; the copy is dropped afterwards.
fn negamax(
    board: &Board,
    depth: u32,
    ply: u32,
    mut alpha: i32,
    beta: i32,
    ctx: &mut SearchContext,
) -> Result<i32, ChessError> {
    ctx.nodes += 1;

    // Terminal positions are detected at every depth, including the horizon,
    // so a mate on the last ply is not scored as plain material.
    let moves = legal_moves(board);
    if let Some(score) = terminal_score(board, &moves) {
        return Ok(if score < 0 { score + ply as i32 } else { score });
    }

    if depth == 0 {
        return Ok(material(board));
    }

    let mut best_score = -INF;
    for mv in &moves {
        let mut child = board.clone();
        child.force_move(mv)?;
        let score = -negamax(&child, depth - 1, ply + 1, -beta, -alpha, ctx)?;

        if score > best_score {
            best_score = score;
        }
        if score > alpha {
            alpha = score;
        }
        if alpha >= beta {
            break; // Beta cutoff.
        }
    }

    Ok(best_score)
}

/// Minimax AI engine using negamax with alpha-beta pruning.
#[derive(Debug, Clone)]
pub struct MinimaxAi {
    depth: u32,
}

impl MinimaxAi {
    /// An engine searching `depth` plies (at least one).
    pub fn new(depth: u32) -> Self {
        Self {
            depth: depth.max(1),
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Run a fixed-depth search. Returns (best_move, stats); the move is
    /// `None` when the side to move has no legal move.
    ///
    /// Moves are searched in generation order and only a strictly better
    /// score replaces the current best, so equal positions always yield the
    /// same move.
    pub fn search_fixed_depth(
        &self,
        board: &Board,
    ) -> Result<(Option<Move>, SearchStats), ChessError> {
        let start = Instant::now();
        let mut ctx = SearchContext::default();

        let moves = legal_moves(board);
        let mut best: Option<(Move, i32)> = None;
        let mut alpha = -INF;

        for mv in &moves {
            let mut child = board.clone();
            child.force_move(mv)?;
            let score = -negamax(&child, self.depth - 1, 1, -INF, -alpha, &mut ctx)?;

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((*mv, score));
                alpha = alpha.max(score);
            }
        }

        let stats = SearchStats {
            nodes: ctx.nodes + 1,
            depth: self.depth,
            score: best.map_or(0, |(_, score)| score),
            time_ms: start.elapsed().as_millis() as u64,
        };
        Ok((best.map(|(mv, _)| mv), stats))
    }
}

impl Default for MinimaxAi {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl AiEngine for MinimaxAi {
    fn best_move(&self, board: &Board) -> Result<Move, ChessError> {
        let (best, stats) = self.search_fixed_depth(board)?;
        debug!(
            nodes = stats.nodes,
            depth = stats.depth,
            score = stats.score,
            time_ms = stats.time_ms,
            mate = is_mate_score(stats.score),
            "search finished"
        );

        match best {
            Some(mv) => Ok(mv),
            None => Err(ChessError::GameOver(game_status(board).to_string())),
        }
    }

    fn name(&self) -> &str {
        "MinimaxAi"
    }
}

// =========================================================================
// Tests
// =========================================================================
