//! Single-board chess engine with a negamax opponent.
//!
//! - `engine` — board model and rules (move generation, check, castling,
//!   en passant, promotion, game status, FEN).
//! - `ai` — negamax search, material evaluation and the opening book.
//! - `worker` — the one live game, run on a dedicated thread.
//! - `api` — the HTTP surface in front of the worker.

pub mod ai;
pub mod api;
pub mod config;
pub mod engine;
pub mod worker;
