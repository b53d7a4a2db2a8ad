pub mod apply;
pub mod attacks;
pub mod board;
pub mod castle;
pub mod movegen;
pub mod piece;
pub mod status;
pub mod types;

pub use board::{Board, START_FEN};
pub use movegen::{legal_moves, legal_moves_for};
pub use piece::{Movement, Piece};
pub use status::game_status;
pub use types::*;
