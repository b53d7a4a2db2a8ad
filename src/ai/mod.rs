pub mod book;
pub mod engine;
pub mod evaluation;

pub use book::{BookAi, OpeningBook};
pub use engine::{AiEngine, DEFAULT_DEPTH, MinimaxAi, SearchStats};

/// The engine the service plays with: search at `depth`, behind the
/// built-in opening book when `use_book` is set.
pub fn default_engine(depth: u32, use_book: bool) -> Box<dyn AiEngine> {
    let search = MinimaxAi::new(depth);
    if use_book {
        Box::new(BookAi::standard(search))
    } else {
        Box::new(search)
    }
}
