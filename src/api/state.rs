use std::io;
use std::sync::Arc;
use std::time::Instant;

use crate::ai;
use crate::config::AppConfig;
use crate::worker::{Session, WorkerHandle};

/// Shared application state passed to all handlers via Axum's State extractor.
pub struct AppState {
    /// The only way to reach the live board.
    pub worker: WorkerHandle,
    pub start_time: Instant,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Start the game worker with the engine described by `config`.
    pub fn new(config: &AppConfig) -> io::Result<SharedState> {
        let engine = ai::default_engine(config.search_depth, config.opening_book);
        let worker = WorkerHandle::spawn(Session::new(engine))?;

        Ok(Arc::new(AppState {
            worker,
            start_time: Instant::now(),
        }))
    }
}
