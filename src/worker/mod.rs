pub mod handle;
pub mod session;

pub use handle::{Command, Reply, WorkerError, WorkerHandle};
pub use session::{MoveOutcome, MoveRequest, Session, Snapshot};
