//! The serializing game worker.
//!
//! One OS thread owns the `Session`. Commands reach it through a bounded
//! channel of capacity one, each carrying the oneshot sender its reply goes
//! back on. `WorkerHandle` holds an async mutex across each send/receive
//! pair, so commands are submitted one at a time. A caller that gives up
//! while waiting only drops its own reply; the next caller still gets the
//! answer to its own command.

use std::io;
use std::thread;

use tokio::sync::{Mutex, mpsc, oneshot};
use tracing::debug;

use crate::engine::types::ChessError;

use super::session::{MoveOutcome, MoveRequest, Session, Snapshot};

/// What the worker can be asked to do.
#[derive(Debug)]
pub enum Command {
    Play(MoveRequest),
    Reset,
    Position,
}

/// What comes back.
#[derive(Debug)]
pub enum Reply {
    Moved(Result<MoveOutcome, ChessError>),
    Snapshot(Snapshot),
}

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error(transparent)]
    Chess(#[from] ChessError),

    #[error("game worker is not running")]
    Stopped,

    #[error("game worker sent an unexpected reply")]
    UnexpectedReply,
}

/// A command paired with where its reply goes.
type Envelope = (Command, oneshot::Sender<Reply>);

/// Async front of the worker thread.
pub struct WorkerHandle {
    commands: Mutex<mpsc::Sender<Envelope>>,
    engine: String,
}

impl WorkerHandle {
    /// Move `session` onto a new worker thread.
    pub fn spawn(session: Session) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel(1);
        let engine = session.engine_name().to_string();

        thread::Builder::new()
            .name("game-worker".into())
            .spawn(move || run(session, cmd_rx))?;

        Ok(WorkerHandle {
            commands: Mutex::new(cmd_tx),
            engine,
        })
    }

    /// Name of the AI playing in this session.
    pub fn engine(&self) -> &str {
        &self.engine
    }

    /// Send one command and wait for its reply.
    pub async fn submit(&self, command: Command) -> Result<Reply, WorkerError> {
        let commands = self.commands.lock().await;
        let (reply_tx, reply_rx) = oneshot::channel();
        commands
            .send((command, reply_tx))
            .await
            .map_err(|_| WorkerError::Stopped)?;
        reply_rx.await.map_err(|_| WorkerError::Stopped)
    }

    pub async fn play(&self, request: MoveRequest) -> Result<MoveOutcome, WorkerError> {
        match self.submit(Command::Play(request)).await? {
            Reply::Moved(outcome) => Ok(outcome?),
            Reply::Snapshot(_) => Err(WorkerError::UnexpectedReply),
        }
    }

    pub async fn reset(&self) -> Result<Snapshot, WorkerError> {
        self.snapshot_of(Command::Reset).await
    }

    pub async fn position(&self) -> Result<Snapshot, WorkerError> {
        self.snapshot_of(Command::Position).await
    }

    async fn snapshot_of(&self, command: Command) -> Result<Snapshot, WorkerError> {
        match self.submit(command).await? {
            Reply::Snapshot(snapshot) => Ok(snapshot),
            Reply::Moved(_) => Err(WorkerError::UnexpectedReply),
        }
    }
}

/// Worker loop. Ends when the handle is dropped.
fn run(mut session: Session, mut commands: mpsc::Receiver<Envelope>) {
    debug!(engine = session.engine_name(), "game worker started");
    while let Some((command, reply_tx)) = commands.blocking_recv() {
        let reply = match command {
            Command::Play(request) => Reply::Moved(session.play(request)),
            Command::Reset => Reply::Snapshot(session.reset()),
            Command::Position => Reply::Snapshot(session.snapshot()),
        };
        if reply_tx.send(reply).is_err() {
            debug!("reply dropped, caller went away");
        }
    }
    debug!("game worker stopped");
}

// =========================================================================
// Tests
// =========================================================================
