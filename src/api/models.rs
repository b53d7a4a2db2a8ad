use serde::{Deserialize, Serialize};

use crate::engine::types::PieceKind;
use crate::worker::{MoveOutcome, Snapshot};

// ---------------------------------------------------------------------------
// Request models
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveBody {
    pub from: String,
    pub to: String,
    pub promotion: Option<String>,
}

// ---------------------------------------------------------------------------
// Response models
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub engine: String,
    pub uptime: u64,
}

/// The engine's reply. `from`, `to` and `promotion` are null when the
/// submitted move ended the game.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    pub from: Option<String>,
    pub to: Option<String>,
    pub promotion: Option<String>,
    pub status: String,
    pub fen: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionResponse {
    pub status: String,
    pub fen: String,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl From<MoveOutcome> for MoveResponse {
    fn from(outcome: MoveOutcome) -> Self {
        let reply = outcome.reply;
        MoveResponse {
            from: reply.map(|mv| mv.from.to_algebraic()),
            to: reply.map(|mv| mv.to.to_algebraic()),
            promotion: reply.map(|mv| {
                mv.promotion
                    .unwrap_or(PieceKind::Queen)
                    .tag()
                    .to_string()
            }),
            status: outcome.status.to_string(),
            fen: outcome.fen,
        }
    }
}

impl From<Snapshot> for PositionResponse {
    fn from(snapshot: Snapshot) -> Self {
        PositionResponse {
            status: snapshot.status.to_string(),
            fen: snapshot.fen,
        }
    }
}
