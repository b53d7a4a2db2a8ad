use axum::Json;
use axum::extract::State;

use crate::worker::MoveRequest;

use super::errors::ApiError;
use super::models::*;
use super::state::SharedState;

// =========================================================================
// Health
// =========================================================================

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime = state.start_time.elapsed().as_secs();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        engine: state.worker.engine().to_string(),
        uptime,
    })
}

// =========================================================================
// Move
// =========================================================================

/// POST /api/move
///
/// Applies the submitted move and answers with the engine's reply. The
/// request waits while the worker searches.
pub async fn make_move(
    State(state): State<SharedState>,
    Json(input): Json<MoveBody>,
) -> Result<Json<MoveResponse>, ApiError> {
    let request = MoveRequest::parse(&input.from, &input.to, input.promotion.as_deref())?;
    let outcome = state.worker.play(request).await?;
    Ok(Json(outcome.into()))
}

// =========================================================================
// Reset / Position
// =========================================================================

/// POST /api/reset
pub async fn reset(State(state): State<SharedState>) -> Result<Json<PositionResponse>, ApiError> {
    let snapshot = state.worker.reset().await?;
    Ok(Json(snapshot.into()))
}

/// GET /api/position
pub async fn position(
    State(state): State<SharedState>,
) -> Result<Json<PositionResponse>, ApiError> {
    let snapshot = state.worker.position().await?;
    Ok(Json(snapshot.into()))
}

// =========================================================================
// Tests
// =========================================================================
