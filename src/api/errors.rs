use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::engine::ChessError;
use crate::worker::WorkerError;

/// Structured API error that serializes to JSON.
#[derive(Debug)]
pub enum ApiError {
    PieceNotFound(String),
    IllegalMove(String),
    InvalidRequest(String),
    GameOver(String),
    InternalError(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::PieceNotFound(msg) => (StatusCode::BAD_REQUEST, "PIECE_NOT_FOUND", msg),
            ApiError::IllegalMove(msg) => (StatusCode::BAD_REQUEST, "ILLEGAL_MOVE", msg),
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg),
            ApiError::GameOver(msg) => (
                StatusCode::CONFLICT,
                "GAME_OVER",
                format!("Game is already over: {msg}"),
            ),
            ApiError::InternalError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg)
            }
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ChessError> for ApiError {
    fn from(err: ChessError) -> Self {
        match &err {
            ChessError::PieceNotFound { .. } | ChessError::EmptySquare(_) => {
                ApiError::PieceNotFound(err.to_string())
            }
            ChessError::IllegalMove { .. } => ApiError::IllegalMove(err.to_string()),
            ChessError::InvalidSquare(_)
            | ChessError::InvalidNotation(_)
            | ChessError::InvalidFen(_) => ApiError::InvalidRequest(err.to_string()),
            ChessError::GameOver(status) => ApiError::GameOver(status.clone()),
        }
    }
}

impl From<WorkerError> for ApiError {
    fn from(err: WorkerError) -> Self {
        match err {
            WorkerError::Chess(e) => e.into(),
            other => ApiError::InternalError(other.to_string()),
        }
    }
}
