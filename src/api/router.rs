use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::SharedState;

/// Game endpoints, mounted under `/api`.
fn game_routes() -> Router<SharedState> {
    Router::new()
        .route("/move", post(handlers::make_move))
        .route("/reset", post(handlers::reset))
        .route("/position", get(handlers::position))
}

/// Full application router: `/health`, the game endpoints, CORS and request tracing.
pub fn create_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", game_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
