pub mod game;
pub mod health;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{websocket, AppState};

/// Full application router with middleware applied.
pub fn create_router(state: Arc<AppState>) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // WebSocket endpoint
        .route("/ws", get(websocket::handle_websocket))
        // API routes
        .merge(create_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/games", post(game::create_game))
        .route("/games/{id}", get(game::get_game))
        .route("/games/{id}/select", post(game::select_cell))
        .route("/games/{id}/reset", post(game::reset_selection))
        .route("/games/{id}/commit", post(game::commit_word))
        .route("/games/{id}/solution", get(game::get_solution))
        .route("/boards/title", get(game::get_title_board))
        .route("/solve", post(game::solve_board))
        .route("/words/{word}", get(game::check_word))
}
