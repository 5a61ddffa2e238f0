use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::players;
use crate::shared::AppState;
use crate::websockets::websocket_handler;

/// Every HTTP and WebSocket route of the poker server
pub fn app_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/players/:name",
            get(players::get_score).post(players::record_win),
        )
        .route("/league", get(players::get_league))
        .route("/game", get(players::game_page))
        .route("/ws", get(websocket_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
