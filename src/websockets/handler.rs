use axum::{
    extract::{ws::WebSocket, State, WebSocketUpgrade},
    response::Response,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::socket::GameConnection;
use crate::shared::AppState;

/// WebSocket upgrade handler
///
/// GET /ws
/// Upgrades the HTTP connection and plays one game over it
#[instrument(name = "websocket_handler", skip(state, ws))]
pub async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let connection_id = Uuid::new_v4();
    info!(connection_id = %connection_id, "WebSocket connection requested");

    ws.on_upgrade(move |socket| handle_websocket_connection(socket, connection_id, state))
}

/// Handle the upgraded WebSocket connection
async fn handle_websocket_connection(socket: WebSocket, connection_id: Uuid, state: AppState) {
    info!(connection_id = %connection_id, "WebSocket connection established");

    let connection = GameConnection::new(connection_id, Box::new(socket), state.game.clone())
        .with_read_timeout(state.ws_read_timeout);

    // Run the connection until disconnect
    match connection.run().await {
        Ok(()) => {
            info!(connection_id = %connection_id, "WebSocket connection closed cleanly");
        }
        Err(e) => {
            warn!(
                connection_id = %connection_id,
                error = %e,
                "WebSocket connection error"
            );
        }
    }
}
