// Public API
pub use handler::websocket_handler;
pub use messages::{parse_player_count, ProtocolError, PROTOCOL_ERROR_CLOSE_CODE};
pub use socket::{CloseReason, GameConnection, ProtocolPhase, SocketError, SocketWrapper};

// Internal modules
mod handler;
mod messages;
mod socket;
