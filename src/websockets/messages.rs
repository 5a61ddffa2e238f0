use thiserror::Error;

/// WebSocket close code for a peer that broke the game protocol
pub const PROTOCOL_ERROR_CLOSE_CODE: u16 = 1002;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("expected the number of players as a whole number, got {0:?}")]
    BadPlayerCount(String),
}

impl ProtocolError {
    /// Short reason for the close frame, which is limited to 123 bytes
    pub fn close_reason(&self) -> &'static str {
        match self {
            ProtocolError::BadPlayerCount(_) => "bad player count",
        }
    }
}

/// Parses the first frame of a game, the number of players at the table
pub fn parse_player_count(frame: &str) -> Result<i64, ProtocolError> {
    frame
        .trim()
        .parse()
        .map_err(|_| ProtocolError::BadPlayerCount(frame.to_string()))
}
