use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("problem opening player db file: {0}")]
    Open(#[source] std::io::Error),

    #[error("problem seeking on player db file: {0}")]
    Seek(#[source] std::io::Error),

    #[error("problem getting file info from player db file: {0}")]
    Stat(#[source] std::io::Error),

    #[error("problem reading player db file: {0}")]
    Read(#[source] std::io::Error),

    #[error("problem writing to player db file: {0}")]
    Write(#[source] std::io::Error),

    #[error("problem closing player db file: {0}")]
    Close(#[source] std::io::Error),

    #[error("problem parsing league: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("problem encoding league: {0}")]
    Encode(#[source] serde_json::Error),
}
