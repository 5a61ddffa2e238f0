// Library crate for the poker league server and terminal game
// This file exposes the public API for both binaries and the integration tests

pub mod blinds;
pub mod cli;
pub mod config;
pub mod holdem;
pub mod league;
pub mod players;
pub mod server;
pub mod shared;
pub mod store;
pub mod websockets;

// Re-export commonly used types for easier access in tests
pub use blinds::{
    AlertHandle, AlertSink, BlindAlerter, BlindSession, TokioBlindAlerter, WriterSink,
};
pub use config::AppConfig;
pub use holdem::{Game, TexasHoldEm};
pub use league::{League, Player};
pub use server::app_router;
pub use shared::{AppError, AppState};
pub use store::{FileSystemPlayerStore, InMemoryPlayerStore, PlayerStore, StoreError};
pub use websockets::{CloseReason, GameConnection, SocketError, SocketWrapper};
