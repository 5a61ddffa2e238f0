use async_trait::async_trait;
use std::sync::Arc;

use crate::blinds::{AlertSink, BlindSession};
use crate::store::StoreError;

pub use texas_holdem::TexasHoldEm;

mod texas_holdem;

/// A game shared by every terminal or websocket session that plays it
#[async_trait]
pub trait Game: Send + Sync {
    /// Schedules the blind alerts for `number_of_players` against `alerts`.
    /// The alerts stay scheduled for as long as the caller keeps the returned session.
    async fn start(&self, number_of_players: i64, alerts: Arc<dyn AlertSink>) -> BlindSession;

    /// Records `winner` in the league
    async fn finish(&self, winner: &str) -> Result<(), StoreError>;
}
