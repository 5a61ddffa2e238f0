use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, instrument};

use super::StoreError;
use crate::league::{League, Player};

/// Trait for player store operations
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Wins recorded for `name`, or 0 if the player is unknown
    async fn get_player_score(&self, name: &str) -> u32;

    /// Adds one win for `name`, creating the player on their first win
    async fn record_win(&self, name: &str) -> Result<(), StoreError>;

    /// Every player, most wins first
    async fn get_league(&self) -> League;
}

/// Map-backed store with no persistence, used for development and testing
pub struct InMemoryPlayerStore {
    scores: Mutex<HashMap<String, u32>>,
}

impl Default for InMemoryPlayerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPlayerStore {
    /// Creates a new empty in-memory store
    pub fn new() -> Self {
        Self {
            scores: Mutex::new(HashMap::new()),
        }
    }

    /// Creates an in-memory store with pre-populated players
    pub fn with_players(players: Vec<Player>) -> Self {
        let scores = players.into_iter().map(|p| (p.name, p.wins)).collect();
        Self {
            scores: Mutex::new(scores),
        }
    }
}

#[async_trait]
impl PlayerStore for InMemoryPlayerStore {
    async fn get_player_score(&self, name: &str) -> u32 {
        let scores = self.scores.lock().unwrap_or_else(PoisonError::into_inner);
        scores.get(name).copied().unwrap_or(0)
    }

    #[instrument(skip(self))]
    async fn record_win(&self, name: &str) -> Result<(), StoreError> {
        let mut scores = self.scores.lock().unwrap_or_else(PoisonError::into_inner);
        let wins = scores.entry(name.to_string()).or_insert(0);
        *wins += 1;

        debug!(player = %name, wins = *wins, "Recorded win in memory");
        Ok(())
    }

    async fn get_league(&self) -> League {
        let scores = self.scores.lock().unwrap_or_else(PoisonError::into_inner);
        let mut players: Vec<Player> = scores
            .iter()
            .map(|(name, wins)| Player::new(name.clone(), *wins))
            .collect();

        // Map order is arbitrary, so break ties by name
        players.sort_by(|a, b| b.wins.cmp(&a.wins).then_with(|| a.name.cmp(&b.name)));
        League::from(players)
    }
}
