use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

use super::Game;
use crate::blinds::{blind_schedule, AlertSink, BlindAlerter, BlindSession, DEFAULT_BLIND_UNIT};
use crate::store::{PlayerStore, StoreError};

/// Texas Hold'em night: blinds go up on a timer, the winner goes into the league
pub struct TexasHoldEm {
    alerter: Arc<dyn BlindAlerter>,
    store: Arc<dyn PlayerStore>,
    blind_unit: Duration,
}

impl TexasHoldEm {
    pub fn new(alerter: Arc<dyn BlindAlerter>, store: Arc<dyn PlayerStore>) -> Self {
        Self::with_blind_unit(alerter, store, DEFAULT_BLIND_UNIT)
    }

    pub fn with_blind_unit(
        alerter: Arc<dyn BlindAlerter>,
        store: Arc<dyn PlayerStore>,
        blind_unit: Duration,
    ) -> Self {
        Self {
            alerter,
            store,
            blind_unit,
        }
    }
}

#[async_trait]
impl Game for TexasHoldEm {
    #[instrument(skip(self, alerts))]
    async fn start(&self, number_of_players: i64, alerts: Arc<dyn AlertSink>) -> BlindSession {
        let schedule = blind_schedule(number_of_players, self.blind_unit);
        info!(
            number_of_players,
            blinds = schedule.len(),
            "Starting game, scheduling blind alerts"
        );

        schedule
            .into_iter()
            .map(|alert| {
                self.alerter
                    .schedule_alert_at(alert.delay, alert.amount, alerts.clone())
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn finish(&self, winner: &str) -> Result<(), StoreError> {
        self.store.record_win(winner).await?;
        info!(winner = %winner, "Game finished, win recorded");
        Ok(())
    }
}
