use std::fmt;
use std::time::Duration;

/// Blind amounts in chips, in the order they come into play
pub const BLIND_AMOUNTS: [u32; 11] = [100, 200, 300, 400, 500, 600, 800, 1000, 2000, 4000, 8000];

/// Units added to the player count to get the gap between blinds
pub const BASE_INCREMENT_UNITS: i64 = 5;

/// Default length of one increment unit
pub const DEFAULT_BLIND_UNIT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAlert {
    pub delay: Duration,
    pub amount: u32,
}

impl ScheduledAlert {
    pub fn new(delay: Duration, amount: u32) -> Self {
        Self { delay, amount }
    }
}

impl fmt::Display for ScheduledAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} chips at {:?}", self.amount, self.delay)
    }
}

/// Gap between two blinds: `(5 + number_of_players)` units, never negative
pub fn blind_increment(number_of_players: i64, unit: Duration) -> Duration {
    let units = BASE_INCREMENT_UNITS.saturating_add(number_of_players).max(0);
    let units = u32::try_from(units).unwrap_or(u32::MAX);
    unit.saturating_mul(units)
}

/// Every blind for a game, the first one due immediately
pub fn blind_schedule(number_of_players: i64, unit: Duration) -> Vec<ScheduledAlert> {
    let increment = blind_increment(number_of_players, unit);

    BLIND_AMOUNTS
        .iter()
        .scan(Duration::ZERO, |at, &amount| {
            let alert = ScheduledAlert::new(*at, amount);
            *at = at.saturating_add(increment);
            Some(alert)
        })
        .collect()
}

/// Text written to the alert sink when a blind fires
pub fn alert_message(amount: u32) -> String {
    format!("Blind is now {}\n", amount)
}
