use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

use crate::blinds::DEFAULT_BLIND_UNIT;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_DB_FILE: &str = "game.db.json";

/// Settings shared by the webserver and the CLI, read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub db_file: PathBuf,
    /// Length of one blind increment unit; blinds go up every `5 + players` units
    pub blind_unit: Duration,
    /// Longest wait for a new websocket's player count, unlimited when unset
    pub ws_read_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            db_file: PathBuf::from(DEFAULT_DB_FILE),
            blind_unit: DEFAULT_BLIND_UNIT,
            ws_read_timeout: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, falling back to defaults for missing or bad values
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: lookup("POKER_BIND_ADDR").unwrap_or(defaults.bind_addr),
            db_file: lookup("POKER_DB_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_file),
            blind_unit: parse_var::<u64>(&lookup, "POKER_BLIND_UNIT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.blind_unit),
            ws_read_timeout: parse_var::<u64>(&lookup, "POKER_WS_READ_TIMEOUT_SECS")
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparseable config value");
            None
        }
    }
}
