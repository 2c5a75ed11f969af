//! Explicit configuration passed at construction time.
//!
//! Environment variables are read in one place; the rest of the crate only
//! sees these structs.

use std::env;
use std::time::Duration;

use crate::domain::rules::REQUIRED_PLAYERS;
use crate::error::AppError;

pub const DEFAULT_DIFFICULTY: f64 = 0.5;
pub const DEFAULT_RECONNECTION_GRACE: Duration = Duration::from_secs(20);
pub const DEFAULT_DISPOSE_DELAY: Duration = Duration::from_secs(5);

/// Tunables for a single match session.
#[derive(Debug, Clone)]
pub struct RoomConfig {
    /// Puzzle difficulty in `[0, 1]`; drives how many cells are carved out.
    pub difficulty: f64,
    /// Player count that starts (and caps) a match.
    pub required_players: usize,
    /// How long a departed player may reconnect with progress intact.
    pub reconnection_grace: Duration,
    /// Delay between match end (or cancellation) and session teardown.
    pub dispose_delay: Duration,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            required_players: REQUIRED_PLAYERS,
            reconnection_grace: DEFAULT_RECONNECTION_GRACE,
            dispose_delay: DEFAULT_DISPOSE_DELAY,
        }
    }
}

impl RoomConfig {
    /// Defaults with environment overrides: `SUDOKU_DIFFICULTY`,
    /// `RECONNECTION_GRACE_SECS`, `DISPOSE_DELAY_SECS`.
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::default();
        if let Ok(raw) = env::var("SUDOKU_DIFFICULTY") {
            config.difficulty = parse_difficulty(&raw)?;
        }
        if let Ok(raw) = env::var("RECONNECTION_GRACE_SECS") {
            config.reconnection_grace = Duration::from_secs(parse_seconds("RECONNECTION_GRACE_SECS", &raw)?);
        }
        if let Ok(raw) = env::var("DISPOSE_DELAY_SECS") {
            config.dispose_delay = Duration::from_secs(parse_seconds("DISPOSE_DELAY_SECS", &raw)?);
        }
        Ok(config)
    }
}

/// Endpoints and credentials for the external match service.
#[derive(Debug, Clone)]
pub struct MatchServiceConfig {
    /// Base URL for match-type lookup and match completion.
    pub base_url: String,
    /// Full URL of the match-creation endpoint.
    pub match_create_url: String,
    /// Value of the server-to-server key header.
    pub server_key: String,
    /// Match-type name registered on the service for this game.
    pub match_type_name: String,
}

impl MatchServiceConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            base_url: must_var("SERVER_URL")?,
            match_create_url: must_var("SERVER_MATCH_CREATE_URL")?,
            server_key: must_var("SERVER_KEY")?,
            match_type_name: "Sudoku".to_string(),
        })
    }
}

fn parse_difficulty(raw: &str) -> Result<f64, AppError> {
    let difficulty: f64 = raw.parse().map_err(|_| {
        AppError::config(format!("SUDOKU_DIFFICULTY must be a number, got '{raw}'"))
    })?;
    if !(0.0..=1.0).contains(&difficulty) {
        return Err(AppError::config(format!(
            "SUDOKU_DIFFICULTY must be in [0, 1], got {difficulty}"
        )));
    }
    Ok(difficulty)
}

fn parse_seconds(name: &str, raw: &str) -> Result<u64, AppError> {
    raw.parse().map_err(|_| {
        AppError::config(format!(
            "{name} must be a whole number of seconds, got '{raw}'"
        ))
    })
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
