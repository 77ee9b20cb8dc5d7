//! Scoring rules and panel settings.
//!
//! A `ScoringConfig` is passed to the engine, the match aggregate and the
//! session gate explicitly. Every field has a default, so a JSON file only
//! needs to name what it changes:
//!
//! ```json
//! { "max_players": 11, "session_ttl_secs": 3600 }
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BALLS_PER_OVER: u32 = 6;
pub const DEFAULT_MAX_WICKETS: u32 = 10;
pub const DEFAULT_MIN_PLAYERS: usize = 5;
pub const DEFAULT_MAX_PLAYERS: usize = 12;
pub const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Legal deliveries per over.
    pub balls_per_over: u32,
    /// Wickets that end an innings; also used for the "won by N wickets" margin.
    pub max_wickets: u32,
    pub min_players: usize,
    pub max_players: usize,
    pub session_ttl_secs: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            balls_per_over: DEFAULT_BALLS_PER_OVER,
            max_wickets: DEFAULT_MAX_WICKETS,
            min_players: DEFAULT_MIN_PLAYERS,
            max_players: DEFAULT_MAX_PLAYERS,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl ScoringConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ScoringConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.balls_per_over == 0 {
            return Err(ConfigError::Invalid("balls_per_over must be at least 1".into()));
        }
        if self.min_players < 2 {
            return Err(ConfigError::Invalid("min_players must be at least 2".into()));
        }
        if self.min_players > self.max_players {
            return Err(ConfigError::Invalid(format!(
                "min_players ({}) exceeds max_players ({})",
                self.min_players, self.max_players
            )));
        }
        Ok(())
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}
