//! Session configuration.
//!
//! Loaded from TOML. Every field has a default, so an empty file is a valid
//! configuration: medium difficulty, player on White, standard start, no
//! portfolio and no events.
//!
//! ```toml
//! difficulty = "hard"
//! human_side = "white"
//! seed = 42
//! think_delay_ms = 1500
//! event_interval_ms = 5000
//!
//! [[holdings]]
//! symbol = "SPY"
//! name = "S&P 500 ETF"
//! value = 50000.0
//! category = "stock"
//!
//! [[events]]
//! symbol = "SPY"
//! sentiment = "negative"
//! impact = "high"
//! description = "Rate hike surprise"
//! ```

use std::path::Path;
use std::time::Duration;

use chess_core::Color;
use market_engine::{Difficulty, MarketEvent};
use portfolio::{map_portfolio, PortfolioHolding};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, SessionError};
use crate::session::{GameSession, SessionOptions};

/// Everything needed to set up and drive one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub difficulty: Difficulty,
    pub human_side: Color,
    /// Seed for the opponent; omitted means a fresh random game each time
    pub seed: Option<u64>,
    /// FEN to start from instead of the standard position
    pub initial_fen: Option<String>,
    /// Opponent "thinking" time before a reply
    pub think_delay_ms: u64,
    /// Spacing of the simulated market feed
    pub event_interval_ms: u64,
    /// Plies after which a simulated game is called a draw
    pub max_plies: u32,
    pub holdings: Vec<PortfolioHolding>,
    /// Market feed, replayed in order during play
    pub events: Vec<MarketEvent>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            human_side: Color::White,
            seed: None,
            initial_fen: None,
            think_delay_ms: 1500,
            event_interval_ms: 5000,
            max_plies: 200,
            holdings: Vec::new(),
            events: Vec::new(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), holdings = config.holdings.len(), "config loaded");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }

    pub fn event_interval(&self) -> Duration {
        Duration::from_millis(self.event_interval_ms)
    }

    /// Session options with the holdings mapped to pieces. The feed events
    /// are not active at the start.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            difficulty: self.difficulty,
            events: Vec::new(),
            mapping: map_portfolio(&self.holdings),
            human_side: self.human_side,
            seed: self.seed,
        }
    }

    /// Like [`session_options`](Self::session_options) with a different seed.
    pub fn session_options_seeded(&self, seed: Option<u64>) -> SessionOptions {
        SessionOptions {
            seed,
            ..self.session_options()
        }
    }

    pub fn create_session(&self) -> Result<GameSession, SessionError> {
        GameSession::new(self.initial_fen.as_deref(), self.session_options())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
