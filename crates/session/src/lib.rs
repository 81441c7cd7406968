//! Financial Chess game sessions
//!
//! This crate ties the pieces together:
//! - [`GameSession`]: the single writer of a board, sequencing player and
//!   opponent moves and detecting the end of the game
//! - [`SessionHost`]: async driver with the opponent's think delay, a market
//!   event feed and cancellable replies
//! - [`SessionConfig`]: TOML configuration for both
//!
//! # Usage
//!
//! ```ignore
//! let config = SessionConfig::load("portfolio.toml")?;
//! let mut session = config.create_session()?;
//! session.make_user_move("e4");
//! let reply = session.make_ai_move()?;
//! ```

mod config;
mod error;
mod events;
mod host;
mod session;

pub use config::*;
pub use error::*;
pub use events::*;
pub use host::*;
pub use session::*;

pub use market_engine::{Difficulty, MarketEvent};
pub use portfolio::{map_portfolio, unmapped_symbols, AssetMapping, PortfolioHolding};
