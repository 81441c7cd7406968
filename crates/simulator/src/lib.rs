//! Financial Chess simulator
//!
//! Plays complete games between a random stand-in player and the market
//! opponent, for checking how each difficulty tier and event feed behaves:
//! - Running matches of seeded or unseeded games
//! - Activating the configured market events as play goes on
//! - Writing timestamped JSON reports
//!
//! # Usage
//!
//! ```bash
//! # Show how a portfolio maps onto the board
//! cargo run -p simulator -- map demos/portfolio.toml
//!
//! # Play 50 seeded games against the hard opponent
//! cargo run -p simulator -- play demos/portfolio.toml --games 50 --seed 7 --difficulty hard
//! ```

mod match_runner;
mod results;

pub use match_runner::*;
pub use results::*;
