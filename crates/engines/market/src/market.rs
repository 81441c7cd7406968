//! Simulated market-sentiment events.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl Impact {
    /// Base weight applied to moves touching the affected piece.
    pub fn weight(self) -> f64 {
        match self {
            Impact::High => 2.0,
            Impact::Medium => 1.5,
            Impact::Low => 1.2,
        }
    }
}

/// A sentiment signal about one portfolio symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEvent {
    pub symbol: String,
    pub sentiment: Sentiment,
    pub impact: Impact,
    #[serde(default)]
    pub description: String,
}

impl MarketEvent {
    pub fn new(symbol: &str, sentiment: Sentiment, impact: Impact) -> Self {
        Self {
            symbol: symbol.to_string(),
            sentiment,
            impact,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Score multiplier for moves touching the symbol's square.
    ///
    /// Bad news draws the opponent toward the piece, good news pushes it
    /// away, neutral news changes nothing.
    pub fn multiplier(&self) -> f64 {
        let m = self.impact.weight();
        match self.sentiment {
            Sentiment::Negative => m,
            Sentiment::Positive => 1.0 / m,
            Sentiment::Neutral => 1.0,
        }
    }
}

impl std::fmt::Display for MarketEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:?}/{:?}",
            self.symbol, self.sentiment, self.impact
        )?;
        if !self.description.is_empty() {
            write!(f, ": {}", self.description)?;
        }
        Ok(())
    }
}
