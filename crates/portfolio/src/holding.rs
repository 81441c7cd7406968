//! Portfolio positions as supplied by the host.

use serde::{Deserialize, Serialize};

/// Asset class of a holding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Stock,
    Crypto,
    Commodity,
    Nft,
    Other,
}

/// One position in the user's portfolio. Immutable for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioHolding {
    /// Ticker, unique within a portfolio
    pub symbol: String,
    pub name: String,
    /// Market value, expected to be positive
    pub value: f64,
    pub category: AssetCategory,
    /// Optional volatility in `0.0..=1.0`
    #[serde(default)]
    pub volatility: Option<f64>,
}

impl PortfolioHolding {
    pub fn new(symbol: &str, name: &str, value: f64, category: AssetCategory) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            value,
            category,
            volatility: None,
        }
    }

    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Symbol with surrounding whitespace removed. Rules match it as given,
    /// so `Dai` is not an `AI` bishop.
    pub fn ticker(&self) -> &str {
        self.symbol.trim()
    }

    pub(crate) fn is_volatile(&self) -> bool {
        self.volatility.map_or(false, |v| v > 0.3)
    }
}
