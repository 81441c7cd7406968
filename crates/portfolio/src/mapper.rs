//! Portfolio → chess-piece role assignment.
//!
//! Holdings are ranked by value and then claimed role by role in a fixed
//! priority order (king, queen, rooks, bishops, knights, pawns). A holding is
//! claimed at most once and no role exceeds the standard chess complement.
//! Holdings matching no rule are left out.

use std::collections::HashSet;

use chess_core::PieceKind;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::holding::{AssetCategory, PortfolioHolding};

/// Positions below this share of the portfolio become pawns.
pub const PAWN_THRESHOLD: f64 = 0.05;

/// A holding assigned to a chess-piece role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetMapping {
    pub symbol: String,
    pub piece: PieceKind,
    /// Human-readable explanation; never used by game logic
    pub reasoning: String,
}

/// Maps holdings to piece roles.
///
/// Deterministic for a given input: ties in value keep their original order.
/// Empty or zero-valued portfolios produce no mappings. Holdings whose value
/// is not a positive finite number are skipped.
pub fn map_portfolio(holdings: &[PortfolioHolding]) -> Vec<AssetMapping> {
    let mut ranked: Vec<&PortfolioHolding> = holdings
        .iter()
        .filter(|h| {
            let valid = h.value.is_finite() && h.value > 0.0;
            if !valid {
                warn!(symbol = %h.symbol, value = h.value, "skipping holding with non-positive value");
            }
            valid
        })
        .collect();
    // Stable sort keeps input order for equal values
    ranked.sort_by(|a, b| b.value.total_cmp(&a.value));

    let total: f64 = ranked.iter().map(|h| h.value).sum();
    if ranked.is_empty() || total <= 0.0 {
        return Vec::new();
    }

    let mut claims = Claims::new(total);

    claims.take(&ranked, PieceKind::King, |_| true, |_, pct| {
        format!("Largest position ({pct:.1}% of portfolio) anchors the king")
    });

    claims.take(
        &ranked,
        PieceKind::Queen,
        |h| h.category == AssetCategory::Crypto || h.is_volatile(),
        |h, pct| {
            if h.category == AssetCategory::Crypto {
                format!("Largest crypto position ({pct:.1}% of portfolio) moves like a queen")
            } else {
                format!(
                    "Largest volatile position (volatility {:.2}, {pct:.1}% of portfolio) moves like a queen",
                    h.volatility.unwrap_or_default()
                )
            }
        },
    );

    claims.take(&ranked, PieceKind::Rook, is_rook_asset, |h, pct| {
        format!("{} is a store of value ({pct:.1}% of portfolio), a solid rook", h.ticker())
    });

    claims.take(&ranked, PieceKind::Bishop, is_bishop_asset, |h, pct| {
        format!("{} is a technology play ({pct:.1}% of portfolio), a long-range bishop", h.ticker())
    });

    claims.take(&ranked, PieceKind::Knight, is_knight_asset, |h, pct| {
        format!("{} is an alternative asset ({pct:.1}% of portfolio), jumps like a knight", h.ticker())
    });

    claims.take(
        &ranked,
        PieceKind::Pawn,
        |h| h.value / total < PAWN_THRESHOLD,
        |_, pct| format!("Small position ({pct:.1}% of portfolio) serves as a pawn"),
    );

    let mappings = claims.into_mappings();
    debug!(
        mapped = mappings.len(),
        holdings = holdings.len(),
        "portfolio mapped to pieces"
    );
    mappings
}

/// Symbols from `holdings` that received no role.
pub fn unmapped_symbols(holdings: &[PortfolioHolding], mappings: &[AssetMapping]) -> Vec<String> {
    let mapped: HashSet<&str> = mappings.iter().map(|m| m.symbol.as_str()).collect();
    holdings
        .iter()
        .filter(|h| !mapped.contains(h.symbol.as_str()))
        .map(|h| h.symbol.clone())
        .collect()
}

fn is_rook_asset(h: &PortfolioHolding) -> bool {
    let ticker = h.ticker();
    h.category == AssetCategory::Commodity
        || ticker == "BTC"
        || ticker.contains("BOND")
        || ticker == "GLD"
}

fn is_bishop_asset(h: &PortfolioHolding) -> bool {
    let ticker = h.ticker();
    ticker == "ETH"
        || ticker.contains("AI")
        || ticker.contains("TECH")
        || h.name.to_lowercase().contains("artificial intelligence")
}

fn is_knight_asset(h: &PortfolioHolding) -> bool {
    h.category == AssetCategory::Nft
        || h.ticker().contains("REIT")
        || (h.category == AssetCategory::Commodity && h.ticker() != "GLD")
}

/// Bookkeeping for holdings already given a role.
struct Claims {
    total: f64,
    claimed: HashSet<String>,
    mappings: Vec<AssetMapping>,
}

impl Claims {
    fn new(total: f64) -> Self {
        Self {
            total,
            claimed: HashSet::new(),
            mappings: Vec::new(),
        }
    }

    /// Claims up to the standard count of `piece` from `ranked`, in order.
    fn take(
        &mut self,
        ranked: &[&PortfolioHolding],
        piece: PieceKind,
        eligible: impl Fn(&PortfolioHolding) -> bool,
        reasoning: impl Fn(&PortfolioHolding, f64) -> String,
    ) {
        let mut taken = 0;
        for holding in ranked {
            if taken == piece.standard_count() {
                break;
            }
            if self.claimed.contains(&holding.symbol) || !eligible(holding) {
                continue;
            }
            let pct = holding.value / self.total * 100.0;
            self.claimed.insert(holding.symbol.clone());
            self.mappings.push(AssetMapping {
                symbol: holding.symbol.clone(),
                piece,
                reasoning: reasoning(holding, pct),
            });
            taken += 1;
        }
    }

    fn into_mappings(self) -> Vec<AssetMapping> {
        self.mappings
    }
}

#[cfg(test)]
#[path = "mapper_tests.rs"]
mod mapper_tests;
