use super::*;
use std::collections::HashMap;

fn h(symbol: &str, value: f64, category: AssetCategory) -> PortfolioHolding {
    PortfolioHolding::new(symbol, symbol, value, category)
}

fn piece_of(mappings: &[AssetMapping], symbol: &str) -> Option<PieceKind> {
    mappings.iter().find(|m| m.symbol == symbol).map(|m| m.piece)
}

fn sample_portfolio() -> Vec<PortfolioHolding> {
    vec![
        h("BTC", 30000.0, AssetCategory::Crypto).with_volatility(0.8),
        h("AAPL", 25000.0, AssetCategory::Stock).with_volatility(0.3),
        h("ETH", 20000.0, AssetCategory::Crypto).with_volatility(0.7),
        h("SPY", 35000.0, AssetCategory::Stock).with_volatility(0.2),
        h("TSLA", 15000.0, AssetCategory::Stock).with_volatility(0.6),
    ]
}

#[test]
fn test_sample_portfolio_roles() {
    let mappings = map_portfolio(&sample_portfolio());

    assert_eq!(piece_of(&mappings, "SPY"), Some(PieceKind::King));
    assert_eq!(piece_of(&mappings, "BTC"), Some(PieceKind::Queen));
    // BTC would be a rook but is already the queen; ETH is the bishop
    assert_eq!(piece_of(&mappings, "ETH"), Some(PieceKind::Bishop));
    // Nothing is under 5% of 125000
    assert!(mappings.iter().all(|m| m.piece != PieceKind::Pawn));
    assert_eq!(piece_of(&mappings, "AAPL"), None);
    assert_eq!(piece_of(&mappings, "TSLA"), None);

    let unmapped = unmapped_symbols(&sample_portfolio(), &mappings);
    assert_eq!(unmapped, vec!["AAPL".to_string(), "TSLA".to_string()]);
}

#[test]
fn test_empty_portfolio() {
    assert!(map_portfolio(&[]).is_empty());
}

#[test]
fn test_zero_value_portfolio() {
    let holdings = vec![
        h("AAA", 0.0, AssetCategory::Stock),
        h("BBB", 0.0, AssetCategory::Crypto),
    ];
    assert!(map_portfolio(&holdings).is_empty());
}

#[test]
fn test_invalid_values_are_skipped() {
    let holdings = vec![
        h("NAN", f64::NAN, AssetCategory::Stock),
        h("NEG", -500.0, AssetCategory::Crypto),
        h("OK", 100.0, AssetCategory::Stock),
    ];
    let mappings = map_portfolio(&holdings);
    assert_eq!(mappings.len(), 1);
    assert_eq!(piece_of(&mappings, "OK"), Some(PieceKind::King));
}

#[test]
fn test_single_holding_is_king() {
    let mappings = map_portfolio(&[h("VTI", 1000.0, AssetCategory::Stock)]);
    assert_eq!(mappings.len(), 1);
    assert_eq!(mappings[0].piece, PieceKind::King);
    assert!(mappings[0].reasoning.contains("100.0%"));
}

#[test]
fn test_largest_is_king_even_if_crypto() {
    let holdings = vec![
        h("ETH", 5000.0, AssetCategory::Crypto),
        h("BTC", 9000.0, AssetCategory::Crypto),
    ];
    let mappings = map_portfolio(&holdings);
    assert_eq!(piece_of(&mappings, "BTC"), Some(PieceKind::King));
    assert_eq!(piece_of(&mappings, "ETH"), Some(PieceKind::Queen));
}

#[test]
fn test_ties_keep_input_order() {
    let holdings = vec![
        h("FIRST", 1000.0, AssetCategory::Stock),
        h("SECOND", 1000.0, AssetCategory::Stock),
    ];
    let mappings = map_portfolio(&holdings);
    assert_eq!(piece_of(&mappings, "FIRST"), Some(PieceKind::King));
    assert_eq!(piece_of(&mappings, "SECOND"), None);
}

#[test]
fn test_queen_by_volatility() {
    let holdings = vec![
        h("SPY", 10000.0, AssetCategory::Stock),
        h("CALM", 8000.0, AssetCategory::Stock).with_volatility(0.3),
        h("WILD", 6000.0, AssetCategory::Stock).with_volatility(0.31),
    ];
    let mappings = map_portfolio(&holdings);
    // Exactly 0.3 is not volatile enough
    assert_eq!(piece_of(&mappings, "CALM"), None);
    assert_eq!(piece_of(&mappings, "WILD"), Some(PieceKind::Queen));
}

#[test]
fn test_rook_bishop_knight_rules() {
    let holdings = vec![
        h("SPY", 50000.0, AssetCategory::Stock),
        h("GLD", 9000.0, AssetCategory::Commodity),
        h("TBOND", 8000.0, AssetCategory::Stock),
        h("SLV", 7500.0, AssetCategory::Commodity),
        h("AIQ", 7000.0, AssetCategory::Stock),
        PortfolioHolding::new(
            "BOTZ",
            "Global X Robotics & Artificial Intelligence",
            6500.0,
            AssetCategory::Stock,
        ),
        h("PUNK", 6000.0, AssetCategory::Nft),
        h("VNQREIT", 5500.0, AssetCategory::Stock),
    ];
    let mappings = map_portfolio(&holdings);

    assert_eq!(piece_of(&mappings, "GLD"), Some(PieceKind::Rook));
    assert_eq!(piece_of(&mappings, "TBOND"), Some(PieceKind::Rook));
    // Third commodity cannot be a rook; falls through to knight
    assert_eq!(piece_of(&mappings, "SLV"), Some(PieceKind::Knight));
    assert_eq!(piece_of(&mappings, "AIQ"), Some(PieceKind::Bishop));
    assert_eq!(piece_of(&mappings, "BOTZ"), Some(PieceKind::Bishop));
    assert_eq!(piece_of(&mappings, "PUNK"), Some(PieceKind::Knight));
    // Both knight slots are taken
    assert_eq!(piece_of(&mappings, "VNQREIT"), None);
}

#[test]
fn test_pawns_capped_at_eight() {
    let mut holdings = vec![h("SPY", 100000.0, AssetCategory::Stock)];
    for i in 0..12 {
        holdings.push(h(&format!("S{i:02}"), 1000.0 - i as f64, AssetCategory::Stock));
    }
    let mappings = map_portfolio(&holdings);

    let pawns: Vec<&str> = mappings
        .iter()
        .filter(|m| m.piece == PieceKind::Pawn)
        .map(|m| m.symbol.as_str())
        .collect();
    assert_eq!(pawns.len(), 8);
    // Largest small positions are taken first
    assert_eq!(pawns[0], "S00");
    assert_eq!(pawns[7], "S07");
}

#[test]
fn test_duplicate_symbols_mapped_once() {
    let holdings = vec![
        h("BTC", 5000.0, AssetCategory::Crypto),
        h("BTC", 4000.0, AssetCategory::Crypto),
        h("ETH", 3000.0, AssetCategory::Crypto),
    ];
    let mappings = map_portfolio(&holdings);
    assert_eq!(mappings.iter().filter(|m| m.symbol == "BTC").count(), 1);
    assert_eq!(piece_of(&mappings, "ETH"), Some(PieceKind::Queen));
}

#[test]
fn test_mapping_invariants_on_large_portfolio() {
    let categories = [
        AssetCategory::Stock,
        AssetCategory::Crypto,
        AssetCategory::Commodity,
        AssetCategory::Nft,
        AssetCategory::Other,
    ];
    let holdings: Vec<PortfolioHolding> = (0..60)
        .map(|i| {
            let symbol = match i % 7 {
                0 => format!("AI{i}"),
                1 => format!("BOND{i}"),
                2 => format!("REIT{i}"),
                _ => format!("X{i}"),
            };
            PortfolioHolding::new(&symbol, "Holding", 100.0 + (i * 37 % 900) as f64, categories[i % 5])
                .with_volatility((i % 10) as f64 / 10.0)
        })
        .collect();

    let mappings = map_portfolio(&holdings);

    let mut seen = std::collections::HashSet::new();
    let mut counts: HashMap<PieceKind, usize> = HashMap::new();
    for m in &mappings {
        assert!(seen.insert(m.symbol.clone()), "duplicate symbol {}", m.symbol);
        *counts.entry(m.piece).or_default() += 1;
    }
    for kind in PieceKind::ALL {
        assert!(counts.get(&kind).copied().unwrap_or(0) <= kind.standard_count());
    }
    assert_eq!(counts.get(&PieceKind::King), Some(&1));
}

#[test]
fn test_mapping_serializes() {
    let mappings = map_portfolio(&sample_portfolio());
    let json = serde_json::to_string(&mappings).unwrap();
    assert!(json.contains("\"piece\":\"king\""));
}

#[test]
fn test_symbol_rules_are_case_sensitive() {
    let holdings = vec![
        h("SPY", 10000.0, AssetCategory::Stock),
        h("Dai", 3000.0, AssetCategory::Stock),
        h("Vreit", 3000.0, AssetCategory::Stock),
        h("AIQ", 2000.0, AssetCategory::Stock),
        h("XREIT", 2000.0, AssetCategory::Stock),
    ];
    let mappings = map_portfolio(&holdings);

    assert_eq!(piece_of(&mappings, "AIQ"), Some(PieceKind::Bishop));
    assert_eq!(piece_of(&mappings, "XREIT"), Some(PieceKind::Knight));
    assert_eq!(piece_of(&mappings, "Dai"), None);
    assert_eq!(piece_of(&mappings, "Vreit"), None);
}
