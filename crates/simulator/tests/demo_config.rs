//! The shipped demo configuration loads and plays.

use std::path::PathBuf;

use chess_core::{PieceKind, Square};
use session::{map_portfolio, unmapped_symbols, SessionConfig};
use simulator::{MatchConfig, MatchRunner, SimulationResults};

fn demo_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/portfolio.toml")
}

#[test]
fn demo_portfolio_maps_every_role() {
    let config = SessionConfig::load(demo_path()).unwrap();
    let mappings = map_portfolio(&config.holdings);

    let role = |symbol: &str| {
        mappings
            .iter()
            .find(|m| m.symbol == symbol)
            .map(|m| m.piece)
    };
    assert_eq!(role("SPY"), Some(PieceKind::King));
    assert_eq!(role("BTC"), Some(PieceKind::Queen));
    assert_eq!(role("GLD"), Some(PieceKind::Rook));
    assert_eq!(role("ETH"), Some(PieceKind::Bishop));
    assert_eq!(role("AIQ"), Some(PieceKind::Bishop));
    assert_eq!(role("VREIT"), Some(PieceKind::Knight));
    assert_eq!(role("PUNK"), Some(PieceKind::Knight));
    assert_eq!(role("DOGE"), Some(PieceKind::Pawn));
    assert_eq!(unmapped_symbols(&config.holdings, &mappings), vec!["AAPL"]);

    let session = config.create_session().unwrap();
    assert_eq!(session.assignment().square_of("GLD"), Some(Square::A1));
    assert_eq!(session.assignment().square_of("DOGE"), Some(Square::A2));
}

#[test]
fn demo_match_writes_results() {
    let config = SessionConfig::load(demo_path()).unwrap();
    let match_config = MatchConfig {
        num_games: 2,
        max_plies: 40,
        event_every: 6,
        seed: Some(2024),
        verbose: false,
    };
    let runner = MatchRunner::new(match_config.clone(), config.clone());
    let (result, games) = runner.run_match().unwrap();
    assert_eq!(result.total_games(), 2);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.json");
    let results = SimulationResults::new(
        config.difficulty,
        config.human_side,
        match_config,
        map_portfolio(&config.holdings),
        result,
        games,
    );
    results.save(&path).unwrap();

    let loaded = SimulationResults::load(&path).unwrap();
    assert_eq!(loaded.games.len(), 2);
    assert_eq!(loaded.mapping.len(), 8);
}
