//! Simulation results storage and reporting

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chess_core::Color;
use serde::{Deserialize, Serialize};
use session::{AssetMapping, Difficulty};

use crate::match_runner::{GameRecord, MatchConfig, MatchResult};

/// Complete results of one simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResults {
    /// When the run finished
    pub timestamp: DateTime<Utc>,
    pub difficulty: Difficulty,
    pub human_side: Color,
    pub config: MatchConfig,
    /// Piece roles the portfolio was given
    pub mapping: Vec<AssetMapping>,
    pub result: MatchResult,
    pub games: Vec<GameRecord>,
}

impl SimulationResults {
    pub fn new(
        difficulty: Difficulty,
        human_side: Color,
        config: MatchConfig,
        mapping: Vec<AssetMapping>,
        result: MatchResult,
        games: Vec<GameRecord>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            difficulty,
            human_side,
            config,
            mapping,
            result,
            games,
        }
    }

    /// Save results to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize results")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write results to {}", path.display()))
    }

    /// Load results from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read results from {}", path.display()))?;
        serde_json::from_str(&contents).context("Failed to parse results")
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!(
            "=== Financial Chess simulation ({}) ===\n\n",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        report.push_str(&format!(
            "Opponent: {}, player on {:?}, {} games, ply limit {}\n\n",
            self.difficulty,
            self.human_side,
            self.result.total_games(),
            self.config.max_plies
        ));

        report.push_str(&format!(
            "{:<6} {:<8} {:>6} {:>7}  {}\n",
            "Game", "Result", "Plies", "Events", "Status"
        ));
        report.push_str(&"-".repeat(48));
        report.push('\n');

        for game in &self.games {
            report.push_str(&format!(
                "{:<6} {:<8} {:>6} {:>7}  {:?}\n",
                game.game + 1,
                format!("{:?}", game.outcome),
                game.plies(),
                game.events_fired,
                game.status
            ));
        }

        report.push('\n');
        report.push_str(&format!(
            "Player: {} wins, {} losses, {} draws (score {:.1}%)\n",
            self.result.wins,
            self.result.losses,
            self.result.draws,
            self.result.score() * 100.0
        ));
        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use session::{GameOutcome, GameStatus};

    fn sample() -> SimulationResults {
        let mut result = MatchResult::new();
        result.record(GameOutcome::Loss);
        result.record(GameOutcome::Draw);
        let games = vec![
            GameRecord {
                game: 0,
                seed: Some(1),
                outcome: GameOutcome::Loss,
                status: GameStatus::CheckmateLoss,
                moves: vec!["f3".into(), "e5".into(), "g4".into(), "Qh4#".into()],
                final_fen: "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3".into(),
                events_fired: 0,
            },
            GameRecord {
                game: 1,
                seed: Some(2),
                outcome: GameOutcome::Draw,
                status: GameStatus::Playing,
                moves: vec!["e4".into(); 4],
                final_fen: String::new(),
                events_fired: 1,
            },
        ];
        SimulationResults::new(
            Difficulty::Hard,
            Color::White,
            MatchConfig::default(),
            Vec::new(),
            result,
            games,
        )
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        let results = sample();

        results.save(&path).unwrap();
        let loaded = SimulationResults::load(&path).unwrap();

        assert_eq!(loaded.timestamp, results.timestamp);
        assert_eq!(loaded.difficulty, Difficulty::Hard);
        assert_eq!(loaded.result, results.result);
        assert_eq!(loaded.games, results.games);
    }

    #[test]
    fn test_json_uses_lowercase_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["difficulty"], "hard");
        assert_eq!(json["human_side"], "white");
        assert_eq!(json["games"][0]["status"], "checkmate_loss");
        assert_eq!(json["games"][0]["outcome"], "loss");
    }

    #[test]
    fn test_report() {
        let report = sample().generate_report();
        assert!(report.contains("0 wins, 1 losses, 1 draws"));
        assert!(report.contains("CheckmateLoss"));
        assert!(report.contains("score 25.0%"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SimulationResults::load(&dir.path().join("none.json")).is_err());
    }
}
