//! Opponent strength tiers.

use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// How strong the opponent plays. Each tier picks uniformly at random from a
/// window of the score-ranked move list.
///
/// | Tier   | Window (N legal moves) |
/// |--------|------------------------|
/// | Easy   | `[N/2, N)`, weaker half |
/// | Medium | `[0, 7N/10)`           |
/// | Hard   | `[0, 3N/10)`           |
///
/// Unknown names deserialize to [`Difficulty::Medium`] with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
pub struct UnknownDifficulty(pub String);

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Parses a tier name, falling back to the baseline tier when the name
    /// is not recognised.
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|e: UnknownDifficulty| {
            warn!(error = %e, fallback = %Difficulty::default(), "falling back to baseline difficulty");
            Difficulty::default()
        })
    }

    /// Index window over a descending score ranking of `n` moves.
    /// Integer arithmetic gives exact floors. The window may be empty.
    pub fn window(self, n: usize) -> Range<usize> {
        match self {
            Difficulty::Easy => n * 5 / 10..n,
            Difficulty::Medium => 0..n * 7 / 10,
            Difficulty::Hard => 0..n * 3 / 10,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

impl From<String> for Difficulty {
    fn from(s: String) -> Self {
        Difficulty::parse_or_default(&s)
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
