//! Notifications emitted by a session for the presentation layer.

use market_engine::MarketEvent;
use serde::Serialize;

use crate::session::GameStatus;

/// Who made a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mover {
    Human,
    Opponent,
}

/// Something the presentation layer may want to show (a toast, a sound, a
/// board refresh). Sessions queue these; hosts drain and forward them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    Started,
    MoveApplied {
        mover: Mover,
        san: String,
        /// Board after the move
        fen: String,
    },
    MarketEventActivated {
        event: MarketEvent,
    },
    MarketEventCleared {
        symbol: String,
    },
    GameOver {
        status: GameStatus,
    },
    Reset,
}
