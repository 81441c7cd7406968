//! Async host for a [`GameSession`].
//!
//! The session sits behind a fair `tokio::sync::Mutex`, so every board
//! mutation (player move, delayed opponent reply, event-triggered reply,
//! reset) is applied by one writer at a time in arrival order.
//!
//! Delayed replies are spawned tasks stamped with the host generation, read
//! under the session lock by the mutation that made the reply due.
//! [`SessionHost::reset`] bumps the generation and aborts whatever is still
//! pending while it holds that lock, and a task that wakes up under an older
//! generation does nothing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use market_engine::{Difficulty, MarketEvent};
use serde::Serialize;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::error::SessionError;
use crate::events::SessionEvent;
use crate::session::{GameSession, GameStatus};

const EVENT_BUFFER: usize = 256;

/// Point-in-time view of a hosted session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub fen: String,
    pub status: GameStatus,
    pub history: Vec<String>,
    pub active_events: Vec<MarketEvent>,
}

struct HostInner {
    session: Mutex<GameSession>,
    generation: AtomicU64,
    pending: Mutex<Vec<JoinHandle<()>>>,
    think_delay: Duration,
    notifier: broadcast::Sender<SessionEvent>,
}

/// Shared handle to a session driven by async triggers.
#[derive(Clone)]
pub struct SessionHost {
    inner: Arc<HostInner>,
}

impl SessionHost {
    pub fn new(session: GameSession, think_delay: Duration) -> Self {
        let (notifier, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            inner: Arc::new(HostInner {
                session: Mutex::new(session),
                generation: AtomicU64::new(0),
                pending: Mutex::new(Vec::new()),
                think_delay,
                notifier,
            }),
        }
    }

    /// Receives every [`SessionEvent`] published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.notifier.subscribe()
    }

    pub fn think_delay(&self) -> Duration {
        self.inner.think_delay
    }

    pub fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }

    /// Starts the game. If the opponent has the first move, its reply is
    /// scheduled.
    pub async fn start(&self) -> bool {
        let mut session = self.inner.session.lock().await;
        let started = session.start();
        let reply_due = started && session.is_opponent_turn();
        let generation = self.generation();
        self.publish(&mut session);
        drop(session);

        if reply_due {
            self.schedule_opponent(generation).await;
        }
        started
    }

    /// Applies the player's move and schedules the opponent's reply after
    /// the think delay. Returns false if the move was refused.
    pub async fn user_move(&self, notation: &str) -> bool {
        let mut session = self.inner.session.lock().await;
        let accepted = session.make_user_move(notation);
        let reply_due = accepted && session.is_opponent_turn();
        let generation = self.generation();
        self.publish(&mut session);
        drop(session);

        if reply_due {
            self.schedule_opponent(generation).await;
        }
        accepted
    }

    /// Activates a market event and, if the opponent is to move, lets it
    /// move straight away. Waits for any mutation already in progress.
    pub async fn fire_market_event(
        &self,
        event: MarketEvent,
    ) -> Result<Option<String>, SessionError> {
        let mut session = self.inner.session.lock().await;
        session.activate_event(event);
        let played = if session.is_opponent_turn() {
            session.make_ai_move()
        } else {
            Ok(None)
        };
        self.publish(&mut session);
        played
    }

    pub async fn clear_market_event(&self, symbol: &str) -> bool {
        let mut session = self.inner.session.lock().await;
        let cleared = session.clear_event(symbol);
        self.publish(&mut session);
        cleared
    }

    pub async fn set_difficulty(&self, difficulty: Difficulty) {
        self.inner.session.lock().await.set_difficulty(difficulty);
    }

    /// Cancels pending opponent replies and resets the session.
    pub async fn reset(&self) {
        // Replies are stamped under this lock, so none carries the old
        // generation once it is bumped.
        let mut session = self.inner.session.lock().await;
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let cancelled = {
            let mut pending = self.inner.pending.lock().await;
            let n = pending.iter().filter(|h| !h.is_finished()).count();
            for handle in pending.drain(..) {
                handle.abort();
            }
            n
        };

        session.reset();
        self.publish(&mut session);
        debug!(generation, cancelled, "host reset");
    }

    /// Replays `events` in order, one every `interval`.
    ///
    /// The feed is not tied to a generation: it keeps running across resets
    /// until the list is exhausted or the returned handle is aborted.
    pub fn spawn_market_feed(&self, events: Vec<MarketEvent>, interval: Duration) -> JoinHandle<()> {
        let host = self.clone();
        tokio::spawn(async move {
            for event in events {
                tokio::time::sleep(interval).await;
                let symbol = event.symbol.clone();
                match host.fire_market_event(event).await {
                    Ok(Some(san)) => debug!(%symbol, %san, "event-triggered reply"),
                    Ok(None) => {}
                    Err(e) => warn!(%symbol, error = %e, "event-triggered reply failed"),
                }
            }
        })
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let session = self.inner.session.lock().await;
        SessionSnapshot {
            id: session.session_id(),
            fen: session.board_state(),
            status: session.game_status(),
            history: session.move_history().to_vec(),
            active_events: session.active_events().to_vec(),
        }
    }

    async fn schedule_opponent(&self, generation: u64) {
        let host = self.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(host.inner.think_delay).await;

            let mut session = host.inner.session.lock().await;
            if host.generation() != generation {
                debug!(generation, "stale opponent reply dropped");
                return;
            }
            match session.make_ai_move() {
                Ok(Some(san)) => debug!(%san, "opponent replied"),
                Ok(None) => {}
                // An event-triggered reply got there first
                Err(SessionError::NotOpponentTurn) => {}
                Err(e) => error!(error = %e, "opponent reply failed"),
            }
            host.publish(&mut session);
        });

        let mut pending = self.inner.pending.lock().await;
        pending.retain(|h| !h.is_finished());
        pending.push(handle);
    }

    fn publish(&self, session: &mut GameSession) {
        for event in session.drain_events() {
            // No subscribers is fine
            let _ = self.inner.notifier.send(event);
        }
    }
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod host_tests;
