use super::*;
use crate::session::SessionOptions;
use chess_core::{Color, START_FEN};
use market_engine::{Impact, Sentiment};

const THINK: Duration = Duration::from_millis(1500);

fn host_with(options: SessionOptions) -> SessionHost {
    let session = GameSession::new(None, options).unwrap();
    SessionHost::new(session, THINK)
}

fn white_host(seed: u64) -> SessionHost {
    host_with(SessionOptions {
        seed: Some(seed),
        ..Default::default()
    })
}

#[tokio::test(start_paused = true)]
async fn opponent_replies_after_think_delay() {
    let host = white_host(1);

    assert!(host.user_move("e4").await);
    assert_eq!(host.snapshot().await.history.len(), 1);

    tokio::time::sleep(THINK / 2).await;
    assert_eq!(host.snapshot().await.history.len(), 1);

    tokio::time::sleep(THINK).await;
    let snap = host.snapshot().await;
    assert_eq!(snap.history.len(), 2);
    assert_eq!(snap.status, GameStatus::Playing);
}

#[tokio::test(start_paused = true)]
async fn refused_move_schedules_nothing() {
    let host = white_host(1);

    assert!(!host.user_move("e5").await);
    tokio::time::sleep(THINK * 2).await;

    let snap = host.snapshot().await;
    assert!(snap.history.is_empty());
    assert_eq!(snap.fen, START_FEN);
}

#[tokio::test(start_paused = true)]
async fn reset_cancels_pending_reply() {
    let host = white_host(2);

    assert!(host.user_move("d4").await);
    host.reset().await;
    assert_eq!(host.generation(), 1);

    tokio::time::sleep(THINK * 3).await;

    let snap = host.snapshot().await;
    assert!(snap.history.is_empty());
    assert_eq!(snap.fen, START_FEN);
    assert_eq!(snap.status, GameStatus::Setup);
}

#[tokio::test(start_paused = true)]
async fn reset_cancels_reply_when_opponent_moves_first() {
    let host = host_with(SessionOptions {
        human_side: Color::Black,
        seed: Some(9),
        ..Default::default()
    });

    assert!(host.start().await);
    tokio::time::sleep(THINK * 2).await;
    assert_eq!(host.snapshot().await.history.len(), 1);

    // After the reset White, the opponent, is to move again
    assert!(host.user_move("a6").await);
    host.reset().await;
    tokio::time::sleep(THINK * 3).await;

    let snap = host.snapshot().await;
    assert!(
        snap.history.is_empty(),
        "reply applied after reset: {:?}",
        snap.history
    );
    assert_eq!(snap.fen, START_FEN);
    assert_eq!(snap.status, GameStatus::Setup);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_reset_never_lets_a_reply_through() {
    let think = Duration::from_millis(5);

    for seed in 0..25 {
        let session = GameSession::new(
            None,
            SessionOptions {
                human_side: Color::Black,
                seed: Some(seed),
                ..Default::default()
            },
        )
        .unwrap();
        let host = SessionHost::new(session, think);

        assert!(host.start().await);
        while host.snapshot().await.history.is_empty() {
            tokio::time::sleep(think).await;
        }

        let mover = {
            let host = host.clone();
            tokio::spawn(async move { host.user_move("a6").await })
        };
        let resetter = {
            let host = host.clone();
            tokio::spawn(async move { host.reset().await })
        };
        mover.await.unwrap();
        resetter.await.unwrap();

        tokio::time::sleep(think * 10).await;
        let snap = host.snapshot().await;
        assert!(
            snap.history.is_empty(),
            "seed {}: reply applied after reset: {:?}",
            seed,
            snap.history
        );
        assert_eq!(snap.status, GameStatus::Setup);
    }
}

#[tokio::test(start_paused = true)]
async fn play_continues_after_reset() {
    let host = white_host(3);

    assert!(host.user_move("e4").await);
    host.reset().await;
    assert!(host.user_move("c4").await);

    tokio::time::sleep(THINK * 2).await;

    let snap = host.snapshot().await;
    assert_eq!(snap.history.len(), 2);
    assert_eq!(snap.history[0], "c4");
}

#[tokio::test(start_paused = true)]
async fn market_event_triggers_immediate_reply() {
    let host = white_host(4);
    assert!(host.user_move("e4").await);

    let event = MarketEvent::new("BTC", Sentiment::Negative, Impact::High);
    let reply = host.fire_market_event(event).await.unwrap();
    assert!(reply.is_some());
    assert_eq!(host.snapshot().await.history.len(), 2);

    // The delayed reply finds it is the player's turn and stands down
    tokio::time::sleep(THINK * 2).await;
    let snap = host.snapshot().await;
    assert_eq!(snap.history.len(), 2);
    assert_eq!(snap.active_events.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn market_event_on_players_turn_only_activates() {
    let host = white_host(5);

    let event = MarketEvent::new("ETH", Sentiment::Positive, Impact::Low);
    assert_eq!(host.fire_market_event(event).await.unwrap(), None);

    let snap = host.snapshot().await;
    assert!(snap.history.is_empty());
    assert_eq!(snap.active_events.len(), 1);

    assert!(host.clear_market_event("eth").await);
    assert!(host.snapshot().await.active_events.is_empty());
}

#[tokio::test(start_paused = true)]
async fn opponent_opens_when_player_is_black() {
    let host = host_with(SessionOptions {
        human_side: Color::Black,
        seed: Some(6),
        ..Default::default()
    });

    assert!(host.start().await);
    assert!(!host.start().await);
    tokio::time::sleep(THINK * 2).await;

    let snap = host.snapshot().await;
    assert_eq!(snap.history.len(), 1);
    assert_eq!(snap.status, GameStatus::Playing);
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_session_events() {
    let host = white_host(7);
    let mut rx = host.subscribe();

    assert!(host.user_move("e4").await);
    tokio::time::sleep(THINK * 2).await;

    assert_eq!(rx.recv().await.unwrap(), SessionEvent::Started);
    match rx.recv().await.unwrap() {
        SessionEvent::MoveApplied { san, .. } => assert_eq!(san, "e4"),
        other => panic!("unexpected event {:?}", other),
    }
    match rx.recv().await.unwrap() {
        SessionEvent::MoveApplied { mover, .. } => {
            assert_eq!(mover, crate::events::Mover::Opponent)
        }
        other => panic!("unexpected event {:?}", other),
    }

    host.reset().await;
    assert_eq!(rx.recv().await.unwrap(), SessionEvent::Reset);
}

#[tokio::test(start_paused = true)]
async fn market_feed_replays_events_in_order() {
    let host = white_host(8);
    let events = vec![
        MarketEvent::new("BTC", Sentiment::Negative, Impact::High),
        MarketEvent::new("ETH", Sentiment::Neutral, Impact::Medium),
        MarketEvent::new("BTC", Sentiment::Positive, Impact::Low),
    ];

    let feed = host.spawn_market_feed(events, Duration::from_secs(5));

    tokio::time::sleep(Duration::from_millis(5_100)).await;
    assert_eq!(host.snapshot().await.active_events.len(), 1);

    feed.await.unwrap();
    let active = host.snapshot().await.active_events;
    assert_eq!(active.len(), 2);
    assert_eq!(active[0].symbol, "BTC");
    assert_eq!(active[0].sentiment, Sentiment::Positive);
    assert_eq!(active[1].symbol, "ETH");
}
