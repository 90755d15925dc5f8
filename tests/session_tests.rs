//! Session tests - turn loop, events and game over

use hex_triad::core::EngineConfig;
use hex_triad::session::{Event, GameOverReason, Phase, Session};

fn autoplay(session: &mut Session, turns: u32) -> Vec<Event> {
    let mut events = session.start();
    for _ in 0..turns {
        if session.is_over() {
            break;
        }
        let Some(selection) = session.first_available_move() else {
            break;
        };
        events.extend(session.rotate(&selection, true));
    }
    events
}

#[test]
fn test_session_lifecycle() {
    let mut session = Session::new(EngineConfig::default().with_seed(12345)).unwrap();
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.score(), 0);

    session.start();
    if session.is_over() {
        return;
    }
    assert_eq!(session.phase(), Phase::Idle);

    let selection = session.first_available_move().unwrap();
    let events = session.rotate(&selection, true);

    assert!(matches!(events[0], Event::Rotated { .. }));
    assert!(matches!(events[1], Event::Exploded { .. }));
    assert!(matches!(events[2], Event::ScoreChanged { .. }));
    assert!(matches!(events[3], Event::BombsUpdated { .. }));
    assert!(session.score() > 0);
    assert!(matches!(session.phase(), Phase::Idle | Phase::GameOver));
}

#[test]
fn test_same_seed_same_events() {
    let config = EngineConfig::default().with_seed(77);
    let mut a = Session::new(config.clone()).unwrap();
    let mut b = Session::new(config).unwrap();

    assert_eq!(autoplay(&mut a, 15), autoplay(&mut b, 15));
    assert_eq!(a.score(), b.score());
    assert_eq!(a.engine().grid(), b.engine().grid());
}

#[test]
fn test_score_events_track_engine_score() {
    let mut session = Session::new(EngineConfig::default().with_seed(8)).unwrap();
    let events = autoplay(&mut session, 10);

    let last_score = events.iter().rev().find_map(|e| match e {
        Event::ScoreChanged { score } => Some(*score),
        _ => None,
    });
    if let Some(score) = last_score {
        assert_eq!(score, session.score());
    }

    // Every explosion is followed by its score update.
    for pair in events.windows(2) {
        if matches!(pair[0], Event::Exploded { .. }) {
            assert!(matches!(pair[1], Event::ScoreChanged { .. }));
        }
    }
}

#[test]
fn test_small_board_runs_out_of_moves() {
    for seed in 1..=5 {
        let config = EngineConfig {
            bomb_timer: 1000,
            ..EngineConfig::default()
                .with_size(3, 3)
                .with_colors(5)
                .with_seed(seed)
        };
        let mut session = Session::new(config).unwrap();
        let events = autoplay(&mut session, 200);

        assert!(session.is_over(), "seed {} still running", seed);
        assert_eq!(session.game_over_reason(), Some(GameOverReason::NoMovesLeft));
        assert_eq!(
            events.last(),
            Some(&Event::GameOver {
                reason: GameOverReason::NoMovesLeft
            })
        );
        assert_eq!(session.engine().first_available_move(), None);
    }
}

#[test]
fn test_events_are_json_lines() {
    let mut session = Session::new(EngineConfig::default().with_seed(4)).unwrap();
    let events = autoplay(&mut session, 3);
    assert!(!events.is_empty());

    for event in &events {
        let line = serde_json::to_string(event).unwrap();
        assert!(!line.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert!(value["type"].is_string(), "untagged event: {}", line);
    }
}
