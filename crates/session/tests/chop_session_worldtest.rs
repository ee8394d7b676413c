//! ChopSession worldtest - drives a whole session through the tick driver.
//!
//! Validates:
//! - Walking up to a tree and striking it fells it after max-health strikes
//! - Resources are credited once, on the felling strike
//! - The felled tree leaves the world after the removal delay
//! - Ending the session releases every scene group
//!
//! Events are logged to a JSONL file in the temp directory.

use glam::Vec3;
use timberfall_core::GameTime;
use timberfall_render::HeadlessScene;
use timberfall_session::{
    FrameControl, SessionEvent, SessionSettings, StrikeOutcome, TickDriver, TimedEvent,
};
use timberfall_testkit::{EventRecord, JsonlSink};
use winit::keyboard::KeyCode;

/// Frame period in milliseconds (60 Hz).
const FRAME_MS: u64 = 16;

fn log_events(sink: &mut JsonlSink, events: &[TimedEvent]) {
    for timed in events {
        let (kind, payload) = match &timed.event {
            SessionEvent::Started { epoch, seed, trees } => (
                "Started",
                format!("epoch {} seed {} trees {}", epoch.0, seed, trees),
            ),
            SessionEvent::Strike(outcome) => ("Strike", format!("{outcome:?}")),
            SessionEvent::Removed { entity } => ("Removed", entity.to_string()),
            SessionEvent::Ended { stats } => ("Ended", format!("{stats:?}")),
        };
        sink.write(&EventRecord {
            tick: timed.tick,
            time_ms: timed.time.as_millis(),
            kind,
            payload: &payload,
        })
        .expect("can write event");
    }
}

#[test]
fn chop_session_worldtest() {
    let output_path = std::env::temp_dir().join("chop_session_worldtest.jsonl");
    let mut event_log = JsonlSink::create(&output_path).expect("can create event log");

    let mut driver = TickDriver::new(HeadlessScene::new(), SessionSettings::default());
    let tree_base = Vec3::new(0.0, 0.0, -12.0);
    assert!(driver.start_session_with_layout(GameTime::ZERO, &[(tree_base, 2.0)]));
    let tree_id = driver
        .session()
        .and_then(|s| s.world().trees().iter().next().map(|t| t.id()))
        .expect("tree placed");

    // Out of range from the spawn point.
    let mut now = GameTime::ZERO;
    assert_eq!(driver.strike(now), StrikeOutcome::Missed);

    // Walk forward 60 frames: 6 units, leaving the trunk 5.5 units ahead.
    driver.key_down(KeyCode::KeyW, now);
    for _ in 0..60 {
        now = now + FRAME_MS;
        assert_eq!(driver.frame(now), FrameControl::Continue);
    }
    driver.key_up(KeyCode::KeyW);
    let position = driver.session().expect("session").player_position();
    assert!((position.z + 6.0).abs() < 1e-3, "walked to {position:?}");
    assert!((position.y - 1.6).abs() < 1e-6, "eye height kept");

    let mut felled_at = None;
    while felled_at.is_none() {
        now = now + FRAME_MS;
        driver.frame(now);
        match driver.strike(now) {
            StrikeOutcome::Felled { entity, yield_units } => {
                assert_eq!(entity, tree_id);
                assert_eq!(yield_units, 4);
                felled_at = Some(now);
            }
            StrikeOutcome::Hit { entity, .. } => assert_eq!(entity, tree_id),
            StrikeOutcome::OnCooldown => {}
            other => panic!("unexpected strike outcome {other:?}"),
        }
        assert!(now.as_millis() < 10_000, "tree never fell");
    }

    let stats = driver.stats();
    assert_eq!(stats.hits, 6);
    assert_eq!(stats.felled, 1);
    assert_eq!(stats.resources, 4);

    // Run frames until the removal delay passes.
    let felled_at = felled_at.expect("felled");
    while now.millis_since(felled_at) < 2_000 + FRAME_MS {
        now = now + FRAME_MS;
        driver.frame(now);
    }
    let session = driver.session().expect("session");
    assert!(!session.world().trees().contains(tree_id));
    assert_eq!(driver.scene().object_count(), 0);
    assert_eq!(driver.stats().resources, 4);

    let final_stats = driver.end_session(now).expect("session ended");
    assert_eq!(driver.frame(now + FRAME_MS), FrameControl::Stop);

    let events = driver.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e.event, SessionEvent::Removed { entity } if entity == tree_id)));
    assert!(matches!(
        events.last().map(|e| &e.event),
        Some(SessionEvent::Ended { stats }) if *stats == final_stats
    ));

    log_events(&mut event_log, &events);
    event_log.flush().expect("can flush event log");
    assert_eq!(event_log.written(), events.len());
}

#[test]
fn seeded_sessions_match_worldtest() {
    let settings = SessionSettings {
        world_seed: Some(0xC0FFEE),
        ..SessionSettings::default()
    };

    let run = |settings: &SessionSettings| {
        let mut driver = TickDriver::new(HeadlessScene::new(), settings.clone());
        driver.start_session(GameTime::ZERO);
        driver.key_down(KeyCode::KeyD, GameTime::ZERO);
        driver.set_capture_locked(true);
        driver.mouse_moved(120.0, -40.0);
        for i in 1..=120u64 {
            driver.frame(GameTime::from_millis(i * FRAME_MS));
        }
        let session = driver.session().expect("session");
        let trees: Vec<_> = session
            .world()
            .trees()
            .iter()
            .map(|t| (t.id(), t.position(), t.health()))
            .collect();
        (trees, session.player_position())
    };

    let (trees_a, pos_a) = run(&settings);
    let (trees_b, pos_b) = run(&settings);
    assert_eq!(trees_a, trees_b);
    assert_eq!(pos_a, pos_b);
    assert!(pos_a.length() > 1.0);
}
