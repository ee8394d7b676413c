use timberfall_core::{GameTime, SimTick};
use timberfall_render::HeadlessScene;
use timberfall_session::{FrameControl, SessionSettings, TickDriver};
use timberfall_testkit::{EventRecord, JsonlSink};

#[test]
fn deterministic_event_stream_can_be_written() {
    let mut sink = JsonlSink::create(std::env::temp_dir().join("timberfall-eventlog.jsonl"))
        .expect("can create temp log");
    let tick = SimTick::ZERO.advance(1);
    let record = EventRecord {
        tick,
        time_ms: 16,
        kind: "SmokeTest",
        payload: "ok",
    };
    sink.write(&record).expect("can write event");
    assert_eq!(sink.written(), 1);
}

#[test]
fn default_session_runs_a_second_of_frames() {
    let settings = SessionSettings {
        world_seed: Some(3),
        ..SessionSettings::default()
    };
    let mut driver = TickDriver::new(HeadlessScene::new(), settings);
    assert!(driver.start_session(GameTime::ZERO));
    for i in 0..60u64 {
        assert_eq!(
            driver.frame(GameTime::from_millis(i * 16)),
            FrameControl::Continue
        );
    }
    assert_eq!(driver.scene().frames_rendered(), 60);
    let stats = driver.end_session(GameTime::from_millis(1000)).expect("stats");
    assert_eq!(stats.frames, 60);
    assert_eq!(driver.scene().object_count(), 0);
}
