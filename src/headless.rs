use crate::scripted_input::{ScriptedFrame, ScriptedInputPlayer};
use anyhow::{Context, Result};
use std::path::PathBuf;
use timberfall_core::GameTime;
use timberfall_render::HeadlessScene;
use timberfall_session::{FrameControl, SessionEvent, SessionSettings, TickDriver, TimedEvent};
use timberfall_testkit::{write_run_metrics, EventRecord, JsonlSink, RunMetrics};
use tracing::{info, warn};
use winit::keyboard::KeyCode;

/// Virtual frame period (60 Hz).
pub const FRAME_MS: u64 = 16;
pub const DEFAULT_MAX_TICKS: u64 = 600;

pub struct HeadlessConfig {
    pub settings: SessionSettings,
    pub scripted_input: Option<PathBuf>,
    pub max_ticks: u64,
    pub exit_when_script_finished: bool,
    pub event_log: Option<PathBuf>,
    pub metrics_out: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            settings: SessionSettings::default(),
            scripted_input: None,
            max_ticks: DEFAULT_MAX_TICKS,
            exit_when_script_finished: false,
            event_log: None,
            metrics_out: None,
            width: 1280,
            height: 720,
        }
    }
}

pub fn run(cfg: HeadlessConfig) -> Result<RunMetrics> {
    let mut script = match cfg.scripted_input.as_deref() {
        Some(path) => Some(
            ScriptedInputPlayer::from_path(path)
                .with_context(|| format!("failed to load scripted input {}", path.display()))?,
        ),
        None => None,
    };
    let mut event_log = match cfg.event_log.as_deref() {
        Some(path) => Some(JsonlSink::create(path)?),
        None => None,
    };

    let mut driver = TickDriver::new(HeadlessScene::new(), cfg.settings);
    driver.resize(cfg.width, cfg.height);
    let mut now = GameTime::ZERO;
    driver.start_session(now);
    driver.set_capture_locked(true);

    let (seed, trees_placed) = driver
        .session()
        .map(|session| (session.seed(), session.world().report().placed))
        .unwrap_or_default();
    let mut metrics = RunMetrics::new("headless", seed);
    metrics.trees_placed = trees_placed;

    let dt = FRAME_MS as f32 / 1000.0;
    let mut held = ScriptedFrame::default();
    for _ in 0..cfg.max_ticks {
        if let Some(player) = script.as_mut() {
            if cfg.exit_when_script_finished && player.is_finished() {
                info!("scripted input finished");
                break;
            }
            let frame = player.advance(dt);
            apply_frame(&mut driver, &held, &frame, now);
            held = frame;
        }

        if driver.frame(now) == FrameControl::Stop {
            warn!("frame loop stopped early");
            break;
        }
        if let Some(sink) = event_log.as_mut() {
            log_events(sink, &driver.drain_events())?;
        }
        now = now + FRAME_MS;
    }

    if let Some(session) = driver.session() {
        metrics.trees_remaining = session.world().trees().len();
        metrics.final_position = session.player_position().to_array();
    }
    driver.end_session(now);
    let stats = driver.stats();
    metrics.frames = stats.frames;
    metrics.strikes = stats.strikes;
    metrics.hits = stats.hits;
    metrics.felled = stats.felled;
    metrics.resources = stats.resources;

    if let Some(mut sink) = event_log {
        log_events(&mut sink, &driver.drain_events())?;
        sink.flush()?;
        info!(events = sink.written(), "event log written");
    }
    if let Some(path) = cfg.metrics_out.as_deref() {
        write_run_metrics(path, &metrics)?;
    }
    Ok(metrics)
}

/// Translate a scripted frame into key transitions, mouse motion and clicks.
fn apply_frame(
    driver: &mut TickDriver<HeadlessScene>,
    previous: &ScriptedFrame,
    frame: &ScriptedFrame,
    now: GameTime,
) {
    let keys = [
        (KeyCode::KeyW, previous.forward, frame.forward),
        (KeyCode::KeyS, previous.back, frame.back),
        (KeyCode::KeyA, previous.left, frame.left),
        (KeyCode::KeyD, previous.right, frame.right),
    ];
    for (key, was, is) in keys {
        match (was, is) {
            (false, true) => {
                driver.key_down(key, now);
            }
            (true, false) => driver.key_up(key),
            _ => {}
        }
    }
    if frame.look != (0.0, 0.0) {
        driver.mouse_moved(frame.look.0 as f64, frame.look.1 as f64);
    }
    if frame.strike {
        driver.primary_click(now);
    }
}

fn log_events(sink: &mut JsonlSink, events: &[TimedEvent]) -> Result<()> {
    for timed in events {
        let (kind, payload) = match &timed.event {
            SessionEvent::Started { epoch, seed, trees } => (
                "SessionStarted",
                format!("epoch={} seed={seed} trees={trees}", epoch.0),
            ),
            SessionEvent::Strike(outcome) => ("Strike", format!("{outcome:?}")),
            SessionEvent::Removed { entity } => ("Removed", entity.to_string()),
            SessionEvent::Ended { stats } => (
                "SessionEnded",
                format!(
                    "resources={} felled={} frames={}",
                    stats.resources, stats.felled, stats.frames
                ),
            ),
        };
        sink.write(&EventRecord {
            tick: timed.tick,
            time_ms: timed.time.as_millis(),
            kind,
            payload: &payload,
        })?;
    }
    Ok(())
}
