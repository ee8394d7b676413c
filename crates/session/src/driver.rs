//! Frame loop, session control and event dispatch.
//!
//! The host calls [`TickDriver::frame`] once per display refresh and keeps
//! calling it while it returns [`FrameControl::Continue`]. Input callbacks only
//! write into the input state; strikes are resolved immediately when the input
//! layer reports one. Deferred removals run from [`TickDriver::pump_timers`],
//! which the host may call independently of frames and which keeps working
//! after the session has ended.

use glam::Vec3;
use rand::Rng;
use timberfall_camera::Camera;
use timberfall_core::{scoped_rng, EntityIdAllocator, GameTime, SimTick};
use timberfall_input::{InputResponse, InputState};
use timberfall_physics::Ray;
use timberfall_render::{Environment, SceneBackend, TreeVisual};
use timberfall_world::{
    max_health_for_size, LifecycleController, RemovalQueue, RemovalSummary, StrikeEffect, Tree,
    TreeRegistry, World, WorldEpoch, WorldGenerator,
};
use tracing::{debug, info, warn};
use winit::event::{DeviceEvent, WindowEvent};
use winit::keyboard::KeyCode;

use crate::interaction::InteractionResolver;
use crate::movement::MovementIntegrator;
use crate::session::{Session, SessionEvent, SessionStats, StrikeOutcome, TimedEvent};
use crate::settings::SessionSettings;

/// Whether the host should schedule another frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    /// Schedule the next frame.
    Continue,
    /// The loop is not running; do not reschedule.
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Idle,
    Running,
    Cancelled,
}

/// Owns the scene backend, the input tracker and at most one session.
pub struct TickDriver<S: SceneBackend> {
    scene: S,
    settings: SessionSettings,
    input: InputState,
    session: Option<Session>,
    removals: RemovalQueue,
    lifecycle: LifecycleController,
    movement: MovementIntegrator,
    ids: EntityIdAllocator,
    last_epoch: WorldEpoch,
    loop_state: LoopState,
    tick: SimTick,
    viewport: (u32, u32),
    events: Vec<TimedEvent>,
    last_stats: Option<SessionStats>,
}

impl<S: SceneBackend> TickDriver<S> {
    /// Create an idle driver.
    pub fn new(scene: S, settings: SessionSettings) -> Self {
        Self {
            scene,
            input: InputState::new(settings.mouse_sensitivity),
            lifecycle: LifecycleController::new(settings.removal_delay_ms),
            movement: MovementIntegrator::new(settings.move_speed),
            settings,
            session: None,
            removals: RemovalQueue::new(),
            ids: EntityIdAllocator::new(),
            last_epoch: WorldEpoch(0),
            loop_state: LoopState::Idle,
            tick: SimTick::ZERO,
            viewport: (1280, 720),
            events: Vec::new(),
            last_stats: None,
        }
    }

    /// Start a session with a generated world.
    ///
    /// Returns `false` if a session is already running.
    pub fn start_session(&mut self, now: GameTime) -> bool {
        if self.session.is_some() {
            warn!("start_session called while a session is running");
            return false;
        }
        let seed = self
            .settings
            .world_seed
            .unwrap_or_else(|| rand::thread_rng().gen());
        let epoch = self.last_epoch.next();
        self.configure_scene();

        let generator = WorldGenerator::new(self.settings.generation.clone());
        let mut rng = scoped_rng(seed, 0);
        let world = World::generate(epoch, &generator, &mut rng, &mut self.ids, &mut self.scene);
        self.begin(world, seed, now);
        true
    }

    /// Start a session with trees at fixed `(position, size)` placements.
    ///
    /// Returns `false` if a session is already running.
    pub fn start_session_with_layout(&mut self, now: GameTime, layout: &[(Vec3, f32)]) -> bool {
        if self.session.is_some() {
            warn!("start_session called while a session is running");
            return false;
        }
        let epoch = self.last_epoch.next();
        self.configure_scene();

        let mut trees = TreeRegistry::new();
        for &(position, size) in layout {
            if max_health_for_size(size) == 0 {
                warn!(size, "skipping tree too small to have health");
                continue;
            }
            let id = self.ids.allocate();
            let visual = self.scene.add_tree(id, &TreeVisual::new(position, size));
            trees.insert(Tree::new(id, position, size).with_visual(visual));
        }
        let world = World::from_registry(epoch, trees);
        self.begin(world, self.settings.world_seed.unwrap_or(0), now);
        true
    }

    fn configure_scene(&mut self) {
        let environment = Environment::with_ground(self.settings.generation.half_extent);
        self.scene.configure_environment(&environment);
        self.scene.resize(self.viewport.0, self.viewport.1);
    }

    fn begin(&mut self, world: World, seed: u64, now: GameTime) {
        let epoch = world.epoch();
        let trees = world.trees().len();
        self.last_epoch = epoch;

        let mut camera = Camera::new(Vec3::new(0.0, self.settings.eye_height, 0.0));
        camera.set_aspect(self.viewport.0, self.viewport.1);
        let resolver =
            InteractionResolver::new(self.settings.strike_range, self.settings.strike_cooldown_ms);
        self.session = Some(Session::new(world, camera, resolver, seed, now));

        self.input.reset();
        self.input.attach();
        self.loop_state = LoopState::Running;
        self.last_stats = None;

        info!(epoch = epoch.0, seed, trees, "session started");
        self.push_event(now, SessionEvent::Started { epoch, seed, trees });
    }

    /// End the running session: stop the loop, detach input and release
    /// every visual. Pending removals stay queued and fire as no-ops.
    pub fn end_session(&mut self, now: GameTime) -> Option<SessionStats> {
        let mut session = self.session.take()?;
        self.loop_state = LoopState::Cancelled;
        self.input.detach();
        session.world.teardown(&mut self.scene);

        let stats = session.stats;
        info!(
            resources = stats.resources,
            felled = stats.felled,
            frames = stats.frames,
            "session ended"
        );
        self.push_event(now, SessionEvent::Ended { stats });
        self.last_stats = Some(stats);
        Some(stats)
    }

    /// Cancel the frame loop without ending the session.
    ///
    /// Returns `false` if the loop was not running; cancelling twice is a no-op.
    pub fn stop(&mut self) -> bool {
        if self.loop_state != LoopState::Running {
            return false;
        }
        self.loop_state = LoopState::Cancelled;
        info!(tick = self.tick.0, "frame loop stopped");
        true
    }

    /// Run one frame: due timers, movement, then render.
    pub fn frame(&mut self, now: GameTime) -> FrameControl {
        if self.loop_state != LoopState::Running {
            return FrameControl::Stop;
        }
        self.pump_timers(now);

        let Some(session) = self.session.as_mut() else {
            self.loop_state = LoopState::Cancelled;
            return FrameControl::Stop;
        };

        let snapshot = self.input.snapshot();
        session.camera.set_orientation(snapshot.yaw, snapshot.pitch);
        session.player_position = self.movement.integrate(session.player_position, &snapshot);
        session.camera.position = session.player_position;

        self.scene.render(&session.camera);
        session.stats.frames += 1;
        self.tick = self.tick.advance(1);
        FrameControl::Continue
    }

    /// Fire every deferred removal due at `now`.
    pub fn pump_timers(&mut self, now: GameTime) -> RemovalSummary {
        let world = self.session.as_mut().map(|session| &mut session.world);
        let (summary, removed) =
            self.lifecycle
                .run_due_removals(world, &mut self.removals, &mut self.scene, now);
        if summary.stale > 0 {
            debug!(stale = summary.stale, "dropped stale removals");
        }
        for entity in removed {
            self.push_event(now, SessionEvent::Removed { entity });
        }
        summary
    }

    /// Resolve a strike from the current viewer pose.
    pub fn strike(&mut self, now: GameTime) -> StrikeOutcome {
        let outcome = self.resolve_strike(now);
        if outcome != StrikeOutcome::NoSession {
            self.push_event(now, SessionEvent::Strike(outcome));
        }
        outcome
    }

    /// Strike, reporting only whether the request was accepted.
    pub fn try_strike(&mut self, now: GameTime) -> bool {
        self.strike(now).accepted()
    }

    fn resolve_strike(&mut self, now: GameTime) -> StrikeOutcome {
        let Some(session) = self.session.as_mut() else {
            return StrikeOutcome::NoSession;
        };
        if !session.resolver.try_begin(now) {
            debug!("strike rejected: cooldown");
            return StrikeOutcome::OnCooldown;
        }
        session.stats.strikes += 1;

        // Mouse-look since the last frame still counts for aiming.
        let (yaw, pitch) = self.input.look();
        session.camera.set_orientation(yaw, pitch);
        let Some(ray) = Ray::new(session.camera.position, session.camera.forward()) else {
            return StrikeOutcome::Missed;
        };
        let hits = self.scene.intersect_ray(&ray);
        let Some(target) = session.resolver.select_target(&hits, session.world.trees()) else {
            debug!(candidates = hits.len(), "strike missed");
            return StrikeOutcome::Missed;
        };

        let effect = self.lifecycle.strike(
            &mut session.world,
            &mut self.removals,
            &mut self.scene,
            target.entity,
            now,
        );
        match effect {
            StrikeEffect::Ignored => StrikeOutcome::Missed,
            StrikeEffect::Damaged { health, .. } => {
                session.stats.hits += 1;
                StrikeOutcome::Hit {
                    entity: target.entity,
                    health,
                }
            }
            StrikeEffect::Felled { yield_units } => {
                session.stats.hits += 1;
                session.stats.felled += 1;
                session.stats.resources += u64::from(yield_units);
                StrikeOutcome::Felled {
                    entity: target.entity,
                    yield_units,
                }
            }
        }
    }

    /// Act on a response from the input layer.
    pub fn dispatch(&mut self, response: InputResponse, now: GameTime) -> Option<StrikeOutcome> {
        match response {
            InputResponse::Strike => Some(self.strike(now)),
            InputResponse::RequestCaptureLock | InputResponse::None => None,
        }
    }

    /// Window event from the platform.
    pub fn handle_event(&mut self, event: &WindowEvent, now: GameTime) -> InputResponse {
        if let WindowEvent::Resized(size) = event {
            self.resize(size.width, size.height);
            return InputResponse::None;
        }
        let response = self.input.handle_event(event);
        self.dispatch(response, now);
        response
    }

    /// Device event from the platform (raw mouse motion).
    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        self.input.handle_device_event(event);
    }

    /// Key pressed.
    pub fn key_down(&mut self, key: KeyCode, now: GameTime) -> InputResponse {
        let response = self.input.key_down(key);
        self.dispatch(response, now);
        response
    }

    /// Key released.
    pub fn key_up(&mut self, key: KeyCode) {
        self.input.key_up(key);
    }

    /// Primary button clicked.
    pub fn primary_click(&mut self, now: GameTime) -> InputResponse {
        let response = self.input.primary_click();
        self.dispatch(response, now);
        response
    }

    /// Raw mouse movement.
    pub fn mouse_moved(&mut self, dx: f64, dy: f64) {
        self.input.mouse_moved(dx, dy);
    }

    /// Capture-lock entered or left.
    pub fn set_capture_locked(&mut self, locked: bool) {
        self.input.set_capture_locked(locked);
    }

    /// Viewport resized.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = (width, height);
        if let Some(session) = self.session.as_mut() {
            session.camera.set_aspect(width, height);
        }
        self.scene.resize(width, height);
    }

    /// Whether a session is running.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Whether the frame loop will accept another frame.
    pub fn is_running(&self) -> bool {
        self.loop_state == LoopState::Running
    }

    /// Whether a strike is still in progress.
    pub fn is_interacting(&self, now: GameTime) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.resolver.is_interacting(now))
    }

    /// Counters of the running session, or of the last ended one.
    pub fn stats(&self) -> SessionStats {
        self.session
            .as_ref()
            .map(Session::stats)
            .or(self.last_stats)
            .unwrap_or_default()
    }

    /// Running session.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Running session, mutable.
    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    /// Input tracker.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Scene backend.
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Session settings.
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Removals still queued (including ones that will turn out stale).
    pub fn pending_removals(&self) -> usize {
        self.removals.len()
    }

    /// Frames run across all sessions.
    pub fn tick(&self) -> SimTick {
        self.tick
    }

    /// Take all events recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<TimedEvent> {
        std::mem::take(&mut self.events)
    }

    fn push_event(&mut self, time: GameTime, event: SessionEvent) {
        self.events.push(TimedEvent {
            tick: self.tick,
            time,
            event,
        });
    }
}
