//! Per-session state: world, player pose, counters.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use timberfall_camera::Camera;
use timberfall_core::{EntityId, GameTime, SimTick};
use timberfall_world::{World, WorldEpoch};

use crate::interaction::InteractionResolver;

/// Counters exposed to the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Resource units collected.
    pub resources: u64,
    /// Trees felled.
    pub felled: u64,
    /// Strike attempts that passed the cooldown check.
    pub strikes: u64,
    /// Strikes that damaged a tree.
    pub hits: u64,
    /// Frames rendered.
    pub frames: u64,
}

/// What happened to a strike request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeOutcome {
    /// No session is running.
    NoSession,
    /// Rejected because the previous strike's cooldown is still open.
    OnCooldown,
    /// Accepted but nothing eligible was in the line of sight.
    Missed,
    /// A standing tree lost one health point.
    Hit {
        /// Tree struck.
        entity: EntityId,
        /// Health left.
        health: u32,
    },
    /// The strike felled a tree.
    Felled {
        /// Tree felled.
        entity: EntityId,
        /// Resource units gained.
        yield_units: u32,
    },
}

impl StrikeOutcome {
    /// Whether the request was accepted (and therefore started a cooldown).
    pub fn accepted(&self) -> bool {
        !matches!(self, StrikeOutcome::NoSession | StrikeOutcome::OnCooldown)
    }
}

/// Notable session event, for logs and presentation.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A world was generated and the loop started.
    Started {
        /// Epoch of the new world.
        epoch: WorldEpoch,
        /// Seed used for generation.
        seed: u64,
        /// Trees placed.
        trees: usize,
    },
    /// A strike was processed.
    Strike(StrikeOutcome),
    /// A felled tree left the world.
    Removed {
        /// Tree removed.
        entity: EntityId,
    },
    /// The session ended.
    Ended {
        /// Final counters.
        stats: SessionStats,
    },
}

/// Event stamped with when it happened.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedEvent {
    /// Frame tick.
    pub tick: SimTick,
    /// Session clock.
    pub time: GameTime,
    /// The event.
    pub event: SessionEvent,
}

/// State owned by one running session.
#[derive(Debug)]
pub struct Session {
    pub(crate) world: World,
    pub(crate) camera: Camera,
    pub(crate) player_position: Vec3,
    pub(crate) stats: SessionStats,
    pub(crate) resolver: InteractionResolver,
    pub(crate) seed: u64,
    pub(crate) started_at: GameTime,
}

impl Session {
    pub(crate) fn new(
        world: World,
        camera: Camera,
        resolver: InteractionResolver,
        seed: u64,
        started_at: GameTime,
    ) -> Self {
        Self {
            world,
            player_position: camera.position,
            camera,
            stats: SessionStats::default(),
            resolver,
            seed,
            started_at,
        }
    }

    /// The world of this session.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Viewer pose used for rendering and strike rays.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Player position.
    pub fn player_position(&self) -> Vec3 {
        self.player_position
    }

    /// Counters so far.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Seed used to generate the world.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Session start time.
    pub fn started_at(&self) -> GameTime {
        self.started_at
    }
}
