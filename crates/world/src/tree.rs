//! Destructible trees and their health state machine.
//!
//! A tree goes `Intact -> Damaged -> Felled`; felling is irreversible. The
//! `Removed` state is represented by the tree no longer being in the
//! registry.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use timberfall_core::{EntityId, GameTime};
use timberfall_render::VisualHandle;

/// Lean added per strike received, in radians. Feedback only.
pub const TILT_PER_STRIKE: f32 = 0.1;

/// Lean of a felled tree, in radians.
pub const FALLEN_TILT: f32 = std::f32::consts::FRAC_PI_2;

/// Health state of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreeState {
    /// Full health.
    Intact,
    /// Struck at least once, still standing.
    Damaged,
    /// Health depleted; waiting for removal.
    Felled,
}

/// Result of applying one strike to a tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrikeEffect {
    /// The tree was already felled; nothing changed.
    Ignored,
    /// Health decreased and the tree is still standing.
    Damaged {
        /// Remaining health.
        health: u32,
        /// New visual lean.
        tilt: f32,
    },
    /// This strike felled the tree.
    Felled {
        /// Resource units produced.
        yield_units: u32,
    },
}

/// Maximum health for a tree of `size`: `floor(size * 3)`.
pub fn max_health_for_size(size: f32) -> u32 {
    (size * 3.0).floor().max(0.0) as u32
}

/// Resources yielded when a tree of `size` is felled: `floor(size * 2)`.
pub fn yield_for_size(size: f32) -> u32 {
    (size * 2.0).floor().max(0.0) as u32
}

/// A destructible tree.
#[derive(Debug)]
pub struct Tree {
    id: EntityId,
    position: Vec3,
    size: f32,
    health: u32,
    max_health: u32,
    strikes: u32,
    tilt: f32,
    felled_at: Option<GameTime>,
    visual: Option<VisualHandle>,
}

impl Tree {
    /// Create an intact tree. Health and max health derive from `size`.
    pub fn new(id: EntityId, position: Vec3, size: f32) -> Self {
        debug_assert!(size > 0.0, "tree size must be positive");
        let max_health = max_health_for_size(size);
        Self {
            id,
            position,
            size,
            health: max_health,
            max_health,
            strikes: 0,
            tilt: 0.0,
            felled_at: None,
            visual: None,
        }
    }

    /// Attach the renderable group owned by this tree.
    pub fn with_visual(mut self, visual: VisualHandle) -> Self {
        self.visual = Some(visual);
        self
    }

    /// Identity.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Ground-plane position of the trunk base.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Size scalar fixed at creation.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Current health.
    pub fn health(&self) -> u32 {
        self.health
    }

    /// Health at creation.
    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Number of successful strikes received.
    pub fn strikes(&self) -> u32 {
        self.strikes
    }

    /// Current visual lean in radians.
    pub fn tilt(&self) -> f32 {
        self.tilt
    }

    /// Resources this tree yields when felled.
    pub fn resource_yield(&self) -> u32 {
        yield_for_size(self.size)
    }

    /// When the tree was felled, if it has been.
    pub fn felled_at(&self) -> Option<GameTime> {
        self.felled_at
    }

    /// Current health state.
    pub fn state(&self) -> TreeState {
        if self.health == 0 {
            TreeState::Felled
        } else if self.health < self.max_health {
            TreeState::Damaged
        } else {
            TreeState::Intact
        }
    }

    /// Whether the tree has been felled.
    pub fn is_felled(&self) -> bool {
        self.state() == TreeState::Felled
    }

    /// Borrow the visual handle, if still attached.
    pub fn visual(&self) -> Option<&VisualHandle> {
        self.visual.as_ref()
    }

    /// Detach the visual handle so the caller can release it.
    pub fn take_visual(&mut self) -> Option<VisualHandle> {
        self.visual.take()
    }

    /// Apply one strike at time `now`.
    ///
    /// Decrements health by exactly one. The strike that brings health to
    /// zero fells the tree and is the only one that reports a yield.
    pub fn apply_strike(&mut self, now: GameTime) -> StrikeEffect {
        if self.is_felled() {
            return StrikeEffect::Ignored;
        }

        self.health -= 1;
        self.strikes += 1;

        if self.health == 0 {
            self.tilt = FALLEN_TILT;
            self.felled_at = Some(now);
            StrikeEffect::Felled {
                yield_units: self.resource_yield(),
            }
        } else {
            self.tilt = self.strikes as f32 * TILT_PER_STRIKE;
            StrikeEffect::Damaged {
                health: self.health,
                tilt: self.tilt,
            }
        }
    }
}
