#![warn(missing_docs)]
//! Core primitives shared across the workspace.

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Frame tick counter. One tick is one iteration of the render/simulation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any session timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

/// Monotonic session time in milliseconds.
///
/// The host supplies this on every frame; deferred actions and cooldowns are
/// expressed against it so tests can drive time explicitly.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GameTime(pub u64);

impl GameTime {
    /// Start of the session clock.
    pub const ZERO: Self = Self(0);

    /// Construct from milliseconds.
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Milliseconds since the start of the clock.
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, saturating at zero.
    pub fn millis_since(self, earlier: GameTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<u64> for GameTime {
    type Output = GameTime;

    fn add(self, ms: u64) -> GameTime {
        GameTime(self.0.saturating_add(ms))
    }
}

impl Sub<GameTime> for GameTime {
    type Output = u64;

    fn sub(self, rhs: GameTime) -> u64 {
        self.millis_since(rhs)
    }
}

impl fmt::Display for GameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Stable identity of a destructible entity. Never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tree#{}", self.0)
    }
}

/// Hands out monotonically increasing [`EntityId`]s.
#[derive(Debug, Default)]
pub struct EntityIdAllocator {
    next: u64,
}

impl EntityIdAllocator {
    /// Create an allocator whose first id is `1`.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocate the next id.
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next.max(1));
        self.next = id.0 + 1;
        id
    }
}

/// Helper to derive a reproducible RNG from a world seed and a stream label.
pub fn scoped_rng(world_seed: u64, stream: u64) -> StdRng {
    let seed = world_seed ^ stream.rotate_left(32);
    StdRng::seed_from_u64(seed)
}
