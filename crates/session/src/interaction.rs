//! Strike targeting and the strike cooldown.

use timberfall_core::{EntityId, GameTime};
use timberfall_render::SceneHit;
use timberfall_world::TreeRegistry;

/// Chosen strike target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrikeTarget {
    /// Tree that will take the hit.
    pub entity: EntityId,
    /// Distance from the viewer to the hit point.
    pub distance: f32,
}

/// Cooldown guard plus nearest-eligible-hit selection.
#[derive(Debug, Clone)]
pub struct InteractionResolver {
    range: f32,
    cooldown_ms: u64,
    busy_until: Option<GameTime>,
}

impl InteractionResolver {
    /// Resolver with the given strike range and cooldown.
    pub fn new(range: f32, cooldown_ms: u64) -> Self {
        Self {
            range,
            cooldown_ms,
            busy_until: None,
        }
    }

    /// Maximum strike distance.
    pub fn range(&self) -> f32 {
        self.range
    }

    /// Whether a strike is still in progress at `now`.
    pub fn is_interacting(&self, now: GameTime) -> bool {
        self.busy_until.is_some_and(|until| now < until)
    }

    /// Enter the cooldown window if no strike is in progress.
    ///
    /// Returns `false` (and changes nothing) while the previous window is open.
    pub fn try_begin(&mut self, now: GameTime) -> bool {
        if self.is_interacting(now) {
            return false;
        }
        self.busy_until = Some(now + self.cooldown_ms);
        true
    }

    /// Pick the nearest hit that belongs to a standing tree within range.
    ///
    /// Untagged hits (scenery), hits beyond range and hits on felled or
    /// unknown trees are skipped; later candidates are still considered.
    pub fn select_target(&self, hits: &[SceneHit], trees: &TreeRegistry) -> Option<StrikeTarget> {
        hits.iter()
            .filter(|hit| hit.distance <= self.range)
            .filter_map(|hit| {
                let entity = hit.owner?;
                trees.is_targetable(entity).then_some(StrikeTarget {
                    entity,
                    distance: hit.distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    /// Forget any open cooldown window.
    pub fn reset(&mut self) {
        self.busy_until = None;
    }
}
