//! Tree lifecycle: applies strikes and runs deferred removals.

use timberfall_core::{EntityId, GameTime};
use timberfall_render::SceneBackend;
use tracing::{debug, info};

use crate::removal::RemovalQueue;
use crate::tree::StrikeEffect;
use crate::world::World;

/// Delay between felling and removal, in milliseconds.
pub const DEFAULT_REMOVAL_DELAY_MS: u64 = 2000;

/// Counts from one pass over due removals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemovalSummary {
    /// Trees removed from the world.
    pub removed: usize,
    /// Tasks dropped because their world is gone or the tree already left.
    pub stale: usize,
}

/// Drives tree state transitions against a world and a scene.
#[derive(Debug, Clone, Copy)]
pub struct LifecycleController {
    removal_delay_ms: u64,
}

impl Default for LifecycleController {
    fn default() -> Self {
        Self::new(DEFAULT_REMOVAL_DELAY_MS)
    }
}

impl LifecycleController {
    /// Controller with the given felling-to-removal delay.
    pub fn new(removal_delay_ms: u64) -> Self {
        Self { removal_delay_ms }
    }

    /// Felling-to-removal delay in milliseconds.
    pub fn removal_delay_ms(&self) -> u64 {
        self.removal_delay_ms
    }

    /// Strike `id` at time `now`.
    ///
    /// Unknown or already-felled trees are left alone and yield
    /// [`StrikeEffect::Ignored`]. Felling schedules the removal.
    pub fn strike<S: SceneBackend + ?Sized>(
        &self,
        world: &mut World,
        queue: &mut RemovalQueue,
        scene: &mut S,
        id: EntityId,
        now: GameTime,
    ) -> StrikeEffect {
        let epoch = world.epoch();
        let Some(tree) = world.trees_mut().get_mut(id) else {
            return StrikeEffect::Ignored;
        };

        let effect = tree.apply_strike(now);
        if effect != StrikeEffect::Ignored {
            if let Some(visual) = tree.visual() {
                scene.set_tilt(visual, tree.tilt());
            }
        }

        match effect {
            StrikeEffect::Ignored => {}
            StrikeEffect::Damaged { health, .. } => {
                debug!(%id, health, "tree damaged");
            }
            StrikeEffect::Felled { yield_units } => {
                let due = now + self.removal_delay_ms;
                queue.schedule(id, epoch, due);
                info!(%id, yield_units, %due, "tree felled");
            }
        }
        effect
    }

    /// Run every removal due at `now`.
    ///
    /// With no live world, or for tasks from an older epoch, due tasks are
    /// discarded without touching anything.
    pub fn run_due_removals<S: SceneBackend + ?Sized>(
        &self,
        world: Option<&mut World>,
        queue: &mut RemovalQueue,
        scene: &mut S,
        now: GameTime,
    ) -> (RemovalSummary, Vec<EntityId>) {
        let due = queue.pop_due(now);
        let mut summary = RemovalSummary::default();
        let mut removed_ids = Vec::new();
        if due.is_empty() {
            return (summary, removed_ids);
        }

        let Some(world) = world else {
            summary.stale = due.len();
            debug!(stale = summary.stale, "removals fired with no world");
            return (summary, removed_ids);
        };

        for task in due {
            if task.epoch != world.epoch() {
                summary.stale += 1;
                continue;
            }
            let felled = world
                .trees()
                .get(task.entity)
                .is_some_and(|tree| tree.is_felled());
            if !felled {
                summary.stale += 1;
                continue;
            }
            if let Some(mut tree) = world.trees_mut().remove(task.entity) {
                if let Some(visual) = tree.take_visual() {
                    scene.remove(visual);
                }
                debug!(id = %task.entity, "tree removed");
                summary.removed += 1;
                removed_ids.push(task.entity);
            }
        }
        (summary, removed_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TreeRegistry;
    use crate::removal::WorldEpoch;
    use crate::tree::{Tree, FALLEN_TILT};
    use glam::Vec3;
    use timberfall_render::{HeadlessScene, TreeVisual};

    fn world_with_tree(scene: &mut HeadlessScene, size: f32) -> World {
        let id = EntityId(1);
        let position = Vec3::new(0.0, 0.0, -15.0);
        let visual = scene.add_tree(id, &TreeVisual::new(position, size));
        let mut registry = TreeRegistry::new();
        registry.insert(Tree::new(id, position, size).with_visual(visual));
        World::from_registry(WorldEpoch(1), registry)
    }

    #[test]
    fn felling_schedules_removal_after_delay() {
        let mut scene = HeadlessScene::new();
        let mut world = world_with_tree(&mut scene, 1.0);
        let mut queue = RemovalQueue::new();
        let lifecycle = LifecycleController::default();
        let id = EntityId(1);

        for i in 0..3u64 {
            lifecycle.strike(&mut world, &mut queue, &mut scene, id, GameTime::from_millis(i * 400));
        }
        assert_eq!(scene.tilt_of(id), Some(FALLEN_TILT));
        assert_eq!(queue.next_due(), Some(GameTime::from_millis(800 + 2000)));

        let (summary, _) =
            lifecycle.run_due_removals(Some(&mut world), &mut queue, &mut scene, GameTime::from_millis(2799));
        assert_eq!(summary.removed, 0);
        assert!(world.trees().contains(id));

        let (summary, ids) =
            lifecycle.run_due_removals(Some(&mut world), &mut queue, &mut scene, GameTime::from_millis(2800));
        assert_eq!(summary.removed, 1);
        assert_eq!(ids, vec![id]);
        assert!(!world.trees().contains(id));
        assert_eq!(scene.object_count(), 0);
    }

    #[test]
    fn extra_strikes_do_not_reschedule() {
        let mut scene = HeadlessScene::new();
        let mut world = world_with_tree(&mut scene, 1.0);
        let mut queue = RemovalQueue::new();
        let lifecycle = LifecycleController::default();

        for _ in 0..6 {
            lifecycle.strike(&mut world, &mut queue, &mut scene, EntityId(1), GameTime::ZERO);
        }
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn unknown_tree_is_ignored() {
        let mut scene = HeadlessScene::new();
        let mut world = world_with_tree(&mut scene, 1.0);
        let mut queue = RemovalQueue::new();
        let effect = LifecycleController::default().strike(
            &mut world,
            &mut queue,
            &mut scene,
            EntityId(42),
            GameTime::ZERO,
        );
        assert_eq!(effect, StrikeEffect::Ignored);
        assert!(queue.is_empty());
    }

    #[test]
    fn removals_without_world_or_from_old_epoch_are_stale() {
        let mut scene = HeadlessScene::new();
        let lifecycle = LifecycleController::default();
        let mut queue = RemovalQueue::new();
        queue.schedule(EntityId(1), WorldEpoch(1), GameTime::ZERO);

        let (summary, _) = lifecycle.run_due_removals(None, &mut queue, &mut scene, GameTime::ZERO);
        assert_eq!(summary.stale, 1);

        let mut world = world_with_tree(&mut scene, 1.0);
        queue.schedule(EntityId(1), WorldEpoch(0), GameTime::ZERO);
        let (summary, _) =
            lifecycle.run_due_removals(Some(&mut world), &mut queue, &mut scene, GameTime::ZERO);
        assert_eq!(summary, RemovalSummary { removed: 0, stale: 1 });
        assert!(world.trees().contains(EntityId(1)));
    }
}
