//! One world instance: the tree registry plus its epoch.

use rand::Rng;
use timberfall_core::EntityIdAllocator;
use timberfall_render::SceneBackend;
use tracing::info;

use crate::generator::{GenerationReport, WorldGenerator};
use crate::registry::TreeRegistry;
use crate::removal::WorldEpoch;

/// Trees of a single session.
#[derive(Debug)]
pub struct World {
    epoch: WorldEpoch,
    trees: TreeRegistry,
    report: GenerationReport,
}

impl World {
    /// Wrap an existing registry.
    pub fn from_registry(epoch: WorldEpoch, trees: TreeRegistry) -> Self {
        let placed = trees.len();
        Self {
            epoch,
            trees,
            report: GenerationReport {
                requested: placed,
                placed,
                rejected: 0,
            },
        }
    }

    /// Generate a fresh world, adding tree visuals to `scene`.
    pub fn generate<R, S>(
        epoch: WorldEpoch,
        generator: &WorldGenerator,
        rng: &mut R,
        ids: &mut EntityIdAllocator,
        scene: &mut S,
    ) -> Self
    where
        R: Rng + ?Sized,
        S: SceneBackend + ?Sized,
    {
        let (trees, report) = generator.generate(rng, ids, scene);
        Self {
            epoch,
            trees,
            report,
        }
    }

    /// Epoch identifying this world.
    pub fn epoch(&self) -> WorldEpoch {
        self.epoch
    }

    /// Generation outcome.
    pub fn report(&self) -> GenerationReport {
        self.report
    }

    /// Tree registry.
    pub fn trees(&self) -> &TreeRegistry {
        &self.trees
    }

    /// Tree registry, mutable.
    pub fn trees_mut(&mut self) -> &mut TreeRegistry {
        &mut self.trees
    }

    /// Release every visual and empty the registry. Returns the number of
    /// visuals released.
    pub fn teardown<S: SceneBackend + ?Sized>(&mut self, scene: &mut S) -> usize {
        let mut released = 0;
        for mut tree in self.trees.drain() {
            if let Some(visual) = tree.take_visual() {
                scene.remove(visual);
                released += 1;
            }
        }
        info!(epoch = self.epoch.0, released, "world torn down");
        released
    }
}
