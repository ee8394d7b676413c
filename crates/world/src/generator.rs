//! World population: scatters trees over the terrain.
//!
//! Candidates are drawn uniformly over a square centered on the origin.
//! Candidates inside the spawn exclusion circle are skipped without retry, so
//! the realized population can fall short of the requested count.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use timberfall_core::EntityIdAllocator;
use timberfall_render::{SceneBackend, TreeVisual};
use tracing::{debug, info};

use crate::registry::TreeRegistry;
use crate::tree::Tree;

/// Parameters for tree placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Number of placement attempts.
    pub tree_count: usize,
    /// Half-width of the square region (candidates lie in `±half_extent`).
    pub half_extent: f32,
    /// Minimum planar distance from the origin.
    pub exclusion_radius: f32,
    /// Inclusive lower bound for tree size.
    pub min_size: f32,
    /// Exclusive upper bound for tree size.
    pub max_size: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            tree_count: 50,
            half_extent: 100.0,
            exclusion_radius: 10.0,
            min_size: 1.0,
            max_size: 3.0,
        }
    }
}

/// Outcome counts of one generation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Candidates drawn.
    pub requested: usize,
    /// Trees created.
    pub placed: usize,
    /// Candidates skipped by the exclusion rule.
    pub rejected: usize,
}

/// Tree placement.
#[derive(Debug, Clone, Default)]
pub struct WorldGenerator {
    settings: GenerationSettings,
}

impl WorldGenerator {
    /// Create a generator with the given settings.
    pub fn new(settings: GenerationSettings) -> Self {
        Self { settings }
    }

    /// Settings in use.
    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Whether a candidate at `(x, z)` falls outside the exclusion circle.
    pub fn accepts(&self, x: f32, z: f32) -> bool {
        (x * x + z * z).sqrt() >= self.settings.exclusion_radius
    }

    /// Populate a registry, adding each tree's visual to `scene`.
    pub fn generate<R, S>(
        &self,
        rng: &mut R,
        ids: &mut EntityIdAllocator,
        scene: &mut S,
    ) -> (TreeRegistry, GenerationReport)
    where
        R: Rng + ?Sized,
        S: SceneBackend + ?Sized,
    {
        let s = &self.settings;
        let mut registry = TreeRegistry::new();
        let mut report = GenerationReport {
            requested: s.tree_count,
            ..GenerationReport::default()
        };

        for _ in 0..s.tree_count {
            let x = sample(rng, -s.half_extent, s.half_extent);
            let z = sample(rng, -s.half_extent, s.half_extent);
            if !self.accepts(x, z) {
                report.rejected += 1;
                continue;
            }

            let size = sample(rng, s.min_size, s.max_size);
            let id = ids.allocate();
            let position = Vec3::new(x, 0.0, z);
            let visual = scene.add_tree(id, &TreeVisual::new(position, size));
            let tree = Tree::new(id, position, size).with_visual(visual);
            debug!(%id, x, z, size, max_health = tree.max_health(), "placed tree");
            registry.insert(tree);
            report.placed += 1;
        }

        info!(
            placed = report.placed,
            rejected = report.rejected,
            "generated world"
        );
        (registry, report)
    }
}

/// Uniform sample in `[low, high)`, or `low` for an empty range.
fn sample<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}
