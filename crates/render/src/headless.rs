//! In-memory scene backend.
//!
//! Keeps the scene graph as plain data and answers ray queries analytically.
//! Used by the headless runner and by tests; nothing is drawn.

use std::collections::HashMap;

use glam::{Mat4, Vec3};
use timberfall_camera::Camera;
use timberfall_core::EntityId;
use timberfall_physics::{ray_ground_plane, Aabb, Ray, VerticalCylinder};
use tracing::{debug, trace};

use crate::environment::Environment;
use crate::scene::{SceneBackend, SceneHit, TreeVisual, VisualHandle};
use crate::tree_shape::TreeShape;

#[derive(Debug, Clone)]
struct SceneObject {
    owner: EntityId,
    base: Vec3,
    shape: TreeShape,
    tilt: f32,
}

impl SceneObject {
    /// Intersections with the upright trunk and canopy. Tilt is visual only
    /// and does not move the hit volumes.
    fn intersect(&self, ray: &Ray) -> Vec<f32> {
        let trunk = VerticalCylinder {
            base: self.base,
            radius: self.shape.trunk_radius,
            height: self.shape.trunk_height,
        };
        let half_height = (self.shape.canopy_top - self.shape.canopy_bottom) * 0.5;
        let canopy = Aabb::from_center_half_extents(
            self.base + Vec3::Y * (self.shape.canopy_bottom + half_height),
            Vec3::new(self.shape.canopy_half_width, half_height, self.shape.canopy_half_width),
        );

        [trunk.ray_intersection(ray), canopy.ray_intersection(ray)]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Scene backend that stores objects in memory and renders nothing.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    objects: HashMap<u64, SceneObject>,
    next_handle: u64,
    environment: Option<Environment>,
    viewport: (u32, u32),
    frames_rendered: u64,
    last_view_projection: Option<Mat4>,
}

impl HeadlessScene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            viewport: (1280, 720),
            ..Self::default()
        }
    }

    /// Number of tree groups currently in the scene.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Whether the group behind `raw` handle is still present.
    pub fn contains(&self, raw: u64) -> bool {
        self.objects.contains_key(&raw)
    }

    /// Current tilt of the group owned by `owner`, if present.
    pub fn tilt_of(&self, owner: EntityId) -> Option<f32> {
        self.objects
            .values()
            .find(|obj| obj.owner == owner)
            .map(|obj| obj.tilt)
    }

    /// Number of frames rendered so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// View-projection matrix used by the last rendered frame.
    pub fn last_view_projection(&self) -> Option<Mat4> {
        self.last_view_projection
    }

    /// Current viewport size.
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Environment applied to the scene, if any.
    pub fn environment(&self) -> Option<&Environment> {
        self.environment.as_ref()
    }
}

impl SceneBackend for HeadlessScene {
    fn configure_environment(&mut self, environment: &Environment) {
        debug!(
            ground = environment.ground_half_extent,
            shadows = environment.shadows,
            "configured environment"
        );
        self.environment = Some(environment.clone());
    }

    fn add_tree(&mut self, owner: EntityId, visual: &TreeVisual) -> VisualHandle {
        self.next_handle += 1;
        let raw = self.next_handle;
        self.objects.insert(
            raw,
            SceneObject {
                owner,
                base: visual.position,
                shape: visual.shape,
                tilt: 0.0,
            },
        );
        trace!(%owner, handle = raw, "added tree group");
        VisualHandle::new(raw)
    }

    fn set_tilt(&mut self, handle: &VisualHandle, tilt: f32) {
        if let Some(obj) = self.objects.get_mut(&handle.raw()) {
            obj.tilt = tilt;
        }
    }

    fn remove(&mut self, handle: VisualHandle) {
        if let Some(obj) = self.objects.remove(&handle.raw()) {
            trace!(owner = %obj.owner, handle = handle.raw(), "removed tree group");
        }
    }

    fn intersect_ray(&self, ray: &Ray) -> Vec<SceneHit> {
        let mut hits: Vec<SceneHit> = Vec::new();

        for obj in self.objects.values() {
            for distance in obj.intersect(ray) {
                hits.push(SceneHit {
                    distance,
                    point: ray.at(distance),
                    owner: Some(obj.owner),
                });
            }
        }

        if let Some(env) = &self.environment {
            if let Some(distance) = ray_ground_plane(ray, env.ground_height) {
                let point = ray.at(distance);
                if env.covers(point) {
                    hits.push(SceneHit {
                        distance,
                        point,
                        owner: None,
                    });
                }
            }
        }

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn render(&mut self, camera: &Camera) {
        self.frames_rendered += 1;
        self.last_view_projection = Some(camera.view_projection_matrix());
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = (width, height);
    }
}
