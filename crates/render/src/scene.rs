//! Scene backend contract consumed by the simulation.

use glam::Vec3;
use timberfall_camera::Camera;
use timberfall_core::EntityId;
use timberfall_physics::Ray;

use crate::environment::Environment;
use crate::tree_shape::TreeShape;

/// Opaque reference to a renderable group owned by one entity.
///
/// Not `Clone`: the owning entity holds the only handle and gives it back to
/// the backend through [`SceneBackend::remove`].
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct VisualHandle(u64);

impl VisualHandle {
    /// Wrap a backend-specific object key.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Backend-specific object key.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Description of a tree to place in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeVisual {
    /// Ground-plane position of the trunk base.
    pub position: Vec3,
    /// Geometry derived from the tree size.
    pub shape: TreeShape,
}

impl TreeVisual {
    /// Visual for a tree of `size` standing at `position`.
    pub fn new(position: Vec3, size: f32) -> Self {
        Self {
            position,
            shape: TreeShape::from_size(size),
        }
    }
}

/// One ray/scene intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneHit {
    /// Distance from the ray origin.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
    /// Entity tag attached when the object was created; `None` for scenery.
    pub owner: Option<EntityId>,
}

/// Narrow interface to the 3D graphics library.
///
/// Everything here is presentation except [`SceneBackend::intersect_ray`],
/// whose ordering and entity tags drive strike targeting.
pub trait SceneBackend {
    /// Configure ground, lighting and shadows. Cosmetic only.
    fn configure_environment(&mut self, environment: &Environment);

    /// Build a tree group tagged with `owner` and add it to the scene.
    fn add_tree(&mut self, owner: EntityId, visual: &TreeVisual) -> VisualHandle;

    /// Set the tree's lean angle (radians about Z, pivoting on the trunk base).
    fn set_tilt(&mut self, handle: &VisualHandle, tilt: f32);

    /// Remove the group from the scene and release its resources.
    fn remove(&mut self, handle: VisualHandle);

    /// All intersections along `ray`, nearest first.
    fn intersect_ray(&self, ray: &Ray) -> Vec<SceneHit>;

    /// Render one frame from the camera's pose.
    fn render(&mut self, camera: &Camera);

    /// Adapt to a new viewport size.
    fn resize(&mut self, width: u32, height: u32);
}
