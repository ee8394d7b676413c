//! Ground, lighting and shadow settings handed to the scene backend.
//!
//! None of this affects gameplay; it only decides how the world looks.

use glam::Vec3;

/// Static scene environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    /// Half-width of the square ground plane centered on the origin.
    pub ground_half_extent: f32,
    /// Ground plane height.
    pub ground_height: f32,
    /// Ambient light intensity.
    pub ambient_intensity: f32,
    /// Whether the sun casts shadows.
    pub shadows: bool,
    /// Sky clear color (linear RGB).
    pub sky_color: [f32; 3],
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            ground_half_extent: 100.0,
            ground_height: 0.0,
            ambient_intensity: 0.6,
            shadows: true,
            sky_color: [0.53, 0.81, 0.92],
        }
    }
}

impl Environment {
    /// Environment with a ground plane covering `±half_extent`.
    pub fn with_ground(half_extent: f32) -> Self {
        Self {
            ground_half_extent: half_extent,
            ..Self::default()
        }
    }

    /// Whether the point lies over the ground plane.
    pub fn covers(&self, point: Vec3) -> bool {
        point.x.abs() <= self.ground_half_extent && point.z.abs() <= self.ground_half_extent
    }
}
