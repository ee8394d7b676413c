#![warn(missing_docs)]
//! First-person viewer pose and projection.
//!
//! Orientation is yaw about world Y followed by pitch about the local X axis
//! (YXZ Euler order, roll is always zero). The camera looks down its local
//! -Z axis, so `yaw = pitch = 0` faces world -Z.

use glam::{EulerRot, Mat4, Quat, Vec3};
use std::f32::consts::FRAC_PI_2;

/// Pitch limit in radians; pitch is clamped to `[-PITCH_LIMIT, PITCH_LIMIT]`.
pub const PITCH_LIMIT: f32 = FRAC_PI_2;

/// First-person camera with position, orientation, and projection.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Horizontal rotation in radians (around world Y). Unbounded.
    yaw: f32,
    /// Vertical rotation in radians (around local X).
    pitch: f32,

    /// Vertical field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.6, 0.0),
            yaw: 0.0,
            pitch: 0.0,
            fov: 75f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    /// Create a new camera at the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Current yaw in radians.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current pitch in radians, always within `[-PITCH_LIMIT, PITCH_LIMIT]`.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set yaw and pitch directly. Pitch is clamped.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = clamp_pitch(pitch);
    }

    /// Add to yaw and pitch. Pitch is clamped; yaw is left unbounded.
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.set_orientation(self.yaw + delta_yaw, self.pitch + delta_pitch);
    }

    /// Orientation quaternion (yaw, then pitch, no roll).
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Rotate a camera-local vector into world space.
    pub fn local_to_world(&self, local: Vec3) -> Vec3 {
        self.orientation() * local
    }

    /// Forward direction vector (where the camera is looking).
    pub fn forward(&self) -> Vec3 {
        self.local_to_world(Vec3::NEG_Z)
    }

    /// Right direction vector (camera's local +X).
    pub fn right(&self) -> Vec3 {
        self.local_to_world(Vec3::X)
    }

    /// Up direction vector (camera's local +Y).
    pub fn up(&self) -> Vec3 {
        self.local_to_world(Vec3::Y)
    }

    /// Compute the view matrix (world space -> camera space).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position).inverse()
    }

    /// Compute the projection matrix (camera space -> clip space).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Compute the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio (call when the viewport resizes).
    ///
    /// A zero-height viewport (minimized window) leaves the aspect unchanged.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }
}

/// Clamp a pitch angle to the allowed range.
pub fn clamp_pitch(pitch: f32) -> f32 {
    pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn camera_default_initialization() {
        let camera = Camera::default();
        assert_eq!(camera.position, Vec3::new(0.0, 1.6, 0.0));
        assert_eq!(camera.yaw(), 0.0);
        assert_eq!(camera.pitch(), 0.0);
    }

    #[test]
    fn camera_forward_direction() {
        let camera = Camera::default();
        assert!(approx(camera.forward(), Vec3::NEG_Z));
        assert!(approx(camera.right(), Vec3::X));
        assert!(approx(camera.up(), Vec3::Y));
    }

    #[test]
    fn yaw_turns_left_around_y() {
        let mut camera = Camera::default();
        camera.set_orientation(FRAC_PI_2, 0.0);
        assert!(approx(camera.forward(), Vec3::NEG_X));
    }

    #[test]
    fn pitch_tilts_forward_upwards_without_roll() {
        let mut camera = Camera::default();
        camera.set_orientation(FRAC_PI_2, 0.3);
        let forward = camera.forward();
        assert!(forward.y > 0.0);
        // Right stays horizontal because roll is never applied.
        assert!(camera.right().y.abs() < 1e-5);
    }

    #[test]
    fn camera_rotation_clamps_pitch() {
        let mut camera = Camera::default();
        camera.rotate(0.0, 10.0);
        assert_eq!(camera.pitch(), PITCH_LIMIT);
        camera.rotate(0.0, -100.0);
        assert_eq!(camera.pitch(), -PITCH_LIMIT);
    }

    #[test]
    fn yaw_is_not_wrapped() {
        let mut camera = Camera::default();
        camera.rotate(10.0, 0.0);
        camera.rotate(10.0, 0.0);
        assert_eq!(camera.yaw(), 20.0);
    }

    #[test]
    fn zero_height_resize_is_ignored() {
        let mut camera = Camera::default();
        camera.set_aspect(800, 0);
        assert_eq!(camera.aspect, 16.0 / 9.0);
        camera.set_aspect(800, 400);
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn camera_matrices_are_valid() {
        let camera = Camera::default();

        let view = camera.view_matrix();
        let proj = camera.projection_matrix();
        let view_proj = camera.view_projection_matrix();

        assert!(view.to_cols_array().iter().all(|x| x.is_finite()));
        assert!(proj.to_cols_array().iter().all(|x| x.is_finite()));
        assert!(view_proj.to_cols_array().iter().all(|x| x.is_finite()));

        // The camera position maps to the view-space origin.
        let origin = view.transform_point3(camera.position);
        assert!(origin.length() < 1e-4);
    }

    proptest! {
        #[test]
        fn pitch_always_clamped(deltas in proptest::collection::vec(-50.0f32..50.0, 0..64)) {
            let mut camera = Camera::default();
            for delta in deltas {
                camera.rotate(delta * 0.5, delta);
                prop_assert!(camera.pitch() >= -PITCH_LIMIT && camera.pitch() <= PITCH_LIMIT);
            }
        }
    }
}
