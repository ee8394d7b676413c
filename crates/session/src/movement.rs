//! Per-tick camera-relative movement.
//!
//! Each held key contributes a full `speed` step on its axis. Diagonals are
//! not normalized: forward + strafe moves `speed * sqrt(2)` per tick.

use glam::{EulerRot, Quat, Vec3};
use timberfall_input::InputSnapshot;

/// Displacement for one tick from the held keys and look orientation.
///
/// The local step is rotated by yaw then pitch, and the vertical component
/// is dropped so the player stays on the ground plane.
pub fn displacement(snapshot: &InputSnapshot, speed: f32) -> Vec3 {
    let mut local = Vec3::ZERO;
    if snapshot.forward {
        local.z -= speed;
    }
    if snapshot.back {
        local.z += speed;
    }
    if snapshot.left {
        local.x -= speed;
    }
    if snapshot.right {
        local.x += speed;
    }
    if local == Vec3::ZERO {
        return Vec3::ZERO;
    }

    let orientation = Quat::from_euler(EulerRot::YXZ, snapshot.yaw, snapshot.pitch, 0.0);
    let mut world = orientation * local;
    world.y = 0.0;
    world
}

/// Advances the player position once per tick.
#[derive(Debug, Clone, Copy)]
pub struct MovementIntegrator {
    speed: f32,
}

impl MovementIntegrator {
    /// Integrator stepping `speed` units per held axis per tick.
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }

    /// Step size.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// New position after one tick.
    pub fn integrate(&self, position: Vec3, snapshot: &InputSnapshot) -> Vec3 {
        position + displacement(snapshot, self.speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    const SPEED: f32 = 0.1;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn no_keys_no_motion() {
        let start = Vec3::new(3.0, 1.6, -2.0);
        let snap = InputSnapshot::default().looking(1.0, 0.5);
        assert_eq!(MovementIntegrator::new(SPEED).integrate(start, &snap), start);
    }

    #[test]
    fn forward_follows_yaw() {
        let snap = InputSnapshot::with_keys(true, false, false, false);
        assert!(close(displacement(&snap, SPEED), Vec3::new(0.0, 0.0, -SPEED)));

        let turned = snap.looking(FRAC_PI_2, 0.0);
        assert!(close(displacement(&turned, SPEED), Vec3::new(-SPEED, 0.0, 0.0)));
    }

    #[test]
    fn strafe_is_perpendicular_to_forward() {
        let snap = InputSnapshot::with_keys(false, false, false, true).looking(0.7, 0.0);
        let fwd = displacement(&InputSnapshot::with_keys(true, false, false, false).looking(0.7, 0.0), SPEED);
        let right = displacement(&snap, SPEED);
        assert!(fwd.dot(right).abs() < 1e-6);
    }

    #[test]
    fn opposite_keys_cancel() {
        let snap = InputSnapshot::with_keys(true, true, true, true).looking(0.3, 0.2);
        assert_eq!(displacement(&snap, SPEED), Vec3::ZERO);
    }

    #[test]
    fn vertical_component_is_dropped() {
        let snap = InputSnapshot::with_keys(true, false, false, false).looking(0.0, FRAC_PI_4);
        let d = displacement(&snap, SPEED);
        assert_eq!(d.y, 0.0);
        // Looking up shortens the horizontal step; it is not renormalized.
        assert!((d.length() - SPEED * FRAC_PI_4.cos()).abs() < 1e-6);
    }

    #[test]
    fn diagonal_is_faster_than_axis_aligned() {
        let axis = displacement(&InputSnapshot::with_keys(true, false, false, false), SPEED);
        let diag = displacement(&InputSnapshot::with_keys(true, false, false, true), SPEED);
        assert!((axis.length() - SPEED).abs() < 1e-6);
        assert!((diag.length() - SPEED * std::f32::consts::SQRT_2).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn integration_is_pure(
            x in -100.0f32..100.0,
            z in -100.0f32..100.0,
            yaw in -20.0f32..20.0,
            pitch in -1.5f32..1.5,
            keys in any::<(bool, bool, bool, bool)>(),
        ) {
            let integrator = MovementIntegrator::new(SPEED);
            let start = Vec3::new(x, 1.6, z);
            let snap = InputSnapshot::with_keys(keys.0, keys.1, keys.2, keys.3).looking(yaw, pitch);
            let a = integrator.integrate(start, &snap);
            let b = integrator.integrate(start, &snap);
            prop_assert_eq!(a, b);
            prop_assert_eq!(a.y, start.y);
            prop_assert!((a - start).length() <= SPEED * std::f32::consts::SQRT_2 + 1e-5);
        }

        #[test]
        fn forward_back_cancel_for_any_orientation(yaw in -20.0f32..20.0, pitch in -1.5f32..1.5) {
            let snap = InputSnapshot::with_keys(true, true, false, false).looking(yaw, pitch);
            prop_assert_eq!(displacement(&snap, SPEED), Vec3::ZERO);
        }
    }
}
