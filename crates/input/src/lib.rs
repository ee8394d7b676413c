#![warn(missing_docs)]
//! Input state tracking for directional keys, mouse-look and strikes.
//!
//! Platform events are folded into an [`InputState`]; the simulation reads a
//! copy of the latest values once per tick through [`InputState::snapshot`].
//! There is no event queue: only the current key set and the cumulative
//! look angles are kept.

use std::collections::HashSet;
use timberfall_camera::clamp_pitch;
use tracing::debug;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Default mouse-look sensitivity in radians per pixel of movement.
pub const DEFAULT_MOUSE_SENSITIVITY: f32 = 0.002;

/// Key that triggers a strike.
pub const STRIKE_KEY: KeyCode = KeyCode::Space;

/// Copy of the input state taken once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Forward key held.
    pub forward: bool,
    /// Back key held.
    pub back: bool,
    /// Strafe-left key held.
    pub left: bool,
    /// Strafe-right key held.
    pub right: bool,
    /// Cumulative yaw in radians.
    pub yaw: f32,
    /// Cumulative pitch in radians, clamped.
    pub pitch: f32,
}

impl InputSnapshot {
    /// Snapshot with the given keys held and a neutral orientation.
    pub fn with_keys(forward: bool, back: bool, left: bool, right: bool) -> Self {
        Self {
            forward,
            back,
            left,
            right,
            ..Self::default()
        }
    }

    /// Same snapshot with a different orientation (pitch is clamped).
    pub fn looking(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = clamp_pitch(pitch);
        self
    }

    /// True when any directional key is held.
    pub fn is_moving(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }
}

/// Side effect requested by an input event, handled by the session owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResponse {
    /// Nothing to do beyond the state update.
    None,
    /// The platform should enter capture-lock mode.
    RequestCaptureLock,
    /// A strike was requested.
    Strike,
}

/// Input state accumulated from platform events.
#[derive(Debug)]
pub struct InputState {
    /// Keys currently pressed.
    keys_pressed: HashSet<KeyCode>,
    /// Cumulative yaw from mouse-look.
    yaw: f32,
    /// Cumulative pitch from mouse-look.
    pitch: f32,
    /// Radians per pixel of mouse movement.
    sensitivity: f32,
    /// Whether the cursor is in capture-lock mode.
    capture_locked: bool,
    /// Events are only accepted while attached to an active session.
    attached: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(DEFAULT_MOUSE_SENSITIVITY)
    }
}

impl InputState {
    /// Create a detached input state with the given mouse sensitivity.
    pub fn new(sensitivity: f32) -> Self {
        Self {
            keys_pressed: HashSet::new(),
            yaw: 0.0,
            pitch: 0.0,
            sensitivity,
            capture_locked: false,
            attached: false,
        }
    }

    /// Start accepting events (session start).
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Stop accepting events and clear all state (session end).
    pub fn detach(&mut self) {
        self.attached = false;
        self.reset();
    }

    /// Whether events are currently being accepted.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Clear held keys, look angles and capture lock.
    pub fn reset(&mut self) {
        self.keys_pressed.clear();
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.capture_locked = false;
    }

    /// Whether mouse-look is currently applied.
    pub fn capture_locked(&self) -> bool {
        self.capture_locked
    }

    /// Capture-lock change notification from the platform.
    ///
    /// Leaving capture lock releases all held keys so movement stops.
    pub fn set_capture_locked(&mut self, locked: bool) {
        if !self.attached {
            return;
        }
        if self.capture_locked != locked {
            debug!(locked, "capture lock changed");
        }
        self.capture_locked = locked;
        if !locked {
            self.keys_pressed.clear();
        }
    }

    /// Key pressed.
    pub fn key_down(&mut self, key: KeyCode) -> InputResponse {
        if !self.attached {
            return InputResponse::None;
        }
        let newly_pressed = self.keys_pressed.insert(key);
        if key == STRIKE_KEY && newly_pressed {
            InputResponse::Strike
        } else {
            InputResponse::None
        }
    }

    /// Key released.
    pub fn key_up(&mut self, key: KeyCode) {
        if !self.attached {
            return;
        }
        self.keys_pressed.remove(&key);
    }

    /// Check if a key is currently pressed.
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Primary mouse button pressed.
    ///
    /// Outside capture lock a click asks for the lock instead of striking.
    pub fn primary_click(&mut self) -> InputResponse {
        if !self.attached {
            return InputResponse::None;
        }
        if self.capture_locked {
            InputResponse::Strike
        } else {
            InputResponse::RequestCaptureLock
        }
    }

    /// Raw mouse movement in pixels. Ignored unless capture-locked.
    pub fn mouse_moved(&mut self, dx: f64, dy: f64) {
        if !self.attached || !self.capture_locked {
            return;
        }
        self.yaw -= dx as f32 * self.sensitivity;
        self.pitch = clamp_pitch(self.pitch - dy as f32 * self.sensitivity);
    }

    /// Current cumulative look angles `(yaw, pitch)`.
    pub fn look(&self) -> (f32, f32) {
        (self.yaw, self.pitch)
    }

    /// Take a copy of the latest state for one simulation tick.
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            forward: self.key_pressed(KeyCode::KeyW),
            back: self.key_pressed(KeyCode::KeyS),
            left: self.key_pressed(KeyCode::KeyA),
            right: self.key_pressed(KeyCode::KeyD),
            yaw: self.yaw,
            pitch: self.pitch,
        }
    }

    /// Process a window event.
    pub fn handle_event(&mut self, event: &WindowEvent) -> InputResponse {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(keycode),
                        state,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => self.key_down(*keycode),
                ElementState::Released => {
                    self.key_up(*keycode);
                    InputResponse::None
                }
            },
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.primary_click(),
            WindowEvent::Focused(false) => {
                self.set_capture_locked(false);
                InputResponse::None
            }
            _ => InputResponse::None,
        }
    }

    /// Handle device event (for mouse movement).
    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.mouse_moved(delta.0, delta.1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use timberfall_camera::PITCH_LIMIT;

    fn attached() -> InputState {
        let mut input = InputState::default();
        input.attach();
        input
    }

    #[test]
    fn input_state_creation() {
        let input = InputState::default();
        assert_eq!(input.look(), (0.0, 0.0));
        assert!(!input.capture_locked());
        assert!(!input.is_attached());
        assert_eq!(input.snapshot(), InputSnapshot::default());
    }

    #[test]
    fn detached_state_ignores_events() {
        let mut input = InputState::default();
        assert_eq!(input.key_down(KeyCode::KeyW), InputResponse::None);
        input.set_capture_locked(true);
        input.mouse_moved(100.0, 100.0);
        assert!(!input.snapshot().forward);
        assert_eq!(input.look(), (0.0, 0.0));
        assert_eq!(input.primary_click(), InputResponse::None);
    }

    #[test]
    fn directional_keys_map_to_snapshot() {
        let mut input = attached();
        input.key_down(KeyCode::KeyW);
        input.key_down(KeyCode::KeyD);
        let snap = input.snapshot();
        assert!(snap.forward && snap.right);
        assert!(!snap.back && !snap.left);

        input.key_up(KeyCode::KeyW);
        assert!(!input.snapshot().forward);
    }

    #[test]
    fn strike_key_fires_once_per_press() {
        let mut input = attached();
        assert_eq!(input.key_down(STRIKE_KEY), InputResponse::Strike);
        // Auto-repeat while held does not strike again.
        assert_eq!(input.key_down(STRIKE_KEY), InputResponse::None);
        input.key_up(STRIKE_KEY);
        assert_eq!(input.key_down(STRIKE_KEY), InputResponse::Strike);
    }

    #[test]
    fn mouse_look_requires_capture_lock() {
        let mut input = attached();
        input.mouse_moved(50.0, 25.0);
        assert_eq!(input.look(), (0.0, 0.0));

        input.set_capture_locked(true);
        input.mouse_moved(50.0, 25.0);
        let (yaw, pitch) = input.look();
        assert!((yaw + 50.0 * DEFAULT_MOUSE_SENSITIVITY).abs() < 1e-6);
        assert!((pitch + 25.0 * DEFAULT_MOUSE_SENSITIVITY).abs() < 1e-6);
    }

    #[test]
    fn click_requests_lock_then_strikes() {
        let mut input = attached();
        assert_eq!(input.primary_click(), InputResponse::RequestCaptureLock);
        input.set_capture_locked(true);
        assert_eq!(input.primary_click(), InputResponse::Strike);
    }

    #[test]
    fn losing_capture_lock_releases_keys() {
        let mut input = attached();
        input.set_capture_locked(true);
        input.key_down(KeyCode::KeyW);
        input.set_capture_locked(false);
        assert!(!input.snapshot().is_moving());
    }

    #[test]
    fn detach_resets_everything() {
        let mut input = attached();
        input.set_capture_locked(true);
        input.key_down(KeyCode::KeyA);
        input.mouse_moved(10.0, 10.0);
        input.detach();
        assert_eq!(input.snapshot(), InputSnapshot::default());
        assert!(!input.capture_locked());
    }

    #[test]
    fn mouse_motion_device_event_is_applied() {
        let mut input = attached();
        input.set_capture_locked(true);
        input.handle_device_event(&DeviceEvent::MouseMotion { delta: (-10.0, 0.0) });
        assert!(input.look().0 > 0.0);
    }

    proptest! {
        #[test]
        fn pitch_stays_clamped(moves in proptest::collection::vec((-5000.0f64..5000.0, -5000.0f64..5000.0), 0..50)) {
            let mut input = attached();
            input.set_capture_locked(true);
            for (dx, dy) in moves {
                input.mouse_moved(dx, dy);
                let (_, pitch) = input.look();
                prop_assert!((-PITCH_LIMIT..=PITCH_LIMIT).contains(&pitch));
            }
        }
    }
}
