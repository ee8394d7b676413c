//! Tunables for one game session.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use timberfall_input::DEFAULT_MOUSE_SENSITIVITY;
use timberfall_world::{max_health_for_size, GenerationSettings, DEFAULT_REMOVAL_DELAY_MS};

/// Default per-tick movement step in world units.
pub const DEFAULT_MOVE_SPEED: f32 = 0.1;
/// Default maximum strike distance in world units.
pub const DEFAULT_STRIKE_RANGE: f32 = 8.0;
/// Default strike cooldown in milliseconds.
pub const DEFAULT_STRIKE_COOLDOWN_MS: u64 = 300;
/// Default camera height above the ground.
pub const DEFAULT_EYE_HEIGHT: f32 = 1.6;

/// Rejected session settings.
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    /// A value that must be strictly positive was not.
    #[error("{field} must be positive (got {value})")]
    NotPositive {
        /// Offending field.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
    /// Tree size range is empty.
    #[error("tree size range [{min}, {max}) is empty")]
    EmptySizeRange {
        /// Lower bound.
        min: f32,
        /// Upper bound.
        max: f32,
    },
    /// Smallest tree would start with no health.
    #[error("min tree size {min} is too small to give a tree any health")]
    SizeTooSmall {
        /// Lower bound.
        min: f32,
    },
    /// Exclusion circle covers the whole region.
    #[error("exclusion radius {radius} leaves no room inside a ±{half_extent} region")]
    ExclusionCoversRegion {
        /// Exclusion radius.
        radius: f32,
        /// Region half-width.
        half_extent: f32,
    },
}

/// Everything a session needs to know, resolved from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Tree placement.
    pub generation: GenerationSettings,
    /// Movement per tick per held axis.
    pub move_speed: f32,
    /// Radians per pixel of mouse movement.
    pub mouse_sensitivity: f32,
    /// Maximum strike distance.
    pub strike_range: f32,
    /// Window after each strike during which further strikes are rejected.
    pub strike_cooldown_ms: u64,
    /// Delay between felling and removal.
    pub removal_delay_ms: u64,
    /// Camera height above the ground.
    pub eye_height: f32,
    /// World seed; a fresh one is drawn per session when absent.
    pub world_seed: Option<u64>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            generation: GenerationSettings::default(),
            move_speed: DEFAULT_MOVE_SPEED,
            mouse_sensitivity: DEFAULT_MOUSE_SENSITIVITY,
            strike_range: DEFAULT_STRIKE_RANGE,
            strike_cooldown_ms: DEFAULT_STRIKE_COOLDOWN_MS,
            removal_delay_ms: DEFAULT_REMOVAL_DELAY_MS,
            eye_height: DEFAULT_EYE_HEIGHT,
            world_seed: None,
        }
    }
}

impl SessionSettings {
    /// Check value ranges.
    pub fn validate(&self) -> Result<(), SettingsError> {
        positive("move_speed", self.move_speed as f64)?;
        positive("mouse_sensitivity", self.mouse_sensitivity as f64)?;
        positive("strike_range", self.strike_range as f64)?;
        positive("removal_delay_ms", self.removal_delay_ms as f64)?;
        positive("generation.half_extent", self.generation.half_extent as f64)?;
        positive("generation.min_size", self.generation.min_size as f64)?;

        let g = &self.generation;
        if g.max_size <= g.min_size {
            return Err(SettingsError::EmptySizeRange {
                min: g.min_size,
                max: g.max_size,
            });
        }
        if max_health_for_size(g.min_size) == 0 {
            return Err(SettingsError::SizeTooSmall { min: g.min_size });
        }
        // Farthest point of the square is its corner.
        if g.exclusion_radius >= g.half_extent * std::f32::consts::SQRT_2 {
            return Err(SettingsError::ExclusionCoversRegion {
                radius: g.exclusion_radius,
                half_extent: g.half_extent,
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), SettingsError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SettingsError::NotPositive { field, value })
    }
}
