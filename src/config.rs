use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use timberfall_session::{
    SessionSettings, SettingsError, DEFAULT_EYE_HEIGHT, DEFAULT_MOVE_SPEED,
    DEFAULT_STRIKE_COOLDOWN_MS, DEFAULT_STRIKE_RANGE,
};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/timberfall.toml";

/// Every tunable of the game, as stored on disk.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GameConfig {
    pub tree_count: usize,
    /// Trees are placed in `[-world_half_extent, world_half_extent]` on X and Z.
    pub world_half_extent: f32,
    /// No tree is placed closer than this to the origin.
    pub spawn_exclusion_radius: f32,
    pub min_tree_size: f32,
    pub max_tree_size: f32,
    /// World units per tick per held key.
    pub move_speed: f32,
    /// Radians per pixel.
    pub mouse_sensitivity: f32,
    pub strike_range: f32,
    pub strike_cooldown_ms: u64,
    pub removal_delay_ms: u64,
    pub eye_height: f32,
    pub world_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        let settings = SessionSettings::default();
        let generation = settings.generation;
        Self {
            tree_count: generation.tree_count,
            world_half_extent: generation.half_extent,
            spawn_exclusion_radius: generation.exclusion_radius,
            min_tree_size: generation.min_size,
            max_tree_size: generation.max_size,
            move_speed: DEFAULT_MOVE_SPEED,
            mouse_sensitivity: settings.mouse_sensitivity,
            strike_range: DEFAULT_STRIKE_RANGE,
            strike_cooldown_ms: DEFAULT_STRIKE_COOLDOWN_MS,
            removal_delay_ms: settings.removal_delay_ms,
            eye_height: DEFAULT_EYE_HEIGHT,
            world_seed: None,
        }
    }
}

impl GameConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<GameConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    GameConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!("Config not found at {}. Using defaults", path.display());
                }
                GameConfig::default()
            }
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    /// Resolve into validated session settings.
    pub fn session_settings(&self) -> Result<SessionSettings, SettingsError> {
        let mut settings = SessionSettings::default();
        settings.generation.tree_count = self.tree_count;
        settings.generation.half_extent = self.world_half_extent;
        settings.generation.exclusion_radius = self.spawn_exclusion_radius;
        settings.generation.min_size = self.min_tree_size;
        settings.generation.max_size = self.max_tree_size;
        settings.move_speed = self.move_speed;
        settings.mouse_sensitivity = self.mouse_sensitivity;
        settings.strike_range = self.strike_range;
        settings.strike_cooldown_ms = self.strike_cooldown_ms;
        settings.removal_delay_ms = self.removal_delay_ms;
        settings.eye_height = self.eye_height;
        settings.world_seed = self.world_seed;
        settings.validate()?;
        Ok(settings)
    }
}
