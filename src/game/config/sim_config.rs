//! Simulation Configuration
//!
//! Every tunable of a session in one place. `Default` gives the shipped
//! tuning; a JSON file only needs to name the fields it overrides because
//! every struct is `#[serde(default)]`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::CameraConfig;
use crate::game::systems::{PickupConfig, PreyConfig};
use crate::physics::{FIXED_TIME_STEP, MAX_SUBSTEPS, PhysicsConfig};
use crate::player::CharacterConfig;
use crate::world::{IslandConfig, WaterConfig};

/// Largest frame delta the simulation will integrate (seconds).
pub const MAX_FRAME_DELTA: f32 = 0.1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Physics world, water and island layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub gravity: glam::Vec3,
    /// Physics sub-step (seconds)
    pub fixed_step: f32,
    /// Cap on sub-steps per frame
    pub max_substeps: u32,
    /// Upper clamp on the frame delta (seconds)
    pub max_frame_delta: f32,
    pub water: WaterConfig,
    pub island: IslandConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        let physics = PhysicsConfig::default();
        Self {
            gravity: physics.gravity,
            fixed_step: FIXED_TIME_STEP,
            max_substeps: MAX_SUBSTEPS,
            max_frame_delta: MAX_FRAME_DELTA,
            water: WaterConfig::default(),
            island: IslandConfig::default(),
        }
    }
}

impl WorldConfig {
    pub fn physics(&self) -> PhysicsConfig {
        PhysicsConfig {
            gravity: self.gravity,
            fixed_step: self.fixed_step,
            max_substeps: self.max_substeps,
        }
    }
}

/// Complete session configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub world: WorldConfig,
    pub character: CharacterConfig,
    pub prey: PreyConfig,
    pub pickups: PickupConfig,
    pub camera: CameraConfig,
}

fn require(ok: bool, message: &str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid(message.to_string()))
    }
}

impl SimConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON file and validate it.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        log::info!("[Config] loaded {}", path.display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let world = &self.world;
        require(world.fixed_step > 0.0, "world.fixed_step must be positive")?;
        require(world.max_substeps > 0, "world.max_substeps must be at least 1")?;
        require(
            world.max_frame_delta > 0.0,
            "world.max_frame_delta must be positive",
        )?;
        require(world.island.radius > 0.0, "world.island.radius must be positive")?;
        require(
            world.island.boundary_radius > world.island.radius,
            "world.island.boundary_radius must exceed the island radius",
        )?;

        let character = &self.character;
        require(character.radius > 0.0, "character.radius must be positive")?;
        require(character.mass > 0.0, "character.mass must be positive")?;

        let prey = &self.prey;
        require(prey.count > 0, "prey.count must be at least 1")?;
        require(prey.capture_radius > 0.0, "prey.capture_radius must be positive")?;
        require(
            prey.flee_radius > prey.capture_radius,
            "prey.flee_radius must exceed prey.capture_radius",
        )?;
        require(
            prey.min_speed > 0.0 && prey.min_speed <= prey.max_speed,
            "prey speed band must satisfy 0 < min_speed <= max_speed",
        )?;
        require(
            prey.min_depth <= prey.max_depth,
            "prey.min_depth must not exceed prey.max_depth",
        )?;
        require(prey.respawn_delay > 0.0, "prey.respawn_delay must be positive")?;

        let pickups = &self.pickups;
        require(pickups.count > 0, "pickups.count must be at least 1")?;
        require(pickups.pickup_radius > 0.0, "pickups.pickup_radius must be positive")?;
        require(
            pickups.spawn_inner_radius <= pickups.spawn_outer_radius,
            "pickups spawn ring is inverted",
        )?;
        require(
            pickups.min_height <= pickups.max_height,
            "pickups.min_height must not exceed pickups.max_height",
        )?;
        require(
            (0.0..=1.0).contains(&pickups.rare_chance),
            "pickups.rare_chance must be within [0, 1]",
        )?;
        require(
            pickups.respawn_delay > 0.0,
            "pickups.respawn_delay must be positive",
        )?;

        let camera = &self.camera;
        for (value, name) in [
            (camera.position_smoothing, "camera.position_smoothing"),
            (camera.look_smoothing, "camera.look_smoothing"),
            (camera.fov_smoothing, "camera.fov_smoothing"),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::Invalid(format!("{name} must be within (0, 1]")));
            }
        }

        Ok(())
    }
}
