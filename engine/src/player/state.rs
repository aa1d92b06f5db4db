//! Orientation state machine
//!
//! The character's medium is a pure function of its height against the
//! water level. Nothing is latched between frames, so a body bobbing on a
//! threshold flips state every frame it crosses; there is no hysteresis.

use serde::{Deserialize, Serialize};

/// Below `water_level - UNDERWATER_DEPTH` the character is fully submerged.
pub const UNDERWATER_DEPTH: f32 = 1.5;

/// Below `water_level + SURFACE_CLEARANCE` the character is on the surface.
pub const SURFACE_CLEARANCE: f32 = 0.5;

/// Which medium the character is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrientationState {
    Land,
    WaterSurface,
    Underwater,
}

impl OrientationState {
    /// Classify a height against the water level.
    pub fn classify(y: f32, water_level: f32) -> Self {
        if y < water_level - UNDERWATER_DEPTH {
            Self::Underwater
        } else if y < water_level + SURFACE_CLEARANCE {
            Self::WaterSurface
        } else {
            Self::Land
        }
    }

    /// Surface or underwater.
    pub fn is_in_water(&self) -> bool {
        !matches!(self, Self::Land)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Land => "LAND",
            Self::WaterSurface => "WATER_SURFACE",
            Self::Underwater => "UNDERWATER",
        }
    }
}

impl std::fmt::Display for OrientationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
