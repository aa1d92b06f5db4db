//! Animated water surface
//!
//! The configured `base_level` is what the character state machine reads.
//! The oscillating offset is environmental animation only; it is exposed
//! for the renderer and telemetry but never feeds back into gameplay.

use serde::{Deserialize, Serialize};

/// Default water plane height (meters).
pub const DEFAULT_WATER_LEVEL: f32 = 0.0;

/// Water surface parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterConfig {
    /// Height of the water plane (meters)
    pub level: f32,
    /// Amplitude of the cosmetic swell (meters)
    pub wave_amplitude: f32,
    /// Angular frequency of the swell (radians per second)
    pub wave_frequency: f32,
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_WATER_LEVEL,
            wave_amplitude: 0.15,
            wave_frequency: 0.8,
        }
    }
}

/// Water plane with a slow animated swell.
#[derive(Debug, Clone)]
pub struct WaterSurface {
    config: WaterConfig,
    time: f32,
    offset: f32,
}

impl WaterSurface {
    pub fn new(config: WaterConfig) -> Self {
        Self {
            config,
            time: 0.0,
            offset: 0.0,
        }
    }

    /// Gameplay water level.
    pub fn level(&self) -> f32 {
        self.config.level
    }

    /// Current cosmetic offset from the swell.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Rendered height of the water plane.
    pub fn animated_height(&self) -> f32 {
        self.config.level + self.offset
    }

    /// Advance the swell animation and return the rendered height.
    pub fn update(&mut self, delta: f32) -> f32 {
        self.time += delta;
        self.offset = self.config.wave_amplitude * (self.time * self.config.wave_frequency).sin();
        self.animated_height()
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
        self.offset = 0.0;
    }
}
