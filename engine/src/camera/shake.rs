//! Camera shake
//!
//! A single decaying magnitude. Events raise it; every frame it decays
//! geometrically and yields a random offset scaled by the current value.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Per-frame decay multiplier.
pub const SHAKE_DECAY: f32 = 0.9;

/// Below this the shake is treated as finished.
const SHAKE_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone)]
pub struct CameraShake {
    magnitude: f32,
    rng: StdRng,
}

impl CameraShake {
    pub fn new(seed: u64) -> Self {
        Self {
            magnitude: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Raise the shake to at least `magnitude`. Overlapping events never stack.
    pub fn trigger(&mut self, magnitude: f32) {
        self.magnitude = self.magnitude.max(magnitude);
    }

    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    pub fn is_active(&self) -> bool {
        self.magnitude > 0.0
    }

    /// Offset for this frame, then decay.
    pub fn sample(&mut self) -> Vec3 {
        if self.magnitude <= 0.0 {
            return Vec3::ZERO;
        }

        let jitter = Vec3::new(
            self.rng.gen_range(-1.0..=1.0),
            self.rng.gen_range(-1.0..=1.0),
            self.rng.gen_range(-1.0..=1.0),
        );
        let offset = jitter * self.magnitude;

        self.magnitude *= SHAKE_DECAY;
        if self.magnitude < SHAKE_EPSILON {
            self.magnitude = 0.0;
        }
        offset
    }

    pub fn clear(&mut self) {
        self.magnitude = 0.0;
    }
}
