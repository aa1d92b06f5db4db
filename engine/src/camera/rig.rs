//! Chase Camera Rig
//!
//! Third-person follow camera driven by the character's speed. Distance,
//! height and field of view all widen as the character speeds up. Each
//! quantity approaches its target by a fixed fraction per frame, so the
//! rig lags behind under noisy input and never overshoots a steady target.
//!
//! Shake is applied after smoothing and never feeds back into the smoothed
//! position.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::shake::CameraShake;

/// Speed at which the speed factor saturates (m/s).
pub const SPEED_FACTOR_REFERENCE: f32 = 35.0;

/// Rig tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Follow distance at rest (meters behind)
    pub base_distance: f32,
    /// Extra distance at full speed
    pub speed_distance: f32,
    /// Height above the character at rest
    pub base_height: f32,
    /// Extra height at full speed
    pub speed_height: f32,
    /// How far ahead of the character the camera looks
    pub look_ahead: f32,
    /// Look-at point height above the character
    pub look_height: f32,
    /// Per-frame position smoothing
    pub position_smoothing: f32,
    /// Per-frame look-at smoothing
    pub look_smoothing: f32,
    /// FOV at rest (degrees)
    pub base_fov: f32,
    /// FOV added at full speed (degrees)
    pub speed_fov: f32,
    /// Per-frame FOV smoothing
    pub fov_smoothing: f32,
    /// Shake magnitude for a prey capture
    pub capture_shake: f32,
    /// Shake magnitude for a pickup
    pub pickup_shake: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            base_distance: 10.0,
            speed_distance: 6.0,
            base_height: 4.0,
            speed_height: 3.0,
            look_ahead: 5.0,
            look_height: 1.0,
            position_smoothing: 0.08,
            look_smoothing: 0.12,
            base_fov: 70.0,
            speed_fov: 35.0,
            fov_smoothing: 0.1,
            capture_shake: 0.6,
            pickup_shake: 0.3,
        }
    }
}

impl CameraConfig {
    pub fn max_fov(&self) -> f32 {
        self.base_fov + self.speed_fov
    }
}

/// What the host needs to place its camera this frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
    pub fov_degrees: f32,
}

/// `speed / 35` clamped into [0, 1].
pub fn speed_factor(speed: f32) -> f32 {
    if !speed.is_finite() {
        return 0.0;
    }
    (speed / SPEED_FACTOR_REFERENCE).clamp(0.0, 1.0)
}

#[derive(Debug, Clone)]
pub struct CameraRig {
    config: CameraConfig,
    position: Vec3,
    look_at: Vec3,
    fov: f32,
    shake: CameraShake,
    pose: CameraPose,
}

impl CameraRig {
    pub fn new(config: CameraConfig, seed: u64) -> Self {
        let pose = CameraPose {
            position: Vec3::new(0.0, config.base_height, config.base_distance),
            look_at: Vec3::ZERO,
            fov_degrees: config.base_fov,
        };
        Self {
            config,
            position: pose.position,
            look_at: pose.look_at,
            fov: pose.fov_degrees,
            shake: CameraShake::new(seed),
            pose,
        }
    }

    /// Jump straight to the resting pose behind `target`.
    pub fn snap_to(&mut self, target: Vec3, forward: Vec3) {
        let (position, look_at) = self.desired(target, forward, 0.0);
        self.position = position;
        self.look_at = look_at;
        self.fov = self.config.base_fov;
        self.shake.clear();
        self.pose = CameraPose {
            position,
            look_at,
            fov_degrees: self.fov,
        };
    }

    fn desired(&self, target: Vec3, forward: Vec3, factor: f32) -> (Vec3, Vec3) {
        let distance = self.config.base_distance + self.config.speed_distance * factor;
        let height = self.config.base_height + self.config.speed_height * factor;
        let position = target - forward * distance + Vec3::Y * height;
        let look_at = target + forward * self.config.look_ahead + Vec3::Y * self.config.look_height;
        (position, look_at)
    }

    /// Advance one frame following a character at `target` facing `forward`.
    pub fn update(&mut self, target: Vec3, forward: Vec3, speed: f32) -> CameraPose {
        let factor = speed_factor(speed);
        let (desired_position, desired_look) = self.desired(target, forward, factor);

        self.position = self
            .position
            .lerp(desired_position, self.config.position_smoothing);
        self.look_at = self.look_at.lerp(desired_look, self.config.look_smoothing);

        let target_fov = self.config.base_fov + self.config.speed_fov * factor;
        self.fov += (target_fov - self.fov) * self.config.fov_smoothing;

        self.pose = CameraPose {
            position: self.position + self.shake.sample(),
            look_at: self.look_at,
            fov_degrees: self.fov,
        };
        self.pose
    }

    pub fn shake_for_capture(&mut self) {
        self.shake.trigger(self.config.capture_shake);
    }

    pub fn shake_for_pickup(&mut self) {
        self.shake.trigger(self.config.pickup_shake);
    }

    pub fn shake(&self) -> &CameraShake {
        &self.shake
    }

    /// Last computed pose, shake included.
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    /// Smoothed position without shake.
    pub fn smoothed_position(&self) -> Vec3 {
        self.position
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }
}
