//! Camera Module
//!
//! Speed-reactive chase camera with a decaying shake. Window-system
//! agnostic: it only produces a pose for the host to apply.

pub mod rig;
pub mod shake;

pub use rig::{CameraConfig, CameraPose, CameraRig, SPEED_FACTOR_REFERENCE, speed_factor};
pub use shake::{CameraShake, SHAKE_DECAY};
