//! Player Module
//!
//! The amphibious character: orientation state machine plus the
//! force-driven controller bound to a physics body.
//!
//! # Components
//!
//! - [`OrientationState`] - Land / surface / underwater classification
//! - [`CharacterController`] - Propulsion, jumping, buoyancy, stamina and the
//!   smoothed visual transform
//! - [`CharacterConfig`] - Tunable parameters (serde, all fields defaulted)

pub mod character;
pub mod state;

pub use character::{
    BACKWARD_FORCE_RATIO, BOOST_STAMINA_DRAIN, CharacterConfig, CharacterController,
    JUMP_COOLDOWN, JumpOutcome, LEAN_SMOOTHING, MAX_STAMINA, STAMINA_REGEN,
    SURGE_FORCE_MULTIPLIER, SURGE_STAMINA_REGEN, VisualTransform, YAW_SMOOTHING,
    forward_from_yaw,
};
pub use state::{OrientationState, SURFACE_CLEARANCE, UNDERWATER_DEPTH};
