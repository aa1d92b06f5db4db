//! Config Module
//!
//! Session configuration: world layout, character tuning, entity pools and
//! the camera rig.

pub mod sim_config;

pub use sim_config::{ConfigError, MAX_FRAME_DELTA, SimConfig, WorldConfig};
