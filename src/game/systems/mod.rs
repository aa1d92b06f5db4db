//! Game systems: self-contained pools that own their state and logic.

pub mod pickup_system;
pub mod prey_system;
pub mod respawn;

pub use pickup_system::{Pickup, PickupConfig, PickupKind, PickupReward, PickupSystem};
pub use prey_system::{PREY_CAPTURE_SCORE, Prey, PreyConfig, PreySystem};
pub use respawn::{RESPAWN_EPSILON, RespawnSchedule};
