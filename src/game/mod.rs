//! Game Module
//!
//! Session-level systems built on top of the engine: entity pools, the
//! frame orchestrator, telemetry, configuration and the commentary client.

pub mod commentary;
pub mod config;
pub mod logging;
pub mod simulation;
pub mod systems;
pub mod telemetry;

pub use config::{ConfigError, SimConfig, WorldConfig};
pub use simulation::{FrameReport, SessionStatus, Simulation};
pub use systems::{PickupKind, PickupSystem, PreySystem, RespawnSchedule};
pub use telemetry::{
    JsonLinesSink, MarkerInstance, SessionStats, SimulationSnapshot, TelemetrySink,
};
