//! World Module
//!
//! Terrain/boundary collaborator and the water surface. The simulation
//! core depends only on the configured water level; everything else here
//! is static collision geometry or cosmetic animation.

pub mod island;
pub mod water;

pub use island::{IslandConfig, IslandTerrain, TerrainProvider};
pub use water::{DEFAULT_WATER_LEVEL, WaterConfig, WaterSurface};
