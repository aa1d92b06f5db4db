//! Island terrain provider
//!
//! Supplies the static colliders the character swims and runs against:
//! a sea floor, a single island column rising just above the water, and a
//! boundary ring fencing in the play area. The visual island mesh is the
//! host's business; only the collision proxies live here.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::physics::{PhysicsWorld, StaticCollider, StaticShape};

use super::water::WaterConfig;

/// Terrain collaborator: static geometry plus the water level.
pub trait TerrainProvider {
    /// Static colliders to install into the physics world.
    fn static_colliders(&self) -> Vec<StaticCollider>;

    /// Gameplay water level.
    fn water_level(&self) -> f32;

    /// Install every collider into `world`, returning how many were added.
    fn install(&self, world: &mut PhysicsWorld) -> usize {
        let colliders = self.static_colliders();
        let count = colliders.len();
        for collider in colliders {
            world.add_static(collider);
        }
        count
    }
}

/// Island layout parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IslandConfig {
    /// Island centre (XZ used; Y ignored)
    pub center: Vec3,
    /// Island radius (meters)
    pub radius: f32,
    /// Height of the island top above the water level
    pub ground_height: f32,
    /// Depth of the sea floor below the water level
    pub sea_depth: f32,
    /// Radius of the boundary ring around the island centre
    pub boundary_radius: f32,
}

impl Default for IslandConfig {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: 24.0,
            ground_height: 2.0,
            sea_depth: 40.0,
            boundary_radius: 220.0,
        }
    }
}

/// Default terrain: sea floor, one island, boundary ring.
#[derive(Debug, Clone, Copy)]
pub struct IslandTerrain {
    pub island: IslandConfig,
    pub water: WaterConfig,
}

impl IslandTerrain {
    pub fn new(island: IslandConfig, water: WaterConfig) -> Self {
        Self { island, water }
    }

    /// World-space height of the island top.
    pub fn ground_level(&self) -> f32 {
        self.water.level + self.island.ground_height
    }

    /// World-space height of the sea floor.
    pub fn sea_floor(&self) -> f32 {
        self.water.level - self.island.sea_depth
    }

    /// Whether an XZ position lies over the island.
    pub fn is_over_island(&self, position: Vec3) -> bool {
        let dx = position.x - self.island.center.x;
        let dz = position.z - self.island.center.z;
        dx * dx + dz * dz <= self.island.radius * self.island.radius
    }
}

impl Default for IslandTerrain {
    fn default() -> Self {
        Self::new(IslandConfig::default(), WaterConfig::default())
    }
}

impl TerrainProvider for IslandTerrain {
    fn static_colliders(&self) -> Vec<StaticCollider> {
        let center = Vec3::new(self.island.center.x, 0.0, self.island.center.z);
        vec![
            StaticCollider::terrain(StaticShape::Floor {
                height: self.sea_floor(),
            }),
            StaticCollider::terrain(StaticShape::Cylinder {
                center,
                radius: self.island.radius,
                top: self.ground_level(),
                bottom: self.sea_floor(),
            }),
            StaticCollider::terrain(StaticShape::BoundaryRing {
                center,
                radius: self.island.boundary_radius,
            }),
        ]
    }

    fn water_level(&self) -> f32 {
        self.water.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_relative_to_water() {
        let terrain = IslandTerrain::default();
        assert_eq!(terrain.ground_level(), 2.0);
        assert_eq!(terrain.sea_floor(), -40.0);
        assert_eq!(terrain.water_level(), 0.0);
    }

    #[test]
    fn test_install_adds_three_colliders() {
        let terrain = IslandTerrain::default();
        let mut world = PhysicsWorld::default();
        assert_eq!(terrain.install(&mut world), 3);
        assert_eq!(world.statics().len(), 3);
    }

    #[test]
    fn test_is_over_island() {
        let terrain = IslandTerrain::default();
        assert!(terrain.is_over_island(Vec3::new(10.0, 5.0, 10.0)));
        assert!(!terrain.is_over_island(Vec3::new(30.0, 0.0, 0.0)));
    }
}
