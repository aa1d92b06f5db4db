//! Collision groups
//!
//! Bit-flag layers deciding which bodies and static colliders interact.
//! A pair interacts only when each side's membership intersects the other
//! side's filter, so filtering is symmetric by construction.

use serde::{Deserialize, Serialize};

/// The player character.
pub const GROUP_CHARACTER: u32 = 1 << 0;
/// Island floor, walls and the boundary ring.
pub const GROUP_TERRAIN: u32 = 1 << 1;
/// Fleeing prey.
pub const GROUP_PREY: u32 = 1 << 2;
/// Collectible pickups.
pub const GROUP_PICKUP: u32 = 1 << 3;
/// Every layer.
pub const GROUP_ALL: u32 = u32::MAX;

/// Membership/filter pair for a body or collider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionGroups {
    /// Layers this object belongs to
    pub membership: u32,
    /// Layers this object is willing to touch
    pub filter: u32,
}

impl Default for CollisionGroups {
    fn default() -> Self {
        Self::new(GROUP_ALL, GROUP_ALL)
    }
}

impl CollisionGroups {
    pub const fn new(membership: u32, filter: u32) -> Self {
        Self { membership, filter }
    }

    /// Character: touches terrain and prey. Water is a height test, not a collider.
    pub const fn character() -> Self {
        Self::new(GROUP_CHARACTER, GROUP_TERRAIN | GROUP_PREY)
    }

    /// Static terrain: touches everything.
    pub const fn terrain() -> Self {
        Self::new(GROUP_TERRAIN, GROUP_ALL)
    }

    /// Prey: touches the character and terrain, never pickups or other prey.
    pub const fn prey() -> Self {
        Self::new(GROUP_PREY, GROUP_CHARACTER | GROUP_TERRAIN)
    }

    /// Pickups: touch the character only.
    pub const fn pickup() -> Self {
        Self::new(GROUP_PICKUP, GROUP_CHARACTER)
    }

    /// Whether two objects with these groups should generate contacts.
    #[inline]
    pub const fn interacts_with(&self, other: &CollisionGroups) -> bool {
        (self.membership & other.filter) != 0 && (other.membership & self.filter) != 0
    }
}
