//! Pickup pool.
//!
//! Collectibles scattered in a ring around the island. Touching one hides
//! it and pays out score (and stamina for common ones); it comes back after
//! the respawn delay with a freshly rolled kind. Bobbing and spinning are
//! cosmetic: proximity is always measured from the anchor.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::respawn::RespawnSchedule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupKind {
    Common,
    Rare,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupConfig {
    /// Pool size
    pub count: usize,
    /// Inner radius of the spawn ring around the island centre
    pub spawn_inner_radius: f32,
    /// Outer radius of the spawn ring
    pub spawn_outer_radius: f32,
    /// Lowest anchor height relative to the water level
    pub min_height: f32,
    /// Highest anchor height relative to the water level (below ground)
    pub max_height: f32,
    /// Chance a spawn rolls Rare
    pub rare_chance: f64,
    /// Collect when closer than this (meters)
    pub pickup_radius: f32,
    pub common_score: u32,
    pub common_stamina: f32,
    pub rare_score: u32,
    pub rare_stamina: f32,
    /// Seconds before a collected pickup reappears
    pub respawn_delay: f32,
    /// Bob angular rate (radians per second)
    pub bob_rate: f32,
    /// Bob amplitude (meters)
    pub bob_height: f32,
    /// Spin rate (radians per second)
    pub spin_rate: f32,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            count: 30,
            spawn_inner_radius: 30.0,
            spawn_outer_radius: 90.0,
            min_height: -6.0,
            max_height: 1.0,
            rare_chance: 0.2,
            pickup_radius: 2.0,
            common_score: 300,
            common_stamina: 60.0,
            rare_score: 600,
            rare_stamina: 0.0,
            respawn_delay: 15.0,
            bob_rate: 2.0,
            bob_height: 0.4,
            spin_rate: 1.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    /// Anchor position; used for proximity
    pub position: Vec3,
    pub kind: PickupKind,
    pub active: bool,
    /// Cosmetic vertical offset from the anchor
    pub bob_offset: f32,
    /// Cosmetic rotation about Y (radians)
    pub spin: f32,
}

impl Pickup {
    /// Where a renderer should draw it.
    pub fn display_position(&self) -> Vec3 {
        self.position + Vec3::Y * self.bob_offset
    }
}

/// Rewards collected in one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PickupReward {
    pub score_delta: u32,
    pub stamina_delta: f32,
    pub common: u32,
    pub rare: u32,
}

impl PickupReward {
    pub fn collected(&self) -> u32 {
        self.common + self.rare
    }

    pub fn is_empty(&self) -> bool {
        self.collected() == 0
    }
}

pub struct PickupSystem {
    config: PickupConfig,
    center: Vec3,
    water_level: f32,
    pickups: Vec<Pickup>,
    schedule: RespawnSchedule,
    rng: StdRng,
    time: f32,
    shut_down: bool,
}

impl PickupSystem {
    pub fn new(config: PickupConfig, center: Vec3, water_level: f32, seed: u64) -> Self {
        let mut system = Self {
            config,
            center,
            water_level,
            pickups: Vec::with_capacity(config.count),
            schedule: RespawnSchedule::new(config.count),
            rng: StdRng::seed_from_u64(seed),
            time: 0.0,
            shut_down: false,
        };
        for _ in 0..config.count {
            let pickup = system.spawn_one();
            system.pickups.push(pickup);
        }
        log::debug!("[Pickups] spawned pool of {}", config.count);
        system
    }

    fn spawn_one(&mut self) -> Pickup {
        let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
        // sqrt keeps the ring uniform by area
        let inner = self.config.spawn_inner_radius * self.config.spawn_inner_radius;
        let outer = self.config.spawn_outer_radius * self.config.spawn_outer_radius;
        let radius = self.rng.gen_range(inner..=outer).sqrt();
        let height = self
            .rng
            .gen_range(self.config.min_height..=self.config.max_height);

        let kind = if self.rng.gen_bool(self.config.rare_chance.clamp(0.0, 1.0)) {
            PickupKind::Rare
        } else {
            PickupKind::Common
        };

        Pickup {
            position: Vec3::new(
                self.center.x + angle.cos() * radius,
                self.water_level + height,
                self.center.z + angle.sin() * radius,
            ),
            kind,
            active: true,
            bob_offset: 0.0,
            spin: 0.0,
        }
    }

    pub fn reward_for(&self, kind: PickupKind) -> (u32, f32) {
        match kind {
            PickupKind::Common => (self.config.common_score, self.config.common_stamina),
            PickupKind::Rare => (self.config.rare_score, self.config.rare_stamina),
        }
    }

    /// Advance the pool one frame and collect anything within reach.
    pub fn update(&mut self, delta: f32, character_position: Vec3) -> PickupReward {
        let mut reward = PickupReward::default();
        if self.shut_down {
            return reward;
        }

        for slot in self.schedule.advance(delta) {
            let pickup = self.spawn_one();
            self.pickups[slot] = pickup;
        }

        self.time += delta;
        let config = self.config;

        for slot in 0..self.pickups.len() {
            if !self.pickups[slot].active {
                continue;
            }

            let pickup = &mut self.pickups[slot];
            pickup.bob_offset =
                (self.time * config.bob_rate + pickup.position.x).sin() * config.bob_height;
            pickup.spin = (pickup.spin + config.spin_rate * delta) % std::f32::consts::TAU;

            if pickup.position.distance(character_position) < config.pickup_radius {
                pickup.active = false;
                let kind = pickup.kind;
                let (score, stamina) = self.reward_for(kind);
                reward.score_delta = reward.score_delta.saturating_add(score);
                reward.stamina_delta += stamina;
                match kind {
                    PickupKind::Common => reward.common += 1,
                    PickupKind::Rare => reward.rare += 1,
                }
                self.schedule.schedule(slot, config.respawn_delay);
            }
        }

        if !reward.is_empty() {
            log::debug!(
                "[Pickups] collected {} (+{} score)",
                reward.collected(),
                reward.score_delta
            );
        }
        reward
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn active_count(&self) -> usize {
        self.pickups.iter().filter(|p| p.active).count()
    }

    pub fn schedule(&self) -> &RespawnSchedule {
        &self.schedule
    }

    pub fn config(&self) -> &PickupConfig {
        &self.config
    }

    pub fn shutdown(&mut self) -> usize {
        self.shut_down = true;
        self.schedule.cancel_all()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn reset(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.schedule.reset();
        self.time = 0.0;
        self.shut_down = false;
        for slot in 0..self.pickups.len() {
            let pickup = self.spawn_one();
            self.pickups[slot] = pickup;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn pool(count: usize) -> PickupSystem {
        let config = PickupConfig {
            count,
            ..PickupConfig::default()
        };
        PickupSystem::new(config, Vec3::ZERO, 0.0, 5)
    }

    #[test]
    fn test_spawn_in_ring_below_ground() {
        let system = pool(200);
        for pickup in system.pickups() {
            let r = Vec3::new(pickup.position.x, 0.0, pickup.position.z).length();
            assert!(r >= 30.0 - 1e-3 && r <= 90.0 + 1e-3, "radius {r}");
            assert!(pickup.position.y <= 1.0 && pickup.position.y >= -6.0);
        }
        let rare = system
            .pickups()
            .iter()
            .filter(|p| p.kind == PickupKind::Rare)
            .count();
        assert!(rare > 10 && rare < 80, "rare count {rare}");
    }

    #[test]
    fn test_rare_reward() {
        let mut system = pool(1);
        system.pickups[0].kind = PickupKind::Rare;
        let target = system.pickups()[0].position + Vec3::new(1.5, 0.0, 0.0);
        let reward = system.update(DT, target);
        assert_eq!(reward.score_delta, 600);
        assert_eq!(reward.stamina_delta, 0.0);
        assert_eq!(reward.rare, 1);
        assert!(!system.pickups()[0].active);
    }

    #[test]
    fn test_common_reward() {
        let mut system = pool(1);
        system.pickups[0].kind = PickupKind::Common;
        let target = system.pickups()[0].position + Vec3::new(0.0, 1.5, 0.0);
        let reward = system.update(DT, target);
        assert_eq!(reward.score_delta, 300);
        assert_eq!(reward.stamina_delta, 60.0);
        assert_eq!(reward.common, 1);
    }

    #[test]
    fn test_outside_radius_not_collected() {
        let mut system = pool(1);
        let target = system.pickups()[0].position + Vec3::new(2.5, 0.0, 0.0);
        assert!(system.update(DT, target).is_empty());
        assert!(system.pickups()[0].active);
    }

    #[test]
    fn test_respawn_after_fifteen_seconds() {
        let mut system = pool(1);
        let target = system.pickups()[0].position;
        system.update(DT, target);
        let far = Vec3::splat(10_000.0);
        for _ in 0..899 {
            assert!(system.update(DT, far).is_empty());
            assert!(!system.pickups()[0].active);
        }
        system.update(DT, far);
        assert!(system.pickups()[0].active);
    }

    #[test]
    fn test_bob_does_not_move_anchor() {
        let mut system = pool(1);
        let anchor = system.pickups()[0].position;
        for _ in 0..30 {
            system.update(DT, Vec3::splat(10_000.0));
        }
        assert_eq!(system.pickups()[0].position, anchor);
        assert!(system.pickups()[0].bob_offset.abs() <= 0.4);
    }

    #[test]
    fn test_shutdown_cancels_respawn() {
        let mut system = pool(1);
        let target = system.pickups()[0].position;
        system.update(DT, target);
        system.shutdown();
        for _ in 0..2000 {
            system.update(DT, Vec3::splat(10_000.0));
        }
        assert!(!system.pickups()[0].active);
        assert_eq!(system.schedule().pending_count(), 0);
    }
}
