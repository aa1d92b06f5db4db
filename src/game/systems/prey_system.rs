//! Prey pool.
//!
//! A fixed pool of small fish swimming beneath the surface. They wander
//! while the character is far away, flee when it comes close, and are
//! captured on contact. A captured fish is hidden and comes back at a new
//! random spot after the respawn delay.

use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::respawn::RespawnSchedule;

/// Score awarded per captured prey.
pub const PREY_CAPTURE_SCORE: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreyConfig {
    /// Pool size
    pub count: usize,
    /// Half-width of the square spawn area around the origin (meters)
    pub spawn_half_extent: f32,
    /// Shallowest spawn depth below the water level
    pub min_depth: f32,
    /// Deepest spawn depth below the water level
    pub max_depth: f32,
    /// Capture when closer than this (meters)
    pub capture_radius: f32,
    /// Flee when closer than this (meters)
    pub flee_radius: f32,
    /// Target flee speed (m/s)
    pub flee_speed: f32,
    /// Per-frame blend toward the flee velocity
    pub flee_blend: f32,
    /// Max per-frame random change of x/z velocity while wandering
    pub wander_jitter: f32,
    /// Wander speed band (m/s)
    pub min_speed: f32,
    pub max_speed: f32,
    /// Seconds before a captured prey reappears
    pub respawn_delay: f32,
}

impl Default for PreyConfig {
    fn default() -> Self {
        Self {
            count: 80,
            spawn_half_extent: 150.0,
            min_depth: 3.0,
            max_depth: 20.0,
            capture_radius: 1.4,
            flee_radius: 15.0,
            flee_speed: 8.0,
            flee_blend: 0.1,
            wander_jitter: 0.1,
            min_speed: 1.0,
            max_speed: 2.5,
            respawn_delay: 10.0,
        }
    }
}

/// One fish.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prey {
    pub position: Vec3,
    pub velocity: Vec3,
    pub rotation: Quat,
    pub active: bool,
}

/// Owns the prey pool and its respawn schedule.
pub struct PreySystem {
    config: PreyConfig,
    water_level: f32,
    prey: Vec<Prey>,
    schedule: RespawnSchedule,
    rng: StdRng,
    /// XZ disc prey never spawn in (the island column)
    keep_out: Option<(Vec3, f32)>,
    total_captures: u64,
    shut_down: bool,
}

/// Re-roll attempts before accepting a spawn inside the keep-out disc.
const SPAWN_ATTEMPTS: usize = 16;

fn facing(velocity: Vec3) -> Option<Quat> {
    let dir = velocity.try_normalize()?;
    Some(Quat::from_rotation_arc(Vec3::Z, dir))
}

impl PreySystem {
    /// Build the pool with every fish active at a random spot.
    pub fn new(config: PreyConfig, water_level: f32, seed: u64) -> Self {
        let mut system = Self {
            config,
            water_level,
            prey: Vec::with_capacity(config.count),
            schedule: RespawnSchedule::new(config.count),
            rng: StdRng::seed_from_u64(seed),
            keep_out: None,
            total_captures: 0,
            shut_down: false,
        };
        for _ in 0..config.count {
            let fish = system.spawn_one();
            system.prey.push(fish);
        }
        log::debug!("[Prey] spawned pool of {}", config.count);
        system
    }

    /// Keep spawns out of the XZ disc at `center`, re-rolling any fish
    /// already inside it.
    pub fn avoiding(mut self, center: Vec3, radius: f32) -> Self {
        self.keep_out = Some((center, radius));
        for slot in 0..self.prey.len() {
            if self.in_keep_out(self.prey[slot].position) {
                let fish = self.spawn_one();
                self.prey[slot] = fish;
            }
        }
        self
    }

    fn in_keep_out(&self, position: Vec3) -> bool {
        self.keep_out.is_some_and(|(center, radius)| {
            let dx = position.x - center.x;
            let dz = position.z - center.z;
            dx * dx + dz * dz < radius * radius
        })
    }

    /// Vertical band prey live in: `(bottom, top)` below the water level.
    pub fn depth_band(&self) -> (f32, f32) {
        (
            self.water_level - self.config.max_depth,
            self.water_level - self.config.min_depth,
        )
    }

    fn random_position(&mut self) -> Vec3 {
        let half = self.config.spawn_half_extent;
        let (bottom, top) = self.depth_band();

        let mut position = Vec3::ZERO;
        for _ in 0..SPAWN_ATTEMPTS {
            position = Vec3::new(
                self.rng.gen_range(-half..=half),
                self.rng.gen_range(bottom..=top),
                self.rng.gen_range(-half..=half),
            );
            if !self.in_keep_out(position) {
                break;
            }
        }
        position
    }

    fn random_heading(&mut self) -> Vec3 {
        let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
        let speed = self.rng.gen_range(self.config.min_speed..=self.config.max_speed);
        Vec3::new(angle.cos(), 0.0, angle.sin()) * speed
    }

    fn spawn_one(&mut self) -> Prey {
        let position = self.random_position();
        let velocity = self.random_heading();
        Prey {
            position,
            velocity,
            rotation: facing(velocity).unwrap_or(Quat::IDENTITY),
            active: true,
        }
    }

    /// Advance the pool one frame. Returns how many fish were captured.
    pub fn update(&mut self, delta: f32, character_position: Vec3) -> u32 {
        if self.shut_down {
            return 0;
        }

        for slot in self.schedule.advance(delta) {
            let fish = self.spawn_one();
            self.prey[slot] = fish;
        }

        let config = self.config;
        let (bottom, top) = self.depth_band();
        let mut captures = 0;

        for slot in 0..self.prey.len() {
            if !self.prey[slot].active {
                continue;
            }

            let to_prey = self.prey[slot].position - character_position;
            let distance = to_prey.length();

            if distance < config.capture_radius {
                self.prey[slot].active = false;
                self.schedule.schedule(slot, config.respawn_delay);
                captures += 1;
                continue;
            }

            let mut velocity = self.prey[slot].velocity;
            if distance < config.flee_radius {
                let away = to_prey.try_normalize().unwrap_or(Vec3::X);
                velocity = velocity.lerp(away * config.flee_speed, config.flee_blend);
            } else {
                velocity.x += self.rng.gen_range(-1.0..=1.0) * config.wander_jitter;
                velocity.z += self.rng.gen_range(-1.0..=1.0) * config.wander_jitter;
                velocity = match velocity.try_normalize() {
                    Some(_) => velocity.clamp_length(config.min_speed, config.max_speed),
                    None => self.random_heading(),
                };
            }

            let mut position = self.prey[slot].position + velocity * delta;
            // Prey never leave their band; a fish pinned at an edge stops climbing or sinking.
            if position.y > top || position.y < bottom {
                position.y = position.y.clamp(bottom, top);
                velocity.y = 0.0;
            }

            let fish = &mut self.prey[slot];
            fish.velocity = velocity;
            fish.position = position;
            if let Some(rotation) = facing(velocity) {
                fish.rotation = rotation;
            }
        }

        if captures > 0 {
            self.total_captures += u64::from(captures);
            log::debug!(
                "[Prey] {} captured, {} respawns pending",
                captures,
                self.schedule.pending_count()
            );
        }
        captures
    }

    pub fn prey(&self) -> &[Prey] {
        &self.prey
    }

    pub fn active_count(&self) -> usize {
        self.prey.iter().filter(|p| p.active).count()
    }

    pub fn active_positions(&self) -> Vec<Vec3> {
        self.prey
            .iter()
            .filter(|p| p.active)
            .map(|p| p.position)
            .collect()
    }

    pub fn schedule(&self) -> &RespawnSchedule {
        &self.schedule
    }

    pub fn total_captures(&self) -> u64 {
        self.total_captures
    }

    pub fn config(&self) -> &PreyConfig {
        &self.config
    }

    /// Cancel pending respawns and freeze the pool.
    pub fn shutdown(&mut self) -> usize {
        self.shut_down = true;
        self.schedule.cancel_all()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Re-seed the pool: every fish active at a fresh random spot.
    pub fn reset(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.schedule.reset();
        self.total_captures = 0;
        self.shut_down = false;
        for slot in 0..self.prey.len() {
            let fish = self.spawn_one();
            self.prey[slot] = fish;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn small_pool(count: usize) -> PreySystem {
        let config = PreyConfig {
            count,
            ..PreyConfig::default()
        };
        PreySystem::new(config, 0.0, 9)
    }

    #[test]
    fn test_spawn_inside_band() {
        let system = small_pool(80);
        assert_eq!(system.prey().len(), 80);
        for fish in system.prey() {
            assert!(fish.active);
            assert!(fish.position.y <= -3.0 && fish.position.y >= -20.0);
            assert!(fish.position.x.abs() <= 150.0 && fish.position.z.abs() <= 150.0);
            let speed = fish.velocity.length();
            assert!((1.0 - 1e-4..=2.5 + 1e-4).contains(&speed));
        }
    }

    #[test]
    fn test_capture_within_radius() {
        let mut system = small_pool(1);
        let target = system.prey()[0].position + Vec3::new(1.0, 0.0, 0.0);
        assert_eq!(system.update(DT, target), 1);
        assert!(!system.prey()[0].active);
        assert!(system.schedule().is_pending(0));
        assert_eq!(system.active_count(), 0);
    }

    #[test]
    fn test_inactive_never_recaptured() {
        let mut system = small_pool(1);
        let target = system.prey()[0].position;
        assert_eq!(system.update(DT, target), 1);
        for _ in 0..300 {
            assert_eq!(system.update(DT, target), 0);
        }
    }

    #[test]
    fn test_respawn_after_delay() {
        let mut system = small_pool(1);
        let far = Vec3::new(10_000.0, 0.0, 10_000.0);
        let target = system.prey()[0].position;
        system.update(DT, target);

        for _ in 0..599 {
            system.update(DT, far);
            assert!(!system.prey()[0].active);
        }
        system.update(DT, far);
        assert!(system.prey()[0].active);
    }

    #[test]
    fn test_flee_moves_away() {
        let mut system = small_pool(1);
        system.prey[0].velocity = Vec3::ZERO;
        let fish = system.prey()[0].position;
        let chaser = fish - Vec3::new(5.0, 0.0, 0.0);
        system.update(DT, chaser);
        let v = system.prey()[0].velocity;
        assert!((v.x - 0.8).abs() < 1e-4, "velocity {v:?}");
    }

    #[test]
    fn test_wander_speed_clamped() {
        let mut system = small_pool(1);
        system.prey[0].velocity = Vec3::new(20.0, 0.0, 0.0);
        system.update(DT, Vec3::splat(10_000.0));
        let speed = system.prey()[0].velocity.length();
        assert!(speed <= 2.5 + 1e-4);

        system.prey[0].velocity = Vec3::ZERO;
        system.update(DT, Vec3::splat(10_000.0));
        let speed = system.prey()[0].velocity.length();
        assert!(speed >= 1.0 - 1e-4);
    }

    #[test]
    fn test_chased_from_below_stays_submerged() {
        let mut system = small_pool(1);
        for _ in 0..60 {
            let chaser = system.prey()[0].position - Vec3::new(0.0, 5.0, 0.0);
            system.update(DT, chaser);
        }
        let far = Vec3::new(10_000.0, 0.0, 10_000.0);
        for _ in 0..3600 {
            system.update(DT, far);
            let y = system.prey()[0].position.y;
            assert!((-20.0..=-3.0).contains(&y), "left the band at y {y}");
        }
        assert!(system.prey()[0].active);
        assert!(system.prey()[0].velocity.y.abs() < 8.0);
    }

    #[test]
    fn test_keep_out_disc() {
        let system = small_pool(200).avoiding(Vec3::ZERO, 60.0);
        for fish in system.prey() {
            let r = Vec3::new(fish.position.x, 0.0, fish.position.z).length();
            assert!(r >= 60.0, "fish at radius {r}");
        }
    }

    #[test]
    fn test_shutdown_freezes_pool() {
        let mut system = small_pool(1);
        let target = system.prey()[0].position;
        system.update(DT, target);
        assert_eq!(system.shutdown(), 1);
        for _ in 0..1200 {
            system.update(DT, target);
        }
        assert!(!system.prey()[0].active);
    }
}
