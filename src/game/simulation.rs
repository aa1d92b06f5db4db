//! Simulation orchestrator.
//!
//! Owns every per-session object and runs them in a fixed order each frame:
//!
//! 1. Clamp the frame delta
//! 2. Step physics (fixed sub-steps)
//! 3. Character controller
//! 4. Water animation
//! 5. Prey (capture rewards, surge, strong shake)
//! 6. Pickups (rewards, light shake)
//! 7. Camera
//! 8. Telemetry
//!
//! Each stage reads what the previous one just wrote; in particular the
//! pools see the post-physics character position. A character error halts
//! the session and every later `step` returns [`SimError::Halted`].

use glam::Vec3;

use crate::camera::{CameraPose, CameraRig};
use crate::error::{SimError, SimResult};
use crate::game::config::{ConfigError, SimConfig};
use crate::game::systems::{PREY_CAPTURE_SCORE, PickupReward, PickupSystem, PreySystem};
use crate::game::telemetry::{
    MarkerInstance, SessionStats, SimulationSnapshot, TelemetrySink, minimap_markers,
};
use crate::input::InputPort;
use crate::physics::PhysicsWorld;
use crate::player::CharacterController;
use crate::world::{IslandTerrain, TerrainProvider, WaterSurface};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    Running,
    /// Stopped by an error; `reset` may revive it
    Halted(SimError),
    /// Torn down; nothing will run again
    ShutDown,
}

/// Everything that happened in one `step`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Delta actually simulated after clamping
    pub delta: f32,
    /// Physics sub-steps taken
    pub substeps: u32,
    pub captures: u32,
    pub pickups: PickupReward,
    pub score_gained: u64,
    pub camera: CameraPose,
    pub snapshot: SimulationSnapshot,
}

/// Per-subsystem seeds derived from one session seed.
fn derive_seed(seed: u64, stream: u64) -> u64 {
    seed.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(stream.wrapping_mul(0xBF58_476D_1CE4_E5B9))
}

/// Prey stay this far outside the island shore so a capture never puts
/// the character inside the island column.
const SHORE_MARGIN: f32 = 4.0;

fn island_keep_out(config: &SimConfig) -> f32 {
    config.world.island.radius + SHORE_MARGIN
}

const PREY_STREAM: u64 = 1;
const PICKUP_STREAM: u64 = 2;
const CAMERA_STREAM: u64 = 3;

pub struct Simulation<I: InputPort> {
    config: SimConfig,
    seed: u64,
    world: PhysicsWorld,
    terrain: IslandTerrain,
    water: WaterSurface,
    character: CharacterController,
    prey: PreySystem,
    pickups: PickupSystem,
    camera: CameraRig,
    input: I,
    sink: Option<Box<dyn TelemetrySink>>,
    status: SessionStatus,
    frame: u64,
    elapsed: f64,
    stats: SessionStats,
}

impl<I: InputPort> Simulation<I> {
    /// Build a session: terrain colliders, the character body, both pools
    /// and the camera. `config` is validated first, so configs built in code
    /// get the same checks as ones loaded from JSON.
    pub fn new(config: SimConfig, input: I, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = PhysicsWorld::new(config.world.physics());
        let terrain = IslandTerrain::new(config.world.island, config.world.water);
        let colliders = terrain.install(&mut world);

        let character = CharacterController::spawn(&mut world, config.character);
        let water_level = terrain.water_level();
        let prey = PreySystem::new(config.prey, water_level, derive_seed(seed, PREY_STREAM))
            .avoiding(config.world.island.center, island_keep_out(&config));
        let pickups = PickupSystem::new(
            config.pickups,
            config.world.island.center,
            water_level,
            derive_seed(seed, PICKUP_STREAM),
        );
        let mut camera = CameraRig::new(config.camera, derive_seed(seed, CAMERA_STREAM));
        camera.snap_to(character.position(), character.forward());

        log::info!(
            "[Sim] session ready: seed {seed}, {colliders} colliders, {} prey, {} pickups",
            config.prey.count,
            config.pickups.count
        );

        Ok(Self {
            config,
            seed,
            world,
            terrain,
            water: WaterSurface::new(config.world.water),
            character,
            prey,
            pickups,
            camera,
            input,
            sink: None,
            status: SessionStatus::Running,
            frame: 0,
            elapsed: 0.0,
            stats: SessionStats::default(),
        })
    }

    /// Attach a telemetry sink, replacing any previous one.
    pub fn with_sink(mut self, sink: impl TelemetrySink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn set_sink(&mut self, sink: Option<Box<dyn TelemetrySink>>) {
        self.sink = sink;
    }

    /// Clamp into `[0, max_frame_delta]`; non-finite deltas count as zero.
    pub fn clamp_delta(&self, frame_delta: f32) -> f32 {
        if frame_delta.is_finite() {
            frame_delta.clamp(0.0, self.config.world.max_frame_delta)
        } else {
            0.0
        }
    }

    /// Advance one frame.
    pub fn step(&mut self, frame_delta: f32) -> SimResult<FrameReport> {
        if self.status != SessionStatus::Running {
            return Err(SimError::Halted);
        }

        let delta = self.clamp_delta(frame_delta);
        let substeps = self.world.step(delta);

        let water_level = self.terrain.water_level();
        if let Err(err) = self
            .character
            .update(&mut self.world, &self.input, delta, water_level)
        {
            log::error!("[Sim] halting at frame {}: {err}", self.frame);
            self.status = SessionStatus::Halted(err.clone());
            return Err(err);
        }

        self.water.update(delta);

        let score_before = self.character.score();
        let position = self.character.position();

        let captures = self.prey.update(delta, position);
        if captures > 0 {
            self.character
                .add_score(PREY_CAPTURE_SCORE.saturating_mul(captures));
            self.character
                .trigger_surge(self.config.character.surge_duration);
            self.camera.shake_for_capture();
            self.stats.captures += u64::from(captures);
        }

        let reward = self.pickups.update(delta, position);
        if !reward.is_empty() {
            self.character.add_score(reward.score_delta);
            self.character.add_stamina(reward.stamina_delta);
            self.camera.shake_for_pickup();
            self.stats.common_pickups += u64::from(reward.common);
            self.stats.rare_pickups += u64::from(reward.rare);
        }

        self.stats.jumps = self.character.jump_count();
        self.stats.peak_speed = self.stats.peak_speed.max(self.character.speed());

        let camera = self.camera.update(
            self.character.position(),
            self.character.forward(),
            self.character.speed(),
        );

        self.frame += 1;
        self.elapsed += f64::from(delta);

        let snapshot = self.snapshot();
        if let Some(sink) = self.sink.as_mut() {
            sink.emit(&snapshot);
        }

        Ok(FrameReport {
            delta,
            substeps,
            captures,
            pickups: reward,
            score_gained: self.character.score() - score_before,
            camera,
            snapshot,
        })
    }

    /// HUD-facing state as of the last completed frame.
    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            frame: self.frame,
            elapsed: self.elapsed,
            state: self.character.state(),
            stamina: self.character.stamina(),
            score: self.character.score(),
            speed: self.character.speed(),
            position: self.character.position(),
            boosting: self.character.is_boosting(),
            surge_remaining: self.character.surge_time_remaining(),
            active_prey_positions: self.prey.active_positions(),
            active_pickups: self.pickups.active_count(),
            stats: self.stats,
        }
    }

    pub fn minimap_markers(&self) -> Vec<MarkerInstance> {
        minimap_markers(
            self.character.position(),
            &self.prey.active_positions(),
            self.pickups.pickups(),
        )
    }

    /// Start a new session in place: same seed, same allocations.
    pub fn reset(&mut self) -> SimResult<()> {
        if self.status == SessionStatus::ShutDown {
            return Err(SimError::Halted);
        }

        self.character
            .reset(&mut self.world, self.config.character.spawn_position)?;
        self.prey.reset(derive_seed(self.seed, PREY_STREAM));
        self.pickups.reset(derive_seed(self.seed, PICKUP_STREAM));
        self.camera
            .snap_to(self.character.position(), self.character.forward());
        self.water.reset();

        self.frame = 0;
        self.elapsed = 0.0;
        self.stats = SessionStats::default();
        self.status = SessionStatus::Running;
        log::info!("[Sim] session reset");
        Ok(())
    }

    /// Tear the session down: cancel every pending respawn and remove the
    /// character body. Returns how many respawns were cancelled.
    pub fn shutdown(&mut self) -> usize {
        if self.status == SessionStatus::ShutDown {
            return 0;
        }

        let cancelled = self.prey.shutdown() + self.pickups.shutdown();
        self.character.despawn(&mut self.world);
        self.status = SessionStatus::ShutDown;
        log::info!(
            "[Sim] shut down after {} frames, {cancelled} respawns cancelled",
            self.frame
        );
        cancelled
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn character(&self) -> &CharacterController {
        &self.character
    }

    pub fn prey(&self) -> &PreySystem {
        &self.prey
    }

    pub fn pickups(&self) -> &PickupSystem {
        &self.pickups
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn water(&self) -> &WaterSurface {
        &self.water
    }

    pub fn terrain(&self) -> &IslandTerrain {
        &self.terrain
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    /// Mutable world access for host tools and tests.
    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    /// Swap bindings or scripted actions between frames; state is kept.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Move the character (e.g. a respawn point or debug warp).
    pub fn teleport_character(&mut self, position: Vec3) -> SimResult<()> {
        self.character.teleport(&mut self.world, position)
    }
}
