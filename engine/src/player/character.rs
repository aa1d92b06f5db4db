//! Character Controller
//!
//! Drives the amphibious player character. The controller owns one
//! dynamic body in the [`PhysicsWorld`] and, once per frame, turns input
//! plus the body's post-physics state into forces for the next step.
//!
//! # Frame order
//!
//! 1. Surge countdown and surge stamina regeneration
//! 2. Sample input; boosting needs the boost key and stamina left
//! 3. Inertial yaw toward a target heading
//! 4. Forward/backward propulsion
//! 5. Jump on land, breach in water (cooldown gated)
//! 6. Buoyancy, dive force, per-medium damping
//! 7. Stamina drain/regeneration
//! 8. Visual transform with accumulated lean
//! 9. Tail animation phase
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut world = PhysicsWorld::default();
//! let mut character = CharacterController::spawn(&mut world, CharacterConfig::default());
//!
//! // Each frame, after world.step():
//! character.update(&mut world, &input, delta_time, water_level)?;
//! ```

use std::f32::consts::{PI, TAU};

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::input::{ActionState, InputPort};
use crate::physics::{BodyHandle, CollisionGroups, PhysicsWorld, RigidBody};

use super::state::OrientationState;

/// Upper stamina bound.
pub const MAX_STAMINA: f32 = 100.0;

/// Stamina regenerated per second while a surge is active.
pub const SURGE_STAMINA_REGEN: f32 = 200.0;

/// Stamina drained per second while boosting and moving.
pub const BOOST_STAMINA_DRAIN: f32 = 40.0;

/// Stamina regenerated per second otherwise.
pub const STAMINA_REGEN: f32 = 20.0;

/// Per-frame smoothing of the actual yaw toward the target yaw.
pub const YAW_SMOOTHING: f32 = 0.15;

/// Per-frame smoothing of visual tilt and pitch.
pub const LEAN_SMOOTHING: f32 = 0.1;

/// Minimum time between jumps (seconds).
pub const JUMP_COOLDOWN: f32 = 0.5;

/// Propulsion multiplier while a surge is active.
pub const SURGE_FORCE_MULTIPLIER: f32 = 1.3;

/// Backward thrust as a fraction of forward thrust.
pub const BACKWARD_FORCE_RATIO: f32 = 0.4;

/// Tunable character parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    /// Where the body is created
    pub spawn_position: Vec3,
    /// Collision sphere radius (meters)
    pub radius: f32,
    /// Body mass (kg)
    pub mass: f32,
    /// Forward thrust when cruising (N)
    pub forward_force: f32,
    /// Forward thrust when boosting (N)
    pub boost_force: f32,
    /// Turn rate (radians per second)
    pub turn_rate: f32,
    /// Turn rate while boosting (radians per second)
    pub boost_turn_rate: f32,
    /// Vertical launch speed of a breach (m/s)
    pub breach_velocity: f32,
    /// Forward speed added by a breach (m/s)
    pub breach_forward_boost: f32,
    /// Vertical launch speed of a ground jump (m/s)
    pub ground_jump_velocity: f32,
    /// Ground jump only when |vy| is below this (m/s)
    pub grounded_velocity_threshold: f32,
    /// Upward force per meter of submersion (N/m)
    pub buoyancy_coefficient: f32,
    /// Constant downward force while diving (N)
    pub dive_force: f32,
    /// Linear damping in water
    pub water_damping: f32,
    /// Linear damping on land
    pub land_damping: f32,
    /// Target roll per frame at full turn input (radians)
    pub tilt_target: f32,
    /// Target pitch per frame per m/s of vertical speed (radians)
    pub pitch_per_velocity: f32,
    /// Clamp for the per-frame pitch target (radians)
    pub max_pitch_target: f32,
    /// Tail phase rate when cruising (radians per second)
    pub tail_rate: f32,
    /// Tail phase rate when boosting (radians per second)
    pub boost_tail_rate: f32,
    /// Length of the surge window a capture grants (seconds)
    pub surge_duration: f32,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            spawn_position: Vec3::new(0.0, -1.0, 40.0),
            radius: 1.0,
            mass: 2.0,
            forward_force: 25.0,
            boost_force: 50.0,
            turn_rate: 2.4,
            boost_turn_rate: 3.4,
            breach_velocity: 12.0,
            breach_forward_boost: 6.0,
            ground_jump_velocity: 7.0,
            grounded_velocity_threshold: 0.5,
            buoyancy_coefficient: 30.0,
            dive_force: 45.0,
            water_damping: 0.5,
            land_damping: 0.9,
            tilt_target: 0.04,
            pitch_per_velocity: 0.004,
            max_pitch_target: 0.06,
            tail_rate: 8.0,
            boost_tail_rate: 20.0,
            surge_duration: 2.5,
        }
    }
}

/// Outcome of a jump request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    /// Water launch with forward push
    Breach,
    /// Small hop on land
    GroundJump,
    /// Still cooling down
    Cooldown,
    /// On land but not settled vertically
    Airborne,
}

impl JumpOutcome {
    pub fn launched(&self) -> bool {
        matches!(self, Self::Breach | Self::GroundJump)
    }
}

/// Presentation-only transform. Converges toward the body but is allowed
/// to drift: roll and pitch accumulate frame over frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualTransform {
    pub position: Vec3,
    pub yaw: f32,
    pub roll: f32,
    pub pitch: f32,
}

impl Default for VisualTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            roll: 0.0,
            pitch: 0.0,
        }
    }
}

impl VisualTransform {
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, -self.yaw, self.pitch, self.roll)
    }
}

/// The player character: one rigid body plus gameplay state.
#[derive(Debug, Clone)]
pub struct CharacterController {
    config: CharacterConfig,
    body: BodyHandle,

    state: OrientationState,
    position: Vec3,
    velocity: Vec3,
    speed: f32,

    stamina: f32,
    score: u64,
    boosting: bool,
    surge_time_remaining: f32,

    /// Simulated clock (seconds since spawn)
    clock: f64,
    last_jump_time: Option<f64>,
    last_jump: Option<JumpOutcome>,
    jump_count: u32,

    current_yaw: f32,
    target_yaw: f32,
    tilt: f32,
    pitch: f32,
    tail_phase: f32,
    visual: VisualTransform,
}

/// Exponential approach used by every smoothed quantity.
#[inline]
fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Wrap an angle into (-PI, PI].
#[inline]
fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Forward direction for a yaw; yaw 0 faces -Z.
#[inline]
pub fn forward_from_yaw(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, -yaw.cos())
}

impl CharacterController {
    /// Create the character's body in `world` at the configured spawn point.
    pub fn spawn(world: &mut PhysicsWorld, config: CharacterConfig) -> Self {
        let body = RigidBody::sphere(config.spawn_position, config.radius, config.mass)
            .with_groups(CollisionGroups::character())
            .with_damping(config.water_damping);
        let handle = world.add_body(body);

        Self {
            config,
            body: handle,
            state: OrientationState::classify(config.spawn_position.y, 0.0),
            position: config.spawn_position,
            velocity: Vec3::ZERO,
            speed: 0.0,
            stamina: MAX_STAMINA,
            score: 0,
            boosting: false,
            surge_time_remaining: 0.0,
            clock: 0.0,
            last_jump_time: None,
            last_jump: None,
            jump_count: 0,
            current_yaw: 0.0,
            target_yaw: 0.0,
            tilt: 0.0,
            pitch: 0.0,
            tail_phase: 0.0,
            visual: VisualTransform {
                position: config.spawn_position,
                ..VisualTransform::default()
            },
        }
    }

    /// Remove the body from `world`. The controller must not be updated afterwards.
    pub fn despawn(&self, world: &mut PhysicsWorld) -> bool {
        world.remove_body(self.body).is_some()
    }

    /// Move the body to `position` at rest. Session state is untouched.
    pub fn teleport(&mut self, world: &mut PhysicsWorld, position: Vec3) -> SimResult<()> {
        let body = world
            .body_mut(self.body)
            .ok_or(SimError::MissingBody(self.body))?;
        body.position = position;
        body.velocity = Vec3::ZERO;
        body.rotation = Quat::from_rotation_y(-self.current_yaw);

        self.position = position;
        self.velocity = Vec3::ZERO;
        self.speed = 0.0;
        self.visual.position = position;
        Ok(())
    }

    /// Put the character back at `position` at rest with a fresh session state.
    pub fn reset(&mut self, world: &mut PhysicsWorld, position: Vec3) -> SimResult<()> {
        self.current_yaw = 0.0;
        self.target_yaw = 0.0;
        self.teleport(world, position)?;

        self.visual = VisualTransform {
            position,
            ..VisualTransform::default()
        };
        self.stamina = MAX_STAMINA;
        self.score = 0;
        self.boosting = false;
        self.surge_time_remaining = 0.0;
        self.clock = 0.0;
        self.last_jump_time = None;
        self.last_jump = None;
        self.jump_count = 0;
        self.tilt = 0.0;
        self.pitch = 0.0;
        self.tail_phase = 0.0;
        Ok(())
    }

    /// Run one frame of character logic. Call after the physics step.
    pub fn update(
        &mut self,
        world: &mut PhysicsWorld,
        input: &dyn InputPort,
        delta: f32,
        water_level: f32,
    ) -> SimResult<()> {
        let config = self.config;
        let handle = self.body;
        let body = world.body_mut(handle).ok_or(SimError::MissingBody(handle))?;
        if !body.is_finite() {
            return Err(SimError::NonFiniteState {
                what: "character body",
            });
        }

        self.clock += f64::from(delta);
        self.position = body.position;
        self.velocity = body.velocity;
        self.speed = body.velocity.length();
        self.state = OrientationState::classify(body.position.y, water_level);

        // 1. Surge, regenerating only for the part of the frame it covers
        if self.surge_time_remaining > 0.0 {
            let active = self.surge_time_remaining.min(delta);
            self.surge_time_remaining -= active;
            self.add_stamina(SURGE_STAMINA_REGEN * active);
        }

        // 2. Input
        let actions = ActionState::read(input);
        self.boosting = actions.boost && self.stamina > 0.0;

        // 3. Inertial yaw
        let turn_rate = if self.boosting {
            config.boost_turn_rate
        } else {
            config.turn_rate
        };
        self.target_yaw -= actions.turn_axis() as f32 * turn_rate * delta;
        self.current_yaw = approach(self.current_yaw, self.target_yaw, YAW_SMOOTHING);
        let forward = forward_from_yaw(self.current_yaw);
        body.rotation = Quat::from_rotation_y(-self.current_yaw);

        // 4. Propulsion
        let mut thrust = if self.boosting {
            config.boost_force
        } else {
            config.forward_force
        };
        if self.surge_time_remaining > 0.0 {
            thrust *= SURGE_FORCE_MULTIPLIER;
        }
        if actions.forward {
            body.apply_force(forward * thrust);
        }
        if actions.backward {
            body.apply_force(-forward * thrust * BACKWARD_FORCE_RATIO);
        }

        // 5. Jump / breach
        if actions.jump {
            let outcome = self.try_jump(body, forward);
            if outcome.launched() {
                self.last_jump_time = Some(self.clock);
                self.jump_count += 1;
            }
            self.last_jump = Some(outcome);
        } else {
            self.last_jump = None;
        }

        // 6. Buoyancy and drag
        if self.state.is_in_water() {
            let depth = (water_level - body.position.y).max(0.0);
            body.apply_force(Vec3::Y * depth * config.buoyancy_coefficient);
            if actions.dive {
                body.apply_force(Vec3::NEG_Y * config.dive_force);
            }
            body.linear_damping = config.water_damping;
        } else {
            body.linear_damping = config.land_damping;
        }

        // 7. Stamina
        if self.boosting && actions.is_moving() {
            self.add_stamina(-BOOST_STAMINA_DRAIN * delta);
        } else {
            self.add_stamina(STAMINA_REGEN * delta);
        }

        // 8. Visual transform
        let target_tilt = actions.turn_axis() as f32 * config.tilt_target;
        self.tilt = approach(self.tilt, target_tilt, LEAN_SMOOTHING);
        let target_pitch = (body.velocity.y * config.pitch_per_velocity)
            .clamp(-config.max_pitch_target, config.max_pitch_target);
        self.pitch = approach(self.pitch, target_pitch, LEAN_SMOOTHING);

        self.visual.position = body.position;
        self.visual.yaw = self.current_yaw;
        self.visual.roll = wrap_angle(self.visual.roll + self.tilt);
        self.visual.pitch = wrap_angle(self.visual.pitch + self.pitch);

        // 9. Tail
        let tail_rate = if self.boosting {
            config.boost_tail_rate
        } else {
            config.tail_rate
        };
        self.tail_phase = (self.tail_phase + tail_rate * delta).rem_euclid(TAU);

        Ok(())
    }

    /// Apply the launch velocity if allowed. Only a launch stamps the cooldown.
    fn try_jump(&self, body: &mut RigidBody, forward: Vec3) -> JumpOutcome {
        let cooled_down = self
            .last_jump_time
            .is_none_or(|t| self.clock - t + 1e-6 >= f64::from(JUMP_COOLDOWN));
        if !cooled_down {
            return JumpOutcome::Cooldown;
        }

        if self.state.is_in_water() {
            body.velocity.y = self.config.breach_velocity;
            body.velocity += forward * self.config.breach_forward_boost;
            JumpOutcome::Breach
        } else if body.velocity.y.abs() < self.config.grounded_velocity_threshold {
            body.velocity.y = self.config.ground_jump_velocity;
            JumpOutcome::GroundJump
        } else {
            JumpOutcome::Airborne
        }
    }

    /// Add to the score. Score only ever grows.
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(u64::from(points));
    }

    /// Add (or remove) stamina, clamped to [0, MAX_STAMINA].
    pub fn add_stamina(&mut self, amount: f32) {
        self.stamina = (self.stamina + amount).clamp(0.0, MAX_STAMINA);
    }

    /// Start or extend a surge window.
    pub fn trigger_surge(&mut self, duration: f32) {
        self.surge_time_remaining = self.surge_time_remaining.max(duration.max(0.0));
    }

    pub fn body(&self) -> BodyHandle {
        self.body
    }

    pub fn config(&self) -> &CharacterConfig {
        &self.config
    }

    pub fn state(&self) -> OrientationState {
        self.state
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn stamina(&self) -> f32 {
        self.stamina
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn is_boosting(&self) -> bool {
        self.boosting
    }

    pub fn surge_time_remaining(&self) -> f32 {
        self.surge_time_remaining
    }

    /// Facing direction from the smoothed yaw.
    pub fn forward(&self) -> Vec3 {
        forward_from_yaw(self.current_yaw)
    }

    pub fn current_yaw(&self) -> f32 {
        self.current_yaw
    }

    pub fn target_yaw(&self) -> f32 {
        self.target_yaw
    }

    pub fn tilt(&self) -> f32 {
        self.tilt
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn tail_phase(&self) -> f32 {
        self.tail_phase
    }

    pub fn visual(&self) -> &VisualTransform {
        &self.visual
    }

    /// Result of the jump request made in the last update, if any.
    pub fn last_jump(&self) -> Option<JumpOutcome> {
        self.last_jump
    }

    /// Successful jumps and breaches since spawn.
    pub fn jump_count(&self) -> u32 {
        self.jump_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputAction, ScriptedInput};
    use crate::physics::{PhysicsConfig, FIXED_TIME_STEP};

    const DT: f32 = 1.0 / 60.0;

    fn setup_at(y: f32) -> (PhysicsWorld, CharacterController) {
        let mut world = PhysicsWorld::new(PhysicsConfig::default());
        let config = CharacterConfig {
            spawn_position: Vec3::new(0.0, y, 0.0),
            ..CharacterConfig::default()
        };
        let character = CharacterController::spawn(&mut world, config);
        (world, character)
    }

    #[test]
    fn test_spawn_defaults() {
        let (world, character) = setup_at(-1.0);
        assert_eq!(world.body_count(), 1);
        assert_eq!(character.stamina(), MAX_STAMINA);
        assert_eq!(character.score(), 0);
        assert!(!character.is_boosting());
    }

    #[test]
    fn test_state_from_height() {
        let (mut world, mut character) = setup_at(-2.0);
        let idle = ScriptedInput::new();
        character.update(&mut world, &idle, 0.0, 0.0).unwrap();
        assert_eq!(character.state(), OrientationState::Underwater);

        world.body_mut(character.body()).unwrap().position.y = 0.0;
        character.update(&mut world, &idle, 0.0, 0.0).unwrap();
        assert_eq!(character.state(), OrientationState::WaterSurface);

        world.body_mut(character.body()).unwrap().position.y = 1.0;
        character.update(&mut world, &idle, 0.0, 0.0).unwrap();
        assert_eq!(character.state(), OrientationState::Land);
    }

    #[test]
    fn test_boost_requires_stamina() {
        let (mut world, mut character) = setup_at(-1.0);
        let input = ScriptedInput::holding(&[InputAction::Boost, InputAction::Forward]);

        character.update(&mut world, &input, DT, 0.0).unwrap();
        assert!(character.is_boosting());

        character.add_stamina(-MAX_STAMINA);
        character.update(&mut world, &input, DT, 0.0).unwrap();
        assert!(!character.is_boosting());
    }

    #[test]
    fn test_boost_without_key_is_false() {
        let (mut world, mut character) = setup_at(-1.0);
        let input = ScriptedInput::holding(&[InputAction::Forward]);
        character.update(&mut world, &input, DT, 0.0).unwrap();
        assert!(!character.is_boosting());
    }

    #[test]
    fn test_boosting_drains_stamina() {
        let (mut world, mut character) = setup_at(-1.0);
        let input = ScriptedInput::holding(&[InputAction::Boost, InputAction::Forward]);
        character.update(&mut world, &input, 0.5, 0.0).unwrap();
        assert!((character.stamina() - 80.0).abs() < 1e-4);
    }

    #[test]
    fn test_stamina_regenerates_when_idle() {
        let (mut world, mut character) = setup_at(-1.0);
        character.add_stamina(-50.0);
        character.update(&mut world, &ScriptedInput::new(), 1.0, 0.0).unwrap();
        assert!((character.stamina() - 70.0).abs() < 1e-4);
    }

    #[test]
    fn test_boost_held_without_moving_regenerates() {
        let (mut world, mut character) = setup_at(-1.0);
        character.add_stamina(-50.0);
        let input = ScriptedInput::holding(&[InputAction::Boost]);
        character.update(&mut world, &input, 1.0, 0.0).unwrap();
        assert!(character.is_boosting());
        assert!((character.stamina() - 70.0).abs() < 1e-4);
    }

    #[test]
    fn test_surge_regenerates_and_expires() {
        let (mut world, mut character) = setup_at(-1.0);
        character.add_stamina(-100.0);
        character.trigger_surge(0.1);
        let input = ScriptedInput::holding(&[InputAction::Boost, InputAction::Forward]);
        character.update(&mut world, &input, 0.1, 0.0).unwrap();
        // +200*0.1 from surge, -40*0.1 from boosting
        assert!((character.stamina() - 16.0).abs() < 1e-3, "stamina {}", character.stamina());
        assert_eq!(character.surge_time_remaining(), 0.0);
    }

    #[test]
    fn test_surge_regen_prorated_on_last_frame() {
        let (mut world, mut character) = setup_at(-1.0);
        character.add_stamina(-100.0);
        character.trigger_surge(0.01);
        let input = ScriptedInput::holding(&[InputAction::Forward]);
        character.update(&mut world, &input, 0.1, 0.0).unwrap();
        // 200 * 0.01 from the tail of the surge, then 20 * 0.1 idle regen
        assert!((character.stamina() - 4.0).abs() < 1e-3, "stamina {}", character.stamina());
        assert_eq!(character.surge_time_remaining(), 0.0);
    }

    #[test]
    fn test_stamina_stays_clamped() {
        let (mut world, mut character) = setup_at(-1.0);
        character.trigger_surge(10.0);
        let idle = ScriptedInput::new();
        for _ in 0..100 {
            character.update(&mut world, &idle, 0.1, 0.0).unwrap();
            assert!((0.0..=MAX_STAMINA).contains(&character.stamina()));
        }
        let boost = ScriptedInput::holding(&[InputAction::Boost, InputAction::Forward]);
        for _ in 0..200 {
            character.update(&mut world, &boost, 0.1, 0.0).unwrap();
            assert!((0.0..=MAX_STAMINA).contains(&character.stamina()));
        }
    }

    #[test]
    fn test_score_is_monotonic() {
        let (_world, mut character) = setup_at(-1.0);
        character.add_score(500);
        character.add_score(0);
        character.add_score(300);
        assert_eq!(character.score(), 800);
    }

    #[test]
    fn test_yaw_smoothing() {
        let (mut world, mut character) = setup_at(-1.0);
        let input = ScriptedInput::holding(&[InputAction::Right]);
        character.update(&mut world, &input, 0.1, 0.0).unwrap();
        // target moved by turn_rate * dt, actual moved 15% of the way
        let target = character.target_yaw();
        assert!((target - 0.24).abs() < 1e-5);
        assert!((character.current_yaw() - target * YAW_SMOOTHING).abs() < 1e-5);
    }

    #[test]
    fn test_forward_force_applied() {
        let (mut world, mut character) = setup_at(-1.0);
        let input = ScriptedInput::holding(&[InputAction::Forward]);
        character.update(&mut world, &input, DT, 0.0).unwrap();
        let force = world.body(character.body()).unwrap().force();
        // Yaw 0 faces -Z
        assert!((force.z + 25.0).abs() < 1e-4, "force {force:?}");
    }

    #[test]
    fn test_backward_force_is_forty_percent() {
        let (mut world, mut character) = setup_at(3.0);
        let input = ScriptedInput::holding(&[InputAction::Backward]);
        character.update(&mut world, &input, DT, 0.0).unwrap();
        let force = world.body(character.body()).unwrap().force();
        assert!((force.z - 10.0).abs() < 1e-4, "force {force:?}");
    }

    #[test]
    fn test_surge_multiplies_thrust() {
        let (mut world, mut character) = setup_at(3.0);
        character.trigger_surge(5.0);
        let input = ScriptedInput::holding(&[InputAction::Forward]);
        character.update(&mut world, &input, DT, 0.0).unwrap();
        let force = world.body(character.body()).unwrap().force();
        assert!((force.z + 25.0 * SURGE_FORCE_MULTIPLIER).abs() < 1e-3);
    }

    #[test]
    fn test_breach_in_water() {
        let (mut world, mut character) = setup_at(-1.0);
        let input = ScriptedInput::holding(&[InputAction::Jump]);
        character.update(&mut world, &input, DT, 0.0).unwrap();
        assert_eq!(character.last_jump(), Some(JumpOutcome::Breach));
        let body = world.body(character.body()).unwrap();
        assert_eq!(body.velocity.y, 12.0);
        assert!((body.velocity.z + 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_jump_cooldown() {
        let (mut world, mut character) = setup_at(-1.0);
        let jump = ScriptedInput::holding(&[InputAction::Jump]);
        let idle = ScriptedInput::new();

        character.update(&mut world, &jump, 0.1, 0.0).unwrap();
        assert_eq!(character.last_jump(), Some(JumpOutcome::Breach));

        // Put it back in the water so only the cooldown can refuse.
        world.body_mut(character.body()).unwrap().position.y = -1.0;
        character.update(&mut world, &idle, 0.3, 0.0).unwrap();
        character.update(&mut world, &jump, 0.1, 0.0).unwrap();
        assert_eq!(character.last_jump(), Some(JumpOutcome::Cooldown));

        character.update(&mut world, &jump, 0.1, 0.0).unwrap();
        assert_eq!(character.last_jump(), Some(JumpOutcome::Breach));
        assert_eq!(character.jump_count(), 2);
    }

    #[test]
    fn test_ground_jump_needs_settled_body() {
        let (mut world, mut character) = setup_at(5.0);
        let jump = ScriptedInput::holding(&[InputAction::Jump]);

        world.body_mut(character.body()).unwrap().velocity.y = -3.0;
        character.update(&mut world, &jump, DT, 0.0).unwrap();
        assert_eq!(character.last_jump(), Some(JumpOutcome::Airborne));

        world.body_mut(character.body()).unwrap().velocity.y = 0.0;
        character.update(&mut world, &jump, DT, 0.0).unwrap();
        assert_eq!(character.last_jump(), Some(JumpOutcome::GroundJump));
        assert_eq!(world.body(character.body()).unwrap().velocity.y, 7.0);
    }

    #[test]
    fn test_buoyancy_scales_with_depth() {
        let (mut world, mut character) = setup_at(-2.0);
        character.update(&mut world, &ScriptedInput::new(), DT, 0.0).unwrap();
        let force = world.body(character.body()).unwrap().force();
        assert!((force.y - 60.0).abs() < 1e-3);
    }

    #[test]
    fn test_dive_pushes_down() {
        let (mut world, mut character) = setup_at(-2.0);
        let input = ScriptedInput::holding(&[InputAction::Dive]);
        character.update(&mut world, &input, DT, 0.0).unwrap();
        let force = world.body(character.body()).unwrap().force();
        assert!((force.y - (60.0 - 45.0)).abs() < 1e-3);
    }

    #[test]
    fn test_damping_switches_with_medium() {
        let (mut world, mut character) = setup_at(5.0);
        character.update(&mut world, &ScriptedInput::new(), DT, 0.0).unwrap();
        assert_eq!(world.body(character.body()).unwrap().linear_damping, 0.9);

        world.body_mut(character.body()).unwrap().position.y = -1.0;
        character.update(&mut world, &ScriptedInput::new(), DT, 0.0).unwrap();
        assert_eq!(world.body(character.body()).unwrap().linear_damping, 0.5);
    }

    #[test]
    fn test_character_floats_near_surface() {
        let (mut world, mut character) = setup_at(-5.0);
        let idle = ScriptedInput::new();
        for _ in 0..600 {
            world.step(FIXED_TIME_STEP);
            character.update(&mut world, &idle, FIXED_TIME_STEP, 0.0).unwrap();
        }
        assert_eq!(character.state(), OrientationState::WaterSurface);
    }

    #[test]
    fn test_lean_accumulates_under_sustained_turn() {
        let (mut world, mut character) = setup_at(-1.0);
        let input = ScriptedInput::holding(&[InputAction::Left]);
        let mut last_roll = 0.0;
        for _ in 0..5 {
            character.update(&mut world, &input, DT, 0.0).unwrap();
            let roll = character.visual().roll;
            assert!(roll > last_roll);
            last_roll = roll;
        }
    }

    #[test]
    fn test_tail_phase_faster_when_boosting() {
        let (mut world, mut cruise) = setup_at(-1.0);
        cruise.update(&mut world, &ScriptedInput::new(), 0.1, 0.0).unwrap();

        let (mut world2, mut boost) = setup_at(-1.0);
        boost
            .update(&mut world2, &ScriptedInput::holding(&[InputAction::Boost]), 0.1, 0.0)
            .unwrap();
        assert!(boost.tail_phase() > cruise.tail_phase());
    }

    #[test]
    fn test_missing_body_is_error() {
        let (mut world, mut character) = setup_at(-1.0);
        character.despawn(&mut world);
        let err = character
            .update(&mut world, &ScriptedInput::new(), DT, 0.0)
            .unwrap_err();
        assert_eq!(err, SimError::MissingBody(character.body()));
    }

    #[test]
    fn test_non_finite_body_is_error() {
        let (mut world, mut character) = setup_at(-1.0);
        world.body_mut(character.body()).unwrap().velocity.x = f32::INFINITY;
        let err = character
            .update(&mut world, &ScriptedInput::new(), DT, 0.0)
            .unwrap_err();
        assert!(matches!(err, SimError::NonFiniteState { .. }));
    }

    #[test]
    fn test_reset_restores_session_state() {
        let (mut world, mut character) = setup_at(-1.0);
        character.add_score(900);
        character.add_stamina(-40.0);
        character.trigger_surge(3.0);
        character.reset(&mut world, Vec3::new(5.0, -1.0, 5.0)).unwrap();
        assert_eq!(character.score(), 0);
        assert_eq!(character.stamina(), MAX_STAMINA);
        assert_eq!(character.surge_time_remaining(), 0.0);
        assert_eq!(world.body(character.body()).unwrap().position, Vec3::new(5.0, -1.0, 5.0));
    }

    #[test]
    fn test_teleport_keeps_score() {
        let (mut world, mut character) = setup_at(-1.0);
        character.add_score(500);
        world.body_mut(character.body()).unwrap().velocity = Vec3::new(3.0, 0.0, 0.0);
        character.teleport(&mut world, Vec3::new(0.0, -4.0, 0.0)).unwrap();
        assert_eq!(character.score(), 500);
        let body = world.body(character.body()).unwrap();
        assert_eq!(body.velocity, Vec3::ZERO);
        assert_eq!(body.position.y, -4.0);
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(3.0 * PI) - PI).abs() < 1e-5);
        assert!((wrap_angle(-0.5) + 0.5).abs() < 1e-6);
        assert!(wrap_angle(-PI) > 0.0);
    }
}
