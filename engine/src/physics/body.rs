//! Rigid bodies
//!
//! Dynamic spheres integrated by [`PhysicsWorld`](super::PhysicsWorld).
//! Rotation is kinematic: the world never spins a body, the owner sets
//! its orientation directly (the character steers by yaw).

use glam::{Quat, Vec3};

use super::groups::CollisionGroups;
use super::types::{quat_is_valid, vec3_is_finite};

/// Handle to a body stored in a [`PhysicsWorld`](super::PhysicsWorld).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub(crate) u32);

impl BodyHandle {
    /// Raw slot index, useful for logging.
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// A dynamic sphere body.
#[derive(Debug, Clone)]
pub struct RigidBody {
    /// Centre position in world space (meters)
    pub position: Vec3,
    /// Linear velocity (meters/second)
    pub velocity: Vec3,
    /// Orientation, set by the owner
    pub rotation: Quat,
    /// Mass in kilograms
    mass: f32,
    inv_mass: f32,
    /// Collision sphere radius (meters)
    pub radius: f32,
    /// Fraction of velocity lost per second, in [0, 1)
    pub linear_damping: f32,
    /// Collision layers
    pub groups: CollisionGroups,
    /// Force accumulated for the next step (newtons)
    force: Vec3,
}

impl RigidBody {
    /// Create a dynamic sphere at `position`.
    pub fn sphere(position: Vec3, radius: f32, mass: f32) -> Self {
        let mass = mass.max(0.001);
        Self {
            position,
            velocity: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            mass,
            inv_mass: 1.0 / mass,
            radius: radius.max(0.01),
            linear_damping: 0.01,
            groups: CollisionGroups::default(),
            force: Vec3::ZERO,
        }
    }

    /// Builder: set collision groups.
    pub fn with_groups(mut self, groups: CollisionGroups) -> Self {
        self.groups = groups;
        self
    }

    /// Builder: set linear damping.
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping.clamp(0.0, 0.999);
        self
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn inv_mass(&self) -> f32 {
        self.inv_mass
    }

    /// Accumulate a force applied at the centre of mass.
    pub fn apply_force(&mut self, force: Vec3) {
        self.force += force;
    }

    /// Instant change of momentum.
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse * self.inv_mass;
    }

    /// Currently accumulated force.
    pub fn force(&self) -> Vec3 {
        self.force
    }

    pub(crate) fn clear_force(&mut self) {
        self.force = Vec3::ZERO;
    }

    /// Scalar speed.
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Whether position, velocity and rotation are all usable.
    pub fn is_finite(&self) -> bool {
        vec3_is_finite(self.position) && vec3_is_finite(self.velocity) && quat_is_valid(self.rotation)
    }

    /// Semi-implicit Euler step with exponential damping.
    ///
    /// Damping follows `v *= (1 - d)^dt`, so a damping of 0.5 halves the
    /// speed every second regardless of the step size.
    pub(crate) fn integrate(&mut self, gravity: Vec3, dt: f32) {
        let acceleration = gravity + self.force * self.inv_mass;
        self.velocity += acceleration * dt;
        self.velocity *= (1.0 - self.linear_damping).powf(dt);
        self.position += self.velocity * dt;
    }
}
