//! Physics world
//!
//! Owns dynamic bodies and static colliders and advances them with a fixed
//! sub-step. Frame time is fed into an accumulator; each whole `fixed_step`
//! in the accumulator runs one integration + contact pass, capped at
//! `max_substeps` per call so a long stall cannot snowball.

use glam::Vec3;

use super::body::{BodyHandle, RigidBody};
use super::collider::StaticCollider;

/// Default fixed sub-step (seconds).
pub const FIXED_TIME_STEP: f32 = 1.0 / 60.0;

/// Default cap on sub-steps per `step` call.
pub const MAX_SUBSTEPS: u32 = 10;

/// Default gravity (m/s^2).
pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, -9.82, 0.0);

/// Configuration for a [`PhysicsWorld`].
#[derive(Debug, Clone, Copy)]
pub struct PhysicsConfig {
    pub gravity: Vec3,
    pub fixed_step: f32,
    pub max_substeps: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            fixed_step: FIXED_TIME_STEP,
            max_substeps: MAX_SUBSTEPS,
        }
    }
}

/// Rigid-body world with fixed-step integration and layer-filtered contacts.
#[derive(Debug)]
pub struct PhysicsWorld {
    config: PhysicsConfig,
    bodies: Vec<Option<RigidBody>>,
    statics: Vec<StaticCollider>,
    accumulator: f32,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl PhysicsWorld {
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config: PhysicsConfig {
                fixed_step: config.fixed_step.max(1e-4),
                max_substeps: config.max_substeps.max(1),
                ..config
            },
            bodies: Vec::new(),
            statics: Vec::new(),
            accumulator: 0.0,
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn gravity(&self) -> Vec3 {
        self.config.gravity
    }

    /// Insert a body, reusing a free slot when one exists.
    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        if let Some(index) = self.bodies.iter().position(Option::is_none) {
            self.bodies[index] = Some(body);
            BodyHandle(index as u32)
        } else {
            self.bodies.push(Some(body));
            BodyHandle((self.bodies.len() - 1) as u32)
        }
    }

    /// Remove a body, returning it if the handle was live.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        self.bodies.get_mut(handle.0 as usize).and_then(Option::take)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.0 as usize).and_then(Option::as_ref)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle.0 as usize).and_then(Option::as_mut)
    }

    /// Number of live bodies.
    pub fn body_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.is_some()).count()
    }

    pub fn add_static(&mut self, collider: StaticCollider) {
        self.statics.push(collider);
    }

    pub fn statics(&self) -> &[StaticCollider] {
        &self.statics
    }

    pub fn clear_statics(&mut self) {
        self.statics.clear();
    }

    /// Leftover time not yet consumed by a sub-step.
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Advance the world by `frame_delta` seconds of wall time.
    ///
    /// Returns the number of fixed sub-steps performed. Forces accumulated
    /// since the previous call act on every sub-step of this call and are
    /// cleared afterwards.
    pub fn step(&mut self, frame_delta: f32) -> u32 {
        let h = self.config.fixed_step;
        self.accumulator += frame_delta.max(0.0);

        let mut substeps = 0;
        while self.accumulator >= h && substeps < self.config.max_substeps {
            self.substep(h);
            self.accumulator -= h;
            substeps += 1;
        }

        // Drop time we could not catch up on rather than carrying a debt.
        if substeps == self.config.max_substeps {
            self.accumulator = self.accumulator.min(h);
        }

        for body in self.bodies.iter_mut().flatten() {
            body.clear_force();
        }

        substeps
    }

    fn substep(&mut self, h: f32) {
        let gravity = self.config.gravity;
        for body in self.bodies.iter_mut().flatten() {
            body.integrate(gravity, h);
        }

        self.resolve_static_contacts();
        self.resolve_body_contacts();
    }

    fn resolve_static_contacts(&mut self) {
        for body in self.bodies.iter_mut().flatten() {
            for collider in &self.statics {
                if !body.groups.interacts_with(&collider.groups) {
                    continue;
                }
                if let Some(contact) = collider.sphere_contact(body.position, body.radius) {
                    body.position += contact.normal * contact.depth;
                    let into_surface = body.velocity.dot(contact.normal);
                    if into_surface < 0.0 {
                        body.velocity -= contact.normal * into_surface;
                    }
                }
            }
        }
    }

    fn resolve_body_contacts(&mut self) {
        let count = self.bodies.len();
        for i in 0..count {
            for j in (i + 1)..count {
                let (head, tail) = self.bodies.split_at_mut(j);
                let (Some(a), Some(b)) = (head[i].as_mut(), tail[0].as_mut()) else {
                    continue;
                };
                if !a.groups.interacts_with(&b.groups) {
                    continue;
                }

                let offset = b.position - a.position;
                let dist = offset.length();
                let min_dist = a.radius + b.radius;
                if dist >= min_dist || dist < 1e-6 {
                    continue;
                }

                let normal = offset / dist;
                let total_inv = a.inv_mass() + b.inv_mass();
                let depth = min_dist - dist;
                a.position -= normal * depth * (a.inv_mass() / total_inv);
                b.position += normal * depth * (b.inv_mass() / total_inv);

                let closing = (b.velocity - a.velocity).dot(normal);
                if closing < 0.0 {
                    let impulse = -closing / total_inv;
                    a.velocity -= normal * impulse * a.inv_mass();
                    b.velocity += normal * impulse * b.inv_mass();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::collider::StaticShape;
    use crate::physics::groups::CollisionGroups;

    fn flat_world() -> PhysicsWorld {
        let mut world = PhysicsWorld::default();
        world.add_static(StaticCollider::terrain(StaticShape::Floor { height: 0.0 }));
        world
    }

    #[test]
    fn test_add_and_remove_body() {
        let mut world = PhysicsWorld::default();
        let handle = world.add_body(RigidBody::sphere(Vec3::ZERO, 1.0, 1.0));
        assert_eq!(world.body_count(), 1);
        assert!(world.body(handle).is_some());

        assert!(world.remove_body(handle).is_some());
        assert!(world.body(handle).is_none());
        assert!(world.remove_body(handle).is_none());
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn test_slots_are_reused() {
        let mut world = PhysicsWorld::default();
        let a = world.add_body(RigidBody::sphere(Vec3::ZERO, 1.0, 1.0));
        world.remove_body(a);
        let b = world.add_body(RigidBody::sphere(Vec3::ONE, 1.0, 1.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_fixed_substeps_from_accumulator() {
        let mut world = PhysicsWorld::default();
        assert_eq!(world.step(0.01), 0);
        // 0.01 + 0.01 = 0.02 >= 1/60
        assert_eq!(world.step(0.01), 1);
        assert!(world.accumulator() < FIXED_TIME_STEP);
    }

    #[test]
    fn test_substeps_are_capped() {
        let mut world = PhysicsWorld::default();
        let steps = world.step(5.0);
        assert_eq!(steps, MAX_SUBSTEPS);
        assert!(world.accumulator() <= FIXED_TIME_STEP);
    }

    #[test]
    fn test_body_falls_under_gravity() {
        let mut world = PhysicsWorld::default();
        let handle = world.add_body(RigidBody::sphere(Vec3::new(0.0, 100.0, 0.0), 1.0, 1.0).with_damping(0.0));
        for _ in 0..60 {
            world.step(FIXED_TIME_STEP);
        }
        let body = world.body(handle).unwrap();
        // v = g*t after one second
        assert!((body.velocity.y - DEFAULT_GRAVITY.y).abs() < 0.05, "vy = {}", body.velocity.y);
        assert!(body.position.y < 100.0);
    }

    #[test]
    fn test_body_rests_on_floor() {
        let mut world = flat_world();
        let handle = world.add_body(RigidBody::sphere(Vec3::new(0.0, 3.0, 0.0), 1.0, 1.0));
        for _ in 0..240 {
            world.step(FIXED_TIME_STEP);
        }
        let body = world.body(handle).unwrap();
        assert!((body.position.y - 1.0).abs() < 0.05, "y = {}", body.position.y);
        assert!(body.velocity.y.abs() < 0.2);
    }

    #[test]
    fn test_forces_cleared_after_step() {
        let mut world = PhysicsWorld::default();
        let handle = world.add_body(RigidBody::sphere(Vec3::ZERO, 1.0, 1.0));
        world.body_mut(handle).unwrap().apply_force(Vec3::X * 10.0);
        world.step(FIXED_TIME_STEP);
        assert_eq!(world.body(handle).unwrap().force(), Vec3::ZERO);
        assert!(world.body(handle).unwrap().velocity.x > 0.0);
    }

    #[test]
    fn test_filtered_static_is_ignored() {
        let mut world = PhysicsWorld::default();
        world.add_static(StaticCollider::new(
            StaticShape::Floor { height: 0.0 },
            CollisionGroups::pickup(),
        ));
        let handle = world.add_body(
            RigidBody::sphere(Vec3::new(0.0, 0.5, 0.0), 1.0, 1.0).with_groups(CollisionGroups::prey()),
        );
        world.step(FIXED_TIME_STEP);
        // Prey does not touch pickup-layer geometry, so it sinks through.
        assert!(world.body(handle).unwrap().position.y < 0.5);
    }

    #[test]
    fn test_overlapping_bodies_are_separated() {
        let mut world = PhysicsWorld::new(PhysicsConfig {
            gravity: Vec3::ZERO,
            ..PhysicsConfig::default()
        });
        let a = world.add_body(RigidBody::sphere(Vec3::ZERO, 1.0, 1.0).with_groups(CollisionGroups::character()));
        let b = world.add_body(
            RigidBody::sphere(Vec3::new(1.0, 0.0, 0.0), 1.0, 1.0).with_groups(CollisionGroups::prey()),
        );
        world.step(FIXED_TIME_STEP);
        let dist = world.body(a).unwrap().position.distance(world.body(b).unwrap().position);
        assert!(dist >= 1.99, "dist = {dist}");
    }
}
