//! Physics module for Dolphin Dash
//!
//! A small rigid-body world built in-crate, without an external physics
//! library. It covers what the simulation needs: gravity, fixed-timestep
//! integration, linear damping, layer-filtered contacts against static
//! terrain and between dynamic spheres.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Forces in newtons
//! - Mass in kg
//!
//! # Submodules
//!
//! - [`types`] - Core mathematical types (Vec3, Quat) re-exported from glam
//! - [`groups`] - Collision layer bit flags
//! - [`body`] - Dynamic sphere bodies
//! - [`collider`] - Static terrain shapes and sphere contact queries
//! - [`world`] - The world: storage, accumulator, sub-stepping

pub mod body;
pub mod collider;
pub mod groups;
pub mod types;
pub mod world;

pub use body::{BodyHandle, RigidBody};
pub use collider::{Contact, StaticCollider, StaticShape};
pub use groups::{
    CollisionGroups, GROUP_ALL, GROUP_CHARACTER, GROUP_PICKUP, GROUP_PREY, GROUP_TERRAIN,
};
pub use types::{Quat, Vec3};
pub use world::{DEFAULT_GRAVITY, FIXED_TIME_STEP, MAX_SUBSTEPS, PhysicsConfig, PhysicsWorld};
