//! Physics type re-exports from glam
//!
//! This module provides the core mathematical types used throughout
//! the physics system, re-exported from the glam library.

pub use glam::{Quat, Vec3};

/// Returns true when every component of the vector is finite.
#[inline]
pub fn vec3_is_finite(v: Vec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

/// Returns true when the quaternion is finite and not degenerate.
#[inline]
pub fn quat_is_valid(q: Quat) -> bool {
    q.is_finite() && q.length_squared() > 1e-6
}
