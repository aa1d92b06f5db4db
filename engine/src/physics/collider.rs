//! Static colliders
//!
//! Immovable shapes supplied by the terrain collaborator. Each shape
//! answers a single query: how far, and along which normal, a sphere has
//! penetrated it. The world uses that to push bodies out and cancel the
//! velocity component driving into the surface.

use glam::Vec3;

use super::groups::CollisionGroups;

/// Penetration of a sphere into a static shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Direction to push the sphere out (normalized)
    pub normal: Vec3,
    /// How far the sphere has sunk into the shape (meters, > 0)
    pub depth: f32,
}

/// Shape of a static collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StaticShape {
    /// Infinite horizontal floor; everything below `height` is solid.
    Floor { height: f32 },
    /// Vertical solid cylinder (an island column).
    Cylinder {
        center: Vec3,
        radius: f32,
        top: f32,
        bottom: f32,
    },
    /// Vertical wall ring that keeps bodies inside `radius` of `center` (XZ).
    BoundaryRing { center: Vec3, radius: f32 },
}

/// A static collider: shape plus collision layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticCollider {
    pub shape: StaticShape,
    pub groups: CollisionGroups,
}

impl StaticCollider {
    pub fn new(shape: StaticShape, groups: CollisionGroups) -> Self {
        Self { shape, groups }
    }

    /// Terrain-layer collider.
    pub fn terrain(shape: StaticShape) -> Self {
        Self::new(shape, CollisionGroups::terrain())
    }

    /// Compute the penetration of a sphere, if any.
    pub fn sphere_contact(&self, center: Vec3, radius: f32) -> Option<Contact> {
        match self.shape {
            StaticShape::Floor { height } => {
                let depth = height - (center.y - radius);
                (depth > 0.0).then_some(Contact {
                    normal: Vec3::Y,
                    depth,
                })
            }
            StaticShape::Cylinder {
                center: axis,
                radius: cyl_radius,
                top,
                bottom,
            } => sphere_cylinder(center, radius, axis, cyl_radius, top, bottom),
            StaticShape::BoundaryRing {
                center: ring_center,
                radius: ring_radius,
            } => {
                let offset = Vec3::new(center.x - ring_center.x, 0.0, center.z - ring_center.z);
                let dist = offset.length();
                let depth = dist + radius - ring_radius;
                if depth > 0.0 && dist > 1e-6 {
                    Some(Contact {
                        normal: -offset / dist,
                        depth,
                    })
                } else {
                    None
                }
            }
        }
    }
}

fn sphere_cylinder(
    center: Vec3,
    radius: f32,
    axis: Vec3,
    cyl_radius: f32,
    top: f32,
    bottom: f32,
) -> Option<Contact> {
    if center.y - radius >= top || center.y + radius <= bottom {
        return None;
    }

    let horizontal = Vec3::new(center.x - axis.x, 0.0, center.z - axis.z);
    let h_dist = horizontal.length();
    if h_dist >= cyl_radius + radius {
        return None;
    }

    let side_depth = cyl_radius + radius - h_dist;
    let top_depth = top - (center.y - radius);
    let bottom_depth = (center.y + radius) - bottom;

    if top_depth <= side_depth && top_depth <= bottom_depth {
        Some(Contact {
            normal: Vec3::Y,
            depth: top_depth,
        })
    } else if bottom_depth <= side_depth {
        Some(Contact {
            normal: -Vec3::Y,
            depth: bottom_depth,
        })
    } else {
        let normal = if h_dist > 1e-6 { horizontal / h_dist } else { Vec3::X };
        Some(Contact {
            normal,
            depth: side_depth,
        })
    }
}
