//! Canonical crowd-member batch geometry.
//!
//! A crowd member renders as two merged batches plus one accessory
//! quad: the "body" batch (torso and four limbs, clothing-colored), the
//! "skin" batch (head and hands) and a small light-quad for the
//! handheld phone light. Merging them once here lets the whole crowd
//! draw as three instanced calls regardless of its size.

use glam::Vec3;

use crate::error::EngineResult;
use crate::geometry::mesh::{merge, Mesh};
use crate::geometry::primitives::{build_box, build_cylinder, build_plane, build_sphere};

const LIMB_SEGMENTS: u32 = 8;

/// Torso box plus four limb cylinders in a canonical standing pose.
pub fn crowd_body_mesh() -> EngineResult<Mesh> {
    let torso = build_box(0.35, 0.55, 0.22).translated(Vec3::new(0.0, 1.15, 0.0));

    let left_leg =
        build_cylinder(0.07, 0.06, 0.85, LIMB_SEGMENTS).translated(Vec3::new(-0.1, 0.425, 0.0));
    let right_leg =
        build_cylinder(0.07, 0.06, 0.85, LIMB_SEGMENTS).translated(Vec3::new(0.1, 0.425, 0.0));

    let left_arm = build_cylinder(0.05, 0.04, 0.7, LIMB_SEGMENTS)
        .rotated_z(0.15)
        .translated(Vec3::new(-0.28, 1.1, 0.0));
    let right_arm = build_cylinder(0.05, 0.04, 0.7, LIMB_SEGMENTS)
        .rotated_z(-0.15)
        .translated(Vec3::new(0.28, 1.1, 0.0));

    merge(&[torso, left_leg, right_leg, left_arm, right_arm])
}

/// Head sphere and two hand spheres, positioned to match the body.
pub fn crowd_skin_mesh() -> EngineResult<Mesh> {
    let head = build_sphere(0.14, 12, 12).translated(Vec3::new(0.0, 1.55, 0.0));
    let left_hand = build_sphere(0.05, 6, 6).translated(Vec3::new(-0.33, 0.75, 0.0));
    let right_hand = build_sphere(0.05, 6, 6).translated(Vec3::new(0.33, 0.75, 0.0));

    merge(&[head, left_hand, right_hand])
}

/// Phone-light quad held above the crowd member's head.
pub fn accessory_light_mesh() -> Mesh {
    build_plane(0.12, 0.18)
}
