//! Parametric primitive construction.
//!
//! Every builder returns an indexed triangle mesh with per-vertex
//! normals. Dimensions are assumed positive — callers validate
//! upstream — and segment counts are clamped to a sane floor so a
//! degenerate quality signal can only coarsen, never break, a shape.

use std::f32::consts::{PI, TAU};

use crate::geometry::mesh::Mesh;

/// Axis-aligned box centered on the origin. 24 vertices (4 per face)
/// so each face gets a flat normal.
pub fn build_box(width: f32, height: f32, depth: f32) -> Mesh {
    let (hw, hh, hd) = (width * 0.5, height * 0.5, depth * 0.5);

    // (normal, four corners counter-clockwise seen from outside)
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        (
            [0.0, 0.0, 1.0],
            [
                [-hw, -hh, hd],
                [hw, -hh, hd],
                [hw, hh, hd],
                [-hw, hh, hd],
            ],
        ),
        (
            [0.0, 0.0, -1.0],
            [
                [hw, -hh, -hd],
                [-hw, -hh, -hd],
                [-hw, hh, -hd],
                [hw, hh, -hd],
            ],
        ),
        (
            [1.0, 0.0, 0.0],
            [
                [hw, -hh, hd],
                [hw, -hh, -hd],
                [hw, hh, -hd],
                [hw, hh, hd],
            ],
        ),
        (
            [-1.0, 0.0, 0.0],
            [
                [-hw, -hh, -hd],
                [-hw, -hh, hd],
                [-hw, hh, hd],
                [-hw, hh, -hd],
            ],
        ),
        (
            [0.0, 1.0, 0.0],
            [
                [-hw, hh, hd],
                [hw, hh, hd],
                [hw, hh, -hd],
                [-hw, hh, -hd],
            ],
        ),
        (
            [0.0, -1.0, 0.0],
            [
                [-hw, -hh, -hd],
                [hw, -hh, -hd],
                [hw, -hh, hd],
                [-hw, -hh, hd],
            ],
        ),
    ];

    let mut positions = Vec::with_capacity(24);
    let mut normals = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, corners) in faces {
        let base = positions.len() as u32;
        positions.extend_from_slice(&corners);
        normals.extend(std::iter::repeat(normal).take(4));
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Mesh::new(positions, normals, Some(indices)).expect("box construction is infallible")
}

/// Capped cylinder along the y axis, centered on the origin. Distinct
/// top and bottom radii; a zero radius collapses that cap (cone).
pub fn build_cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
) -> Mesh {
    let segments = radial_segments.max(3);
    let half = height * 0.5;
    let slope = (radius_bottom - radius_top) / height;

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    // Side: two rings of segments+1 vertices (duplicated seam).
    for (y, radius) in [(half, radius_top), (-half, radius_bottom)] {
        for i in 0..=segments {
            let theta = i as f32 / segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            positions.push([radius * cos, y, radius * sin]);
            let n = glam::Vec3::new(cos, slope, sin).normalize();
            normals.push(n.to_array());
        }
    }
    let ring = segments + 1;
    for i in 0..segments {
        let top = i;
        let bottom = i + ring;
        indices.extend_from_slice(&[top, bottom, bottom + 1, top, bottom + 1, top + 1]);
    }

    // Caps: center vertex plus a flat-normal ring.
    for (y, radius, up) in [(half, radius_top, 1.0f32), (-half, radius_bottom, -1.0)] {
        if radius <= 0.0 {
            continue;
        }
        let center = positions.len() as u32;
        positions.push([0.0, y, 0.0]);
        normals.push([0.0, up, 0.0]);
        for i in 0..=segments {
            let theta = i as f32 / segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            positions.push([radius * cos, y, radius * sin]);
            normals.push([0.0, up, 0.0]);
        }
        for i in 0..segments {
            let a = center + 1 + i;
            let b = center + 1 + i + 1;
            if up > 0.0 {
                indices.extend_from_slice(&[center, b, a]);
            } else {
                indices.extend_from_slice(&[center, a, b]);
            }
        }
    }

    Mesh::new(positions, normals, Some(indices)).expect("cylinder construction is infallible")
}

/// Cone along the y axis: a cylinder whose top ring has zero radius.
pub fn build_cone(radius: f32, height: f32, radial_segments: u32) -> Mesh {
    build_cylinder(0.0, radius, height, radial_segments)
}

/// UV sphere centered on the origin.
pub fn build_sphere(radius: f32, width_segments: u32, height_segments: u32) -> Mesh {
    let w = width_segments.max(3);
    let h = height_segments.max(2);

    let mut positions = Vec::with_capacity(((w + 1) * (h + 1)) as usize);
    let mut normals = Vec::with_capacity(positions.capacity());
    let mut indices = Vec::new();

    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        let theta = v * PI;
        let (sin_t, cos_t) = theta.sin_cos();
        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let phi = u * TAU;
            let (sin_p, cos_p) = phi.sin_cos();
            let n = glam::Vec3::new(sin_t * cos_p, cos_t, sin_t * sin_p);
            positions.push((n * radius).to_array());
            normals.push(n.to_array());
        }
    }

    let stride = w + 1;
    for iy in 0..h {
        for ix in 0..w {
            let a = iy * stride + ix;
            let b = a + stride;
            // Skip the degenerate triangle at each pole.
            if iy != 0 {
                indices.extend_from_slice(&[a, b, a + 1]);
            }
            if iy != h - 1 {
                indices.extend_from_slice(&[a + 1, b, b + 1]);
            }
        }
    }

    Mesh::new(positions, normals, Some(indices)).expect("sphere construction is infallible")
}

/// Flat rectangle in the xy plane facing +z, centered on the origin.
pub fn build_plane(width: f32, height: f32) -> Mesh {
    let (hw, hh) = (width * 0.5, height * 0.5);
    let positions = vec![
        [-hw, -hh, 0.0],
        [hw, -hh, 0.0],
        [hw, hh, 0.0],
        [-hw, hh, 0.0],
    ];
    let normals = vec![[0.0, 0.0, 1.0]; 4];
    let indices = vec![0, 1, 2, 0, 2, 3];
    Mesh::new(positions, normals, Some(indices)).expect("plane construction is infallible")
}
