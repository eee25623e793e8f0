//! Immutable triangle mesh data and batch merging.

use glam::{Mat3, Vec3};

use crate::error::{EngineError, EngineResult};

/// An immutable triangle mesh: positions, matching normals and an
/// optional index list.
///
/// Invariants, checked at construction:
/// - `normals.len() == positions.len()`
/// - every index, if present, is `< positions.len()`
#[derive(Debug, Clone)]
pub struct Mesh {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    indices: Option<Vec<u32>>,
}

impl Mesh {
    pub fn new(
        positions: Vec<[f32; 3]>,
        normals: Vec<[f32; 3]>,
        indices: Option<Vec<u32>>,
    ) -> EngineResult<Self> {
        if normals.len() != positions.len() {
            return Err(EngineError::Internal {
                message: format!(
                    "mesh normal count {} does not match vertex count {}",
                    normals.len(),
                    positions.len()
                ),
            });
        }
        if let Some(indices) = &indices {
            let count = positions.len() as u32;
            if let Some(bad) = indices.iter().find(|&&i| i >= count) {
                return Err(EngineError::Internal {
                    message: format!("mesh index {} out of range for {} vertices", bad, count),
                });
            }
        }
        Ok(Self {
            positions,
            normals,
            indices,
        })
    }

    /// Zero-vertex mesh, used to release batch geometry at teardown.
    pub fn empty() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            indices: None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.positions.len() / 3,
        }
    }

    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    /// Translate every vertex. Normals are unaffected.
    pub fn translated(mut self, offset: Vec3) -> Self {
        for p in &mut self.positions {
            p[0] += offset.x;
            p[1] += offset.y;
            p[2] += offset.z;
        }
        self
    }

    /// Rotate about the x axis, positions and normals both.
    pub fn rotated_x(self, angle: f32) -> Self {
        self.rotated(Mat3::from_rotation_x(angle))
    }

    /// Rotate about the z axis, positions and normals both.
    pub fn rotated_z(self, angle: f32) -> Self {
        self.rotated(Mat3::from_rotation_z(angle))
    }

    fn rotated(mut self, rotation: Mat3) -> Self {
        for p in &mut self.positions {
            let v = rotation * Vec3::from(*p);
            *p = v.to_array();
        }
        for n in &mut self.normals {
            let v = rotation * Vec3::from(*n);
            *n = v.to_array();
        }
        self
    }
}

/// Merge disjoint meshes into one batch mesh.
///
/// Vertex buffers are concatenated and each source's indices re-based
/// by the running vertex offset. Every input must share the same
/// "indexed" status; mixing indexed and non-indexed sources is a caller
/// error and is reported, not coerced.
pub fn merge(meshes: &[Mesh]) -> EngineResult<Mesh> {
    if meshes.is_empty() {
        return Err(EngineError::GeometryMerge {
            reason: "no input meshes".to_string(),
        });
    }

    let indexed = meshes[0].is_indexed();
    if meshes.iter().any(|m| m.is_indexed() != indexed) {
        return Err(EngineError::GeometryMerge {
            reason: "cannot mix indexed and non-indexed meshes in one batch".to_string(),
        });
    }

    let vertex_total: usize = meshes.iter().map(Mesh::vertex_count).sum();
    let mut positions = Vec::with_capacity(vertex_total);
    let mut normals = Vec::with_capacity(vertex_total);
    let mut indices = indexed.then(Vec::new);

    let mut vertex_offset = 0u32;
    for mesh in meshes {
        positions.extend_from_slice(mesh.positions());
        normals.extend_from_slice(mesh.normals());
        if let (Some(merged), Some(source)) = (indices.as_mut(), mesh.indices()) {
            merged.extend(source.iter().map(|i| i + vertex_offset));
        }
        vertex_offset += mesh.vertex_count() as u32;
    }

    Mesh::new(positions, normals, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitives::{build_box, build_plane};

    #[test]
    fn merge_concatenates_and_rebases() {
        let a = build_box(1.0, 1.0, 1.0);
        let b = build_plane(2.0, 2.0);
        let a_vertices = a.vertex_count();
        let a_indices = a.indices().unwrap().len();

        let merged = merge(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(merged.vertex_count(), a.vertex_count() + b.vertex_count());

        let merged_indices = merged.indices().unwrap();
        assert_eq!(
            merged_indices.len(),
            a_indices + b.indices().unwrap().len()
        );
        // Every index from B equals B's original index plus |A.vertices|
        for (i, &idx) in merged_indices[a_indices..].iter().enumerate() {
            assert_eq!(idx, b.indices().unwrap()[i] + a_vertices as u32);
        }
    }

    #[test]
    fn merge_rejects_mixed_indexing() {
        let indexed = build_plane(1.0, 1.0);
        let raw = Mesh::new(
            vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[0.0, 0.0, 1.0]; 3],
            None,
        )
        .unwrap();
        assert!(merge(&[indexed, raw]).is_err());
    }

    #[test]
    fn merge_rejects_empty_input() {
        assert!(merge(&[]).is_err());
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let bad = Mesh::new(
            vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[0.0, 0.0, 1.0]; 3],
            Some(vec![0, 1, 3]),
        );
        assert!(bad.is_err());
    }

    #[test]
    fn translation_moves_positions_only() {
        let mesh = build_plane(1.0, 1.0);
        let normals_before = mesh.normals().to_vec();
        let moved = mesh.translated(glam::Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(moved.normals(), normals_before.as_slice());
        assert!(moved.positions().iter().all(|p| (p[1] - 5.0).abs() <= 0.5));
    }
}
