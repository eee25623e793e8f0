//! Mesh vertex layout shared by every batch.

use bytemuck::{Pod, Zeroable};

use crate::geometry::mesh::Mesh;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    /// Interleave a mesh's attribute arrays into upload-ready form.
    pub fn from_mesh(mesh: &Mesh) -> Vec<Self> {
        mesh.positions()
            .iter()
            .zip(mesh.normals())
            .map(|(&position, &normal)| Self { position, normal })
            .collect()
    }

    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitives::build_plane;

    #[test]
    fn interleave_matches_vertex_count() {
        let plane = build_plane(1.0, 1.0);
        let vertices = Vertex::from_mesh(&plane);
        assert_eq!(vertices.len(), plane.vertex_count());
        assert_eq!(vertices[0].normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn layout_is_two_packed_vec3() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }
}
