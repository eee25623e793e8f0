//! GPU-side layout of one instance.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::instance::pool::InstancePool;

/// Per-instance vertex buffer entry: a model matrix and a tint color.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct InstanceRawGpu {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 3],
    _padding: f32,
}

impl InstanceRawGpu {
    pub fn new(model: Mat4, color: [f32; 3]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
            _padding: 0.0,
        }
    }

    /// Snapshot a whole pool into upload-ready form.
    pub fn from_pool(pool: &InstancePool) -> Vec<Self> {
        pool.transforms()
            .iter()
            .zip(pool.colors())
            .map(|(&model, &color)| Self::new(model, color))
            .collect()
    }

    /// Instance-rate vertex layout: four vec4 matrix columns plus the
    /// color, at shader locations 5..=9.
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        const VEC4: u64 = std::mem::size_of::<[f32; 4]>() as u64;
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRawGpu>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: VEC4,
                    shader_location: 6,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: VEC4 * 2,
                    shader_location: 7,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: VEC4 * 3,
                    shader_location: 8,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: VEC4 * 4,
                    shader_location: 9,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_snapshot_preserves_order() {
        let mut pool = InstancePool::allocate(3);
        pool.set_color(1, [0.25, 0.5, 0.75]);
        let raw = InstanceRawGpu::from_pool(&pool);
        assert_eq!(raw.len(), 3);
        assert_eq!(raw[1].color, [0.25, 0.5, 0.75]);
        assert_eq!(raw[0].model, Mat4::IDENTITY.to_cols_array_2d());
    }

    #[test]
    fn raw_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<InstanceRawGpu>(), (16 + 4) * 4);
    }
}
