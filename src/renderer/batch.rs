//! Instanced batch upload and drawing.

use bytemuck::Zeroable;
use wgpu::util::DeviceExt;

use crate::instance::{InstancePool, InstanceRawGpu};
use crate::renderer::gpu_context::{GpuContext, COLOR_FORMAT, DEPTH_FORMAT};
use crate::renderer::vertex::Vertex;
use crate::scene::camera::CameraUniform;
use crate::scene::composer::SceneComposer;

/// GPU mirror of one draw batch: static mesh buffers plus an instance
/// buffer re-uploaded whenever the pool's committed generation moves
/// past the uploaded one.
struct GpuBatch {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    uploaded_generation: u64,
}

impl GpuBatch {
    fn new(device: &wgpu::Device, mesh: &crate::geometry::mesh::Mesh, pool: &InstancePool) -> Self {
        let vertices = Vertex::from_mesh(mesh);
        let indices = mesh
            .indices()
            .map(|i| i.to_vec())
            .unwrap_or_else(|| (0..mesh.vertex_count() as u32).collect());

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Batch Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Batch Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Batch Instance Buffer"),
            contents: bytemuck::cast_slice(&InstanceRawGpu::from_pool(pool)),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            instance_buffer,
            instance_count: pool.capacity() as u32,
            uploaded_generation: pool.generation(),
        }
    }

    /// Re-upload instance data only when the pool committed since the
    /// last upload.
    fn sync(&mut self, queue: &wgpu::Queue, pool: &InstancePool) {
        if pool.generation() <= self.uploaded_generation {
            return;
        }
        queue.write_buffer(
            &self.instance_buffer,
            0,
            bytemuck::cast_slice(&InstanceRawGpu::from_pool(pool)),
        );
        self.uploaded_generation = pool.generation();
    }
}

/// The one render pipeline plus a GPU batch per composer draw entry.
pub struct StageRenderer {
    pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    batches: Vec<GpuBatch>,
    /// Composer epoch the batches were built against.
    scene_epoch: u64,
}

impl StageRenderer {
    pub fn new(gpu: &GpuContext) -> Self {
        let shader = gpu
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Stage Shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shaders/stage.wgsl").into()),
            });

        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[CameraUniform::zeroed()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let camera_bind_group_layout =
            gpu.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("camera_bind_group_layout"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                });

        let camera_bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bind_group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = gpu
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Stage Pipeline Layout"),
                bind_group_layouts: &[&camera_bind_group_layout],
                push_constant_ranges: &[],
            });

        let pipeline = gpu
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Stage Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: "vs_main",
                    buffers: &[Vertex::desc(), InstanceRawGpu::desc()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: "fs_main",
                    targets: &[Some(wgpu::ColorTargetState {
                        format: COLOR_FORMAT,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: Some(wgpu::Face::Back),
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
            });

        Self {
            pipeline,
            camera_buffer,
            camera_bind_group,
            batches: Vec::new(),
            scene_epoch: u64::MAX,
        }
    }

    /// Draw one frame of the composed scene.
    ///
    /// Structural changes (new composer epoch) rebuild every batch;
    /// per-frame changes only re-upload instance buffers whose pools
    /// committed since the last upload. New batches are fully built
    /// before the old set is dropped.
    pub fn render(&mut self, gpu: &GpuContext, composer: &SceneComposer, t: f32) {
        let draw_list = composer.draw_list();

        if composer.epoch() != self.scene_epoch || self.batches.len() != draw_list.len() {
            log::debug!(
                "[renderer::batch] rebuilding {} GPU batches (epoch {})",
                draw_list.len(),
                composer.epoch()
            );
            let rebuilt = draw_list
                .iter()
                .map(|batch| GpuBatch::new(&gpu.device, batch.mesh, batch.pool))
                .collect();
            self.batches = rebuilt;
            self.scene_epoch = composer.epoch();
        } else {
            for (gpu_batch, batch) in self.batches.iter_mut().zip(&draw_list) {
                gpu_batch.sync(&gpu.queue, batch.pool);
            }
        }

        let mut camera = *composer.camera();
        camera.aspect_ratio = gpu.aspect_ratio();
        gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[camera.uniform(t)]),
        );

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Stage Encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Stage Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &gpu.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.02,
                            g: 0.02,
                            b: 0.05,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &gpu.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.camera_bind_group, &[]);
            // One instanced draw per batch.
            for batch in &self.batches {
                if batch.instance_count == 0 {
                    continue;
                }
                pass.set_vertex_buffer(0, batch.vertex_buffer.slice(..));
                pass.set_vertex_buffer(1, batch.instance_buffer.slice(..));
                pass.set_index_buffer(batch.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..batch.index_count, 0, 0..batch.instance_count);
            }
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
    }
}
