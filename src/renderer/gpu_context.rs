//! Headless GPU bring-up.

use crate::error::{EngineError, EngineResult};

pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Device, queue and offscreen render targets.
///
/// No window or surface: the renderer draws into an offscreen color
/// texture, which keeps the whole crate runnable on CI machines and
/// lets the scene core be exercised with no GPU at all.
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub color_view: wgpu::TextureView,
    pub depth_view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl GpuContext {
    /// Acquire an adapter and device and allocate the offscreen
    /// targets. Fails with `GpuUnavailable` when no adapter exists;
    /// callers are expected to keep running CPU-only in that case.
    pub fn new(width: u32, height: u32) -> EngineResult<Self> {
        pollster::block_on(Self::new_async(width, height))
    }

    async fn new_async(width: u32, height: u32) -> EngineResult<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| EngineError::GpuUnavailable {
                reason: "no suitable adapter".to_string(),
            })?;

        log::info!(
            "[renderer::gpu_context] adapter: {}",
            adapter.get_info().name
        );

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Stage Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .map_err(|e| EngineError::GpuUnavailable {
                reason: format!("device request failed: {}", e),
            })?;

        let color_view = Self::make_target(&device, width, height, COLOR_FORMAT, "Stage Color");
        let depth_view = Self::make_target(&device, width, height, DEPTH_FORMAT, "Stage Depth");

        Ok(Self {
            device,
            queue,
            color_view,
            depth_view,
            width,
            height,
        })
    }

    fn make_target(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        label: &str,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}
