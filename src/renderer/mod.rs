//! GPU Renderer
//!
//! Headless wgpu renderer for the composed scene: one pipeline, one
//! instanced draw call per batch in the composer's draw list. All GPU
//! resource ownership lives here; the scene side stays CPU-only and
//! testable without an adapter.

pub mod batch;
pub mod gpu_context;
pub mod vertex;

pub use batch::StageRenderer;
pub use gpu_context::GpuContext;
pub use vertex::Vertex;
