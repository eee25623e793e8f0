//! Instance Pool System
//!
//! Per-instance transform and color state for homogeneous crowd
//! batches, stored as contiguous arrays indexed by instance id. Purely
//! data-oriented — no instance "objects", just tables the simulator
//! writes and the renderer uploads.

pub mod gpu;
pub mod pool;

pub use gpu::InstanceRawGpu;
pub use pool::InstancePool;
