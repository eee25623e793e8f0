//! Engine-wide error handling
//!
//! Single error enum shared by every subsystem, with an `EngineResult`
//! alias.

use thiserror::Error;

/// Errors produced by the engine core.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Geometry merge precondition violated (e.g. mixing indexed and
    /// non-indexed meshes in one batch).
    #[error("geometry merge failed: {reason}")]
    GeometryMerge { reason: String },

    /// No adapter or device could be acquired. Reported once at
    /// initialization; the core runs CPU-only until a context exists.
    #[error("GPU unavailable: {reason}")]
    GpuUnavailable { reason: String },

    /// The composer was used after `teardown()`.
    #[error("scene core already torn down")]
    TornDown,

    /// Catch-all for internal invariant breakage.
    #[error("internal error: {message}")]
    Internal { message: String },
}

/// Type alias for engine operation results.
pub type EngineResult<T> = Result<T, EngineError>;
