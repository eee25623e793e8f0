//! Encore Engine
//!
//! Procedural concert-stage engine: a seeded crowd of thousands of
//! instanced audience members, an animated lighting rig, a jointed
//! performer avatar and an orbiting camera, composed on the CPU and
//! drawn headlessly through wgpu with one instanced call per batch.
//!
//! The split is strict: everything under [`scene`], [`crowd`],
//! [`lighting`] and [`avatar`] is plain data and pure math, testable
//! without a GPU; [`renderer`] owns every GPU resource and only ever
//! reads the scene.

pub mod avatar;
pub mod color;
pub mod constants;
pub mod crowd;
pub mod error;
pub mod geometry;
pub mod instance;
pub mod lighting;
pub mod renderer;
pub mod scene;
pub mod signal;

pub use error::{EngineError, EngineResult};
pub use scene::{CoreConfig, FrameStats, SceneComposer};
pub use signal::{QualitySignal, VenueType};
