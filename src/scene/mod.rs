//! Scene Composition
//!
//! The composer owns the camera, venue geometry, crowd, lighting rig
//! and avatar, and runs one cooperative tick per frame: crowd update,
//! lighting update, avatar pose, performer, then a single commit per
//! pool and a statistics snapshot. Rendering itself lives in
//! `renderer` and consumes the composer's draw list read-only.

pub mod camera;
pub mod composer;
pub mod performer;
pub mod stats;

pub use camera::{CameraUniform, OrbitCamera};
pub use composer::{CoreConfig, DrawBatch, SceneComposer};
pub use stats::{FpsCounter, FrameStats};
