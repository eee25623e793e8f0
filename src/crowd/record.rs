//! Per-instance identity record.

use glam::Vec3;

/// Identity of one crowd member, fixed at population time.
///
/// Everything here is immutable after creation; the per-frame update
/// derives transforms from these fields plus elapsed time and never
/// writes back. Records live until the venue is rebuilt.
#[derive(Debug, Clone)]
pub struct InstanceRecord {
    pub id: u32,
    /// Planar position on the venue floor (y is derived per frame).
    pub x: f32,
    pub z: f32,
    /// Planar rotation facing the stage center.
    pub yaw: f32,
    /// Non-uniform body scale (x and z share the width sample).
    pub scale: Vec3,
    /// Animation phase offset in [0, 2π).
    pub phase: f32,
    /// Animation speed multiplier.
    pub speed: f32,
    /// Whether this member waves a handheld light.
    pub has_accessory_light: bool,
    /// Fixed hue of that light outside drop phases.
    pub accessory_color: [f32; 3],
    pub skin_tone: [f32; 3],
    pub clothing_tone: [f32; 3],
}
