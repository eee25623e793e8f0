//! External control signals.
//!
//! The surrounding application feeds the core two loosely-typed inputs:
//! a venue selection and a named bundle of quality levels produced by an
//! external training loop. Both are plain data, injected as parameters
//! each tick rather than subscribed to through any global event
//! registry. Degenerate numeric input is clamped, never rejected — a
//! bad signal must not be able to crash the render loop.

use serde::{Deserialize, Serialize};

use crate::constants::crowd;

/// Venue selection. Drives crowd base count, fixture layout and
/// whether laser fixtures are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VenueType {
    Arena,
    Festival,
}

impl VenueType {
    /// Base crowd count before quality scaling.
    pub fn base_crowd_count(&self) -> usize {
        match self {
            VenueType::Arena => crowd::BASE_COUNT_ARENA,
            VenueType::Festival => crowd::BASE_COUNT_FESTIVAL,
        }
    }

    /// Radial spread of the audience annulus.
    pub fn crowd_spread(&self) -> f32 {
        match self {
            VenueType::Arena => crowd::SPREAD_ARENA,
            VenueType::Festival => crowd::SPREAD_FESTIVAL,
        }
    }

    /// Laser fixtures only exist in the festival rig.
    pub fn has_lasers(&self) -> bool {
        matches!(self, VenueType::Festival)
    }
}

/// Quality levels supplied by the external training loop.
///
/// `accuracy` is in [0, 1] and drives the avatar material tier and
/// tessellation. `animation_quality` and `scene_optimization` are in
/// [0, 100] and drive animation fluidity and crowd-size scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualitySignal {
    pub accuracy: f32,
    pub animation_quality: f32,
    pub scene_optimization: f32,
}

impl QualitySignal {
    pub fn new(accuracy: f32, animation_quality: f32, scene_optimization: f32) -> Self {
        Self {
            accuracy,
            animation_quality,
            scene_optimization,
        }
        .clamped()
    }

    /// Clamp every level to its valid range. Applied on construction
    /// and again wherever a signal enters from outside, since callers
    /// can build the struct directly.
    pub fn clamped(self) -> Self {
        Self {
            accuracy: self.accuracy.clamp(0.0, 1.0),
            animation_quality: self.animation_quality.clamp(0.0, 100.0),
            scene_optimization: self.scene_optimization.clamp(0.0, 100.0),
        }
    }

    /// Animation fluidity in [0, 1].
    pub fn fluidity(&self) -> f32 {
        self.clamped().animation_quality / 100.0
    }

    /// Crowd-size multiplier in [0.5, 1.5].
    ///
    /// Higher quality produces a larger crowd: the signal assumes the
    /// per-instance cost shrank. This coupling is a deliberate policy
    /// carried over from the original director layer.
    pub fn crowd_scale(&self) -> f32 {
        0.5 + self.clamped().scene_optimization / 100.0
    }
}

impl Default for QualitySignal {
    fn default() -> Self {
        Self {
            accuracy: 0.5,
            animation_quality: 30.0,
            scene_optimization: 50.0,
        }
    }
}
