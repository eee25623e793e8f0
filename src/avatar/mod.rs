//! Avatar Rig & Animation
//!
//! A single jointed humanoid whose geometry density and material model
//! scale with the external accuracy signal, animated by a small
//! closed-form state machine. The rig is a rebuildable arena of joints
//! addressed by stable indices; animation writes local transforms into
//! a flat pose, never into the tree itself.

pub mod animator;
pub mod description;
pub mod rig;

pub use animator::{AnimationState, AvatarAnimator};
pub use description::AvatarDescription;
pub use rig::{joint, AvatarRig, Joint, JointMesh, MaterialDesc, Pose};

use serde::{Deserialize, Serialize};

/// Discrete fidelity level derived from the continuous accuracy
/// signal. Drives both the material model and the tessellation density
/// of generated primitives. Monotonic in accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QualityTier {
    Wireframe,
    Standard,
    Physical,
}

impl QualityTier {
    /// Accuracy is clamped to [0, 1] first; the thresholds are
    /// `≤ 0.4` wireframe, `≤ 0.7` standard, above that physical.
    pub fn from_accuracy(accuracy: f32) -> Self {
        let accuracy = accuracy.clamp(0.0, 1.0);
        if accuracy <= 0.4 {
            QualityTier::Wireframe
        } else if accuracy <= 0.7 {
            QualityTier::Standard
        } else {
            QualityTier::Physical
        }
    }

    /// Radial segments for limb cylinders at this tier.
    pub fn limb_segments(&self) -> u32 {
        match self {
            QualityTier::Wireframe => 6,
            QualityTier::Standard => 12,
            QualityTier::Physical => 32,
        }
    }

    /// Lat/long segments for the head sphere at this tier.
    pub fn head_segments(&self) -> u32 {
        match self {
            QualityTier::Wireframe | QualityTier::Standard => 16,
            QualityTier::Physical => 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_thresholds() {
        assert_eq!(QualityTier::from_accuracy(0.3), QualityTier::Wireframe);
        assert_eq!(QualityTier::from_accuracy(0.4), QualityTier::Wireframe);
        assert_eq!(QualityTier::from_accuracy(0.5), QualityTier::Standard);
        assert_eq!(QualityTier::from_accuracy(0.7), QualityTier::Standard);
        assert_eq!(QualityTier::from_accuracy(0.8), QualityTier::Physical);
    }

    #[test]
    fn tier_is_monotonic_in_accuracy() {
        let mut previous = QualityTier::from_accuracy(0.0);
        for step in 1..=100 {
            let tier = QualityTier::from_accuracy(step as f32 / 100.0);
            assert!(tier >= previous, "tier decreased at {}", step);
            previous = tier;
        }
    }

    #[test]
    fn out_of_range_accuracy_is_clamped() {
        assert_eq!(QualityTier::from_accuracy(-1.0), QualityTier::Wireframe);
        assert_eq!(QualityTier::from_accuracy(7.5), QualityTier::Physical);
    }

    #[test]
    fn tessellation_scales_with_tier() {
        assert!(
            QualityTier::Wireframe.limb_segments() < QualityTier::Standard.limb_segments()
        );
        assert!(
            QualityTier::Standard.limb_segments() < QualityTier::Physical.limb_segments()
        );
    }
}
