//! External avatar description.

use serde::{Deserialize, Serialize};

use crate::color::rgb_from_hex;

/// Named appearance and proportion fields supplied by the caller.
///
/// Arrives from a loosely-typed source, so every numeric field is
/// clamped before use and missing fields fall back to fixed defaults
/// (`Default` impl).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarDescription {
    pub skin_tone: [f32; 3],
    pub clothing_primary: [f32; 3],
    /// Normalized height; 1.0 is the reference figure.
    pub height: f32,
    /// Build in [0, 1]; 0.5 is the reference width.
    pub build: f32,
    /// Shoulder width in [0, 1]; 0.5 is the reference span.
    pub shoulder_width: f32,
}

impl Default for AvatarDescription {
    fn default() -> Self {
        Self {
            skin_tone: rgb_from_hex(0xffdbac),
            clothing_primary: rgb_from_hex(0x445588),
            height: 1.0,
            build: 0.5,
            shoulder_width: 0.5,
        }
    }
}

impl AvatarDescription {
    /// Clamp degenerate numeric input to the nearest valid bound.
    /// Non-finite values (the signal source is loosely typed) fall
    /// back to the field default instead of propagating.
    pub fn clamped(self) -> Self {
        let defaults = Self::default();
        Self {
            skin_tone: self.skin_tone.map(|c| clamp_or(c, 0.0, 1.0, 1.0)),
            clothing_primary: self.clothing_primary.map(|c| clamp_or(c, 0.0, 1.0, 1.0)),
            height: clamp_or(self.height, 0.5, 2.0, defaults.height),
            build: clamp_or(self.build, 0.0, 1.0, defaults.build),
            shoulder_width: clamp_or(self.shoulder_width, 0.0, 1.0, defaults.shoulder_width),
        }
    }

    /// Width factor applied to every girth dimension:
    /// `0.8 + build · 0.4`.
    pub fn width_factor(&self) -> f32 {
        0.8 + self.clamped().build * 0.4
    }

    /// Shoulder span factor; 1.0 at the reference width.
    pub fn shoulder_factor(&self) -> f32 {
        0.8 + self.clamped().shoulder_width * 0.4
    }
}

fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_reference_proportions() {
        let d = AvatarDescription::default();
        assert_eq!(d.height, 1.0);
        assert!((d.width_factor() - 1.0).abs() < 1e-6);
        assert!((d.shoulder_factor() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_dimensions_clamp_not_fail() {
        let d = AvatarDescription {
            height: -3.0,
            build: 42.0,
            shoulder_width: f32::NAN,
            ..Default::default()
        }
        .clamped();
        assert_eq!(d.height, 0.5);
        assert_eq!(d.build, 1.0);
        // NaN falls back to the default rather than propagating.
        assert_eq!(d.shoulder_width, 0.5);
    }
}
