//! Color helpers shared by the crowd and lighting subsystems.
//!
//! Colors flow through the engine as linear `[f32; 3]` RGB triples so
//! they drop straight into instance color buffers and uniform data.

/// Convert a packed `0xRRGGBB` value to an RGB triple.
pub fn rgb_from_hex(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// Convert HSL to RGB. Hue wraps into [0, 1); saturation and lightness
/// are clamped. Matches the usual CSS/graphics HSL definition.
pub fn rgb_from_hsl(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return [l, l, l];
    }

    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_decodes_channels() {
        assert_eq!(rgb_from_hex(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(rgb_from_hex(0x00ff00), [0.0, 1.0, 0.0]);
        let c = rgb_from_hex(0xffdbac);
        assert!((c[0] - 1.0).abs() < 1e-6);
        assert!((c[1] - 219.0 / 255.0).abs() < 1e-6);
        assert!((c[2] - 172.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn hsl_primaries() {
        let r = rgb_from_hsl(0.0, 1.0, 0.5);
        assert!((r[0] - 1.0).abs() < 1e-5 && r[1].abs() < 1e-5 && r[2].abs() < 1e-5);
        let g = rgb_from_hsl(1.0 / 3.0, 1.0, 0.5);
        assert!((g[1] - 1.0).abs() < 1e-5);
        // Hue wraps, so 1.25 is the same as 0.25
        assert_eq!(rgb_from_hsl(1.25, 1.0, 0.5), rgb_from_hsl(0.25, 1.0, 0.5));
    }

    #[test]
    fn hsl_zero_saturation_is_grey() {
        assert_eq!(rgb_from_hsl(0.7, 0.0, 0.4), [0.4, 0.4, 0.4]);
    }
}
