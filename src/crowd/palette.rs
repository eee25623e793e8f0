//! Fixed discrete color palettes for crowd members.

use crate::color::rgb_from_hex;

/// Fitzpatrick-scale skin tones, types I through VI.
pub const SKIN_TONES: [u32; 6] = [
    0xf5c3a6, 0xffdbac, 0xe0ac69, 0xc68642, 0x8d5524, 0x3c2103,
];

/// Concert-wear clothing tones: deep darks, electric blues, stage
/// reds, crisp whites, vivid purples, cyber yellow.
pub const CLOTHES_TONES: [u32; 12] = [
    0x0a0a0a, 0x1a1a1a, 0x2a2a2a, 0x1e3a8a, 0x2563eb, 0xb91c1c, 0xdc2626, 0xffffff, 0xf3f4f6,
    0x7c3aed, 0xa855f7, 0xfacc15,
];

pub fn skin_tone(index: usize) -> [f32; 3] {
    rgb_from_hex(SKIN_TONES[index % SKIN_TONES.len()])
}

pub fn clothes_tone(index: usize) -> [f32; 3] {
    rgb_from_hex(CLOTHES_TONES[index % CLOTHES_TONES.len()])
}
