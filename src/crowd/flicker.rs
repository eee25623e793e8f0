//! Seeded per-frame randomness for visual flourishes.
//!
//! Camera flashes and drop-state hue scatter must look random but stay
//! reproducible under test, so instead of a shared RNG they hash
//! `(seed, instance id, frame index)` through a splitmix64-style mixer.
//! No state, no ordering sensitivity — the same triple always yields
//! the same value.

/// Stream selector so independent effects sharing one seed decorrelate.
pub const STREAM_FLASH: u64 = 0x9e37_79b9_7f4a_7c15;
pub const STREAM_HUE: u64 = 0xbf58_476d_1ce4_e5b9;

/// Mix a `(seed, id, frame)` triple into 64 well-scrambled bits.
pub fn hash(seed: u64, id: u64, frame: u64) -> u64 {
    let mut x = seed
        .wrapping_add(id.wrapping_mul(0x9e37_79b9_7f4a_7c15))
        .wrapping_add(frame.wrapping_mul(0xbf58_476d_1ce4_e5b9));
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^= x >> 31;
    x
}

/// Uniform value in [0, 1) from a `(seed, id, frame)` triple.
pub fn unit(seed: u64, id: u64, frame: u64) -> f32 {
    // Top 24 bits give an exactly representable f32 in [0, 1).
    (hash(seed, id, frame) >> 40) as f32 / (1u64 << 24) as f32
}
