//! Crowd placement and per-frame animation.

use std::f32::consts::{PI, TAU};

use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::color::rgb_from_hsl;
use crate::constants::crowd;
use crate::crowd::flicker;
use crate::crowd::palette;
use crate::crowd::record::InstanceRecord;
use crate::instance::InstancePool;
use crate::lighting::EnergyState;
use crate::signal::{QualitySignal, VenueType};

/// Procedurally places crowd members and recomputes their instance
/// transforms every frame.
///
/// Population is seeded, so two simulators built from the same
/// `(venue, signal, seed)` triple are indistinguishable. The update is
/// a pure function of elapsed time and the frame index; it carries no
/// state between frames beyond the fixed records.
pub struct CrowdSimulator {
    venue: VenueType,
    seed: u64,
    records: Vec<InstanceRecord>,
}

impl CrowdSimulator {
    /// Instance count for a venue under a quality signal:
    /// `floor(base × (0.5 + scene_optimization / 100))`.
    pub fn target_count(venue: VenueType, signal: &QualitySignal) -> usize {
        (venue.base_crowd_count() as f32 * signal.crowd_scale()).floor() as usize
    }

    /// Sample the whole audience once for this venue/quality pair.
    pub fn populate(venue: VenueType, signal: &QualitySignal, seed: u64) -> Self {
        let count = Self::target_count(venue, signal);
        let spread = venue.crowd_spread();
        let focus = Vec3::from(crowd::FOCUS_POINT);
        let mut rng = StdRng::seed_from_u64(seed);

        log::info!(
            "[crowd::populate] venue {:?}, {} instances (scale {:.2})",
            venue,
            count,
            signal.crowd_scale()
        );

        let mut records = Vec::with_capacity(count);
        for id in 0..count {
            // Annulus in front of the stage, mirrored across x, with
            // independent jitter on both planar axes.
            let angle = rng.gen::<f32>() * PI;
            let radius = crowd::INNER_RADIUS + rng.gen::<f32>() * spread;
            let mirror = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            let x = angle.cos() * radius * mirror
                + (rng.gen::<f32>() - 0.5) * crowd::POSITION_JITTER;
            let z = crowd::RING_OFFSET_Z
                + angle.sin() * radius
                + (rng.gen::<f32>() - 0.5) * crowd::POSITION_JITTER;

            let yaw = (focus.x - x).atan2(focus.z - z);

            let scale_w = 0.9 + rng.gen::<f32>() * 0.25;
            let scale_h = 0.9 + rng.gen::<f32>() * 0.2;

            records.push(InstanceRecord {
                id: id as u32,
                x,
                z,
                yaw,
                scale: Vec3::new(scale_w, scale_h, scale_w),
                phase: rng.gen::<f32>() * TAU,
                speed: 0.8 + rng.gen::<f32>() * 0.4,
                has_accessory_light: rng.gen_bool(crowd::ACCESSORY_LIGHT_PROBABILITY),
                accessory_color: rgb_from_hsl(rng.gen::<f32>(), 0.9, 0.6),
                skin_tone: palette::skin_tone(rng.gen_range(0..palette::SKIN_TONES.len())),
                clothing_tone: palette::clothes_tone(
                    rng.gen_range(0..palette::CLOTHES_TONES.len()),
                ),
            });
        }

        Self {
            venue,
            seed,
            records,
        }
    }

    pub fn venue(&self) -> VenueType {
        self.venue
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[InstanceRecord] {
        &self.records
    }

    /// Drop the population. Used by engine teardown; the simulator is
    /// not usable afterward except through a fresh `populate`.
    pub fn clear(&mut self) {
        self.records = Vec::new();
    }

    /// Write the fixed per-instance colors into freshly allocated
    /// pools. Called once right after population.
    pub fn write_base_colors(
        &self,
        body: &mut InstancePool,
        skin: &mut InstancePool,
        lights: &mut InstancePool,
    ) {
        for record in &self.records {
            let i = record.id as usize;
            body.set_color(i, record.clothing_tone);
            skin.set_color(i, record.skin_tone);
            lights.set_color(i, record.accessory_color);
        }
    }

    /// Per-frame transform pass over every instance.
    ///
    /// Writes body, skin and light transforms (and light colors) into
    /// the pools; the caller commits each pool exactly once afterward.
    /// Pool capacities must match the population — that mismatch is a
    /// programming error, not a runtime condition.
    pub fn update(
        &self,
        t: f32,
        frame: u64,
        energy: EnergyState,
        body: &mut InstancePool,
        skin: &mut InstancePool,
        lights: &mut InstancePool,
    ) {
        assert_eq!(body.capacity(), self.records.len(), "body pool capacity");
        assert_eq!(skin.capacity(), self.records.len(), "skin pool capacity");
        assert_eq!(lights.capacity(), self.records.len(), "light pool capacity");

        let energy_mul = if energy.is_drop() {
            crowd::DROP_ENERGY_MULTIPLIER
        } else {
            1.0
        };
        let is_drop = energy.is_drop();
        let seed = self.seed;

        let body_t = body.transforms_mut();
        let skin_t = skin.transforms_mut();
        let (light_t, light_c) = lights.slices_mut();

        self.records
            .par_iter()
            .zip(body_t.par_iter_mut())
            .zip(skin_t.par_iter_mut())
            .zip(light_t.par_iter_mut().zip(light_c.par_iter_mut()))
            .for_each(|(((record, body_tf), skin_tf), (light_tf, light_color))| {
                let bob = ((t * crowd::BOB_RATE + record.phase).sin()
                    * crowd::BOB_AMPLITUDE
                    * record.speed
                    * energy_mul)
                    .max(0.0);
                let roll = (t * crowd::ROLL_RATE + record.phase).sin() * crowd::ROLL_AMPLITUDE;
                let rotation = Quat::from_euler(EulerRot::XYZ, 0.0, record.yaw, roll);

                let transform = Mat4::from_scale_rotation_translation(
                    record.scale,
                    rotation,
                    Vec3::new(record.x, bob, record.z),
                );
                *body_tf = transform;
                *skin_tf = transform;

                let id = record.id as u64;
                if record.has_accessory_light {
                    // Phone light waved above the head, drifting with
                    // its own small sway.
                    let y = bob + record.scale.y * 1.5 + bob * 0.8;
                    let x = record.x + 0.3 + (t * 4.0 + record.phase).sin() * 0.1;
                    *light_tf = Mat4::from_rotation_translation(
                        rotation,
                        Vec3::new(x, y, record.z),
                    );
                    *light_color = if is_drop {
                        let hue = flicker::unit(seed ^ flicker::STREAM_HUE, id, frame);
                        rgb_from_hsl(hue, 1.0, 0.6)
                    } else {
                        record.accessory_color
                    };
                } else if flicker::unit(seed ^ flicker::STREAM_FLASH, id, frame)
                    < crowd::CAMERA_FLASH_PROBABILITY
                {
                    // Rare camera flash: a doubled white quad.
                    *light_tf = Mat4::from_scale_rotation_translation(
                        Vec3::new(2.0, 2.0, 1.0),
                        rotation,
                        Vec3::new(record.x, bob + record.scale.y * 1.5, record.z),
                    );
                    *light_color = [1.0, 1.0, 1.0];
                } else {
                    // Invisible this frame.
                    *light_tf = Mat4::from_scale(Vec3::ZERO);
                }
            });
    }
}
