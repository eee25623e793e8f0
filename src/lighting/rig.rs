//! Moving-head and laser fixture animation.

use glam::Vec3;

use crate::color::rgb_from_hsl;
use crate::constants::lighting;
use crate::lighting::energy::EnergyState;
use crate::signal::VenueType;

/// One moving-head fixture: a yoke that pans and a head that tilts,
/// with a color-cycled, strobe-capable beam.
#[derive(Debug, Clone)]
pub struct MovingHead {
    pub position: Vec3,
    /// Yoke rotation about y.
    pub yaw: f32,
    /// Head rotation about x.
    pub pitch: f32,
    pub color: [f32; 3],
    pub intensity: f32,
    pub beam_opacity: f32,
}

/// One laser fixture (festival rig only).
#[derive(Debug, Clone)]
pub struct Laser {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub color: [f32; 3],
    pub visible: bool,
}

/// The venue's full lighting rig. Layout is fixed at construction;
/// `update` rewrites the animated fields from elapsed time and the
/// shared energy state.
#[derive(Debug)]
pub struct LightingRig {
    heads: Vec<MovingHead>,
    lasers: Vec<Laser>,
    screen_color: [f32; 3],
}

impl LightingRig {
    pub fn new(venue: VenueType) -> Self {
        let head_count = match venue {
            VenueType::Arena => lighting::HEAD_COUNT_ARENA,
            VenueType::Festival => lighting::HEAD_COUNT_FESTIVAL,
        };

        // Horizontal truss line centered on the stage.
        let heads = (0..head_count)
            .map(|i| {
                let x = (i as f32 - (head_count as f32 - 1.0) / 2.0) * lighting::HEAD_SPACING;
                MovingHead {
                    position: Vec3::new(x, lighting::HEAD_HEIGHT, lighting::HEAD_Z),
                    yaw: 0.0,
                    pitch: 0.0,
                    color: [1.0, 1.0, 1.0],
                    intensity: lighting::HEAD_INTENSITY,
                    beam_opacity: lighting::BEAM_OPACITY,
                }
            })
            .collect();

        let lasers = if venue.has_lasers() {
            (0..lighting::LASER_COUNT)
                .map(|i| Laser {
                    position: Vec3::new(
                        (i as f32 - (lighting::LASER_COUNT as f32 - 1.0) / 2.0)
                            * lighting::LASER_SPACING,
                        lighting::LASER_HEIGHT,
                        lighting::LASER_Z,
                    ),
                    yaw: 0.0,
                    pitch: 0.0,
                    color: [0.0, 1.0, 0.0],
                    visible: true,
                })
                .collect()
        } else {
            Vec::new()
        };

        log::info!(
            "[lighting::rig] {:?} rig: {} heads, {} lasers",
            venue,
            head_count,
            if venue.has_lasers() {
                lighting::LASER_COUNT
            } else {
                0
            }
        );

        Self {
            heads,
            lasers,
            screen_color: [0.0, 0.0, 0.0],
        }
    }

    pub fn heads(&self) -> &[MovingHead] {
        &self.heads
    }

    pub fn lasers(&self) -> &[Laser] {
        &self.lasers
    }

    /// Stage back-screen wash color.
    pub fn screen_color(&self) -> [f32; 3] {
        self.screen_color
    }

    /// Drop every fixture. Used by engine teardown; a venue switch
    /// builds a whole new rig instead.
    pub fn clear(&mut self) {
        self.heads = Vec::new();
        self.lasers = Vec::new();
        self.screen_color = [0.0, 0.0, 0.0];
    }

    /// Animate every fixture for elapsed time `t`.
    pub fn update(&mut self, t: f32, energy: EnergyState) {
        let drop = energy.is_drop();

        for (i, head) in self.heads.iter_mut().enumerate() {
            let phase = i as f32;
            if drop {
                // Chaotic fast sweep.
                head.yaw = (t * 2.0 + phase).sin() * 1.5;
                head.pitch = (t * 4.0 + phase).sin() * 0.8 + 0.5;
            } else {
                // Slow synchronized sweep.
                head.yaw = (t * 0.5 + phase * 0.2).sin();
                head.pitch = (t + phase).sin() * 0.4 + 0.6;
            }

            let hue = (t * 0.2 + phase * 0.05).rem_euclid(1.0);
            head.color = rgb_from_hsl(hue, 1.0, 0.5);

            // High-frequency strobe during the drop, steady otherwise.
            let lit = !drop || (t * 20.0).sin() > 0.0;
            head.intensity = if lit { lighting::HEAD_INTENSITY } else { 0.0 };
            head.beam_opacity = if lit { lighting::BEAM_OPACITY } else { 0.0 };
        }

        for (i, laser) in self.lasers.iter_mut().enumerate() {
            let phase = i as f32;
            laser.yaw = (t * 3.0 + phase).sin() * 0.4;
            laser.pitch = (t * 1.5 + phase * 0.2).cos() * 0.15;
            laser.color = rgb_from_hsl((t * 0.5 + phase * 0.1).rem_euclid(1.0), 1.0, 0.5);
            // Continuous during the drop, half-duty gated otherwise.
            laser.visible = drop || (t * 2.0 + phase).sin() > 0.0;
        }

        self.screen_color = rgb_from_hsl((t * 0.1).rem_euclid(1.0), 0.9, 0.6);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_counts_per_venue() {
        let arena = LightingRig::new(VenueType::Arena);
        assert_eq!(arena.heads().len(), 8);
        assert!(arena.lasers().is_empty());

        let festival = LightingRig::new(VenueType::Festival);
        assert_eq!(festival.heads().len(), 14);
        assert_eq!(festival.lasers().len(), 10);
    }

    #[test]
    fn truss_line_is_centered() {
        let rig = LightingRig::new(VenueType::Arena);
        let sum: f32 = rig.heads().iter().map(|h| h.position.x).sum();
        assert!(sum.abs() < 1e-4);
        // Adjacent heads sit one spacing apart.
        let dx = rig.heads()[1].position.x - rig.heads()[0].position.x;
        assert!((dx - lighting::HEAD_SPACING).abs() < 1e-4);
    }

    #[test]
    fn strobe_only_during_drop() {
        let mut rig = LightingRig::new(VenueType::Arena);

        // Steady phase: every head lit regardless of strobe frequency.
        let steady_t = 0.0;
        assert!(!EnergyState::sample(steady_t).is_drop());
        rig.update(steady_t, EnergyState::sample(steady_t));
        assert!(rig.heads().iter().all(|h| h.intensity > 0.0));

        // Drop phase: the energy state is injected, so pick times on
        // opposite halves of the 20 rad/s strobe wave directly.
        let drop_energy = EnergyState::sample(std::f32::consts::FRAC_PI_2 / 0.4);
        assert!(drop_energy.is_drop());

        let crest = std::f32::consts::FRAC_PI_2 / 20.0; // sin(20t) = 1
        rig.update(crest, drop_energy);
        assert!(rig.heads()[0].intensity > 0.0);
        assert!(rig.heads()[0].beam_opacity > 0.0);

        let trough = crest + std::f32::consts::PI / 20.0; // sin(20t) = -1
        rig.update(trough, drop_energy);
        assert_eq!(rig.heads()[0].intensity, 0.0);
        assert_eq!(rig.heads()[0].beam_opacity, 0.0);
    }

    #[test]
    fn lasers_continuous_during_drop_gated_otherwise() {
        let mut rig = LightingRig::new(VenueType::Festival);
        let drop_t = std::f32::consts::FRAC_PI_2 / 0.4;
        rig.update(drop_t, EnergyState::sample(drop_t));
        assert!(rig.lasers().iter().all(|l| l.visible));

        // Outside the drop the half-duty gate hides some lasers at
        // some instant; scan a window to see both states.
        let mut seen_hidden = false;
        let mut seen_visible = false;
        for step in 0..60 {
            let t = step as f32 * 0.1;
            if EnergyState::sample(t).is_drop() {
                continue;
            }
            rig.update(t, EnergyState::sample(t));
            for l in rig.lasers() {
                seen_hidden |= !l.visible;
                seen_visible |= l.visible;
            }
        }
        assert!(seen_hidden && seen_visible);
    }

    #[test]
    fn screen_hue_stays_normalized() {
        let mut rig = LightingRig::new(VenueType::Arena);
        for step in 0..200 {
            let t = step as f32 * 0.73;
            rig.update(t, EnergyState::sample(t));
            assert!(rig
                .screen_color()
                .iter()
                .all(|c| (0.0..=1.0).contains(c)));
        }
    }
}
