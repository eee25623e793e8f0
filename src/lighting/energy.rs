//! Periodic high-energy ("drop") state.

/// A boolean high-intensity phase derived from elapsed time.
///
/// Sampled once per tick and passed read-only to both the crowd and
/// the lighting update so their visual peaks line up within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergyState {
    drop: bool,
}

impl EnergyState {
    /// The drop phase occupies the crest of a slow sinusoid:
    /// `sin(t · 0.4) > 0.8`.
    pub fn sample(t: f32) -> Self {
        Self {
            drop: (t * 0.4).sin() > 0.8,
        }
    }

    pub fn is_drop(&self) -> bool {
        self.drop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    #[test]
    fn drop_covers_the_sine_crest() {
        // sin(x) > 0.8 near x = π/2; t = x / 0.4.
        let peak = std::f32::consts::FRAC_PI_2 / 0.4;
        assert!(EnergyState::sample(peak).is_drop());
        assert!(!EnergyState::sample(0.0).is_drop());
        assert!(!EnergyState::sample(peak * 2.0).is_drop());
    }

    #[test]
    fn state_is_periodic() {
        let period = TAU / 0.4;
        for step in 0..100 {
            let t = step as f32 * 0.37;
            // Skip samples sitting on the threshold, where float error
            // in the shifted sine could flip the comparison.
            if ((t * 0.4).sin() - 0.8).abs() < 1e-3 {
                continue;
            }
            assert_eq!(
                EnergyState::sample(t).is_drop(),
                EnergyState::sample(t + period).is_drop()
            );
        }
    }
}
