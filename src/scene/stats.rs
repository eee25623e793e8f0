//! Per-frame statistics reporting.

use std::time::Instant;

use serde::Serialize;

/// Snapshot reported after every tick.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct FrameStats {
    pub frames_per_second: f32,
    pub triangle_count: usize,
    pub instance_count: usize,
}

/// Wall-clock frame-rate counter with exponential smoothing, so a
/// single slow frame reads as a dip rather than a spike storm.
#[derive(Debug)]
pub struct FpsCounter {
    last: Instant,
    smoothed: f32,
}

const SMOOTHING: f32 = 0.9;

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            smoothed: 0.0,
        }
    }

    /// Record one frame boundary and return the smoothed rate.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        if dt <= 0.0 {
            return self.smoothed;
        }
        let instant = 1.0 / dt;
        self.smoothed = if self.smoothed == 0.0 {
            instant
        } else {
            self.smoothed * SMOOTHING + instant * (1.0 - SMOOTHING)
        };
        self.smoothed
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_is_positive_after_a_tick() {
        let mut counter = FpsCounter::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert!(counter.tick() > 0.0);
    }

    #[test]
    fn stats_serialize_with_stable_field_names() {
        let stats = FrameStats {
            frames_per_second: 60.0,
            triangle_count: 1234,
            instance_count: 3000,
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"frames_per_second\""));
        assert!(json.contains("\"triangle_count\":1234"));
        assert!(json.contains("\"instance_count\":3000"));
    }
}
