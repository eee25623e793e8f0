//! Central constants for the stage core.
//!
//! Grouped by subsystem so call sites read as `crowd::BASE_COUNT_ARENA`
//! rather than bare numbers scattered through the update loops.

/// Crowd population and per-frame animation constants.
pub mod crowd {
    /// Base instance count before quality scaling, arena venue.
    pub const BASE_COUNT_ARENA: usize = 3000;
    /// Base instance count before quality scaling, festival venue.
    pub const BASE_COUNT_FESTIVAL: usize = 12000;

    /// Inner radius of the audience annulus (distance from origin).
    pub const INNER_RADIUS: f32 = 20.0;
    /// Radial spread of the annulus per venue.
    pub const SPREAD_ARENA: f32 = 60.0;
    pub const SPREAD_FESTIVAL: f32 = 180.0;
    /// Positional jitter applied independently on both planar axes.
    pub const POSITION_JITTER: f32 = 10.0;
    /// The audience ring is centered this far behind the origin.
    pub const RING_OFFSET_Z: f32 = -15.0;

    /// Point every crowd member faces (center stage, head height).
    pub const FOCUS_POINT: [f32; 3] = [0.0, 4.0, -30.0];

    /// Probability that an instance carries a handheld light.
    pub const ACCESSORY_LIGHT_PROBABILITY: f64 = 0.6;
    /// Per-frame probability of a camera flash on a non-light instance.
    pub const CAMERA_FLASH_PROBABILITY: f32 = 0.001;

    /// Vertical bob, rectified after scaling:
    /// `max(0, sin(t * BOB_RATE + phase) * BOB_AMPLITUDE * speed * energy)`.
    pub const BOB_RATE: f32 = 8.0;
    pub const BOB_AMPLITUDE: f32 = 0.25;
    /// Sinusoidal roll for visual life.
    pub const ROLL_RATE: f32 = 3.0;
    pub const ROLL_AMPLITUDE: f32 = 0.08;
    /// Bob multiplier while the energy state reads "drop".
    pub const DROP_ENERGY_MULTIPLIER: f32 = 1.8;
}

/// Moving-head and laser fixture constants.
pub mod lighting {
    pub const HEAD_COUNT_ARENA: usize = 8;
    pub const HEAD_COUNT_FESTIVAL: usize = 14;
    /// Spacing between moving heads along the truss.
    pub const HEAD_SPACING: f32 = 6.0;
    /// Truss height and depth behind the stage front.
    pub const HEAD_HEIGHT: f32 = 14.0;
    pub const HEAD_Z: f32 = -28.0;

    pub const LASER_COUNT: usize = 10;
    pub const LASER_SPACING: f32 = 8.0;
    pub const LASER_HEIGHT: f32 = 2.0;
    pub const LASER_Z: f32 = -28.0;

    /// Spot intensity when lit / strobed off.
    pub const HEAD_INTENSITY: f32 = 200.0;
    pub const BEAM_OPACITY: f32 = 0.2;
}

/// Venue static geometry.
pub mod stage {
    pub const STAGE_SIZE: [f32; 3] = [80.0, 2.0, 30.0];
    pub const STAGE_POSITION: [f32; 3] = [0.0, 1.0, -30.0];
    pub const SCREEN_SIZE: [f32; 2] = [50.0, 22.0];
    pub const SCREEN_POSITION: [f32; 3] = [0.0, 13.0, -30.0];
}

/// Orbiting spectator camera.
pub mod camera {
    pub const FOV_Y_DEGREES: f32 = 60.0;
    pub const Z_NEAR: f32 = 0.1;
    pub const Z_FAR: f32 = 2000.0;
    /// Orbit radius and angular rate of the cinematic sweep.
    pub const ORBIT_RADIUS: f32 = 85.0;
    pub const ORBIT_RATE: f32 = 0.08;
    /// The z track is a flattened ellipse pushed toward the audience.
    pub const ORBIT_Z_SCALE: f32 = 0.3;
    pub const ORBIT_Z_OFFSET: f32 = 30.0;
    pub const LOOK_AT: [f32; 3] = [0.0, 5.0, -25.0];
}

/// Hero performer constants (the on-stage avatar).
pub mod performer {
    /// Hero scale relative to a crowd member.
    pub const SCALE: f32 = 1.3;
    /// Stage height the performer stands on.
    pub const BASE_Y: f32 = 2.0;
    pub const HOME_Z: f32 = -25.0;
    /// Pacing amplitudes along x and z.
    pub const PACE_X: f32 = 10.0;
    pub const PACE_Z: f32 = 3.0;
    /// Jump height and beat rate.
    pub const JUMP_HEIGHT: f32 = 0.5;
    pub const JUMP_RATE: f32 = 8.0;
    /// Jump speed multiplier during a drop.
    pub const DROP_PACE: f32 = 3.0;
    pub const LEAN_RATE: f32 = 4.0;
    pub const LEAN_AMPLITUDE: f32 = 0.1;
}
