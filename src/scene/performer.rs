//! Hero performer movement.

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::constants::performer;
use crate::lighting::EnergyState;

/// Root transform of the on-stage performer at elapsed time `t`.
///
/// Pure function: pacing along the stage front, a beat-locked jump
/// (tripled rate during a drop), a mic-hand lean, and a constant yaw
/// toward the audience.
pub fn performer_transform(t: f32, energy: EnergyState) -> Mat4 {
    let x = (t * 0.5).sin() * performer::PACE_X;
    let z = performer::HOME_Z + (t * 0.8).cos() * performer::PACE_Z;

    let pace = if energy.is_drop() {
        performer::DROP_PACE
    } else {
        1.0
    };
    let jump = ((t * performer::JUMP_RATE * pace).sin() * performer::JUMP_HEIGHT).max(0.0);
    let y = performer::BASE_Y + jump;

    // Face out over the crowd from wherever the pacing put us.
    let yaw = (0.0 - x).atan2(50.0 - z);
    let lean = (t * performer::LEAN_RATE).sin() * performer::LEAN_AMPLITUDE;

    Mat4::from_scale_rotation_translation(
        Vec3::splat(performer::SCALE),
        Quat::from_euler(EulerRot::XYZ, 0.0, yaw, lean),
        Vec3::new(x, y, z),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn performer_never_dips_below_the_stage() {
        for step in 0..2000 {
            let t = step as f32 * 0.017;
            let tf = performer_transform(t, EnergyState::sample(t));
            assert!(tf.w_axis.y >= performer::BASE_Y - 1e-5, "dipped at t={t}");
        }
    }

    #[test]
    fn pacing_stays_on_the_stage_apron() {
        for step in 0..500 {
            let t = step as f32 * 0.09;
            let tf = performer_transform(t, EnergyState::sample(t));
            assert!(tf.w_axis.x.abs() <= performer::PACE_X + 1e-4);
            assert!((tf.w_axis.z - performer::HOME_Z).abs() <= performer::PACE_Z + 1e-4);
        }
    }

    #[test]
    fn scale_is_uniform_hero_scale() {
        let tf = performer_transform(2.0, EnergyState::sample(2.0));
        let (scale, _, _) = tf.to_scale_rotation_translation();
        assert!((scale.x - performer::SCALE).abs() < 1e-4);
        assert!((scale.y - performer::SCALE).abs() < 1e-4);
    }
}
