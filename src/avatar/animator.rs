//! Closed-form procedural animation state machine.

use serde::{Deserialize, Serialize};

use crate::avatar::rig::{joint, AvatarRig, Pose};

/// Animation states. Transitions are external — the caller selects a
/// state at any time; there are no guards and no automatic changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationState {
    #[default]
    Idle,
    Walk,
    Dance,
}

/// Produces per-joint local poses as a pure function of elapsed time.
///
/// No per-frame accumulation anywhere: every pose is derived from
/// `(t, fluidity, state)` and the rig's static proportions, so a state
/// switch takes full effect on the very next tick and resetting the
/// time origin restarts the animation exactly.
#[derive(Debug, Clone, Copy)]
pub struct AvatarAnimator {
    state: AnimationState,
}

impl AvatarAnimator {
    pub fn new(state: AnimationState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn set_state(&mut self, state: AnimationState) {
        if state != self.state {
            log::debug!("[avatar::animator] state {:?} -> {:?}", self.state, state);
        }
        self.state = state;
    }

    /// Compute the pose for elapsed time `t`. `fluidity` in [0, 1]
    /// comes from the external animation-quality signal and scales the
    /// state's base speed by `0.8 + 0.4 · fluidity`.
    pub fn pose_at(&self, t: f32, fluidity: f32, rig: &AvatarRig) -> Pose {
        let fluidity = fluidity.clamp(0.0, 1.0);
        let base = match self.state {
            AnimationState::Walk => 4.0,
            _ => 2.0,
        };
        let speed = base * (0.8 + 0.4 * fluidity);
        let hip_height = rig.proportions.hip_height;

        let mut pose = Pose::rest(rig);
        match self.state {
            AnimationState::Idle => {
                // Breathing, opposed shoulder sway, slow head wander.
                let breath = (t * 2.0).sin() * 0.02;
                pose.positions[joint::HIPS].y = hip_height + breath;
                pose.rotations[joint::SPINE].x = breath * 0.5;

                pose.rotations[joint::L_SHOULDER].z = 0.1 + t.sin() * 0.05;
                pose.rotations[joint::R_SHOULDER].z = -0.1 - t.sin() * 0.05;

                pose.rotations[joint::HEAD].y = (t * 0.5).sin() * 0.2;
                pose.rotations[joint::HEAD].x = (t * 0.3).sin() * 0.05;
                // Legs stay at rest: exactly zero rotation.
            }
            AnimationState::Walk => {
                let phase = t * speed;
                pose.positions[joint::HIPS].y = hip_height + phase.cos().abs() * 0.05;

                pose.rotations[joint::L_HIP].x = phase.sin() * 0.5;
                pose.rotations[joint::R_HIP].x = (phase + std::f32::consts::PI).sin() * 0.5;

                // Knees only ever bend forward.
                pose.rotations[joint::L_KNEE].x =
                    ((phase + std::f32::consts::PI).sin() * 0.8).max(0.0);
                pose.rotations[joint::R_KNEE].x = (phase.sin() * 0.8).max(0.0);

                // Arms counter-swing against the same-side leg.
                pose.rotations[joint::L_SHOULDER].x =
                    (phase + std::f32::consts::PI).sin() * 0.3;
                pose.rotations[joint::R_SHOULDER].x = phase.sin() * 0.3;
            }
            AnimationState::Dance => {
                let beat = t * 8.0;
                pose.positions[joint::HIPS].y = hip_height - 0.1 + beat.sin().abs() * 0.15;
                pose.rotations[joint::HIPS].y = (t * 2.0).sin() * 0.2;
                pose.rotations[joint::SPINE].z = (t * 3.0).sin() * 0.1;

                pose.rotations[joint::L_SHOULDER].z = (t * 3.0).sin().abs() * 2.0 + 0.2;
                pose.rotations[joint::R_SHOULDER].z = -(t * 3.0).cos().abs() * 2.0 - 0.2;

                pose.rotations[joint::L_HIP].x = -0.2 + beat.sin() * 0.1;
                pose.rotations[joint::R_HIP].x = -0.2 + beat.cos() * 0.1;
            }
        }
        pose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avatar::description::AvatarDescription;
    use crate::avatar::rig::AvatarRig;
    use crate::avatar::QualityTier;

    fn rig() -> AvatarRig {
        AvatarRig::build(&AvatarDescription::default(), QualityTier::Standard).unwrap()
    }

    #[test]
    fn walk_knees_never_bend_backward() {
        let rig = rig();
        let animator = AvatarAnimator::new(AnimationState::Walk);
        for step in 0..2000 {
            let t = step as f32 * 0.017;
            let pose = animator.pose_at(t, 0.6, &rig);
            assert!(pose.rotations[joint::L_KNEE].x >= 0.0, "left knee at t={t}");
            assert!(pose.rotations[joint::R_KNEE].x >= 0.0, "right knee at t={t}");
        }
    }

    #[test]
    fn idle_legs_are_exactly_zero() {
        let rig = rig();
        let animator = AvatarAnimator::new(AnimationState::Idle);
        for step in 0..500 {
            let t = step as f32 * 0.043;
            let pose = animator.pose_at(t, 1.0, &rig);
            for j in [joint::L_HIP, joint::R_HIP, joint::L_KNEE, joint::R_KNEE] {
                assert_eq!(pose.rotations[j], glam::Vec3::ZERO);
            }
        }
    }

    #[test]
    fn state_switch_has_no_residual_contribution() {
        let rig = rig();
        let mut animator = AvatarAnimator::new(AnimationState::Dance);
        let _ = animator.pose_at(12.7, 0.9, &rig);

        animator.set_state(AnimationState::Idle);
        let switched = animator.pose_at(13.0, 0.9, &rig);
        let fresh = AvatarAnimator::new(AnimationState::Idle).pose_at(13.0, 0.9, &rig);
        assert_eq!(switched.positions, fresh.positions);
        assert_eq!(switched.rotations, fresh.rotations);
    }

    #[test]
    fn walk_hips_antiphase() {
        let rig = rig();
        let animator = AvatarAnimator::new(AnimationState::Walk);
        for step in 0..200 {
            let t = step as f32 * 0.05;
            let pose = animator.pose_at(t, 0.5, &rig);
            let l = pose.rotations[joint::L_HIP].x;
            let r = pose.rotations[joint::R_HIP].x;
            assert!((l + r).abs() < 1e-4, "hips not antiphase at t={t}");
        }
    }

    #[test]
    fn fluidity_scales_walk_cadence() {
        let rig = rig();
        let animator = AvatarAnimator::new(AnimationState::Walk);
        // At matched phases the poses coincide: phase = t·4·(0.8+0.4f).
        let slow = animator.pose_at(1.0 / (4.0 * 0.8), 0.0, &rig);
        let fast = animator.pose_at(1.0 / (4.0 * 1.2), 1.0, &rig);
        assert!(
            (slow.rotations[joint::L_HIP].x - fast.rotations[joint::L_HIP].x).abs() < 1e-4
        );
    }

    #[test]
    fn dance_bob_is_rectified() {
        let rig = rig();
        let animator = AvatarAnimator::new(AnimationState::Dance);
        let base = rig.proportions.hip_height - 0.1;
        for step in 0..500 {
            let t = step as f32 * 0.029;
            let pose = animator.pose_at(t, 0.7, &rig);
            assert!(pose.positions[joint::HIPS].y >= base - 1e-6);
        }
    }
}
