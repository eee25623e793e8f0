//! Frame orchestration.
//!
//! `SceneComposer` owns every CPU-side scene resource and runs the
//! per-frame tick: energy sample, crowd update, lighting update, avatar
//! pose, performer root, one commit per written pool, statistics. The
//! renderer never mutates scene state; it reads the draw list and the
//! pool generations.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::avatar::{
    AnimationState, AvatarAnimator, AvatarDescription, AvatarRig, Pose, QualityTier,
};
use crate::constants::stage;
use crate::crowd::CrowdSimulator;
use crate::error::{EngineError, EngineResult};
use crate::geometry::humanoid::{accessory_light_mesh, crowd_body_mesh, crowd_skin_mesh};
use crate::geometry::mesh::Mesh;
use crate::geometry::primitives::{build_box, build_plane};
use crate::instance::InstancePool;
use crate::lighting::{EnergyState, LightingRig};
use crate::scene::camera::OrbitCamera;
use crate::scene::performer::performer_transform;
use crate::scene::stats::{FpsCounter, FrameStats};
use crate::signal::{QualitySignal, VenueType};

/// Everything needed to bring up a scene. All fields have sensible
/// defaults; the seed fixes crowd placement for reproducible runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub venue: VenueType,
    pub signal: QualitySignal,
    pub avatar: AvatarDescription,
    pub animation: AnimationState,
    pub seed: u64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            venue: VenueType::Arena,
            signal: QualitySignal::default(),
            avatar: AvatarDescription::default(),
            animation: AnimationState::Idle,
            seed: 1,
        }
    }
}

/// One instanced draw: a mesh and the pool holding its transforms.
pub struct DrawBatch<'a> {
    pub mesh: &'a Mesh,
    pub pool: &'a InstancePool,
}

pub struct SceneComposer {
    venue: VenueType,
    signal: QualitySignal,
    avatar: AvatarDescription,
    seed: u64,

    crowd: CrowdSimulator,
    crowd_body: InstancePool,
    crowd_skin: InstancePool,
    crowd_lights: InstancePool,

    body_mesh: Mesh,
    skin_mesh: Mesh,
    light_mesh: Mesh,
    stage_mesh: Mesh,
    screen_mesh: Mesh,
    stage_pool: InstancePool,
    screen_pool: InstancePool,

    lighting: LightingRig,

    rig: AvatarRig,
    animator: AvatarAnimator,
    pose: Pose,
    /// One single-instance pool per meshed joint, index-matched to the
    /// rig arena.
    avatar_pools: Vec<InstancePool>,

    camera: OrbitCamera,
    fps: FpsCounter,
    frame: u64,
    /// Bumped on any structural rebuild (venue, quality, avatar). The
    /// renderer rebuilds its GPU batches when this changes.
    epoch: u64,
    torn_down: bool,
}

impl SceneComposer {
    pub fn new(config: &CoreConfig) -> EngineResult<Self> {
        let signal = config.signal.clamped();
        let avatar = config.avatar.clamped();
        let tier = QualityTier::from_accuracy(signal.accuracy);

        log::info!(
            "[scene::composer] bring-up: venue {:?}, tier {:?}, seed {}",
            config.venue,
            tier,
            config.seed
        );

        let crowd = CrowdSimulator::populate(config.venue, &signal, config.seed);
        let n = crowd.len();
        let mut crowd_body = InstancePool::allocate(n);
        let mut crowd_skin = InstancePool::allocate(n);
        let mut crowd_lights = InstancePool::allocate(n);
        crowd.write_base_colors(&mut crowd_body, &mut crowd_skin, &mut crowd_lights);

        let rig = AvatarRig::build(&avatar, tier)?;
        let pose = Pose::rest(&rig);
        let avatar_pools = Self::build_avatar_pools(&rig);

        let mut stage_pool = InstancePool::allocate(1);
        stage_pool.set_transform(0, Mat4::from_translation(Vec3::from(stage::STAGE_POSITION)));
        stage_pool.set_color(0, [0.02, 0.02, 0.02]);
        stage_pool.commit();

        let mut screen_pool = InstancePool::allocate(1);
        screen_pool.set_transform(
            0,
            Mat4::from_translation(Vec3::from(stage::SCREEN_POSITION)),
        );

        Ok(Self {
            venue: config.venue,
            signal,
            avatar,
            seed: config.seed,
            crowd,
            crowd_body,
            crowd_skin,
            crowd_lights,
            body_mesh: crowd_body_mesh()?,
            skin_mesh: crowd_skin_mesh()?,
            light_mesh: accessory_light_mesh(),
            stage_mesh: build_box(
                stage::STAGE_SIZE[0],
                stage::STAGE_SIZE[1],
                stage::STAGE_SIZE[2],
            ),
            screen_mesh: build_plane(stage::SCREEN_SIZE[0], stage::SCREEN_SIZE[1]),
            stage_pool,
            screen_pool,
            lighting: LightingRig::new(config.venue),
            rig,
            animator: AvatarAnimator::new(config.animation),
            pose,
            avatar_pools,
            camera: OrbitCamera::new(16.0 / 9.0),
            fps: FpsCounter::new(),
            frame: 0,
            epoch: 0,
            torn_down: false,
        })
    }

    fn build_avatar_pools(rig: &AvatarRig) -> Vec<InstancePool> {
        rig.joints
            .iter()
            .map(|joint| {
                let mut pool = InstancePool::allocate(if joint.mesh.is_some() { 1 } else { 0 });
                if let Some(mesh) = &joint.mesh {
                    pool.set_color(0, mesh.material.color());
                }
                pool
            })
            .collect()
    }

    /// Advance the scene to elapsed time `t`. All pool writes land
    /// before any commit, so the renderer only ever sees whole frames;
    /// an error return leaves every pool at its previous generation.
    pub fn tick(&mut self, t: f32) -> EngineResult<FrameStats> {
        if self.torn_down {
            return Err(EngineError::TornDown);
        }

        let energy = EnergyState::sample(t);

        self.crowd.update(
            t,
            self.frame,
            energy,
            &mut self.crowd_body,
            &mut self.crowd_skin,
            &mut self.crowd_lights,
        );

        self.lighting.update(t, energy);
        self.screen_pool.set_color(0, self.lighting.screen_color());

        self.pose = self.animator.pose_at(t, self.signal.fluidity(), &self.rig);
        let root = performer_transform(t, energy);
        let world = self.rig.world_transforms(&self.pose);
        for (joint, (world_tf, pool)) in self
            .rig
            .joints
            .iter()
            .zip(world.iter().zip(self.avatar_pools.iter_mut()))
        {
            if let Some(mesh) = &joint.mesh {
                pool.set_transform(0, root * *world_tf * Mat4::from_translation(mesh.offset));
            }
        }

        // Single commit per written pool, after all writes.
        self.crowd_body.commit();
        self.crowd_skin.commit();
        self.crowd_lights.commit();
        self.screen_pool.commit();
        for pool in &mut self.avatar_pools {
            pool.commit();
        }

        self.frame += 1;
        Ok(FrameStats {
            frames_per_second: self.fps.tick(),
            triangle_count: self.triangle_count(),
            instance_count: self.crowd.len(),
        })
    }

    /// Deterministic triangle total for the current scene structure.
    pub fn triangle_count(&self) -> usize {
        let n = self.crowd.len();
        (self.body_mesh.triangle_count() + self.skin_mesh.triangle_count()) * n
            + self.light_mesh.triangle_count() * n
            + self.stage_mesh.triangle_count()
            + self.screen_mesh.triangle_count()
            + self.rig.triangle_count()
    }

    /// Switch venue: repopulate the crowd and rebuild the lighting rig.
    /// The new population is fully constructed before the old one is
    /// released.
    pub fn set_venue(&mut self, venue: VenueType) -> EngineResult<()> {
        if self.torn_down {
            return Err(EngineError::TornDown);
        }
        if venue == self.venue {
            return Ok(());
        }
        log::info!("[scene::composer] venue {:?} -> {:?}", self.venue, venue);

        let crowd = CrowdSimulator::populate(venue, &self.signal, self.seed);
        let n = crowd.len();
        let mut body = InstancePool::allocate(n);
        let mut skin = InstancePool::allocate(n);
        let mut lights = InstancePool::allocate(n);
        crowd.write_base_colors(&mut body, &mut skin, &mut lights);
        let lighting = LightingRig::new(venue);

        self.venue = venue;
        self.crowd = crowd;
        self.crowd_body = body;
        self.crowd_skin = skin;
        self.crowd_lights = lights;
        self.lighting = lighting;
        self.epoch += 1;
        Ok(())
    }

    /// Apply a new quality signal. Resizes the crowd when the target
    /// count moves and rebuilds the avatar when the tier moves; either
    /// rebuild completes before anything old is released.
    pub fn set_quality_signal(&mut self, signal: QualitySignal) -> EngineResult<()> {
        if self.torn_down {
            return Err(EngineError::TornDown);
        }
        let signal = signal.clamped();
        let old_tier = QualityTier::from_accuracy(self.signal.accuracy);
        let new_tier = QualityTier::from_accuracy(signal.accuracy);

        if CrowdSimulator::target_count(self.venue, &signal)
            != CrowdSimulator::target_count(self.venue, &self.signal)
        {
            let crowd = CrowdSimulator::populate(self.venue, &signal, self.seed);
            let n = crowd.len();
            let mut body = InstancePool::allocate(n);
            let mut skin = InstancePool::allocate(n);
            let mut lights = InstancePool::allocate(n);
            crowd.write_base_colors(&mut body, &mut skin, &mut lights);
            self.crowd = crowd;
            self.crowd_body = body;
            self.crowd_skin = skin;
            self.crowd_lights = lights;
            self.epoch += 1;
        }

        if new_tier != old_tier {
            let rig = AvatarRig::build(&self.avatar, new_tier)?;
            self.avatar_pools = Self::build_avatar_pools(&rig);
            self.pose = Pose::rest(&rig);
            self.rig = rig;
            self.epoch += 1;
        }

        self.signal = signal;
        Ok(())
    }

    /// Swap in a new avatar description. On a build error the previous
    /// rig stays live untouched.
    pub fn set_avatar_description(&mut self, avatar: AvatarDescription) -> EngineResult<()> {
        if self.torn_down {
            return Err(EngineError::TornDown);
        }
        let avatar = avatar.clamped();
        let tier = QualityTier::from_accuracy(self.signal.accuracy);
        let rig = AvatarRig::build(&avatar, tier)?;
        self.avatar_pools = Self::build_avatar_pools(&rig);
        self.pose = Pose::rest(&rig);
        self.rig = rig;
        self.avatar = avatar;
        self.epoch += 1;
        Ok(())
    }

    pub fn set_animation_state(&mut self, state: AnimationState) {
        self.animator.set_state(state);
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.camera.aspect_ratio = aspect_ratio;
    }

    /// Everything drawable this frame, one entry per instanced batch.
    pub fn draw_list(&self) -> Vec<DrawBatch<'_>> {
        let mut batches = vec![
            DrawBatch {
                mesh: &self.stage_mesh,
                pool: &self.stage_pool,
            },
            DrawBatch {
                mesh: &self.screen_mesh,
                pool: &self.screen_pool,
            },
            DrawBatch {
                mesh: &self.body_mesh,
                pool: &self.crowd_body,
            },
            DrawBatch {
                mesh: &self.skin_mesh,
                pool: &self.crowd_skin,
            },
            DrawBatch {
                mesh: &self.light_mesh,
                pool: &self.crowd_lights,
            },
        ];
        for (joint, pool) in self.rig.joints.iter().zip(&self.avatar_pools) {
            if let Some(mesh) = &joint.mesh {
                batches.push(DrawBatch {
                    mesh: &mesh.mesh,
                    pool,
                });
            }
        }
        batches
    }

    pub fn venue(&self) -> VenueType {
        self.venue
    }

    pub fn signal(&self) -> &QualitySignal {
        &self.signal
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn lighting(&self) -> &LightingRig {
        &self.lighting
    }

    pub fn rig(&self) -> &AvatarRig {
        &self.rig
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn instance_count(&self) -> usize {
        self.crowd.len()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Release every owned resource. Further ticks and setters return
    /// `TornDown`; a fresh composer from the same config reproduces the
    /// scene exactly.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        log::info!(
            "[scene::composer] teardown: releasing {} crowd instances",
            self.crowd.len()
        );
        self.crowd.clear();
        self.crowd_body = InstancePool::allocate(0);
        self.crowd_skin = InstancePool::allocate(0);
        self.crowd_lights = InstancePool::allocate(0);
        self.avatar_pools = Vec::new();
        self.rig.joints = Vec::new();
        self.pose = Pose::rest(&self.rig);
        self.lighting.clear();
        self.body_mesh = Mesh::empty();
        self.skin_mesh = Mesh::empty();
        self.light_mesh = Mesh::empty();
        self.stage_mesh = Mesh::empty();
        self.screen_mesh = Mesh::empty();
        self.stage_pool = InstancePool::allocate(0);
        self.screen_pool = InstancePool::allocate(0);
        self.torn_down = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CoreConfig {
        CoreConfig {
            signal: QualitySignal::new(0.5, 30.0, 0.0),
            ..Default::default()
        }
    }

    #[test]
    fn tick_commits_every_animated_pool_once() {
        let mut composer = SceneComposer::new(&config()).unwrap();
        let before: Vec<u64> = composer.draw_list().iter().map(|b| b.pool.generation()).collect();
        composer.tick(0.5).unwrap();
        let after: Vec<u64> = composer.draw_list().iter().map(|b| b.pool.generation()).collect();

        // Stage is static and keeps its bring-up generation.
        assert_eq!(after[0], before[0]);
        for (b, a) in before.iter().zip(&after).skip(1) {
            assert_eq!(*a, b + 1);
        }
    }

    #[test]
    fn stats_are_structure_deterministic() {
        let mut a = SceneComposer::new(&config()).unwrap();
        let mut b = SceneComposer::new(&config()).unwrap();
        let sa = a.tick(1.0).unwrap();
        let sb = b.tick(1.0).unwrap();
        assert_eq!(sa.triangle_count, sb.triangle_count);
        assert_eq!(sa.instance_count, sb.instance_count);
        assert_eq!(sa.instance_count, 1500);
    }

    #[test]
    fn venue_switch_rebuilds_crowd_and_rig_counts() {
        let mut composer = SceneComposer::new(&config()).unwrap();
        let epoch = composer.epoch();
        composer.set_venue(VenueType::Festival).unwrap();
        assert_eq!(composer.instance_count(), 6000);
        assert_eq!(composer.lighting().heads().len(), 14);
        assert_eq!(composer.lighting().lasers().len(), 10);
        assert!(composer.epoch() > epoch);
        composer.tick(0.1).unwrap();
    }

    #[test]
    fn quality_change_resizes_crowd_and_retiers_avatar() {
        let mut composer = SceneComposer::new(&config()).unwrap();
        let low_tris = composer.rig().triangle_count();

        composer
            .set_quality_signal(QualitySignal::new(1.0, 90.0, 100.0))
            .unwrap();
        assert_eq!(composer.instance_count(), 4500);
        assert!(composer.rig().triangle_count() > low_tris);
        composer.tick(0.2).unwrap();
    }

    #[test]
    fn teardown_blocks_ticks_and_reinit_reproduces() {
        let mut composer = SceneComposer::new(&config()).unwrap();
        let stats = composer.tick(0.7).unwrap();

        composer.teardown();
        assert!(composer.is_torn_down());
        assert!(matches!(composer.tick(0.8), Err(EngineError::TornDown)));
        assert!(matches!(
            composer.set_venue(VenueType::Festival),
            Err(EngineError::TornDown)
        ));

        let mut fresh = SceneComposer::new(&config()).unwrap();
        let fresh_stats = fresh.tick(0.7).unwrap();
        assert_eq!(fresh_stats.triangle_count, stats.triangle_count);
        assert_eq!(fresh_stats.instance_count, stats.instance_count);
    }

    #[test]
    fn teardown_releases_rig_and_batch_geometry() {
        // Physical tier carries the heaviest rig, so retained geometry
        // would be most visible here.
        let mut composer = SceneComposer::new(&CoreConfig {
            signal: QualitySignal::new(0.9, 30.0, 0.0),
            ..Default::default()
        })
        .unwrap();
        composer.tick(0.3).unwrap();
        assert!(composer.rig().triangle_count() > 0);

        composer.teardown();
        assert_eq!(composer.rig().triangle_count(), 0);
        assert!(composer.rig().joints.is_empty());
        assert_eq!(composer.triangle_count(), 0);
        assert!(composer.lighting().heads().is_empty());
        assert!(composer
            .draw_list()
            .iter()
            .all(|b| b.mesh.vertex_count() == 0 && b.pool.capacity() == 0));
    }

    #[test]
    fn avatar_swap_keeps_old_rig_on_error_path() {
        // Degenerate descriptions clamp rather than fail, so the only
        // observable contract is a successful swap bumping the epoch.
        let mut composer = SceneComposer::new(&config()).unwrap();
        let epoch = composer.epoch();
        composer
            .set_avatar_description(AvatarDescription {
                height: f32::NAN,
                ..Default::default()
            })
            .unwrap();
        assert!(composer.epoch() > epoch);
        assert_eq!(composer.rig().proportions.height, 1.0);
    }
}
