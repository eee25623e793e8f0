//! Jointed humanoid rig construction.
//!
//! The rig is an arena of joints addressed by the stable indices in
//! [`joint`]; parents always precede children, so world transforms
//! resolve in one forward pass. Rebuilding (new description or quality
//! tier) constructs a complete new arena which the owner swaps in
//! before dropping the old one — the tree is never structurally
//! mutated while animation runs.

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::avatar::description::AvatarDescription;
use crate::avatar::QualityTier;
use crate::error::EngineResult;
use crate::geometry::mesh::Mesh;
use crate::geometry::primitives::{build_cylinder, build_sphere};

/// Stable joint indices into the rig arena.
pub mod joint {
    pub const HIPS: usize = 0;
    pub const SPINE: usize = 1;
    pub const HEAD: usize = 2;
    pub const L_SHOULDER: usize = 3;
    pub const L_ELBOW: usize = 4;
    pub const R_SHOULDER: usize = 5;
    pub const R_ELBOW: usize = 6;
    pub const L_HIP: usize = 7;
    pub const L_KNEE: usize = 8;
    pub const R_HIP: usize = 9;
    pub const R_KNEE: usize = 10;
    pub const COUNT: usize = 11;
}

/// Material model for one renderable rig part.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialDesc {
    /// Flat unlit wireframe (training tier).
    Wireframe { color: [f32; 3] },
    /// Single diffuse-rough material.
    Standard { color: [f32; 3], roughness: f32 },
    /// Layered reflective material with an optional sheen term.
    Physical {
        color: [f32; 3],
        roughness: f32,
        metalness: f32,
        clearcoat: f32,
        sheen: f32,
        sheen_color: [f32; 3],
    },
}

impl MaterialDesc {
    /// Skin material for a tier. The physical tier carries a subtle
    /// warm sheen over a clearcoat.
    pub fn skin(tier: QualityTier, color: [f32; 3]) -> Self {
        match tier {
            QualityTier::Wireframe => MaterialDesc::Wireframe { color },
            QualityTier::Standard => MaterialDesc::Standard {
                color,
                roughness: 0.4,
            },
            QualityTier::Physical => MaterialDesc::Physical {
                color,
                roughness: 0.35,
                metalness: 0.0,
                clearcoat: 0.1,
                sheen: 0.5,
                sheen_color: crate::color::rgb_from_hex(0xffaaaa),
            },
        }
    }

    /// Base color regardless of shading model.
    pub fn color(&self) -> [f32; 3] {
        match self {
            MaterialDesc::Wireframe { color }
            | MaterialDesc::Standard { color, .. }
            | MaterialDesc::Physical { color, .. } => *color,
        }
    }

    /// Clothing material for a tier: rougher and barely reflective.
    pub fn clothing(tier: QualityTier, color: [f32; 3]) -> Self {
        match tier {
            QualityTier::Wireframe => MaterialDesc::Wireframe { color },
            QualityTier::Standard => MaterialDesc::Standard {
                color,
                roughness: 0.7,
            },
            QualityTier::Physical => MaterialDesc::Physical {
                color,
                roughness: 0.8,
                metalness: 0.1,
                clearcoat: 0.0,
                sheen: 0.0,
                sheen_color: [1.0, 1.0, 1.0],
            },
        }
    }
}

/// Renderable geometry attached to a joint.
#[derive(Debug, Clone)]
pub struct JointMesh {
    pub mesh: Mesh,
    pub material: MaterialDesc,
    /// Local offset of the mesh below/around its joint.
    pub offset: Vec3,
}

/// One joint in the arena.
#[derive(Debug, Clone)]
pub struct Joint {
    pub name: &'static str,
    /// Arena index of the parent; `None` only for the root. Parents
    /// always precede children.
    pub parent: Option<usize>,
    /// Rest position relative to the parent.
    pub rest_position: Vec3,
    pub mesh: Option<JointMesh>,
}

/// Flat local-transform table the animator writes into.
///
/// Positions start at rest; rotations start at zero. Stable joint
/// indices address both arrays, so a rebuilt rig invalidates nothing.
#[derive(Debug, Clone)]
pub struct Pose {
    pub positions: Vec<Vec3>,
    /// Local euler rotations, XYZ order.
    pub rotations: Vec<Vec3>,
}

impl Pose {
    pub fn rest(rig: &AvatarRig) -> Self {
        Self {
            positions: rig.joints.iter().map(|j| j.rest_position).collect(),
            rotations: vec![Vec3::ZERO; rig.joints.len()],
        }
    }
}

/// Body proportion factors baked into a built rig.
#[derive(Debug, Clone, Copy)]
pub struct Proportions {
    /// Height factor; scales every vertical offset.
    pub height: f32,
    /// Girth factor, `0.8 + build · 0.4`.
    pub width: f32,
    /// Rest height of the hips above the ground.
    pub hip_height: f32,
}

/// A built avatar rig: joint arena, proportions, tier.
#[derive(Debug)]
pub struct AvatarRig {
    pub joints: Vec<Joint>,
    pub tier: QualityTier,
    pub proportions: Proportions,
}

impl AvatarRig {
    /// Build the fixed humanoid topology sized by the description.
    ///
    /// Construction either completes fully or fails without side
    /// effects, so the caller can keep its previous rig on error.
    pub fn build(description: &AvatarDescription, tier: QualityTier) -> EngineResult<Self> {
        let description = description.clamped();
        let h = description.height;
        let w = description.width_factor();
        let shoulder_span = 0.18 * w * description.shoulder_factor();

        let segments = tier.limb_segments();
        let skin = |mesh: Mesh, offset: Vec3| {
            Some(JointMesh {
                mesh,
                material: MaterialDesc::skin(tier, description.skin_tone),
                offset,
            })
        };
        let clothing = |mesh: Mesh, offset: Vec3| {
            Some(JointMesh {
                mesh,
                material: MaterialDesc::clothing(tier, description.clothing_primary),
                offset,
            })
        };
        // Limbs pivot at their top so they hang from the joint.
        let limb = |radius_top: f32, radius_bottom: f32, length: f32| {
            build_cylinder(radius_top, radius_bottom, length, segments)
                .translated(Vec3::new(0.0, -length * 0.5, 0.0))
        };
        // The physical tier shows bare upper arms.
        let arm_material: fn(QualityTier, &AvatarDescription, Mesh, Vec3) -> Option<JointMesh> =
            |tier, description, mesh, offset| {
                let material = if tier == QualityTier::Physical {
                    MaterialDesc::skin(tier, description.skin_tone)
                } else {
                    MaterialDesc::clothing(tier, description.clothing_primary)
                };
                Some(JointMesh {
                    mesh,
                    material,
                    offset,
                })
            };

        log::debug!(
            "[avatar::rig] building rig: tier {:?}, h {:.2}, w {:.2}",
            tier,
            h,
            w
        );

        let mut joints = vec![
            Joint {
                name: "hips",
                parent: None,
                rest_position: Vec3::new(0.0, 1.0 * h, 0.0),
                mesh: clothing(
                    limb(0.14 * w, 0.13 * w, 0.15),
                    Vec3::new(0.0, 0.075, 0.0),
                ),
            },
            Joint {
                name: "spine",
                parent: Some(joint::HIPS),
                rest_position: Vec3::ZERO,
                mesh: clothing(
                    limb(0.15 * w, 0.13 * w, 0.45 * h),
                    Vec3::new(0.0, 0.45 * h, 0.0),
                ),
            },
            Joint {
                name: "head",
                parent: Some(joint::SPINE),
                rest_position: Vec3::new(0.0, 0.45 * h, 0.0),
                mesh: skin(
                    build_sphere(0.12, tier.head_segments(), tier.head_segments()),
                    Vec3::new(0.0, 0.15, 0.0),
                ),
            },
        ];

        for (mirror, shoulder_name, elbow_name) in
            [(-1.0f32, "shoulder.l", "elbow.l"), (1.0, "shoulder.r", "elbow.r")]
        {
            let shoulder = joints.len();
            joints.push(Joint {
                name: shoulder_name,
                parent: Some(joint::SPINE),
                rest_position: Vec3::new(mirror * shoulder_span, 0.42 * h, 0.0),
                mesh: arm_material(
                    tier,
                    &description,
                    limb(0.05 * w, 0.04 * w, 0.32 * h),
                    Vec3::ZERO,
                ),
            });
            joints.push(Joint {
                name: elbow_name,
                parent: Some(shoulder),
                rest_position: Vec3::new(0.0, -0.32 * h, 0.0),
                mesh: skin(limb(0.04 * w, 0.03 * w, 0.30 * h), Vec3::ZERO),
            });
        }

        for (mirror, hip_name, knee_name) in
            [(-1.0f32, "hip.l", "knee.l"), (1.0, "hip.r", "knee.r")]
        {
            let hip = joints.len();
            joints.push(Joint {
                name: hip_name,
                parent: Some(joint::HIPS),
                rest_position: Vec3::new(mirror * 0.1 * w, 0.0, 0.0),
                mesh: clothing(limb(0.07 * w, 0.05 * w, 0.45 * h), Vec3::ZERO),
            });
            joints.push(Joint {
                name: knee_name,
                parent: Some(hip),
                rest_position: Vec3::new(0.0, -0.45 * h, 0.0),
                mesh: clothing(limb(0.05 * w, 0.04 * w, 0.45 * h), Vec3::ZERO),
            });
        }

        debug_assert_eq!(joints.len(), joint::COUNT);
        debug_assert!(joints
            .iter()
            .enumerate()
            .all(|(i, j)| j.parent.map_or(true, |p| p < i)));

        Ok(Self {
            joints,
            tier,
            proportions: Proportions {
                height: h,
                width: w,
                hip_height: 1.0 * h,
            },
        })
    }

    /// Resolve world transforms for a pose in one forward pass.
    pub fn world_transforms(&self, pose: &Pose) -> Vec<Mat4> {
        assert_eq!(pose.positions.len(), self.joints.len(), "pose size");
        let mut world = Vec::with_capacity(self.joints.len());
        for (i, joint) in self.joints.iter().enumerate() {
            let e = pose.rotations[i];
            let local = Mat4::from_rotation_translation(
                Quat::from_euler(EulerRot::XYZ, e.x, e.y, e.z),
                pose.positions[i],
            );
            let m = match joint.parent {
                Some(p) => world[p] * local,
                None => local,
            };
            world.push(m);
        }
        world
    }

    /// Total triangles across every attached mesh.
    pub fn triangle_count(&self) -> usize {
        self.joints
            .iter()
            .filter_map(|j| j.mesh.as_ref())
            .map(|m| m.mesh.triangle_count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topology_is_fixed_and_ordered() {
        let rig = AvatarRig::build(&AvatarDescription::default(), QualityTier::Standard).unwrap();
        assert_eq!(rig.joints.len(), joint::COUNT);
        assert!(rig.joints[joint::HIPS].parent.is_none());
        assert_eq!(rig.joints[joint::L_KNEE].parent, Some(joint::L_HIP));
        assert_eq!(rig.joints[joint::R_ELBOW].parent, Some(joint::R_SHOULDER));
        for (i, j) in rig.joints.iter().enumerate() {
            if let Some(p) = j.parent {
                assert!(p < i, "parent after child at {}", i);
            }
        }
    }

    #[test]
    fn proportions_scale_offsets() {
        let tall = AvatarDescription {
            height: 1.4,
            ..Default::default()
        };
        let rig = AvatarRig::build(&tall, QualityTier::Standard).unwrap();
        let reference =
            AvatarRig::build(&AvatarDescription::default(), QualityTier::Standard).unwrap();
        assert!(
            rig.joints[joint::HIPS].rest_position.y
                > reference.joints[joint::HIPS].rest_position.y
        );
        assert!(
            rig.joints[joint::HEAD].rest_position.y
                > reference.joints[joint::HEAD].rest_position.y
        );
    }

    #[test]
    fn triangle_count_grows_with_tier() {
        let d = AvatarDescription::default();
        let wire = AvatarRig::build(&d, QualityTier::Wireframe).unwrap();
        let standard = AvatarRig::build(&d, QualityTier::Standard).unwrap();
        let physical = AvatarRig::build(&d, QualityTier::Physical).unwrap();
        assert!(wire.triangle_count() < standard.triangle_count());
        assert!(standard.triangle_count() < physical.triangle_count());
    }

    #[test]
    fn world_transforms_compose_through_parents() {
        let rig = AvatarRig::build(&AvatarDescription::default(), QualityTier::Standard).unwrap();
        let pose = Pose::rest(&rig);
        let world = rig.world_transforms(&pose);

        // Knee world height = hips + hip joint + knee offset.
        let expected = rig.joints[joint::HIPS].rest_position.y
            + rig.joints[joint::L_HIP].rest_position.y
            + rig.joints[joint::L_KNEE].rest_position.y;
        let actual = world[joint::L_KNEE].w_axis.y;
        assert!((actual - expected).abs() < 1e-5);
    }

    #[test]
    fn materials_follow_tier() {
        let d = AvatarDescription::default();
        let wire = AvatarRig::build(&d, QualityTier::Wireframe).unwrap();
        assert!(matches!(
            wire.joints[joint::HEAD].mesh.as_ref().unwrap().material,
            MaterialDesc::Wireframe { .. }
        ));

        let physical = AvatarRig::build(&d, QualityTier::Physical).unwrap();
        match &physical.joints[joint::HEAD].mesh.as_ref().unwrap().material {
            MaterialDesc::Physical { sheen, .. } => assert!(*sheen > 0.0),
            other => panic!("expected physical skin, got {:?}", other),
        }
        match &physical.joints[joint::SPINE].mesh.as_ref().unwrap().material {
            MaterialDesc::Physical { sheen, roughness, .. } => {
                assert_eq!(*sheen, 0.0);
                assert!(*roughness > 0.5);
            }
            other => panic!("expected physical clothing, got {:?}", other),
        }
    }
}
