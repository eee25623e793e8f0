//! Cinematic orbit camera.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::constants::camera;

/// Camera uniform buffer layout for the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_projection: [[f32; 4]; 4],
    pub position: [f32; 3],
    _padding: f32,
}

/// Spectator camera sweeping a flattened ellipse around the venue,
/// always looking at the stage. Pure function of elapsed time.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub aspect_ratio: f32,
}

impl OrbitCamera {
    pub fn new(aspect_ratio: f32) -> Self {
        Self { aspect_ratio }
    }

    pub fn eye(&self, t: f32) -> Vec3 {
        let angle = t * camera::ORBIT_RATE;
        Vec3::new(
            angle.sin() * camera::ORBIT_RADIUS,
            30.0,
            angle.cos() * camera::ORBIT_RADIUS * camera::ORBIT_Z_SCALE + camera::ORBIT_Z_OFFSET,
        )
    }

    pub fn view_matrix(&self, t: f32) -> Mat4 {
        Mat4::look_at_rh(self.eye(t), Vec3::from(camera::LOOK_AT), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            camera::FOV_Y_DEGREES.to_radians(),
            self.aspect_ratio,
            camera::Z_NEAR,
            camera::Z_FAR,
        )
    }

    pub fn uniform(&self, t: f32) -> CameraUniform {
        let view_projection = self.projection_matrix() * self.view_matrix(t);
        CameraUniform {
            view_projection: view_projection.to_cols_array_2d(),
            position: self.eye(t).to_array(),
            _padding: 0.0,
        }
    }
}
