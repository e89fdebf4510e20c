//! Orbit camera for 3D visualization

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

use crate::constants::*;

/// Camera uniform for GPU
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    /// Surface size in physical pixels
    pub viewport: [f32; 2],
    pub point_scale: f32,
    pub _padding: f32,
}

/// Camera orbiting a target point
pub struct Camera {
    pub distance: f32,
    pub rotation: Quat,
    pub target: Vec3,
    pub aspect: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            distance: CAMERA_DISTANCE,
            rotation: Quat::IDENTITY,
            target: Vec3::ZERO,
            aspect: aspect_ratio(width, height),
            fovy: CAMERA_FOV_DEGREES.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    pub fn position(&self) -> Vec3 {
        let offset = self.rotation * Vec3::new(0.0, 0.0, self.distance);
        self.target + offset
    }

    pub fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        let up = self.rotation * Vec3::Y;
        let yaw_rotation = Quat::from_axis_angle(up, delta_x);

        let right = self.rotation * Vec3::X;
        let pitch_rotation = Quat::from_axis_angle(right, -delta_y);

        self.rotation = yaw_rotation * pitch_rotation * self.rotation;
        self.rotation = self.rotation.normalize();
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta).clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    /// Slide the target in the view plane, in world units.
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let right = self.rotation * Vec3::X;
        let up = self.rotation * Vec3::Y;
        self.target += right * delta_x + up * delta_y;
    }

    /// Back to the start-up view, keeping the aspect ratio.
    pub fn reset(&mut self) {
        self.distance = CAMERA_DISTANCE;
        self.rotation = Quat::IDENTITY;
        self.target = Vec3::ZERO;
    }

    pub fn view_matrix(&self) -> Mat4 {
        let rotation_matrix = Mat4::from_quat(self.rotation.conjugate());
        let translation_matrix = Mat4::from_translation(-self.position());
        rotation_matrix * translation_matrix
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar)
    }

    pub fn build_view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn to_uniform(&self, viewport: [f32; 2]) -> CameraUniform {
        CameraUniform {
            view: self.view_matrix().to_cols_array_2d(),
            proj: self.projection_matrix().to_cols_array_2d(),
            viewport,
            point_scale: POINT_SCALE,
            _padding: 0.0,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_positive_z() {
        let camera = Camera::new(1920, 1080);
        assert!(camera.position().abs_diff_eq(Vec3::new(0.0, 0.0, 70.0), 1e-5));
    }

    #[test]
    fn test_view_puts_origin_in_front() {
        let camera = Camera::new(800, 600);
        let origin = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(Vec3::new(0.0, 0.0, -70.0), 1e-4));
    }

    #[test]
    fn test_origin_projects_to_screen_center() {
        let camera = Camera::new(800, 600);
        let ndc = camera.build_view_projection_matrix().project_point3(Vec3::ZERO);
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_rotate_keeps_distance() {
        let mut camera = Camera::new(800, 600);
        camera.rotate(0.7, -0.3);
        assert!((camera.position().length() - 70.0).abs() < 1e-3);
        assert!(!camera.position().abs_diff_eq(Vec3::new(0.0, 0.0, 70.0), 1e-3));
    }

    #[test]
    fn test_zoom_clamps() {
        let mut camera = Camera::new(800, 600);
        camera.zoom(-1000.0);
        assert_eq!(camera.distance, CAMERA_MIN_DISTANCE);
        camera.zoom(1.0e9);
        assert_eq!(camera.distance, CAMERA_MAX_DISTANCE);
    }

    #[test]
    fn test_pan_moves_target_and_eye_together() {
        let mut camera = Camera::new(800, 600);
        let eye = camera.position();
        camera.pan(5.0, -2.0);
        assert!(camera.target.abs_diff_eq(Vec3::new(5.0, -2.0, 0.0), 1e-5));
        assert!((camera.position() - eye).abs_diff_eq(Vec3::new(5.0, -2.0, 0.0), 1e-5));
    }

    #[test]
    fn test_reset_restores_start_view() {
        let mut camera = Camera::new(800, 600);
        camera.rotate(1.0, 1.0);
        camera.zoom(30.0);
        camera.pan(3.0, 3.0);
        camera.reset();
        assert!(camera.position().abs_diff_eq(Vec3::new(0.0, 0.0, 70.0), 1e-5));
    }

    #[test]
    fn test_resize_ignores_zero_height() {
        let mut camera = Camera::new(800, 600);
        camera.resize(1000, 0);
        assert_eq!(camera.aspect, 1000.0);
    }

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 144);
        let uniform = Camera::new(800, 600).to_uniform([800.0, 600.0]);
        assert_eq!(uniform.viewport, [800.0, 600.0]);
        assert_eq!(uniform.point_scale, 300.0);
    }
}
