//! Orbit controls: left-drag rotates, right-drag pans, wheel dollies.

use glam::Vec2;
use particle_renderer::Camera;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Radians of orbit per pixel of drag
const ROTATE_SPEED: f32 = 0.005;

#[derive(Debug, Default)]
pub struct OrbitControls {
    rotating: bool,
    panning: bool,
    last_cursor: Option<Vec2>,
}

impl OrbitControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.rotating || self.panning
    }

    pub fn mouse_input(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        match button {
            MouseButton::Left => self.rotating = pressed,
            MouseButton::Right => self.panning = pressed,
            _ => {}
        }

        if !self.is_dragging() {
            self.last_cursor = None;
        }
    }

    /// Apply a cursor move in physical pixels. `viewport_height` converts pan
    /// drags to world units at the target's depth.
    pub fn cursor_moved(&mut self, position: Vec2, camera: &mut Camera, viewport_height: f32) {
        if !self.is_dragging() {
            return;
        }

        if let Some(last) = self.last_cursor {
            let delta = position - last;

            if self.rotating {
                camera.rotate(-delta.x * ROTATE_SPEED, delta.y * ROTATE_SPEED);
            }

            if self.panning {
                let world_per_pixel = pan_scale(camera, viewport_height);
                camera.pan(-delta.x * world_per_pixel, delta.y * world_per_pixel);
            }
        }

        self.last_cursor = Some(position);
    }

    pub fn mouse_wheel(&mut self, delta: MouseScrollDelta, camera: &mut Camera) {
        let scroll = match delta {
            MouseScrollDelta::LineDelta(_x, y) => y * 10.0,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
        };

        camera.zoom(-scroll * camera.distance / 100.0);
    }
}

/// World units spanned by one pixel at the orbit target's depth.
fn pan_scale(camera: &Camera, viewport_height: f32) -> f32 {
    2.0 * camera.distance * (camera.fovy * 0.5).tan() / viewport_height.max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_move_without_button_does_nothing() {
        let mut controls = OrbitControls::new();
        let mut camera = Camera::new(800, 600);

        controls.cursor_moved(Vec2::new(10.0, 10.0), &mut camera, 600.0);
        controls.cursor_moved(Vec2::new(200.0, 50.0), &mut camera, 600.0);

        assert!(camera.position().abs_diff_eq(Vec3::new(0.0, 0.0, 70.0), 1e-5));
    }

    #[test]
    fn test_left_drag_rotates() {
        let mut controls = OrbitControls::new();
        let mut camera = Camera::new(800, 600);

        controls.mouse_input(MouseButton::Left, ElementState::Pressed);
        controls.cursor_moved(Vec2::new(100.0, 100.0), &mut camera, 600.0);
        controls.cursor_moved(Vec2::new(180.0, 100.0), &mut camera, 600.0);

        assert!(!camera.position().abs_diff_eq(Vec3::new(0.0, 0.0, 70.0), 1e-3));
        assert!((camera.position().length() - 70.0).abs() < 1e-3);
        assert_eq!(camera.target, Vec3::ZERO);
    }

    #[test]
    fn test_right_drag_pans_opposite_to_cursor() {
        let mut controls = OrbitControls::new();
        let mut camera = Camera::new(800, 600);

        controls.mouse_input(MouseButton::Right, ElementState::Pressed);
        controls.cursor_moved(Vec2::new(100.0, 100.0), &mut camera, 600.0);
        controls.cursor_moved(Vec2::new(150.0, 100.0), &mut camera, 600.0);

        assert!(camera.target.x < 0.0);
        assert!(camera.target.y.abs() < 1e-5);
    }

    #[test]
    fn test_release_forgets_last_cursor() {
        let mut controls = OrbitControls::new();
        let mut camera = Camera::new(800, 600);

        controls.mouse_input(MouseButton::Left, ElementState::Pressed);
        controls.cursor_moved(Vec2::new(0.0, 0.0), &mut camera, 600.0);
        controls.mouse_input(MouseButton::Left, ElementState::Released);
        assert!(!controls.is_dragging());

        // A new drag starting far away must not jump
        controls.mouse_input(MouseButton::Left, ElementState::Pressed);
        controls.cursor_moved(Vec2::new(500.0, 500.0), &mut camera, 600.0);
        assert!(camera.position().abs_diff_eq(Vec3::new(0.0, 0.0, 70.0), 1e-5));
    }

    #[test]
    fn test_wheel_up_moves_closer() {
        let mut controls = OrbitControls::new();
        let mut camera = Camera::new(800, 600);

        controls.mouse_wheel(MouseScrollDelta::LineDelta(0.0, 1.0), &mut camera);
        assert!(camera.distance < 70.0);

        controls.mouse_wheel(MouseScrollDelta::LineDelta(0.0, -3.0), &mut camera);
        assert!(camera.distance > 60.0);
    }

    #[test]
    fn test_pan_scale_matches_frustum() {
        let camera = Camera::new(800, 600);
        let visible_height = 2.0 * 70.0 * (75.0f32.to_radians() * 0.5).tan();
        assert!((pan_scale(&camera, 600.0) * 600.0 - visible_height).abs() < 1e-3);
    }
}
