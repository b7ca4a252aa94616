use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Vec2, Vec3};

use super::controls::{CameraControl, ControlKind, ORBIT_FORWARD_EPSILON};
use super::core::Camera;

/// Radians of rotation per pixel of drag at `rotate_speed == 1`.
const RADIANS_PER_PIXEL: f32 = 0.005;
/// Degrees of field of view per unit of scroll.
const FOV_PER_SCROLL: f32 = 2.0;
/// Keeps the polar angle off the poles.
const POLE_EPSILON: f32 = 1e-4;

/// Drag-to-rotate control orbiting a target at a small radius.
pub struct OrbitControl {
    enabled: bool,
    target: Vec3,
    radius: f32,
    /// Azimuth around +Y, measured from +Z.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,
    /// Rotation sensitivity multiplier. Negative reverses drag direction.
    pub rotate_speed: f32,
    /// Smallest allowed polar angle.
    pub min_polar_angle: f32,
    /// Largest allowed polar angle.
    pub max_polar_angle: f32,
    /// Narrowest field of view reachable by zooming, in degrees.
    pub min_fov: f32,
    /// Widest field of view reachable by zooming, in degrees.
    pub max_fov: f32,
    pending_rotate: Vec2,
    pending_zoom: f32,
}

impl OrbitControl {
    /// Orbit control with unit rotate speed and no polar limits.
    #[must_use]
    pub fn new() -> Self {
        Self {
            enabled: false,
            target: Vec3::ZERO,
            radius: ORBIT_FORWARD_EPSILON,
            theta: 0.0,
            phi: FRAC_PI_2,
            rotate_speed: 1.0,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            min_fov: 30.0,
            max_fov: 120.0,
            pending_rotate: Vec2::ZERO,
            pending_zoom: 0.0,
        }
    }

    /// Pin the polar angle to the horizon so only horizontal looking is
    /// possible.
    pub fn lock_horizontal(&mut self) {
        self.min_polar_angle = FRAC_PI_2;
        self.max_polar_angle = FRAC_PI_2;
    }

    /// Flip the drag direction.
    pub fn reverse_dragging(&mut self) {
        self.rotate_speed = -self.rotate_speed;
    }

    /// The point being orbited.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Orbit around `target` keeping the camera's current offset.
    pub fn set_target(&mut self, target: Vec3, camera_position: Vec3) {
        self.target = target;
        self.sync_from_offset(camera_position - target);
    }

    fn sync_from_offset(&mut self, offset: Vec3) {
        let radius = offset.length();
        if radius < 1e-6 {
            return;
        }
        self.radius = radius;
        self.theta = offset.x.atan2(offset.z);
        self.phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
    }

    fn clamp_phi(&self, phi: f32) -> f32 {
        phi.clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(POLE_EPSILON, PI - POLE_EPSILON)
    }

    fn offset(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(
            self.radius * sin_phi * sin_theta,
            self.radius * cos_phi,
            self.radius * sin_phi * cos_theta,
        )
    }
}

impl Default for OrbitControl {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraControl for OrbitControl {
    fn name(&self) -> &'static str {
        "orbit"
    }

    fn kind(&self) -> ControlKind {
        ControlKind::Orbit
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.pending_rotate = Vec2::ZERO;
            self.pending_zoom = 0.0;
        }
    }

    fn activate(&mut self, camera: &mut Camera, panorama_position: Vec3) {
        camera.position =
            panorama_position + Vec3::Z * ORBIT_FORWARD_EPSILON;
        self.set_target(panorama_position, camera.position);
    }

    fn update(&mut self, camera: &mut Camera, force: bool) -> bool {
        if !self.enabled {
            return false;
        }
        let rotating = self.pending_rotate != Vec2::ZERO;
        let zooming = self.pending_zoom.abs() > f32::EPSILON;
        if !rotating && !zooming && !force {
            return false;
        }

        let step = RADIANS_PER_PIXEL * self.rotate_speed;
        self.theta -= self.pending_rotate.x * step;
        self.phi = self.clamp_phi(self.phi - self.pending_rotate.y * step);
        self.pending_rotate = Vec2::ZERO;

        if zooming {
            camera.fov = (camera.fov - self.pending_zoom * FOV_PER_SCROLL)
                .clamp(self.min_fov, self.max_fov);
            self.pending_zoom = 0.0;
        }

        camera.position = self.target + self.offset();
        camera.look_at(self.target);
        true
    }

    fn retarget(&mut self, target: Vec3, camera_position: Vec3) {
        self.set_target(target, camera_position);
    }

    fn handle_drag(&mut self, delta: Vec2) -> bool {
        if !self.enabled {
            return false;
        }
        self.pending_rotate += delta;
        true
    }

    fn handle_zoom(&mut self, delta: f32) -> bool {
        if !self.enabled {
            return false;
        }
        self.pending_zoom += delta;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_orbit(camera: &mut Camera) -> OrbitControl {
        let mut orbit = OrbitControl::new();
        orbit.set_enabled(true);
        orbit.activate(camera, Vec3::ZERO);
        let _ = orbit.update(camera, true);
        orbit
    }

    #[test]
    fn activation_looks_at_panorama_center() {
        let mut camera = Camera::new(60.0, 1.0);
        let _orbit = active_orbit(&mut camera);
        assert!((camera.forward() - Vec3::NEG_Z).length() < 1e-4);
        assert!((camera.position - Vec3::Z).length() < 1e-4);
    }

    #[test]
    fn update_without_input_is_idle() {
        let mut camera = Camera::new(60.0, 1.0);
        let mut orbit = active_orbit(&mut camera);
        assert!(!orbit.update(&mut camera, false));
    }

    #[test]
    fn reversed_drag_rotates_the_other_way() {
        let mut cam_a = Camera::new(60.0, 1.0);
        let mut cam_b = Camera::new(60.0, 1.0);
        let mut normal = active_orbit(&mut cam_a);
        let mut reversed = active_orbit(&mut cam_b);
        reversed.reverse_dragging();

        assert!(normal.handle_drag(Vec2::new(100.0, 0.0)));
        assert!(reversed.handle_drag(Vec2::new(100.0, 0.0)));
        assert!(normal.update(&mut cam_a, false));
        assert!(reversed.update(&mut cam_b, false));
        assert!(cam_a.position.x * cam_b.position.x < 0.0);
    }

    #[test]
    fn horizontal_lock_pins_polar_angle() {
        let mut camera = Camera::new(60.0, 1.0);
        let mut orbit = active_orbit(&mut camera);
        orbit.lock_horizontal();
        let _ = orbit.handle_drag(Vec2::new(0.0, 300.0));
        let _ = orbit.update(&mut camera, false);
        assert!(camera.position.y.abs() < 1e-4);
    }

    #[test]
    fn zoom_is_clamped_to_fov_range() {
        let mut camera = Camera::new(60.0, 1.0);
        let mut orbit = active_orbit(&mut camera);
        let _ = orbit.handle_zoom(100.0);
        let _ = orbit.update(&mut camera, false);
        assert!((camera.fov - orbit.min_fov).abs() < 1e-6);
    }

    #[test]
    fn disabled_control_ignores_input() {
        let mut camera = Camera::new(60.0, 1.0);
        let mut orbit = OrbitControl::new();
        assert!(!orbit.handle_drag(Vec2::ONE));
        assert!(!orbit.update(&mut camera, true));
    }
}
