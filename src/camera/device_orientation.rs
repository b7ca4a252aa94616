use glam::{EulerRot, Quat, Vec3};

use super::controls::{CameraControl, ControlKind};
use super::core::Camera;

/// One reading from the device's orientation sensor, in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrientationSample {
    /// Rotation around the device z axis.
    pub alpha: f32,
    /// Rotation around the device x axis.
    pub beta: f32,
    /// Rotation around the device y axis.
    pub gamma: f32,
}

/// Camera control that follows the physical orientation of the device.
///
/// The camera sits exactly on the panorama center; only its orientation
/// changes.
pub struct DeviceOrientationControl {
    enabled: bool,
    sample: Option<OrientationSample>,
    /// Screen rotation in degrees (0, 90, -90, 180).
    screen_orientation: f32,
    dirty: bool,
}

impl DeviceOrientationControl {
    /// A disabled control with no sample yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            enabled: false,
            sample: None,
            screen_orientation: 0.0,
            dirty: false,
        }
    }

    /// Record the current screen rotation in degrees.
    pub fn set_screen_orientation(&mut self, degrees: f32) {
        self.screen_orientation = degrees;
        self.dirty = true;
    }

    /// Latest sensor sample, if any has arrived.
    #[must_use]
    pub fn sample(&self) -> Option<OrientationSample> {
        self.sample
    }

    fn orientation(&self, sample: OrientationSample) -> Quat {
        // Device frame looks out of the screen; rotate -90° about X so the
        // camera looks out of the back of the device.
        let back = Quat::from_xyzw(-(0.5f32).sqrt(), 0.0, 0.0, (0.5f32).sqrt());
        let device = Quat::from_euler(
            EulerRot::YXZ,
            sample.alpha.to_radians(),
            sample.beta.to_radians(),
            -sample.gamma.to_radians(),
        );
        let screen_angle = -self.screen_orientation.to_radians();
        let screen = Quat::from_axis_angle(Vec3::Z, screen_angle);
        device * back * screen
    }
}

impl Default for DeviceOrientationControl {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraControl for DeviceOrientationControl {
    fn name(&self) -> &'static str {
        "device-orientation"
    }

    fn kind(&self) -> ControlKind {
        ControlKind::DeviceOrientation
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn activate(&mut self, camera: &mut Camera, panorama_position: Vec3) {
        camera.position = panorama_position;
    }

    fn update(&mut self, camera: &mut Camera, force: bool) -> bool {
        if !self.enabled || !(self.dirty || force) {
            return false;
        }
        self.dirty = false;
        let Some(sample) = self.sample else {
            return false;
        };
        camera.orientation = self.orientation(sample);
        true
    }

    fn handle_screen_orientation(&mut self, degrees: f32) {
        self.set_screen_orientation(degrees);
    }

    fn handle_orientation(&mut self, sample: OrientationSample) -> bool {
        if !self.enabled {
            return false;
        }
        self.sample = Some(sample);
        self.dirty = true;
        true
    }
}
