use glam::{Vec2, Vec3};

use super::core::Camera;
use super::device_orientation::{DeviceOrientationControl, OrientationSample};
use super::orbit::OrbitControl;

/// Which activation rule a control follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Orbit around the panorama center from a small forward offset.
    Orbit,
    /// Follow the device's physical orientation from the panorama center.
    DeviceOrientation,
}

/// An interchangeable camera-control strategy.
pub trait CameraControl {
    /// Stable name (`"orbit"`, `"device-orientation"`).
    fn name(&self) -> &'static str;

    /// Activation rule.
    fn kind(&self) -> ControlKind;

    /// Whether the control currently drives the camera.
    fn enabled(&self) -> bool;

    /// Enable or disable the control.
    fn set_enabled(&mut self, enabled: bool);

    /// Reposition the camera for this control around a panorama centered
    /// at `panorama_position`.
    fn activate(&mut self, camera: &mut Camera, panorama_position: Vec3);

    /// Apply pending motion to the camera. With `force`, the camera pose
    /// is recomputed even without new input. Returns `true` if the camera
    /// changed.
    fn update(&mut self, camera: &mut Camera, force: bool) -> bool;

    /// Pointer drag in screen pixels. Returns `true` if the control
    /// consumed it.
    fn handle_drag(&mut self, _delta: Vec2) -> bool {
        false
    }

    /// Scroll zoom (positive = zoom in).
    fn handle_zoom(&mut self, _delta: f32) -> bool {
        false
    }

    /// New device-orientation sample.
    fn handle_orientation(&mut self, _sample: OrientationSample) -> bool {
        false
    }

    /// Screen rotation changed, in degrees.
    fn handle_screen_orientation(&mut self, _degrees: f32) {}

    /// Point the control at a new center without activating it.
    fn retarget(&mut self, _target: Vec3, _camera_position: Vec3) {}
}

/// Offset applied in front of the panorama center when an orbit control
/// activates, so the orbit has a radius to rotate around.
pub const ORBIT_FORWARD_EPSILON: f32 = 1.0;

/// Ordered set of camera controls with exactly one active at a time.
pub struct ControlSet {
    controls: Vec<Box<dyn CameraControl>>,
    active: usize,
}

impl ControlSet {
    /// A set whose first (active) control is `first`.
    #[must_use]
    pub fn new(mut first: Box<dyn CameraControl>) -> Self {
        first.set_enabled(true);
        Self {
            controls: vec![first],
            active: 0,
        }
    }

    /// Orbit first, device orientation second.
    #[must_use]
    pub fn with_defaults(orbit: OrbitControl) -> Self {
        let mut set = Self::new(Box::new(orbit));
        set.push(Box::new(DeviceOrientationControl::new()));
        set
    }

    /// Append an inactive control.
    pub fn push(&mut self, mut control: Box<dyn CameraControl>) {
        control.set_enabled(false);
        self.controls.push(control);
    }

    /// Number of controls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Always `false`; a set holds at least one control.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Index of the active control.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The active control.
    #[must_use]
    pub fn active(&self) -> &dyn CameraControl {
        self.controls[self.active].as_ref()
    }

    /// The active control, mutably.
    pub fn active_mut(&mut self) -> &mut dyn CameraControl {
        self.controls[self.active].as_mut()
    }

    /// Control at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&dyn CameraControl> {
        self.controls.get(index).map(Box::as_ref)
    }

    /// Out-of-range indices normalize to 0.
    #[must_use]
    pub fn normalize_index(&self, index: usize) -> usize {
        if index < self.controls.len() {
            index
        } else {
            0
        }
    }

    /// Index after the active one, wrapping around.
    #[must_use]
    pub fn next_index(&self) -> usize {
        (self.active + 1) % self.controls.len()
    }

    /// Disable the active control, activate the one at `index` (normalized)
    /// and reposition the camera for it. Returns the index now active.
    pub fn enable(
        &mut self,
        index: usize,
        camera: &mut Camera,
        panorama_position: Vec3,
    ) -> usize {
        let index = self.normalize_index(index);
        self.controls[self.active].set_enabled(false);
        self.active = index;
        let control = self.controls[index].as_mut();
        control.set_enabled(true);
        control.activate(camera, panorama_position);
        let _ = control.update(camera, true);
        log::debug!("camera control → {}", control.name());
        index
    }

    /// Place the camera just in front of a new panorama center and point
    /// every control at it.
    pub fn recenter(&mut self, camera: &mut Camera, panorama_position: Vec3) {
        camera.position = panorama_position + Vec3::Z * ORBIT_FORWARD_EPSILON;
        for control in &mut self.controls {
            control.retarget(panorama_position, camera.position);
        }
    }

    /// Forward a screen rotation to every control.
    pub fn set_screen_orientation(&mut self, degrees: f32) {
        for control in &mut self.controls {
            control.handle_screen_orientation(degrees);
        }
    }
}
