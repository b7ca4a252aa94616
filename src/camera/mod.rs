//! Camera and interchangeable camera controls.
//!
//! The viewer owns one [`Camera`] and a [`ControlSet`]. Exactly one
//! control drives the camera at a time; switching controls repositions the
//! camera according to the incoming control's activation rule.

/// Orbit/device-orientation control trait and the ordered control set.
pub mod controls;
/// Core camera struct: pose, projection and picking rays.
pub mod core;
/// Device-orientation (gyroscope) control.
pub mod device_orientation;
/// Drag-to-rotate orbit control.
pub mod orbit;

pub use controls::{
    CameraControl, ControlKind, ControlSet, ORBIT_FORWARD_EPSILON,
};
pub use self::core::Camera;
pub use device_orientation::{DeviceOrientationControl, OrientationSample};
pub use orbit::OrbitControl;
