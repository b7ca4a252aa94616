//! Display mode and input-source switching.

use glam::Vec3;

use super::host::{HostBindings, POINTER_LISTENERS};
use super::{Viewer, ViewerEvent};
use crate::camera::{Camera, CameraControl, ControlSet};
use crate::events::EventTarget;
use crate::gpu::RenderPath;
use crate::scene::ObjectEvent;

/// Display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Single view, direct pointer input unless the reticle is configured.
    #[default]
    Normal,
    /// Stereo view with gaze-reticle input.
    Vr,
}

/// Which input path is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// Mouse/touch listeners on the container.
    Pointer,
    /// Per-tick reticle tap at the container center.
    Reticle,
}

/// Owns the display mode, the input source and the camera controls.
///
/// The input source is a single value, so pointer registration and the
/// reticle tap can never both be active or both be inactive.
pub struct ModeController {
    mode: Mode,
    reticle_configured: bool,
    source: InputSource,
    controls: ControlSet,
}

impl ModeController {
    /// Controller in `Normal` mode. A configured reticle starts as the input
    /// source.
    #[must_use]
    pub fn new(controls: ControlSet, reticle_configured: bool) -> Self {
        Self {
            mode: Mode::Normal,
            reticle_configured,
            source: if reticle_configured {
                InputSource::Reticle
            } else {
                InputSource::Pointer
            },
            controls,
        }
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current input source.
    #[must_use]
    pub fn input_source(&self) -> InputSource {
        self.source
    }

    /// Whether reticle input is in effect (configured, or forced by VR).
    #[must_use]
    pub fn reticle_active(&self) -> bool {
        self.source == InputSource::Reticle
    }

    /// Whether the host configured reticle input.
    #[must_use]
    pub fn reticle_configured(&self) -> bool {
        self.reticle_configured
    }

    /// Render path for the current mode.
    #[must_use]
    pub fn render_path(&self) -> RenderPath {
        match self.mode {
            Mode::Normal => RenderPath::Normal,
            Mode::Vr => RenderPath::Stereo,
        }
    }

    /// Flip the mode. While in VR the reticle is forced on; back in
    /// `Normal` the configured choice is restored.
    pub fn toggle(&mut self) -> Mode {
        self.mode = match self.mode {
            Mode::Normal => Mode::Vr,
            Mode::Vr => Mode::Normal,
        };
        self.source = if self.mode == Mode::Vr || self.reticle_configured {
            InputSource::Reticle
        } else {
            InputSource::Pointer
        };
        self.mode
    }

    /// The camera controls.
    #[must_use]
    pub fn controls(&self) -> &ControlSet {
        &self.controls
    }

    /// The camera controls, mutably.
    pub fn controls_mut(&mut self) -> &mut ControlSet {
        &mut self.controls
    }

    /// The active camera control.
    #[must_use]
    pub fn control(&self) -> &dyn CameraControl {
        self.controls.active()
    }

    /// Switch camera control. Out-of-range indices select the first one.
    pub fn enable_control(
        &mut self,
        index: usize,
        camera: &mut Camera,
        panorama_position: Vec3,
    ) -> usize {
        self.controls.enable(index, camera, panorama_position)
    }
}

impl Viewer {
    /// Current display mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode.mode()
    }

    /// Whether reticle input is in effect.
    #[must_use]
    pub fn reticle_active(&self) -> bool {
        self.mode.reticle_active()
    }

    /// Whether mouse/touch listeners are registered on the container.
    #[must_use]
    pub fn pointer_input_registered(&self) -> bool {
        self.host.pointer_registered()
    }

    /// Whether the per-tick reticle tap is registered.
    #[must_use]
    pub fn reticle_tap_registered(&self) -> bool {
        self.reticle_tap
    }

    /// Flip between `Normal` and `Vr`, notify the viewer's listeners and
    /// every scene object, then swap input paths.
    pub fn toggle_vr(&mut self) {
        let before = self.mode.input_source();
        let mode = self.mode.toggle();
        log::debug!("display mode → {mode:?}");

        let _ = self.dispatch(&ViewerEvent::ModeChange { mode });
        let _ = self.scene.broadcast(&ObjectEvent::ModeChange { mode });

        let after = self.mode.input_source();
        if mode == Mode::Vr {
            self.reticle.set_visible(true);
        } else if !self.mode.reticle_configured() {
            self.reticle.set_visible(false);
        }
        match (before, after) {
            (InputSource::Pointer, InputSource::Reticle) => {
                self.unregister_pointer_input();
                self.register_reticle_tap();
            }
            (InputSource::Reticle, InputSource::Pointer) => {
                self.unregister_reticle_tap();
                self.register_pointer_input();
            }
            _ => self.refresh_reticle_center(),
        }
    }

    pub(super) fn register_pointer_input(&mut self) {
        for listener in POINTER_LISTENERS {
            let _ = self.host.register(HostBindings::CONTAINER, listener);
        }
    }

    pub(super) fn unregister_pointer_input(&mut self) {
        for listener in POINTER_LISTENERS {
            let _ = self.host.unregister(HostBindings::CONTAINER, listener);
        }
        self.release_pointer_targets();
    }

    pub(super) fn register_reticle_tap(&mut self) {
        self.refresh_reticle_center();
        self.reticle_tap = true;
    }

    pub(super) fn unregister_reticle_tap(&mut self) {
        self.reticle_tap = false;
        self.reticle.disarm(&mut self.scheduler);
        self.release_pointer_targets();
    }

    /// The outgoing input source can no longer finish a hover or press:
    /// its targets get their leave and stop events before the next source
    /// picks new ones.
    fn release_pointer_targets(&mut self) {
        for (target, event) in self.pointer.release_all() {
            let _ = self.scene.dispatch(target, &event);
        }
    }

    /// Re-sample the container center for the reticle.
    pub(super) fn refresh_reticle_center(&mut self) {
        self.reticle.set_center(self.container.center());
    }

    // -- Camera controls ----------------------------------------------------

    /// Activate the camera control at `index`. Indices outside the control
    /// set behave exactly like `0`.
    pub fn enable_control(&mut self, index: usize) {
        let position = self.panorama_position();
        let _ = self.mode.enable_control(index, &mut self.camera, position);
        self.notify_change();
    }

    /// Advance to the next camera control, wrapping around.
    pub fn toggle_next_control(&mut self) {
        let next = self.mode.controls().next_index();
        self.enable_control(next);
    }

    /// The active camera control.
    #[must_use]
    pub fn control(&self) -> &dyn CameraControl {
        self.mode.control()
    }

    /// Name of the active camera control.
    #[must_use]
    pub fn control_name(&self) -> &'static str {
        self.mode.control().name()
    }

    /// Name of the control [`toggle_next_control`](Self::toggle_next_control)
    /// would select.
    #[must_use]
    pub fn next_control_name(&self) -> &'static str {
        let controls = self.mode.controls();
        controls
            .get(controls.next_index())
            .map_or("", CameraControl::name)
    }

    /// Set the camera's vertical field of view in degrees.
    pub fn set_camera_fov(&mut self, fov: f32) {
        self.camera.fov = fov;
        self.notify_change();
    }

    /// Put the camera just in front of the active panorama and aim the
    /// controls at it.
    pub(super) fn set_camera_control(&mut self) {
        let position = self.panorama_position();
        self.mode.controls_mut().recenter(&mut self.camera, position);
    }
}
