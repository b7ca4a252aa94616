use glam::Vec3;

use super::host::{Container, HostBindings};
use super::mode::ModeController;
use super::Viewer;
use crate::animation::TweenQueue;
use crate::camera::{Camera, ControlSet, OrbitControl};
use crate::error::ViewerError;
use crate::events::Listeners;
use crate::gpu::RenderBackend;
use crate::input::{PointerStateMachine, ReticleSelector};
use crate::options::Options;
use crate::picking::InputResolver;
use crate::scene::Scene;
use crate::schedule::{RenderSchedule, RenderScheduler};

/// Window size assumed until the host reports one.
pub const DEFAULT_WINDOW_SIZE: (u32, u32) = (1280, 720);

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    container: Option<(u32, u32)>,
    window: (u32, u32),
    backend: Option<Box<dyn RenderBackend>>,
}

impl ViewerBuilder {
    /// Builder with default options, an auto-created container and no
    /// backend.
    pub(super) fn new() -> Self {
        Self {
            options: None,
            container: None,
            window: DEFAULT_WINDOW_SIZE,
            backend: None,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Use a host-provided container of the given size instead of one that
    /// fills the window.
    #[must_use]
    pub fn with_container(mut self, width: u32, height: u32) -> Self {
        self.container = Some((width, height));
        self
    }

    /// Current host window size.
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window = (width, height);
        self
    }

    /// The 3D rendering runtime to draw through. Required.
    #[must_use]
    pub fn with_backend(mut self, backend: Box<dyn RenderBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Wire up the viewer.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::RuntimeUnavailable`] when no backend was
    /// supplied. Nothing is wired up in that case.
    pub fn build(self) -> Result<Viewer, ViewerError> {
        let Some(mut backend) = self.backend else {
            log::error!("3D rendering runtime not found, viewer not created");
            return Err(ViewerError::RuntimeUnavailable);
        };
        let options = self.options.unwrap_or_default();
        let container = match self.container {
            Some((width, height)) => Container::provided(width, height),
            None => Container::auto(self.window),
        };

        let mut orbit = OrbitControl::new();
        orbit.rotate_speed = options.camera.rotate_speed;
        if options.camera.horizontal_only {
            orbit.lock_horizontal();
        }
        if options.camera.reverse_drag {
            orbit.reverse_dragging();
        }
        let reticle_configured = options.interaction.enable_reticle;
        let mut camera = Camera::new(options.camera.fov, container.aspect());
        let mut mode = ModeController::new(
            ControlSet::with_defaults(orbit),
            reticle_configured,
        );
        let _ = mode.enable_control(0, &mut camera, Vec3::ZERO);

        let schedule = if options.rendering.passive {
            RenderSchedule::Passive
        } else {
            RenderSchedule::Continuous
        };
        let (width, height) = container.size();
        backend.resize(width, height);

        let mut viewer = Viewer {
            scene: Scene::new(),
            camera,
            mode,
            pointer: PointerStateMachine::new(
                options.interaction.click_tolerance,
            ),
            reticle: ReticleSelector::new(
                options.dwell_time(),
                options.interaction.auto_reticle_select,
            ),
            reticle_tap: false,
            resolver: InputResolver::new(container.surface()),
            scheduler: RenderScheduler::new(schedule),
            tweens: TweenQueue::new(),
            backend,
            host: HostBindings::new(),
            container,
            window: self.window,
            widget: None,
            panorama: None,
            update_callbacks: Vec::new(),
            next_callback: 0,
            drag_from: None,
            control_held: false,
            stereo_warned: false,
            listeners: Listeners::new(),
            renders: 0,
            disposed: false,
            options,
        };

        if viewer.options.control_bar.show {
            let buttons = viewer.options.control_bar.buttons.clone();
            viewer.add_default_control_bar(&buttons);
        }
        if reticle_configured {
            viewer.reticle.set_visible(true);
            viewer.register_reticle_tap();
        } else {
            viewer.register_pointer_input();
        }
        viewer.host.register_window();
        viewer.scheduler.start();

        log::debug!(
            "viewer ready: {width}x{height}, {schedule:?} rendering, {} input",
            if reticle_configured { "reticle" } else { "pointer" }
        );
        Ok(viewer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ControlButton;

    #[test]
    fn missing_backend_is_fatal() {
        let result = Viewer::builder().with_container(10, 10).build();
        assert!(matches!(result, Err(ViewerError::RuntimeUnavailable)));
    }

    #[test]
    fn build_wires_control_bar_input_and_main_loop() {
        let (v, log) = super::super::testing::viewer(Options::default());
        assert_eq!(
            v.widget().map(|w| w.buttons().to_vec()),
            Some(vec![
                ControlButton::Fullscreen,
                ControlButton::Navigation,
                ControlButton::Vr,
                ControlButton::Video
            ])
        );
        assert!(v.pointer_input_registered());
        assert!(!v.reticle_tap_registered());
        assert!(v.scheduler().is_looping());
        assert_eq!(log.borrow().resizes, vec![(800, 600)]);
        assert_eq!(log.borrow().paths.len(), 0);
    }

    #[test]
    fn configured_reticle_replaces_pointer_input() {
        let mut options = Options::default();
        options.interaction.enable_reticle = true;
        options.control_bar.show = false;
        let (v, _) = super::super::testing::viewer(options);
        assert!(v.widget().is_none());
        assert!(v.reticle_tap_registered());
        assert!(!v.pointer_input_registered());
        assert!(v.reticle().is_visible());
    }

    #[test]
    fn auto_container_follows_window() {
        let (builder, _) = super::super::testing::builder(Options::default());
        let mut v = builder.build().unwrap();
        v.handle_window_resize(1920, 1080);
        assert_eq!(v.container().size(), (800, 600));

        let mut auto = Viewer::builder()
            .with_window_size(640, 480)
            .with_backend(Box::new(super::super::testing::RecordingBackend {
                log: std::rc::Rc::default(),
            }))
            .build()
            .unwrap();
        assert_eq!(auto.container().size(), (640, 480));
        auto.handle_window_resize(1920, 1080);
        assert_eq!(auto.container().size(), (1920, 1080));
    }
}
