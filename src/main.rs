//! Desktop demo binary for the panoview panorama viewer.

use std::{path::Path, sync::Arc};

use glam::Vec3;
use panoview::{
    gpu::RenderContext,
    input::window::WinitInput,
    options::Options,
    scene::{ObjectKind, PanoramaInfo, SceneObject},
    InputEvent, Viewer, WidgetCommand,
};
use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

struct ViewerApp {
    window: Option<Arc<Window>>,
    viewer: Option<Viewer>,
    input: WinitInput,
    options: Options,
}

impl ViewerApp {
    fn new(options: Options) -> Self {
        Self {
            window: None,
            viewer: None,
            input: WinitInput::new(),
            options,
        }
    }
}

/// A demo scene: one panorama with an infospot straight ahead.
fn populate(viewer: &mut Viewer) {
    let pano = viewer.add(
        SceneObject::panorama(PanoramaInfo::default()).with_name("lobby"),
    );
    let spot = SceneObject::new(ObjectKind::Infospot)
        .with_name("exit")
        .at(Vec3::new(0.0, 0.0, -50.0))
        .with_sphere(5.0);
    if viewer.add_child(pano, spot).is_none() {
        log::warn!("could not attach demo infospot");
    }
}

fn command_for(code: KeyCode) -> Option<WidgetCommand> {
    match code {
        KeyCode::KeyV => Some(WidgetCommand::ToggleVr),
        KeyCode::KeyC => Some(WidgetCommand::ToggleNextControl),
        KeyCode::KeyF => Some(WidgetCommand::ToggleFullscreen(true)),
        KeyCode::Escape => Some(WidgetCommand::ToggleFullscreen(false)),
        _ => None,
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = Window::default_attributes().with_title("Panoview");
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };
        let size = window.inner_size();
        let (width, height) = (size.width, size.height);

        let pending = RenderContext::new_headless((width, height));
        let context = match pollster::block_on(pending) {
            Ok(context) => context,
            Err(e) => {
                log::error!("{e}");
                event_loop.exit();
                return;
            }
        };
        let viewer = Viewer::builder()
            .with_options(self.options.clone())
            .with_window_size(width, height)
            .with_backend(Box::new(context))
            .build();
        let mut viewer = match viewer {
            Ok(viewer) => viewer,
            Err(e) => {
                log::error!("{e}");
                event_loop.exit();
                return;
            }
        };
        populate(&mut viewer);

        window.request_redraw();
        self.window = Some(window);
        self.viewer = Some(viewer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        let Some(viewer) = &mut self.viewer else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => {
                viewer.dispose();
                log::info!("rendered {} frames", viewer.render_count());
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                viewer.frame(Instant::now());
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    if let Some(command) = command_for(code) {
                        viewer.execute(command);
                    }
                }
            }
            other => {
                if let Some(input) = self.input.convert(&other) {
                    if matches!(input, InputEvent::Resize { .. }) {
                        log::debug!("window resized: {input:?}");
                    }
                    viewer.handle_input(input);
                }
            }
        }
    }
}

fn main() {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("failed to create event loop: {e}");
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = ViewerApp::new(options);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("event loop error: {e}");
    }
}
