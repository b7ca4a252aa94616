//! The viewer: owns the scene, camera, input state machines and the
//! render scheduler, and wires them together.
//!
//! ```no_run
//! # use panoview::{Viewer, gpu::RenderContext};
//! # use panoview::scene::{PanoramaInfo, SceneObject};
//! # fn demo(context: RenderContext) -> Result<(), panoview::ViewerError> {
//! let mut viewer = Viewer::builder()
//!     .with_container(1280, 720)
//!     .with_backend(Box::new(context))
//!     .build()?;
//! let _pano = viewer.add(SceneObject::panorama(PanoramaInfo::default()));
//! viewer.frame(web_time::Instant::now());
//! # Ok(())
//! # }
//! ```
//!
//! The host drives the viewer with [`Viewer::frame`] once per display
//! refresh and feeds input through [`Viewer::handle_input`]. Everything
//! runs on the caller's thread.

mod builder;
mod command;
mod frame;
mod host;
mod input;
mod mode;
mod panorama;
mod widget;

pub use builder::{ViewerBuilder, DEFAULT_WINDOW_SIZE};
pub use command::WidgetCommand;
use glam::{Vec2, Vec3};
pub use host::{
    Container, HostBindings, HostListener, HostTarget, POINTER_LISTENERS,
    WINDOW_LISTENERS,
};
pub use mode::{InputSource, Mode, ModeController};
pub use panorama::PanoramaEvent;
pub use widget::{Widget, WidgetEvent, WidgetEventKind};

use crate::animation::{Tween, TweenId, TweenQueue};
use crate::camera::Camera;
use crate::events::{Event, EventTarget, Listeners};
use crate::gpu::RenderBackend;
use crate::input::{PointerStateMachine, ReticleSelector};
use crate::options::Options;
use crate::picking::InputResolver;
use crate::scene::{ObjectEvent, ObjectId, Scene, SceneObject};
use crate::schedule::RenderScheduler;

/// Events the viewer itself dispatches to its listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    /// Display mode changed.
    ModeChange {
        /// The new mode.
        mode: Mode,
    },
    /// The container was resized.
    WindowResize {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
}

/// Discriminant of [`ViewerEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerEventKind {
    /// See [`ViewerEvent::ModeChange`].
    ModeChange,
    /// See [`ViewerEvent::WindowResize`].
    WindowResize,
}

impl Event for ViewerEvent {
    type Kind = ViewerEventKind;

    fn kind(&self) -> ViewerEventKind {
        match self {
            Self::ModeChange { .. } => ViewerEventKind::ModeChange,
            Self::WindowResize { .. } => ViewerEventKind::WindowResize,
        }
    }
}

/// Handle returned by [`Viewer::add_update_callback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackId(u64);

type UpdateCallback = Box<dyn FnMut()>;

/// An interactive panorama viewer.
///
/// Construct via [`Viewer::builder`]. Construction fails when no render
/// backend is supplied; nothing else is wired up in that case.
pub struct Viewer {
    options: Options,
    scene: Scene,
    camera: Camera,
    mode: ModeController,
    pointer: PointerStateMachine,
    reticle: ReticleSelector,
    /// Whether the per-tick reticle tap runs.
    reticle_tap: bool,
    resolver: InputResolver,
    scheduler: RenderScheduler,
    tweens: TweenQueue,
    backend: Box<dyn RenderBackend>,
    host: HostBindings,
    container: Container,
    window: (u32, u32),
    widget: Option<Widget>,
    panorama: Option<ObjectId>,
    update_callbacks: Vec<(CallbackId, UpdateCallback)>,
    next_callback: u64,
    /// Last pointer position while a drag is in progress.
    drag_from: Option<Vec2>,
    /// Control key held (panorama-point output).
    control_held: bool,
    stereo_warned: bool,
    listeners: Listeners<ViewerEvent>,
    renders: u64,
    disposed: bool,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    // -- Accessors ----------------------------------------------------------

    /// Options the viewer was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The scene graph.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The scene graph, mutably (to attach listeners or move objects).
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The render backend the viewer draws through.
    #[must_use]
    pub fn renderer(&self) -> &dyn RenderBackend {
        self.backend.as_ref()
    }

    /// The container hosting the render surface.
    #[must_use]
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// The host listeners currently registered.
    #[must_use]
    pub fn host_bindings(&self) -> &HostBindings {
        &self.host
    }

    /// The render scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    /// Pointer state machine (hover/press references).
    #[must_use]
    pub fn pointer(&self) -> &PointerStateMachine {
        &self.pointer
    }

    /// The gaze reticle.
    #[must_use]
    pub fn reticle(&self) -> &ReticleSelector {
        &self.reticle
    }

    /// Number of frames rendered so far.
    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Whether [`dispose`](Self::dispose) has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// The active panorama.
    #[must_use]
    pub fn panorama(&self) -> Option<ObjectId> {
        self.panorama
    }

    /// World position of the active panorama, or the origin without one.
    #[must_use]
    pub fn panorama_position(&self) -> Vec3 {
        self.panorama
            .and_then(|id| self.scene.world_position(id))
            .unwrap_or(Vec3::ZERO)
    }

    fn active_is_video(&self) -> bool {
        self.panorama
            .and_then(|id| self.scene.object(id))
            .and_then(SceneObject::as_panorama)
            .is_some_and(|info| info.video)
    }

    // -- Scene --------------------------------------------------------------

    /// Add an object at the scene root. The first panorama added becomes
    /// the active one.
    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        let is_panorama = object.as_panorama().is_some();
        let id = self.scene.insert(object);
        if is_panorama && self.panorama.is_none() {
            self.set_panorama(id);
        }
        id
    }

    /// Add an object under `parent` (e.g. an infospot on a panorama).
    pub fn add_child(
        &mut self,
        parent: ObjectId,
        object: SceneObject,
    ) -> Option<ObjectId> {
        self.scene.insert_child(parent, object)
    }

    /// Remove an object and its subtree.
    ///
    /// Removing the active panorama leaves it first, which stops its video
    /// and hides the video controls. Hover, press and infospot references
    /// into the subtree are dropped.
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        if !self.scene.contains(id) {
            return None;
        }
        let mut subtree = self.scene.descendants(id);
        subtree.push(id);

        if let Some(active) = self.panorama.filter(|p| subtree.contains(p)) {
            let _ = self.scene.dispatch(active, &ObjectEvent::Leave);
            self.panorama_left(active);
            self.panorama = None;
        }
        if self.pointer.forget(|target| subtree.contains(&target)) {
            self.reticle.disarm(&mut self.scheduler);
        }
        self.scene.remove(id)
    }

    /// Switch the active panorama. The current infospot is hidden, the
    /// previous panorama receives `Leave` and the new one `Enter`.
    pub fn set_panorama(&mut self, id: ObjectId) {
        if self.panorama == Some(id) {
            return;
        }
        let is_panorama = self
            .scene
            .object(id)
            .is_some_and(|obj| obj.as_panorama().is_some());
        if !is_panorama {
            log::warn!("set_panorama: {id:?} is not a panorama");
            return;
        }
        if let Some(infospot) = self.pointer.clear_infospot() {
            let _ = self.scene.dispatch(infospot, &ObjectEvent::HoverEnd);
        }
        if let Some(previous) = self.panorama.take() {
            let _ = self.scene.dispatch(previous, &ObjectEvent::Leave);
            self.panorama_left(previous);
        }
        self.panorama = Some(id);
        log::debug!("active panorama → {id:?}");
        let _ = self.scene.dispatch(id, &ObjectEvent::Enter);
        self.panorama_entered();
    }

    // -- Per-tick hooks -----------------------------------------------------

    /// Register a callback run on every update, after tweens and the
    /// camera control.
    pub fn add_update_callback(
        &mut self,
        callback: impl FnMut() + 'static,
    ) -> CallbackId {
        let id = CallbackId(self.next_callback);
        self.next_callback += 1;
        self.update_callbacks.push((id, Box::new(callback)));
        id
    }

    /// Remove an update callback. Returns `false` if it was not registered.
    pub fn remove_update_callback(&mut self, id: CallbackId) -> bool {
        let before = self.update_callbacks.len();
        self.update_callbacks.retain(|(entry, _)| *entry != id);
        self.update_callbacks.len() != before
    }

    /// Queue a tween, advanced at the start of every update.
    pub fn add_tween(&mut self, tween: Tween) -> TweenId {
        let id = self.tweens.add(tween);
        self.scheduler.start();
        id
    }

    /// Cancel a queued tween.
    pub fn cancel_tween(&mut self, id: TweenId) -> bool {
        self.tweens.cancel(id)
    }

    // -- Teardown -----------------------------------------------------------

    /// Tear everything down: host listeners, frame handles, scene and
    /// widget. One final frame is rendered so the surface shows the empty
    /// scene. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.host.clear();
        self.reticle.disarm(&mut self.scheduler);
        self.reticle_tap = false;
        self.scheduler.dispose();
        self.tweens.clear();
        self.pointer.reset();

        let _ = self.scene.broadcast(&ObjectEvent::Dispose);
        self.scene.clear();
        self.panorama = None;

        self.notify_widget(WidgetEvent::Dispose);
        self.widget = None;
        self.update_callbacks.clear();

        self.render();
        self.listeners.clear();
        self.disposed = true;
        log::debug!("viewer disposed after {} frames", self.renders);
    }
}

impl EventTarget<ViewerEvent> for Viewer {
    fn listeners_mut(&mut self) -> &mut Listeners<ViewerEvent> {
        &mut self.listeners
    }
}


#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::testing::viewer;
    use super::*;
    use crate::scene::{ObjectEventKind, ObjectKind, PanoramaInfo};

    #[test]
    fn first_panorama_becomes_active() {
        let (mut v, _) = viewer(Options::default());
        let _group = v.add(SceneObject::new(ObjectKind::Group));
        assert_eq!(v.panorama(), None);
        let a = v.add(SceneObject::panorama(PanoramaInfo::default()));
        let _b = v.add(SceneObject::panorama(PanoramaInfo::default()));
        assert_eq!(v.panorama(), Some(a));
    }

    #[test]
    fn set_panorama_leaves_previous_then_enters_next() {
        let (mut v, _) = viewer(Options::default());
        let a = v.add(SceneObject::panorama(PanoramaInfo::default()));
        let b = v.add(SceneObject::panorama(PanoramaInfo::default()));
        let log = Rc::new(RefCell::new(Vec::new()));
        for (id, kind) in
            [(a, ObjectEventKind::Leave), (b, ObjectEventKind::Enter)]
        {
            let l = Rc::clone(&log);
            let _ = v
                .scene_mut()
                .object_mut(id)
                .unwrap()
                .add_listener(kind, move |e| {
                    l.borrow_mut().push((id, e.kind()));
                });
        }
        v.set_panorama(b);
        v.set_panorama(b);
        assert_eq!(*log.borrow(), vec![
            (a, ObjectEventKind::Leave),
            (b, ObjectEventKind::Enter)
        ]);
    }

    #[test]
    fn set_panorama_rejects_non_panoramas() {
        let (mut v, _) = viewer(Options::default());
        let a = v.add(SceneObject::panorama(PanoramaInfo::default()));
        let mesh = v.add(SceneObject::new(ObjectKind::Mesh));
        v.set_panorama(mesh);
        assert_eq!(v.panorama(), Some(a));
    }

    #[test]
    fn removing_the_active_panorama_clears_it() {
        let (mut v, _) = viewer(Options::default());
        let a = v.add(SceneObject::panorama(PanoramaInfo::default()));
        assert!(v.remove(a).is_some());
        assert_eq!(v.panorama(), None);
    }

    #[test]
    fn update_callbacks_can_be_removed() {
        let (mut v, _) = viewer(Options::default());
        let hits = Rc::new(RefCell::new(0));
        let h = Rc::clone(&hits);
        let id = v.add_update_callback(move || *h.borrow_mut() += 1);
        let t0 = web_time::Instant::now();
        v.frame(t0);
        assert!(v.remove_update_callback(id));
        assert!(!v.remove_update_callback(id));
        v.frame(t0);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn dispose_leaves_no_listeners_or_frames() {
        let (mut v, log) = viewer(Options::default());
        let _ = v.add(SceneObject::panorama(PanoramaInfo::default()));
        v.toggle_vr();
        v.frame(web_time::Instant::now());
        let before = log.borrow().paths.len();

        v.dispose();
        assert!(v.host_bindings().is_empty());
        assert_eq!(v.scheduler().pending(), 0);
        assert!(v.scene().is_empty());
        assert!(!v.reticle_tap_registered());
        assert_eq!(log.borrow().paths.len(), before + 1);

        v.frame(web_time::Instant::now());
        v.dispose();
        assert_eq!(log.borrow().paths.len(), before + 1);
    }
}
