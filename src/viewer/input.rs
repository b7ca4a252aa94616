//! Routing host input into the viewer: pointer evaluation, camera-control
//! input, keyboard modifiers and resizes.

use glam::Vec2;
use web_time::Instant;

use super::host::{HostBindings, HostListener};
use super::{Viewer, ViewerEvent};
use crate::camera::OrientationSample;
use crate::events::EventTarget;
use crate::input::{
    EvalContext, Evaluation, InputEvent, PointerEvent, PointerPhase,
    PointerSource, Tap,
};
use crate::scene::{ObjectEvent, SceneObject};

impl Viewer {
    /// Feed one host input event to the viewer.
    ///
    /// Events whose host listener is not registered are dropped, so pointer
    /// input is ignored while the reticle drives interaction and everything
    /// is ignored after [`dispose`](Self::dispose).
    pub fn handle_input(&mut self, event: InputEvent) {
        if self.disposed {
            return;
        }
        match event {
            InputEvent::Pointer(pointer) => self.handle_pointer(&pointer),
            InputEvent::Scroll { delta } => {
                if self.mode.controls_mut().active_mut().handle_zoom(delta) {
                    self.drive_control();
                }
            }
            InputEvent::ModifiersChanged { control } => {
                if self.listening(HostListener::KeyDown) {
                    self.control_held = control;
                }
            }
            InputEvent::Resize { width, height } => {
                if self.listening(HostListener::Resize) {
                    self.handle_window_resize(width, height);
                }
            }
            InputEvent::DeviceOrientation(sample) => {
                if self.listening(HostListener::DeviceOrientation) {
                    self.handle_orientation(sample);
                }
            }
            InputEvent::ScreenOrientation { degrees } => {
                if self.listening(HostListener::OrientationChange) {
                    self.mode.controls_mut().set_screen_orientation(degrees);
                    self.drive_control();
                }
            }
        }
    }

    fn listening(&self, listener: HostListener) -> bool {
        self.host.is_registered(HostBindings::WINDOW, listener)
    }

    /// Container listener a pointer sample arrives through. Touch moves
    /// have none: only the camera control follows them.
    fn pointer_listener(event: &PointerEvent) -> Option<HostListener> {
        match (event.source, event.phase) {
            (PointerSource::Mouse, PointerPhase::Down) => {
                Some(HostListener::MouseDown)
            }
            (PointerSource::Mouse, PointerPhase::Up) => {
                Some(HostListener::MouseUp)
            }
            (PointerSource::Mouse, _) => Some(HostListener::MouseMove),
            (PointerSource::Touch, PointerPhase::Down) => {
                Some(HostListener::TouchStart)
            }
            (PointerSource::Touch, PointerPhase::Up) => {
                Some(HostListener::TouchEnd)
            }
            (PointerSource::Touch, _) => None,
        }
    }

    fn handle_pointer(&mut self, event: &PointerEvent) {
        // The camera control listens on the container on its own, whichever
        // input path drives picking.
        if event.on_surface {
            self.drag(event);
        }
        let registered = Self::pointer_listener(event).is_some_and(|listener| {
            self.host.is_registered(HostBindings::CONTAINER, listener)
        });
        if !registered {
            return;
        }
        let Some(tap) = self.pointer.sample(event) else {
            return;
        };
        let now = self.now();
        let eval = self.evaluate_tap(tap, now);
        if tap.click && !eval.consumed {
            self.click_background();
        }
    }

    /// Feed pointer motion to the camera control while a press is held.
    fn drag(&mut self, event: &PointerEvent) {
        match event.phase {
            PointerPhase::Down => self.drag_from = Some(event.position),
            PointerPhase::Move => {
                let Some(from) = self.drag_from else {
                    return;
                };
                self.drag_from = Some(event.position);
                let delta = event.position - from;
                if self.mode.controls_mut().active_mut().handle_drag(delta) {
                    self.drive_control();
                }
            }
            PointerPhase::Up => self.drag_from = None,
            PointerPhase::None => {}
        }
    }

    /// A click that landed on no infospot: hide infospots and/or toggle the
    /// control bar, as configured.
    fn click_background(&mut self) {
        if self.options.interaction.auto_hide_infospot {
            if let Some(panorama) = self.panorama {
                let _ = self
                    .scene
                    .dispatch(panorama, &ObjectEvent::ToggleInfospotVisibility);
            }
        }
        if self.options.control_bar.auto_hide {
            self.toggle_control_bar();
        }
    }

    /// Resolve a tap, update hover/press state, then deliver the resulting
    /// events. Listeners run only after the state machine has settled.
    pub(super) fn evaluate_tap(
        &mut self,
        tap: Tap,
        now: Instant,
    ) -> Evaluation {
        let resolution = self.resolver.resolve(
            &self.scene,
            &self.camera,
            tap.position,
            self.panorama,
        );
        let object_is_infospot = resolution
            .object
            .and_then(|id| self.scene.object(id))
            .is_some_and(SceneObject::is_infospot);
        let ctx = EvalContext {
            panorama: self.panorama,
            reticle_active: self.mode.reticle_active(),
            object_is_infospot,
        };
        let eval = self.pointer.evaluate(tap, &resolution, ctx);

        if ctx.reticle_active {
            if eval.entered.is_some() {
                self.reticle.arm(now, &mut self.scheduler);
            } else if eval.left.is_some() {
                self.reticle.disarm(&mut self.scheduler);
            }
        }
        if self.control_held {
            self.output_panorama_point(tap.position);
        }

        for (target, event) in &eval.dispatches {
            let _ = self.scene.dispatch(*target, event);
        }
        eval
    }

    /// Log the panorama-surface point under `screen`, for placing
    /// infospots by hand.
    fn output_panorama_point(&self, screen: Vec2) {
        let Some(panorama) = self.panorama else {
            return;
        };
        if let Some(p) = self.resolver.panorama_point(
            &self.scene,
            &self.camera,
            screen,
            panorama,
        ) {
            log::info!("{{ {:.2}, {:.2}, {:.2} }}", -p.x, p.y, p.z);
        }
    }

    fn handle_orientation(&mut self, sample: OrientationSample) {
        if self.mode.controls_mut().active_mut().handle_orientation(sample) {
            self.drive_control();
        }
    }

    /// In passive mode, apply pending control input now and draw it.
    /// Continuous mode picks it up on the next tick.
    fn drive_control(&mut self) {
        if !self.scheduler.is_passive() {
            return;
        }
        if self
            .mode
            .controls_mut()
            .active_mut()
            .update(&mut self.camera, false)
        {
            self.notify_change();
        }
    }

    // -- Resizing -----------------------------------------------------------

    /// The host window changed size. An auto-created (or fullscreen)
    /// container follows it.
    pub fn handle_window_resize(&mut self, width: u32, height: u32) {
        self.window = (width, height);
        let _ = self.container.on_window_resize(width, height);
        self.container_resized();
    }

    /// Resize a host-provided container.
    pub fn set_container_size(&mut self, width: u32, height: u32) {
        self.container.set_size(width, height);
        self.container_resized();
    }

    pub(super) fn container_resized(&mut self) {
        let (width, height) = self.container.size();
        self.camera.aspect = self.container.aspect();
        self.backend.resize(width, height);
        self.resolver.set_surface(self.container.surface());
        if self.mode.reticle_active() {
            self.refresh_reticle_center();
        }
        self.notify_change();
        let _ = self.dispatch(&ViewerEvent::WindowResize { width, height });
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec3;

    use super::super::testing::{passive, viewer};
    use super::*;
    use crate::input::InteractionState;
    use crate::options::Options;
    use crate::scene::{ObjectEventKind, ObjectId, ObjectKind, PanoramaInfo};
    use crate::viewer::{ViewerEventKind, WidgetEventKind};

    const CENTER: Vec2 = Vec2::new(400.0, 300.0);

    fn mouse(phase: PointerPhase, at: Vec2) -> InputEvent {
        InputEvent::Pointer(PointerEvent::mouse(phase, at))
    }

    fn record(
        v: &mut Viewer,
        id: ObjectId,
        kinds: &[ObjectEventKind],
    ) -> Rc<RefCell<Vec<ObjectEventKind>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        for &kind in kinds {
            let s = Rc::clone(&seen);
            let _ = v
                .scene_mut()
                .object_mut(id)
                .unwrap()
                .add_listener(kind, move |_| s.borrow_mut().push(kind));
        }
        seen
    }

    fn scene(v: &mut Viewer, kind: ObjectKind) -> (ObjectId, ObjectId) {
        let pano = v.add(SceneObject::panorama(PanoramaInfo::default()));
        let target = v
            .add_child(
                pano,
                SceneObject::new(kind)
                    .at(Vec3::new(0.0, 0.0, -50.0))
                    .with_sphere(5.0),
            )
            .unwrap();
        (pano, target)
    }

    #[test]
    fn click_reaches_entity_and_panorama() {
        let (mut v, _) = viewer(Options::default());
        let (pano, target) = scene(&mut v, ObjectKind::Mesh);
        let on_target = record(&mut v, target, &[
            ObjectEventKind::HoverEnter,
            ObjectEventKind::PressStart,
            ObjectEventKind::PressStop,
            ObjectEventKind::Click,
        ]);
        let on_pano = record(&mut v, pano, &[
            ObjectEventKind::SceneClick,
            ObjectEventKind::ToggleInfospotVisibility,
        ]);

        v.handle_input(mouse(PointerPhase::Down, CENTER));
        v.handle_input(mouse(PointerPhase::Up, CENTER + Vec2::new(4.0, -4.0)));
        assert_eq!(*on_target.borrow(), vec![
            ObjectEventKind::HoverEnter,
            ObjectEventKind::PressStart,
            ObjectEventKind::PressStop,
            ObjectEventKind::Click
        ]);
        assert_eq!(*on_pano.borrow(), vec![
            ObjectEventKind::SceneClick,
            ObjectEventKind::ToggleInfospotVisibility
        ]);
    }

    #[test]
    fn infospot_click_skips_auto_hide() {
        let mut options = Options::default();
        options.control_bar.auto_hide = true;
        let (mut v, _) = viewer(options);
        let (pano, _) = scene(&mut v, ObjectKind::Infospot);
        let on_pano =
            record(&mut v, pano, &[ObjectEventKind::ToggleInfospotVisibility]);
        let toggles = Rc::new(RefCell::new(0));
        let t = Rc::clone(&toggles);
        let _ = v
            .widget_mut()
            .unwrap()
            .add_listener(WidgetEventKind::ControlBarToggle, move |_| {
                *t.borrow_mut() += 1;
            });

        v.handle_input(mouse(PointerPhase::Down, CENTER));
        v.handle_input(mouse(PointerPhase::Up, CENTER));
        assert!(on_pano.borrow().is_empty());
        assert_eq!(*toggles.borrow(), 0);

        // Background click toggles both.
        v.handle_input(mouse(PointerPhase::Down, Vec2::ZERO));
        v.handle_input(mouse(PointerPhase::Up, Vec2::ZERO));
        assert_eq!(on_pano.borrow().len(), 1);
        assert_eq!(*toggles.borrow(), 1);
    }

    #[test]
    fn pointer_ignored_while_reticle_drives_input() {
        let mut options = Options::default();
        options.interaction.enable_reticle = true;
        let (mut v, _) = viewer(options);
        let (_, target) = scene(&mut v, ObjectKind::Mesh);
        let seen = record(&mut v, target, &[ObjectEventKind::PressStart]);
        v.handle_input(mouse(PointerPhase::Down, CENTER));
        assert!(seen.borrow().is_empty());
        assert!(!v.pointer().is_pressed());
    }

    #[test]
    fn toggle_vr_twice_keeps_exactly_one_input_path() {
        let (mut v, _) = viewer(Options::default());
        let exclusive = |v: &Viewer| {
            v.pointer_input_registered() != v.reticle_tap_registered()
        };
        assert!(exclusive(&v));
        assert!(v.pointer_input_registered());
        v.toggle_vr();
        assert!(exclusive(&v));
        assert!(v.reticle_tap_registered());
        assert!(v.reticle().is_visible());
        v.toggle_vr();
        assert!(exclusive(&v));
        assert!(v.pointer_input_registered());
        assert!(!v.reticle().is_visible());
    }

    /// Shared, ordered record of `kinds` as delivered to any of `ids`.
    fn journal(
        v: &mut Viewer,
        ids: &[ObjectId],
        kinds: &[ObjectEventKind],
    ) -> Rc<RefCell<Vec<(ObjectId, ObjectEventKind)>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        for &id in ids {
            for &kind in kinds {
                let s = Rc::clone(&seen);
                let _ = v
                    .scene_mut()
                    .object_mut(id)
                    .unwrap()
                    .add_listener(kind, move |_| {
                        s.borrow_mut().push((id, kind));
                    });
            }
        }
        seen
    }

    fn screen_point(v: &Viewer, world: Vec3) -> Vec2 {
        let ndc = v.camera().view_proj().project_point3(world);
        Vec2::new((ndc.x + 1.0) * 400.0, (1.0 - ndc.y) * 300.0)
    }

    #[test]
    fn switching_input_source_releases_hover_and_press() {
        let (mut v, _) = viewer(Options::default());
        let (pano, b) = scene(&mut v, ObjectKind::Mesh);
        let off_center = Vec3::new(20.0, 0.0, -50.0);
        let a = v
            .add_child(
                pano,
                SceneObject::new(ObjectKind::Mesh)
                    .at(off_center)
                    .with_sphere(5.0),
            )
            .unwrap();
        let seen = journal(&mut v, &[a, b], &[
            ObjectEventKind::HoverEnter,
            ObjectEventKind::HoverLeave,
            ObjectEventKind::PressStop,
        ]);

        let at_a = screen_point(&v, off_center);
        v.handle_input(mouse(PointerPhase::Move, at_a));
        v.handle_input(mouse(PointerPhase::Down, at_a));
        assert_eq!(v.pointer().interaction().hovered, Some(a));
        assert_eq!(v.pointer().interaction().pressed_object, Some(a));
        seen.borrow_mut().clear();

        // The reticle takes over and finds B at the center.
        v.toggle_vr();
        v.frame(Instant::now());
        assert_eq!(*seen.borrow(), vec![
            (a, ObjectEventKind::HoverLeave),
            (a, ObjectEventKind::PressStop),
            (b, ObjectEventKind::HoverEnter)
        ]);
        assert_eq!(v.pointer().interaction().pressed_object, None);

        // And the mouse takes it back.
        seen.borrow_mut().clear();
        v.toggle_vr();
        assert_eq!(*seen.borrow(), vec![(b, ObjectEventKind::HoverLeave)]);
        assert_eq!(v.pointer().interaction(), InteractionState::default());
        assert!(!v.reticle().is_armed());
    }

    #[test]
    fn removing_a_pressed_subtree_drops_pointer_references() {
        let (mut v, _) = viewer(Options::default());
        let (pano, target) = scene(&mut v, ObjectKind::Mesh);
        let on_pano = record(&mut v, pano, &[ObjectEventKind::Leave]);
        v.handle_input(mouse(PointerPhase::Down, CENTER));
        assert_eq!(v.pointer().interaction().hovered, Some(target));
        assert_eq!(v.pointer().interaction().pressed_object, Some(target));

        assert!(v.remove(pano).is_some());
        assert_eq!(*on_pano.borrow(), vec![ObjectEventKind::Leave]);
        assert_eq!(v.panorama(), None);
        assert_eq!(v.pointer().interaction(), InteractionState::default());

        v.handle_input(mouse(PointerPhase::Up, CENTER));
        assert!(!v.pointer().is_pressed());
    }

    #[test]
    fn mode_change_reaches_viewer_and_scene() {
        let (mut v, _) = viewer(Options::default());
        let (pano, target) = scene(&mut v, ObjectKind::Mesh);
        let on_pano = record(&mut v, pano, &[ObjectEventKind::ModeChange]);
        let on_target = record(&mut v, target, &[ObjectEventKind::ModeChange]);
        let modes = Rc::new(RefCell::new(0));
        let m = Rc::clone(&modes);
        let _ = v.add_listener(ViewerEventKind::ModeChange, move |_| {
            *m.borrow_mut() += 1;
        });
        v.toggle_vr();
        assert_eq!(*modes.borrow(), 1);
        assert_eq!(on_pano.borrow().len(), 1);
        assert_eq!(on_target.borrow().len(), 1);
    }

    #[test]
    fn out_of_range_control_index_selects_first() {
        let (mut v, _) = viewer(Options::default());
        let _ = scene(&mut v, ObjectKind::Mesh);
        v.enable_control(1);
        v.enable_control(0);
        let reference = v.camera().clone();
        let name = v.control_name();
        for index in [2, 7, usize::MAX] {
            v.enable_control(1);
            v.enable_control(index);
            assert_eq!(v.control_name(), name);
            assert_eq!(*v.camera(), reference);
        }
        assert_eq!(v.next_control_name(), "device-orientation");
    }

    #[test]
    fn resize_updates_camera_backend_and_listeners() {
        let (mut v, log) = viewer(Options::default());
        let sizes = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&sizes);
        let _ = v.add_listener(ViewerEventKind::WindowResize, move |e| {
            if let ViewerEvent::WindowResize { width, height } = e {
                s.borrow_mut().push((*width, *height));
            }
        });
        v.handle_input(InputEvent::Resize {
            width: 1000,
            height: 500,
        });
        // Host-provided container keeps its size.
        assert_eq!(*sizes.borrow(), vec![(800, 600)]);
        v.set_container_size(1000, 500);
        assert!((v.camera().aspect - 2.0).abs() < 1e-6);
        assert_eq!(log.borrow().resizes.last(), Some(&(1000, 500)));
    }

    #[test]
    fn passive_scroll_zoom_renders_once() {
        let (mut v, log) = viewer(passive());
        let _ = scene(&mut v, ObjectKind::Mesh);
        let fov = v.camera().fov;
        let before = log.borrow().paths.len();
        v.handle_input(InputEvent::Scroll { delta: 1.0 });
        assert!(v.camera().fov < fov);
        assert_eq!(log.borrow().paths.len(), before + 1);
    }

    #[test]
    fn nothing_routes_after_dispose() {
        let (mut v, log) = viewer(passive());
        let _ = scene(&mut v, ObjectKind::Mesh);
        v.dispose();
        let before = log.borrow().paths.len();
        v.handle_input(InputEvent::Scroll { delta: 1.0 });
        v.handle_input(mouse(PointerPhase::Down, CENTER));
        v.handle_input(InputEvent::Resize {
            width: 10,
            height: 10,
        });
        assert_eq!(log.borrow().paths.len(), before);
        assert!(!v.pointer().is_pressed());
    }
}
