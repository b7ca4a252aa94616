//! Unified pointer state machine.
//!
//! Mouse, single-touch and synthesized reticle input all collapse into one
//! [`PointerPhase`] plus a screen position. Each evaluation takes a resolved
//! target and produces the ordered list of object events it implies.
//! Nothing is dispatched here; the caller delivers the events after the
//! state update, so listeners always observe settled hover/press state.

use glam::Vec2;

use super::event::{PointerEvent, PointerPhase};
use crate::picking::Resolution;
use crate::scene::{ObjectEvent, ObjectId};

/// Default per-axis click tolerance in pixels.
pub const DEFAULT_CLICK_TOLERANCE: f32 = 10.0;

/// Current raw pointer sample and interaction phase.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    /// Position of the last on-surface sample.
    pub position: Vec2,
    /// Position recorded at the last press.
    pub press_position: Option<Vec2>,
    /// Current phase.
    pub phase: PointerPhase,
}

/// Per-viewer hover, press and infospot references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionState {
    /// The single currently hovered entity.
    pub hovered: Option<ObjectId>,
    /// Pressed raw object.
    pub pressed_object: Option<ObjectId>,
    /// Pressed logical entity.
    pub pressed_entity: Option<ObjectId>,
    /// Infospot the pointer last rested on.
    pub infospot: Option<ObjectId>,
}

/// One pointer position to evaluate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tap {
    /// Screen position to resolve.
    pub position: Vec2,
    /// Whether the evaluation is a classified click.
    pub click: bool,
}

/// Facts about the evaluation's surroundings supplied by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalContext {
    /// Active panorama.
    pub panorama: Option<ObjectId>,
    /// Reticle input is the current source.
    pub reticle_active: bool,
    /// The resolved raw object is an infospot.
    pub object_is_infospot: bool,
}

/// Result of one evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    /// Events to deliver, in order.
    pub dispatches: Vec<(ObjectId, ObjectEvent)>,
    /// Entity that just became hovered.
    pub entered: Option<ObjectId>,
    /// Entity that just stopped being hovered.
    pub left: Option<ObjectId>,
    /// A click landed on an infospot and consumed the release.
    pub consumed: bool,
}

impl Evaluation {
    fn push(&mut self, target: ObjectId, event: ObjectEvent) {
        self.dispatches.push((target, event));
    }
}

/// Turns raw pointer samples into hover/press/click transitions.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerStateMachine {
    pointer: PointerState,
    interaction: InteractionState,
    click_tolerance: f32,
}

impl Default for PointerStateMachine {
    fn default() -> Self {
        Self::new(DEFAULT_CLICK_TOLERANCE)
    }
}

impl PointerStateMachine {
    /// State machine with the given per-axis click tolerance.
    #[must_use]
    pub fn new(click_tolerance: f32) -> Self {
        Self {
            pointer: PointerState::default(),
            interaction: InteractionState::default(),
            click_tolerance,
        }
    }

    /// Current pointer sample.
    #[must_use]
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Current hover/press references.
    #[must_use]
    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    /// Whether a press is in progress.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        matches!(self.pointer.phase, PointerPhase::Down)
            || (self.pointer.phase == PointerPhase::Move
                && self.pointer.press_position.is_some())
    }

    /// Whether `up` is within tolerance of `down` on both axes.
    #[must_use]
    pub fn within_tolerance(&self, down: Vec2, up: Vec2) -> bool {
        let d = (down - up).abs();
        d.x <= self.click_tolerance && d.y <= self.click_tolerance
    }

    /// Record a raw pointer sample. Returns the tap to evaluate, or `None`
    /// if the sample is not aimed at the render surface.
    pub fn sample(&mut self, event: &PointerEvent) -> Option<Tap> {
        if !event.on_surface {
            return None;
        }
        self.pointer.position = event.changed_touch.unwrap_or(event.position);
        match event.phase {
            PointerPhase::Down => {
                self.pointer.press_position = Some(event.position);
                self.pointer.phase = PointerPhase::Down;
                Some(Tap {
                    position: event.position,
                    click: false,
                })
            }
            PointerPhase::Move | PointerPhase::None => {
                self.pointer.phase = event.phase;
                Some(Tap {
                    position: event.position,
                    click: false,
                })
            }
            PointerPhase::Up => {
                let click = self.pointer.press_position.is_some_and(|down| {
                    self.within_tolerance(down, event.position)
                        || event
                            .changed_touch
                            .is_some_and(|t| self.within_tolerance(down, t))
                });
                self.pointer.phase = PointerPhase::Up;
                Some(Tap {
                    position: event.changed_touch.unwrap_or(event.position),
                    click,
                })
            }
        }
    }

    /// Evaluate a tap against its resolved target.
    pub fn evaluate(
        &mut self,
        tap: Tap,
        resolution: &Resolution,
        ctx: EvalContext,
    ) -> Evaluation {
        let mut eval = Evaluation::default();
        let phase = self.pointer.phase;
        if phase == PointerPhase::Up {
            self.pointer.phase = PointerPhase::None;
            self.pointer.press_position = None;
        }
        let Some(panorama) = ctx.panorama else {
            return eval;
        };
        let pointer = tap.position;
        let object = resolution.object;
        let entity = resolution.entity;

        if phase == PointerPhase::Up {
            self.release(entity, object, pointer, &mut eval);
        }

        if tap.click {
            eval.push(
                panorama,
                ObjectEvent::SceneClick {
                    hits: resolution.hits.clone(),
                    pointer,
                },
            );
            if let Some(entity) = entity {
                eval.push(entity, ObjectEvent::ClickEntity { pointer });
            }
            if let Some(object) = object {
                eval.push(object, ObjectEvent::Click { pointer });
            }
        } else {
            eval.push(
                panorama,
                ObjectEvent::SceneHover {
                    hits: resolution.hits.clone(),
                    pointer,
                },
            );
            self.hover(phase, entity, object, pointer, ctx, &mut eval);
        }

        match object {
            Some(object) if ctx.object_is_infospot => {
                self.interaction.infospot = Some(object);
                eval.consumed = tap.click;
            }
            _ => {
                if let Some(infospot) = self.interaction.infospot.take() {
                    eval.push(infospot, ObjectEvent::HoverEnd);
                }
            }
        }
        eval
    }

    /// Release: press-stop goes only to a pressed target that is still
    /// under the pointer. Both press references clear either way.
    fn release(
        &mut self,
        entity: Option<ObjectId>,
        object: Option<ObjectId>,
        pointer: Vec2,
        eval: &mut Evaluation,
    ) {
        if let Some(pressed) = self.interaction.pressed_entity.take() {
            if entity == Some(pressed) {
                eval.push(pressed, ObjectEvent::PressStopEntity { pointer });
            }
        }
        if let Some(pressed) = self.interaction.pressed_object.take() {
            if object == Some(pressed) {
                eval.push(pressed, ObjectEvent::PressStop { pointer });
            }
        }
    }

    fn hover(
        &mut self,
        phase: PointerPhase,
        entity: Option<ObjectId>,
        object: Option<ObjectId>,
        pointer: Vec2,
        ctx: EvalContext,
        eval: &mut Evaluation,
    ) {
        let state = &mut self.interaction;

        if let Some(hovered) = state.hovered {
            if Some(hovered) != entity {
                eval.push(hovered, ObjectEvent::HoverLeave { pointer });
                eval.left = Some(hovered);
                state.hovered = None;
            }
        }

        if let (Some(entity), Some(object)) = (entity, object) {
            if state.hovered != Some(entity) {
                state.hovered = Some(entity);
                eval.push(entity, ObjectEvent::HoverEnter { pointer });
                eval.entered = Some(entity);
            }
            if phase == PointerPhase::Down {
                if state.pressed_entity != Some(entity) {
                    state.pressed_entity = Some(entity);
                    eval.push(
                        entity,
                        ObjectEvent::PressStartEntity { pointer },
                    );
                }
                if state.pressed_object != Some(object) {
                    state.pressed_object = Some(object);
                    eval.push(object, ObjectEvent::PressStart { pointer });
                }
            }
            if phase == PointerPhase::Move || ctx.reticle_active {
                eval.push(object, ObjectEvent::Hover { pointer });
                if let Some(pressed) = state.pressed_entity {
                    eval.push(
                        pressed,
                        ObjectEvent::PressMoveEntity { pointer },
                    );
                }
                if let Some(pressed) = state.pressed_object {
                    eval.push(pressed, ObjectEvent::PressMove { pointer });
                }
            }
        }

        if entity.is_none() {
            if let Some(pressed) = state.pressed_entity.take() {
                eval.push(pressed, ObjectEvent::PressStopEntity { pointer });
            }
        }
        if object.is_none() {
            if let Some(pressed) = state.pressed_object.take() {
                eval.push(pressed, ObjectEvent::PressStop { pointer });
            }
        }
    }

    /// Drop the current infospot reference, returning it.
    pub fn clear_infospot(&mut self) -> Option<ObjectId> {
        self.interaction.infospot.take()
    }

    /// Let go of every hover, press and infospot reference at once, as when
    /// the pointer stops driving interaction. Returns the leave and stop
    /// events the old targets are owed, in delivery order.
    pub fn release_all(&mut self) -> Vec<(ObjectId, ObjectEvent)> {
        let pointer = self.pointer.position;
        let state = std::mem::take(&mut self.interaction);
        self.pointer = PointerState {
            position: pointer,
            ..PointerState::default()
        };

        let mut released = Vec::new();
        if let Some(hovered) = state.hovered {
            released.push((hovered, ObjectEvent::HoverLeave { pointer }));
        }
        if let Some(pressed) = state.pressed_entity {
            released.push((pressed, ObjectEvent::PressStopEntity { pointer }));
        }
        if let Some(pressed) = state.pressed_object {
            released.push((pressed, ObjectEvent::PressStop { pointer }));
        }
        if let Some(infospot) = state.infospot {
            released.push((infospot, ObjectEvent::HoverEnd));
        }
        released
    }

    /// Silently drop every reference for which `removed` holds; the objects
    /// are gone and can no longer be told. Returns `true` if the hovered
    /// entity was one of them.
    pub fn forget(&mut self, removed: impl Fn(ObjectId) -> bool) -> bool {
        let state = &mut self.interaction;
        let hovered = clear_if(&mut state.hovered, &removed);
        let _ = clear_if(&mut state.pressed_entity, &removed);
        let _ = clear_if(&mut state.pressed_object, &removed);
        let _ = clear_if(&mut state.infospot, &removed);
        hovered
    }

    /// Forget every hover/press reference.
    pub fn reset(&mut self) {
        self.pointer = PointerState::default();
        self.interaction = InteractionState::default();
    }
}

fn clear_if(
    slot: &mut Option<ObjectId>,
    removed: &impl Fn(ObjectId) -> bool,
) -> bool {
    if slot.is_some_and(removed) {
        *slot = None;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Event;
    use crate::scene::{ObjectEventKind, ObjectKind, Scene, SceneObject};

    struct Fixture {
        machine: PointerStateMachine,
        pano: ObjectId,
        a: ObjectId,
        b: ObjectId,
    }

    fn fixture() -> Fixture {
        let mut scene = Scene::new();
        let pano = scene.insert(SceneObject::new(ObjectKind::Group));
        let a = scene.insert(SceneObject::new(ObjectKind::Mesh));
        let b = scene.insert(SceneObject::new(ObjectKind::Mesh));
        Fixture {
            machine: PointerStateMachine::default(),
            pano,
            a,
            b,
        }
    }

    fn on(target: Option<ObjectId>) -> Resolution {
        Resolution {
            hits: Vec::new(),
            object: target,
            entity: target,
        }
    }

    fn ctx(pano: ObjectId) -> EvalContext {
        EvalContext {
            panorama: Some(pano),
            reticle_active: false,
            object_is_infospot: false,
        }
    }

    fn step(
        f: &mut Fixture,
        event: PointerEvent,
        target: Option<ObjectId>,
    ) -> Evaluation {
        let tap = f.machine.sample(&event).unwrap();
        let pano = f.pano;
        f.machine.evaluate(tap, &on(target), ctx(pano))
    }

    fn kinds_for(eval: &Evaluation, id: ObjectId) -> Vec<ObjectEventKind> {
        eval.dispatches
            .iter()
            .filter(|(t, _)| *t == id)
            .map(|(_, e)| e.kind())
            .collect()
    }

    fn mouse(phase: PointerPhase, x: f32, y: f32) -> PointerEvent {
        PointerEvent::mouse(phase, Vec2::new(x, y))
    }

    #[test]
    fn click_iff_within_tolerance_on_both_axes() {
        let machine = PointerStateMachine::new(10.0);
        let down = Vec2::new(100.0, 100.0);
        for (dx, dy, click) in [
            (0.0, 0.0, true),
            (10.0, -10.0, true),
            (-10.0, 10.0, true),
            (10.5, 0.0, false),
            (0.0, -10.5, false),
            (30.0, 30.0, false),
        ] {
            let mut m = machine.clone();
            let _ = m.sample(&PointerEvent::mouse(PointerPhase::Down, down));
            let tap = m
                .sample(&PointerEvent::mouse(
                    PointerPhase::Up,
                    down + Vec2::new(dx, dy),
                ))
                .unwrap();
            assert_eq!(tap.click, click, "offset ({dx}, {dy})");
        }
    }

    #[test]
    fn touch_release_uses_changed_touch() {
        let mut m = PointerStateMachine::default();
        let _ = m.sample(&PointerEvent::touch(
            PointerPhase::Down,
            Vec2::new(50.0, 50.0),
        ));
        let mut up =
            PointerEvent::touch(PointerPhase::Up, Vec2::new(55.0, 45.0));
        up.position = Vec2::ZERO;
        let tap = m.sample(&up).unwrap();
        assert!(tap.click);
        assert_eq!(tap.position, Vec2::new(55.0, 45.0));
    }

    #[test]
    fn off_surface_events_are_ignored() {
        let mut m = PointerStateMachine::default();
        let event = mouse(PointerPhase::Down, 1.0, 1.0).off_surface();
        assert!(m.sample(&event).is_none());
        assert_eq!(m.pointer(), PointerState::default());
    }

    #[test]
    fn direct_switch_emits_one_leave_then_one_enter() {
        let mut f = fixture();
        let (a, b) = (f.a, f.b);
        let e1 = step(&mut f, mouse(PointerPhase::Move, 0.0, 0.0), Some(a));
        assert_eq!(kinds_for(&e1, a), vec![
            ObjectEventKind::HoverEnter,
            ObjectEventKind::Hover
        ]);
        // Settled: no repeated enter.
        let e2 = step(&mut f, mouse(PointerPhase::Move, 1.0, 0.0), Some(a));
        assert_eq!(kinds_for(&e2, a), vec![ObjectEventKind::Hover]);

        let e3 = step(&mut f, mouse(PointerPhase::Move, 2.0, 0.0), Some(b));
        let order: Vec<_> = e3
            .dispatches
            .iter()
            .filter(|(_, e)| {
                matches!(
                    e.kind(),
                    ObjectEventKind::HoverEnter | ObjectEventKind::HoverLeave
                )
            })
            .map(|(t, e)| (*t, e.kind()))
            .collect();
        assert_eq!(order, vec![
            (a, ObjectEventKind::HoverLeave),
            (b, ObjectEventKind::HoverEnter)
        ]);
        assert_eq!(e3.left, Some(a));
        assert_eq!(e3.entered, Some(b));

        let e4 = step(&mut f, mouse(PointerPhase::Move, 3.0, 0.0), None);
        assert_eq!(kinds_for(&e4, b), vec![ObjectEventKind::HoverLeave]);
        let e5 = step(&mut f, mouse(PointerPhase::Move, 4.0, 0.0), None);
        assert!(kinds_for(&e5, b).is_empty());
    }

    #[test]
    fn press_start_only_on_new_target() {
        let mut f = fixture();
        let a = f.a;
        let e1 = step(&mut f, mouse(PointerPhase::Down, 0.0, 0.0), Some(a));
        assert_eq!(kinds_for(&e1, a), vec![
            ObjectEventKind::HoverEnter,
            ObjectEventKind::PressStartEntity,
            ObjectEventKind::PressStart
        ]);
        let e2 = step(&mut f, mouse(PointerPhase::Down, 0.0, 0.0), Some(a));
        assert!(kinds_for(&e2, a).is_empty());
    }

    #[test]
    fn press_move_then_click_release() {
        let mut f = fixture();
        let (pano, a) = (f.pano, f.a);
        let _ = step(&mut f, mouse(PointerPhase::Down, 0.0, 0.0), Some(a));
        let moved = step(&mut f, mouse(PointerPhase::Move, 3.0, 3.0), Some(a));
        assert_eq!(kinds_for(&moved, a), vec![
            ObjectEventKind::Hover,
            ObjectEventKind::PressMoveEntity,
            ObjectEventKind::PressMove
        ]);

        let up = step(&mut f, mouse(PointerPhase::Up, 4.0, 4.0), Some(a));
        assert_eq!(kinds_for(&up, a), vec![
            ObjectEventKind::PressStopEntity,
            ObjectEventKind::PressStop,
            ObjectEventKind::ClickEntity,
            ObjectEventKind::Click
        ]);
        assert_eq!(kinds_for(&up, pano), vec![ObjectEventKind::SceneClick]);
        assert_eq!(f.machine.interaction().pressed_entity, None);
        assert_eq!(f.machine.pointer().phase, PointerPhase::None);
    }

    #[test]
    fn drag_release_fires_no_click() {
        let mut f = fixture();
        let (pano, a) = (f.pano, f.a);
        let _ = step(&mut f, mouse(PointerPhase::Down, 0.0, 0.0), Some(a));
        let up = step(&mut f, mouse(PointerPhase::Up, 80.0, 0.0), Some(a));
        assert!(!kinds_for(&up, a).contains(&ObjectEventKind::Click));
        assert_eq!(kinds_for(&up, pano), vec![ObjectEventKind::SceneHover]);
    }

    #[test]
    fn losing_the_target_stops_the_press() {
        let mut f = fixture();
        let a = f.a;
        let _ = step(&mut f, mouse(PointerPhase::Down, 0.0, 0.0), Some(a));
        let e = step(&mut f, mouse(PointerPhase::Move, 90.0, 0.0), None);
        assert_eq!(kinds_for(&e, a), vec![
            ObjectEventKind::HoverLeave,
            ObjectEventKind::PressStopEntity,
            ObjectEventKind::PressStop
        ]);
        let up = step(&mut f, mouse(PointerPhase::Up, 90.0, 0.0), None);
        assert!(kinds_for(&up, a).is_empty());
    }

    #[test]
    fn no_panorama_emits_nothing() {
        let mut f = fixture();
        let a = f.a;
        let tap = f
            .machine
            .sample(&mouse(PointerPhase::Move, 0.0, 0.0))
            .unwrap();
        let ctx = EvalContext {
            panorama: None,
            reticle_active: false,
            object_is_infospot: false,
        };
        let eval = f.machine.evaluate(tap, &on(Some(a)), ctx);
        assert_eq!(eval, Evaluation::default());
    }

    #[test]
    fn release_all_ends_hover_and_press_in_order() {
        let mut f = fixture();
        let a = f.a;
        let _ = step(&mut f, mouse(PointerPhase::Move, 5.0, 5.0), Some(a));
        let _ = step(&mut f, mouse(PointerPhase::Down, 6.0, 5.0), Some(a));

        let released = f.machine.release_all();
        let kinds: Vec<_> =
            released.iter().map(|(t, e)| (*t, e.kind())).collect();
        assert_eq!(kinds, vec![
            (a, ObjectEventKind::HoverLeave),
            (a, ObjectEventKind::PressStopEntity),
            (a, ObjectEventKind::PressStop)
        ]);
        assert_eq!(released[0].1, ObjectEvent::HoverLeave {
            pointer: Vec2::new(6.0, 5.0)
        });
        assert_eq!(f.machine.interaction(), InteractionState::default());
        assert!(!f.machine.is_pressed());
        assert!(f.machine.release_all().is_empty());
    }

    #[test]
    fn forget_drops_references_without_events() {
        let mut f = fixture();
        let (a, b) = (f.a, f.b);
        let _ = step(&mut f, mouse(PointerPhase::Down, 0.0, 0.0), Some(a));
        assert!(!f.machine.forget(|id| id == b));
        assert_eq!(f.machine.interaction().pressed_object, Some(a));

        assert!(f.machine.forget(|id| id == a));
        assert_eq!(f.machine.interaction(), InteractionState::default());
        // Nothing is owed to a target that no longer exists.
        let up = step(&mut f, mouse(PointerPhase::Up, 0.0, 0.0), None);
        assert!(kinds_for(&up, a).is_empty());
    }

    #[test]
    fn infospot_click_is_consumed_and_hover_elsewhere_ends_it() {
        let mut f = fixture();
        let (a, b, pano) = (f.a, f.b, f.pano);
        let spot = EvalContext {
            object_is_infospot: true,
            ..ctx(pano)
        };
        let tap = Tap {
            position: Vec2::ZERO,
            click: true,
        };
        let eval = f.machine.evaluate(tap, &on(Some(a)), spot);
        assert!(eval.consumed);
        assert_eq!(f.machine.interaction().infospot, Some(a));

        let tap = Tap {
            position: Vec2::ZERO,
            click: false,
        };
        let eval = f.machine.evaluate(tap, &on(Some(b)), ctx(pano));
        assert!(!eval.consumed);
        assert_eq!(kinds_for(&eval, a), vec![ObjectEventKind::HoverEnd]);
        assert_eq!(f.machine.interaction().infospot, None);
    }
}
