use glam::Vec2;

use crate::events::Event;
use crate::picking::Hit;
use crate::viewer::Mode;

/// Events delivered to scene objects.
///
/// Pointer-driven variants carry the screen position of the evaluation that
/// produced them.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectEvent {
    /// The pointer started resolving to this entity.
    HoverEnter {
        /// Screen position.
        pointer: Vec2,
    },
    /// The pointer stopped resolving to this entity.
    HoverLeave {
        /// Screen position.
        pointer: Vec2,
    },
    /// The pointer is over this raw object.
    Hover {
        /// Screen position.
        pointer: Vec2,
    },
    /// Press began on this raw object.
    PressStart {
        /// Screen position.
        pointer: Vec2,
    },
    /// Press began on this entity.
    PressStartEntity {
        /// Screen position.
        pointer: Vec2,
    },
    /// Pointer moved while this raw object is pressed.
    PressMove {
        /// Screen position.
        pointer: Vec2,
    },
    /// Pointer moved while this entity is pressed.
    PressMoveEntity {
        /// Screen position.
        pointer: Vec2,
    },
    /// Press on this raw object ended.
    PressStop {
        /// Screen position.
        pointer: Vec2,
    },
    /// Press on this entity ended.
    PressStopEntity {
        /// Screen position.
        pointer: Vec2,
    },
    /// Click on this raw object.
    Click {
        /// Screen position.
        pointer: Vec2,
    },
    /// Click on this entity.
    ClickEntity {
        /// Screen position.
        pointer: Vec2,
    },
    /// Non-targeted hover broadcast to the active panorama.
    SceneHover {
        /// Every hit, nearest first.
        hits: Vec<Hit>,
        /// Screen position.
        pointer: Vec2,
    },
    /// Non-targeted click broadcast to the active panorama.
    SceneClick {
        /// Every hit, nearest first.
        hits: Vec<Hit>,
        /// Screen position.
        pointer: Vec2,
    },
    /// Display mode changed.
    ModeChange {
        /// The new mode.
        mode: Mode,
    },
    /// Panorama is becoming the active one.
    Enter,
    /// Panorama is no longer the active one.
    Leave,
    /// Infospot should end its hover presentation.
    HoverEnd,
    /// Panorama should toggle the visibility of its infospots.
    ToggleInfospotVisibility,
    /// Video panorama should play (`pause == false`) or pause.
    VideoToggle {
        /// Pause instead of play.
        pause: bool,
    },
    /// Video panorama should seek.
    VideoTime {
        /// Position in [0, 1].
        percentage: f32,
    },
    /// The object is being torn down with its viewer.
    Dispose,
}

/// Discriminant of [`ObjectEvent`], used to subscribe listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectEventKind {
    /// See [`ObjectEvent::HoverEnter`].
    HoverEnter,
    /// See [`ObjectEvent::HoverLeave`].
    HoverLeave,
    /// See [`ObjectEvent::Hover`].
    Hover,
    /// See [`ObjectEvent::PressStart`].
    PressStart,
    /// See [`ObjectEvent::PressStartEntity`].
    PressStartEntity,
    /// See [`ObjectEvent::PressMove`].
    PressMove,
    /// See [`ObjectEvent::PressMoveEntity`].
    PressMoveEntity,
    /// See [`ObjectEvent::PressStop`].
    PressStop,
    /// See [`ObjectEvent::PressStopEntity`].
    PressStopEntity,
    /// See [`ObjectEvent::Click`].
    Click,
    /// See [`ObjectEvent::ClickEntity`].
    ClickEntity,
    /// See [`ObjectEvent::SceneHover`].
    SceneHover,
    /// See [`ObjectEvent::SceneClick`].
    SceneClick,
    /// See [`ObjectEvent::ModeChange`].
    ModeChange,
    /// See [`ObjectEvent::Enter`].
    Enter,
    /// See [`ObjectEvent::Leave`].
    Leave,
    /// See [`ObjectEvent::HoverEnd`].
    HoverEnd,
    /// See [`ObjectEvent::ToggleInfospotVisibility`].
    ToggleInfospotVisibility,
    /// See [`ObjectEvent::VideoToggle`].
    VideoToggle,
    /// See [`ObjectEvent::VideoTime`].
    VideoTime,
    /// See [`ObjectEvent::Dispose`].
    Dispose,
}

impl Event for ObjectEvent {
    type Kind = ObjectEventKind;

    fn kind(&self) -> ObjectEventKind {
        match self {
            Self::HoverEnter { .. } => ObjectEventKind::HoverEnter,
            Self::HoverLeave { .. } => ObjectEventKind::HoverLeave,
            Self::Hover { .. } => ObjectEventKind::Hover,
            Self::PressStart { .. } => ObjectEventKind::PressStart,
            Self::PressStartEntity { .. } => ObjectEventKind::PressStartEntity,
            Self::PressMove { .. } => ObjectEventKind::PressMove,
            Self::PressMoveEntity { .. } => ObjectEventKind::PressMoveEntity,
            Self::PressStop { .. } => ObjectEventKind::PressStop,
            Self::PressStopEntity { .. } => ObjectEventKind::PressStopEntity,
            Self::Click { .. } => ObjectEventKind::Click,
            Self::ClickEntity { .. } => ObjectEventKind::ClickEntity,
            Self::SceneHover { .. } => ObjectEventKind::SceneHover,
            Self::SceneClick { .. } => ObjectEventKind::SceneClick,
            Self::ModeChange { .. } => ObjectEventKind::ModeChange,
            Self::Enter => ObjectEventKind::Enter,
            Self::Leave => ObjectEventKind::Leave,
            Self::HoverEnd => ObjectEventKind::HoverEnd,
            Self::ToggleInfospotVisibility => {
                ObjectEventKind::ToggleInfospotVisibility
            }
            Self::VideoToggle { .. } => ObjectEventKind::VideoToggle,
            Self::VideoTime { .. } => ObjectEventKind::VideoTime,
            Self::Dispose => ObjectEventKind::Dispose,
        }
    }
}
