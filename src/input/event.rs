use glam::Vec2;

use crate::camera::OrientationSample;

/// Platform-agnostic input events.
///
/// Hosts translate their window-system events into these and feed them to
/// [`Viewer::handle_input`](crate::Viewer::handle_input).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse or single-touch pointer sample.
    Pointer(PointerEvent),
    /// Scroll wheel (positive = zoom in).
    Scroll {
        /// Scroll amount.
        delta: f32,
    },
    /// Modifier key state changed.
    ModifiersChanged {
        /// Whether the control key is held.
        control: bool,
    },
    /// The window was resized.
    Resize {
        /// New width in physical pixels.
        width: u32,
        /// New height in physical pixels.
        height: u32,
    },
    /// New device-orientation sensor reading.
    DeviceOrientation(OrientationSample),
    /// Screen rotation changed.
    ScreenOrientation {
        /// Screen rotation in degrees.
        degrees: f32,
    },
}

/// Interaction phase of a pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerPhase {
    /// No interaction in progress (reticle taps run in this phase).
    #[default]
    None,
    /// Button pressed or touch started.
    Down,
    /// Pointer moved.
    Move,
    /// Button released or touch ended.
    Up,
}

/// Which device produced a pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    /// Mouse (or pen acting as a mouse).
    Mouse,
    /// Single-finger touch.
    Touch,
}

/// One raw pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Phase of the sample.
    pub phase: PointerPhase,
    /// Device that produced it.
    pub source: PointerSource,
    /// Primary screen position.
    pub position: Vec2,
    /// Position of the touch that changed, for touch-end samples.
    pub changed_touch: Option<Vec2>,
    /// Whether the event targets the render surface. Events aimed at
    /// anything else (widget chrome, overlays) are ignored.
    pub on_surface: bool,
}

impl PointerEvent {
    /// Mouse sample on the render surface.
    #[must_use]
    pub fn mouse(phase: PointerPhase, position: Vec2) -> Self {
        Self {
            phase,
            source: PointerSource::Mouse,
            position,
            changed_touch: None,
            on_surface: true,
        }
    }

    /// Touch sample on the render surface. For `Up`, `position` is the
    /// lifted touch.
    #[must_use]
    pub fn touch(phase: PointerPhase, position: Vec2) -> Self {
        Self {
            phase,
            source: PointerSource::Touch,
            position,
            changed_touch: (phase == PointerPhase::Up).then_some(position),
            on_surface: true,
        }
    }

    /// Mark the sample as aimed at something other than the surface.
    #[must_use]
    pub fn off_surface(mut self) -> Self {
        self.on_surface = false;
        self
    }
}

impl From<PointerEvent> for InputEvent {
    fn from(event: PointerEvent) -> Self {
        Self::Pointer(event)
    }
}
