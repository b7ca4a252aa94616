//! Control-bar widget handle.
//!
//! The widget's DOM construction is external. The viewer only keeps a
//! handle it can send notifications to; hosts attach listeners to render
//! the actual chrome.

use super::Viewer;
use crate::events::{Event, EventTarget, Listeners};
use crate::options::ControlButton;

/// Notifications delivered to the widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidgetEvent {
    /// Video playback progressed.
    VideoUpdate {
        /// Position in [0, 1].
        percentage: f32,
    },
    /// Show the video controls.
    VideoControlShow,
    /// Hide the video controls.
    VideoControlHide,
    /// Toggle the whole control bar.
    ControlBarToggle,
    /// The widget is being torn down.
    Dispose,
}

/// Discriminant of [`WidgetEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetEventKind {
    /// See [`WidgetEvent::VideoUpdate`].
    VideoUpdate,
    /// See [`WidgetEvent::VideoControlShow`].
    VideoControlShow,
    /// See [`WidgetEvent::VideoControlHide`].
    VideoControlHide,
    /// See [`WidgetEvent::ControlBarToggle`].
    ControlBarToggle,
    /// See [`WidgetEvent::Dispose`].
    Dispose,
}

impl Event for WidgetEvent {
    type Kind = WidgetEventKind;

    fn kind(&self) -> WidgetEventKind {
        match self {
            Self::VideoUpdate { .. } => WidgetEventKind::VideoUpdate,
            Self::VideoControlShow => WidgetEventKind::VideoControlShow,
            Self::VideoControlHide => WidgetEventKind::VideoControlHide,
            Self::ControlBarToggle => WidgetEventKind::ControlBarToggle,
            Self::Dispose => WidgetEventKind::Dispose,
        }
    }
}

/// Handle to the control bar.
#[derive(Debug)]
pub struct Widget {
    buttons: Vec<ControlButton>,
    listeners: Listeners<WidgetEvent>,
}

impl Widget {
    /// A control bar carrying `buttons`.
    #[must_use]
    pub fn new(buttons: &[ControlButton]) -> Self {
        Self {
            buttons: buttons.to_vec(),
            listeners: Listeners::new(),
        }
    }

    /// Buttons on the bar, in order.
    #[must_use]
    pub fn buttons(&self) -> &[ControlButton] {
        &self.buttons
    }

    /// Number of attached listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl EventTarget<WidgetEvent> for Widget {
    fn listeners_mut(&mut self) -> &mut Listeners<WidgetEvent> {
        &mut self.listeners
    }
}

impl Viewer {
    /// Create the default control bar. A second call warns and does
    /// nothing.
    pub fn add_default_control_bar(&mut self, buttons: &[ControlButton]) {
        if self.widget.is_some() {
            log::warn!("default control bar exists");
            return;
        }
        self.widget = Some(Widget::new(buttons));
    }

    /// The control-bar handle, if one was created.
    #[must_use]
    pub fn widget(&self) -> Option<&Widget> {
        self.widget.as_ref()
    }

    /// The control-bar handle, mutably (to attach listeners).
    pub fn widget_mut(&mut self) -> Option<&mut Widget> {
        self.widget.as_mut()
    }

    /// Toggle the control bar's visibility.
    pub fn toggle_control_bar(&mut self) {
        self.notify_widget(WidgetEvent::ControlBarToggle);
    }

    /// Forward video progress to the widget.
    pub fn on_video_update(&mut self, percentage: f32) {
        self.notify_widget(WidgetEvent::VideoUpdate { percentage });
    }

    pub(super) fn notify_widget(&mut self, event: WidgetEvent) {
        if let Some(widget) = &mut self.widget {
            let _ = widget.dispatch(&event);
        }
    }
}
