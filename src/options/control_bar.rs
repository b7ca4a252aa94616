use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A button the widget collaborator may place on the control bar.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ControlButton {
    /// Enter/leave fullscreen.
    Fullscreen,
    /// Cycle camera controls.
    Navigation,
    /// Toggle stereo (VR) mode.
    Vr,
    /// Video play/pause and seek bar.
    Video,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Control Bar", inline)]
#[serde(default)]
/// Control-bar widget options.
pub struct ControlBarOptions {
    /// Create the default control bar at construction.
    #[schemars(title = "Show Control Bar")]
    pub show: bool,
    /// Buttons to place on the bar, in order.
    #[schemars(skip)]
    pub buttons: Vec<ControlButton>,
    /// Toggle the control bar when a click lands on no infospot.
    #[schemars(title = "Auto-hide Control Bar")]
    pub auto_hide: bool,
}

impl Default for ControlBarOptions {
    fn default() -> Self {
        Self {
            show: true,
            buttons: vec![
                ControlButton::Fullscreen,
                ControlButton::Navigation,
                ControlButton::Vr,
                ControlButton::Video,
            ],
            auto_hide: false,
        }
    }
}
