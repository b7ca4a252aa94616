//! Commands sent by the control-bar widget.
//!
//! The widget speaks `{"method": "...", "data": ...}` messages. They
//! deserialize into [`WidgetCommand`] and run through a fixed match table;
//! unknown methods fail to parse instead of reaching the viewer.

use serde::{Deserialize, Serialize};

use super::Viewer;
use crate::error::ViewerError;
use crate::scene::ObjectEvent;

/// A command from the widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "data", rename_all = "camelCase")]
pub enum WidgetCommand {
    /// Flip between normal and VR mode.
    #[serde(rename = "toggleVR")]
    ToggleVr,
    /// Advance to the next camera control.
    ToggleNextControl,
    /// Enter (`true`) or leave fullscreen.
    ToggleFullscreen(bool),
    /// Pause (`true`) or play the active video panorama.
    ToggleVideoPlay(bool),
    /// Seek the active video panorama, in [0, 1].
    SetVideoCurrentTime(f32),
}

impl WidgetCommand {
    /// Parse a widget message.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::OptionsParse`] for malformed JSON or an
    /// unknown method.
    pub fn from_json(message: &str) -> Result<Self, ViewerError> {
        serde_json::from_str(message)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))
    }
}

impl Viewer {
    /// Run a widget command. In passive mode a change notification
    /// follows so the result is drawn.
    pub fn execute(&mut self, command: WidgetCommand) {
        if self.disposed {
            return;
        }
        match command {
            WidgetCommand::ToggleVr => self.toggle_vr(),
            WidgetCommand::ToggleNextControl => self.toggle_next_control(),
            WidgetCommand::ToggleFullscreen(fullscreen) => {
                self.toggle_fullscreen(fullscreen);
            }
            WidgetCommand::ToggleVideoPlay(pause) => {
                self.toggle_video_play(pause);
            }
            WidgetCommand::SetVideoCurrentTime(percentage) => {
                self.set_video_current_time(percentage);
            }
        }
        self.notify_change();
    }

    /// Parse and run a widget message.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Disposed`] after [`dispose`](Self::dispose),
    /// otherwise the parse error. Nothing runs in either case.
    pub fn execute_json(&mut self, message: &str) -> Result<(), ViewerError> {
        if self.disposed {
            return Err(ViewerError::Disposed);
        }
        let command = WidgetCommand::from_json(message)?;
        self.execute(command);
        Ok(())
    }

    /// Enter fullscreen (the container fills the window, its previous size
    /// is remembered) or leave it (the remembered size is restored).
    pub fn toggle_fullscreen(&mut self, fullscreen: bool) {
        self.container.set_fullscreen(fullscreen, self.window);
        self.container_resized();
    }

    /// Play or pause the active video panorama. In passive mode playback
    /// runs its own frame pump so frames keep flowing while the main loop
    /// idles.
    pub fn toggle_video_play(&mut self, pause: bool) {
        let Some(panorama) = self.panorama.filter(|_| self.active_is_video())
        else {
            log::warn!("toggle_video_play: no active video panorama");
            return;
        };
        let _ = self
            .scene
            .dispatch(panorama, &ObjectEvent::VideoToggle { pause });
        if !self.scheduler.is_passive() {
            return;
        }
        if pause {
            self.scheduler.stop_video_pump();
        } else {
            self.scheduler.start_video_pump();
        }
    }

    /// Seek the active video panorama.
    pub fn set_video_current_time(&mut self, percentage: f32) {
        let Some(panorama) = self.panorama.filter(|_| self.active_is_video())
        else {
            log::warn!("set_video_current_time: no active video panorama");
            return;
        };
        let _ = self
            .scene
            .dispatch(panorama, &ObjectEvent::VideoTime { percentage });
    }
}

#[cfg(test)]
mod tests {
    use web_time::Instant;

    use super::super::testing::{passive, viewer};
    use super::*;
    use crate::options::Options;
    use crate::scene::{PanoramaInfo, SceneObject};
    use crate::viewer::Mode;

    #[test]
    fn parses_widget_messages() {
        assert_eq!(
            WidgetCommand::from_json(r#"{"method":"toggleVR"}"#).unwrap(),
            WidgetCommand::ToggleVr
        );
        assert_eq!(
            WidgetCommand::from_json(
                r#"{"method":"toggleFullscreen","data":true}"#
            )
            .unwrap(),
            WidgetCommand::ToggleFullscreen(true)
        );
        assert_eq!(
            WidgetCommand::from_json(
                r#"{"method":"setVideoCurrentTime","data":0.25}"#
            )
            .unwrap(),
            WidgetCommand::SetVideoCurrentTime(0.25)
        );
        assert!(WidgetCommand::from_json(r#"{"method":"eval"}"#).is_err());
    }

    #[test]
    fn disposed_viewer_rejects_messages() {
        let (mut v, _) = viewer(Options::default());
        v.dispose();
        let err = v.execute_json(r#"{"method":"toggleVR"}"#).unwrap_err();
        assert!(matches!(err, ViewerError::Disposed));
        assert_eq!(v.mode(), Mode::Normal);
    }

    #[test]
    fn commands_dispatch_through_the_table() {
        let (mut v, _) = viewer(Options::default());
        v.execute_json(r#"{"method":"toggleVR"}"#).unwrap();
        assert_eq!(v.mode(), Mode::Vr);
        v.execute(WidgetCommand::ToggleNextControl);
        assert_eq!(v.control_name(), "device-orientation");
    }

    #[test]
    fn passive_command_renders_without_a_tick() {
        let (mut v, log) = viewer(passive());
        let _ = v.add(SceneObject::panorama(PanoramaInfo::default()));
        let before = log.borrow().paths.len();
        v.execute(WidgetCommand::ToggleNextControl);
        // The control switch and the command itself each notify.
        assert_eq!(log.borrow().paths.len(), before + 2);
    }

    #[test]
    fn fullscreen_round_trip_restores_container() {
        let (mut v, _) = viewer(Options::default());
        let size = v.container().size();
        v.execute(WidgetCommand::ToggleFullscreen(true));
        assert!(v.container().is_fullscreen());
        v.execute(WidgetCommand::ToggleFullscreen(false));
        assert_eq!(v.container().size(), size);
    }

    #[test]
    fn passive_video_pump_starts_and_stops() {
        let (mut v, log) = viewer(passive());
        let _ = v.add(SceneObject::panorama(PanoramaInfo {
            video: true,
            ..PanoramaInfo::default()
        }));
        v.execute(WidgetCommand::ToggleVideoPlay(false));
        assert!(v.scheduler().video_pump_active());

        let t0 = Instant::now();
        v.frame(t0);
        let before = log.borrow().paths.len();
        v.frame(t0);
        v.frame(t0);
        assert_eq!(log.borrow().paths.len(), before + 2);

        v.execute(WidgetCommand::ToggleVideoPlay(true));
        assert!(!v.scheduler().video_pump_active());
        let before = log.borrow().paths.len();
        v.frame(t0);
        v.frame(t0);
        assert_eq!(log.borrow().paths.len(), before);
    }
}
