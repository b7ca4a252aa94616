//! Lifecycle notifications reported by panorama content.
//!
//! Panorama content (image/video loading, fade animations) lives outside
//! the crate. It reports its lifecycle here and the viewer reacts: camera
//! recentring, video controls, passive-mode renders.

use super::widget::WidgetEvent;
use super::Viewer;
use crate::scene::{ObjectId, SceneObject};

/// Lifecycle event reported by a panorama.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanoramaEvent {
    /// The enter transition started.
    EnterAnimationStart,
    /// The enter transition finished.
    EnterComplete,
    /// An infospot show/hide animation finished.
    InfospotAnimationComplete {
        /// Whether the infospots ended up visible.
        visible: bool,
    },
    /// Video playback progressed.
    VideoProgress {
        /// Position in [0, 1].
        percentage: f32,
    },
}

impl Viewer {
    /// React to a lifecycle event from panorama `id`.
    ///
    /// `Enter`/`Leave` are not reported through here: the viewer delivers
    /// them itself from [`set_panorama`](Self::set_panorama).
    pub fn notify_panorama(&mut self, id: ObjectId, event: PanoramaEvent) {
        if !self.scene.contains(id) {
            log::debug!(
                "lifecycle event {event:?} from unknown panorama {id:?}"
            );
            return;
        }
        match event {
            PanoramaEvent::EnterAnimationStart => self.set_camera_control(),
            PanoramaEvent::EnterComplete => {
                if self.scheduler.is_passive() {
                    let _ = self
                        .mode
                        .controls_mut()
                        .active_mut()
                        .update(&mut self.camera, true);
                    self.notify_change();
                }
            }
            PanoramaEvent::InfospotAnimationComplete { visible } => {
                if visible {
                    self.notify_change();
                }
            }
            PanoramaEvent::VideoProgress { percentage } => {
                self.on_video_update(percentage);
            }
        }
    }

    fn is_video(&self, id: ObjectId) -> bool {
        self.scene
            .object(id)
            .and_then(SceneObject::as_panorama)
            .is_some_and(|info| info.video)
    }

    /// Wiring run after the new active panorama received `Enter`.
    pub(super) fn panorama_entered(&mut self) {
        if self.active_is_video() {
            self.notify_widget(WidgetEvent::VideoControlShow);
        }
    }

    /// Wiring run after `previous` received `Leave`.
    pub(super) fn panorama_left(&mut self, previous: ObjectId) {
        if self.is_video(previous) {
            self.scheduler.stop_video_pump();
            self.notify_widget(WidgetEvent::VideoControlHide);
        }
        if self.scheduler.is_passive() {
            // The transition to the next panorama animates; keep ticking.
            self.scheduler.start();
        }
    }
}
