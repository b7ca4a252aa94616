//! Per-frame driving: the host's tick entry point, update, render and
//! change notifications.

use web_time::Instant;

use super::Viewer;
use crate::gpu::{FrameContext, RenderPath};
use crate::input::{DwellCheck, Tap};
use crate::schedule::{FrameHandle, FrameTask};

impl Viewer {
    /// Process one display refresh at `now`. Hosts call this from their
    /// frame timer; it runs every frame callback that is due.
    ///
    /// Continuous rendering updates and renders on every call. Passive
    /// rendering only renders when something notified a change; any
    /// notifications raised while the frame runs collapse into one render
    /// at the end of it.
    pub fn frame(&mut self, now: Instant) {
        if self.disposed {
            return;
        }
        for handle in self.scheduler.begin_frame(now) {
            let Some(task) = self.scheduler.claim(handle) else {
                continue;
            };
            match task {
                FrameTask::Main => self.main_tick(now),
                FrameTask::VideoPump => self.notify_change(),
                FrameTask::ReticleDwell => self.check_dwell(handle, now),
            }
        }
        if self.scheduler.end_frame() {
            self.notify_change();
        }
    }

    fn main_tick(&mut self, now: Instant) {
        if self.scheduler.renders_every_tick() {
            let _ = self.update(now, true);
            self.render();
        } else if self.update(now, false) {
            // Tweens moved something; draw it.
            self.notify_change();
        }
    }

    fn check_dwell(&mut self, handle: FrameHandle, now: Instant) {
        if self.reticle.check(handle, now, &mut self.scheduler)
            == DwellCheck::Select
        {
            log::debug!("reticle dwell elapsed, selecting");
            let tap = Tap {
                position: self.reticle.center(),
                click: true,
            };
            let _ = self.evaluate_tap(tap, now);
        }
    }

    /// Advance tweens, the camera control (when `with_control`), the
    /// per-tick callbacks and the reticle tap, in that order. Returns
    /// `true` if any tween stepped.
    pub(super) fn update(&mut self, now: Instant, with_control: bool) -> bool {
        let stepped = self.tweens.update(now);
        if with_control {
            let _ = self
                .mode
                .controls_mut()
                .active_mut()
                .update(&mut self.camera, false);
        }
        for (_, callback) in &mut self.update_callbacks {
            callback();
        }
        if self.reticle_tap {
            let tap = Tap {
                position: self.reticle.center(),
                click: false,
            };
            let _ = self.evaluate_tap(tap, now);
        }
        stepped
    }

    /// Draw one frame through the backend.
    pub(super) fn render(&mut self) {
        let mut path = self.mode.render_path();
        if path == RenderPath::Stereo && !self.backend.supports_stereo() {
            if !self.stereo_warned {
                log::warn!("render backend has no stereo path, drawing mono");
                self.stereo_warned = true;
            }
            path = RenderPath::Normal;
        }
        let frame = FrameContext {
            scene: &self.scene,
            camera: &self.camera,
            path,
            size: self.container.size(),
        };
        self.backend.render(&frame);
        self.renders += 1;
    }

    /// Signal that something visible changed.
    ///
    /// Only meaningful in passive mode, where it runs update and render
    /// right away, or defers them to the end of the running frame. A
    /// notification raised during that update/render loops exactly once
    /// more. Continuous mode ignores it: the next tick draws anyway.
    pub fn notify_change(&mut self) {
        if !self.scheduler.is_passive() || !self.scheduler.notify() {
            return;
        }
        let now = self.now();
        loop {
            let _ = self.update(now, false);
            self.render();
            if !self.scheduler.finish_notification() {
                break;
            }
        }
    }

    /// Timestamp for work outside a host tick: the last tick if there was
    /// one.
    pub(super) fn now(&self) -> Instant {
        self.scheduler.last_tick().unwrap_or_else(Instant::now)
    }
}
