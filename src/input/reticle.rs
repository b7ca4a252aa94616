//! Gaze reticle: dwell-timer selection for input without a pointing device.

use glam::Vec2;
use web_time::{Duration, Instant};

use crate::schedule::{FrameHandle, FrameTask, RenderScheduler};

/// Default dwell time before a gaze selection fires.
pub const DEFAULT_DWELL_TIME: Duration = Duration::from_millis(1500);

/// Outcome of a dwell check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DwellCheck {
    /// Dwell time reached: synthesize a click at the reticle.
    Select,
    /// Still waiting; another check is scheduled.
    Pending,
    /// The handle no longer belongs to the armed hover.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Armed {
    start: Instant,
    handle: FrameHandle,
}

/// Dwell-timer selector driven by frame callbacks.
///
/// At most one check is live; arming again first cancels the old one.
#[derive(Debug, Clone, PartialEq)]
pub struct ReticleSelector {
    dwell: Duration,
    auto_select: bool,
    visible: bool,
    center: Vec2,
    armed: Option<Armed>,
}

impl ReticleSelector {
    /// Hidden reticle with the given dwell time.
    #[must_use]
    pub fn new(dwell: Duration, auto_select: bool) -> Self {
        Self {
            dwell,
            auto_select,
            visible: false,
            center: Vec2::ZERO,
            armed: None,
        }
    }

    /// Configured dwell time.
    #[must_use]
    pub fn dwell(&self) -> Duration {
        self.dwell
    }

    /// Whether hovers arm the dwell timer.
    #[must_use]
    pub fn auto_select(&self) -> bool {
        self.auto_select
    }

    /// Whether the reticle is shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the reticle.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Screen point the reticle samples (the container center).
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Update the sampling point.
    pub fn set_center(&mut self, center: Vec2) {
        self.center = center;
    }

    /// Whether a dwell check is live.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Start timing a new hover at `now`, discarding any stale check.
    pub fn arm(&mut self, now: Instant, frames: &mut RenderScheduler) {
        self.disarm(frames);
        if !self.auto_select {
            return;
        }
        if let Some(handle) = frames.request(FrameTask::ReticleDwell) {
            self.armed = Some(Armed { start: now, handle });
        }
    }

    /// Cancel any live check.
    pub fn disarm(&mut self, frames: &mut RenderScheduler) {
        if let Some(armed) = self.armed.take() {
            let _ = frames.cancel(armed.handle);
        }
    }

    /// Run the check scheduled under `handle`.
    pub fn check(
        &mut self,
        handle: FrameHandle,
        now: Instant,
        frames: &mut RenderScheduler,
    ) -> DwellCheck {
        let Some(armed) = self.armed else {
            return DwellCheck::Stale;
        };
        if armed.handle != handle {
            return DwellCheck::Stale;
        }
        if now.saturating_duration_since(armed.start) >= self.dwell {
            self.disarm(frames);
            return DwellCheck::Select;
        }
        match frames.request(FrameTask::ReticleDwell) {
            Some(next) => {
                self.armed = Some(Armed {
                    start: armed.start,
                    handle: next,
                });
                DwellCheck::Pending
            }
            None => {
                self.armed = None;
                DwellCheck::Stale
            }
        }
    }
}

impl Default for ReticleSelector {
    fn default() -> Self {
        Self::new(DEFAULT_DWELL_TIME, true)
    }
}
