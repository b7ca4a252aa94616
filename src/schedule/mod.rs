//! Frame scheduling: continuous vs. passive rendering, auxiliary frame
//! loops, and cancelable frame handles.
//!
//! The host drives everything by calling the viewer's `frame(now)` once per
//! display refresh. The scheduler decides which callbacks are due and
//! whether the tick renders. It owns no scene state; the viewer runs the
//! actual update and render steps.
//!
//! # States
//!
//! ```text
//!   Idle ──begin_frame / notify──▶ Running ──end──▶ Idle
//!     │                               │
//!     └──────────dispose──────────────┴──▶ Cancelling (terminal)
//! ```

mod frames;

pub use frames::{FrameHandle, FrameQueue, FrameTask};
use web_time::Instant;

/// Render scheduling strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderSchedule {
    /// Update and render on every main-loop tick.
    #[default]
    Continuous,
    /// Render only in response to change notifications.
    Passive,
}

/// Scheduler lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerState {
    /// No tick or notification in progress.
    #[default]
    Idle,
    /// A tick or notification is being processed.
    Running,
    /// Disposed: every handle is invalid and no new work is accepted.
    Cancelling,
}

/// Drives the per-frame update/render cycle.
#[derive(Debug, Default)]
pub struct RenderScheduler {
    schedule: RenderSchedule,
    state: SchedulerState,
    frames: FrameQueue,
    main: Option<FrameHandle>,
    video: Option<FrameHandle>,
    /// A notification arrived while running; one more render is owed.
    owed: bool,
    last_tick: Option<Instant>,
}

impl RenderScheduler {
    /// Idle scheduler using `schedule`.
    #[must_use]
    pub fn new(schedule: RenderSchedule) -> Self {
        Self {
            schedule,
            ..Self::default()
        }
    }

    /// Scheduling strategy.
    #[must_use]
    pub fn schedule(&self) -> RenderSchedule {
        self.schedule
    }

    /// Whether rendering is on-demand.
    #[must_use]
    pub fn is_passive(&self) -> bool {
        self.schedule == RenderSchedule::Passive
    }

    /// Lifecycle state.
    #[must_use]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Timestamp of the most recent tick.
    #[must_use]
    pub fn last_tick(&self) -> Option<Instant> {
        self.last_tick
    }

    /// Request a one-shot callback on the next tick. Returns `None` once
    /// disposed.
    pub fn request(&mut self, task: FrameTask) -> Option<FrameHandle> {
        if self.state == SchedulerState::Cancelling {
            return None;
        }
        Some(self.frames.request(task))
    }

    /// Invalidate a handle.
    pub fn cancel(&mut self, handle: FrameHandle) -> bool {
        self.frames.cancel(handle)
    }

    /// Whether `handle` will still fire.
    #[must_use]
    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.frames.is_pending(handle)
    }

    /// Number of outstanding frame callbacks.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.frames.len()
    }

    // -- Main loop ----------------------------------------------------------

    /// Ensure the main loop is scheduled. Idempotent.
    pub fn start(&mut self) {
        let live = self.main.is_some_and(|h| self.frames.is_pending(h));
        if !live {
            self.main = self.request(FrameTask::Main);
        }
    }

    /// Cancel the main loop.
    pub fn stop(&mut self) {
        if let Some(handle) = self.main.take() {
            let _ = self.frames.cancel(handle);
        }
    }

    /// Whether the main loop will tick again.
    #[must_use]
    pub fn is_looping(&self) -> bool {
        self.main.is_some_and(|h| self.frames.is_pending(h))
    }

    /// Whether a main-loop tick renders unconditionally.
    #[must_use]
    pub fn renders_every_tick(&self) -> bool {
        self.schedule == RenderSchedule::Continuous
    }

    // -- Ticks --------------------------------------------------------------

    /// Start a tick at `now`. Returns the handles due on this tick; each
    /// must be [`claim`](Self::claim)ed before running so that callbacks
    /// cancelled earlier in the same tick are skipped.
    pub fn begin_frame(&mut self, now: Instant) -> Vec<FrameHandle> {
        if self.state == SchedulerState::Cancelling {
            return Vec::new();
        }
        self.state = SchedulerState::Running;
        self.last_tick = Some(now);
        self.frames.due()
    }

    /// Take a due handle. A claimed main-loop tick re-requests itself so
    /// the loop keeps running.
    pub fn claim(&mut self, handle: FrameHandle) -> Option<FrameTask> {
        let task = self.frames.claim(handle)?;
        match task {
            FrameTask::Main if self.main == Some(handle) => {
                self.main = self.request(FrameTask::Main);
            }
            FrameTask::VideoPump if self.video == Some(handle) => {
                self.video = self.request(FrameTask::VideoPump);
            }
            _ => {}
        }
        Some(task)
    }

    /// Finish a tick. Returns `true` if a notification arrived during the
    /// tick and the caller owes one update/render.
    pub fn end_frame(&mut self) -> bool {
        if self.state == SchedulerState::Running {
            self.state = SchedulerState::Idle;
        }
        std::mem::take(&mut self.owed)
    }

    // -- Change notifications -----------------------------------------------

    /// Register a change notification. Returns `true` if the caller should
    /// run update and render now. While a tick or another notification is
    /// running the render is deferred and `false` is returned.
    pub fn notify(&mut self) -> bool {
        match self.state {
            SchedulerState::Idle => {
                self.state = SchedulerState::Running;
                true
            }
            SchedulerState::Running => {
                self.owed = true;
                false
            }
            SchedulerState::Cancelling => false,
        }
    }

    /// Called after the render triggered by [`notify`](Self::notify).
    /// Returns `true` if another notification arrived meanwhile and one more
    /// render is owed; otherwise goes back to idle.
    pub fn finish_notification(&mut self) -> bool {
        if std::mem::take(&mut self.owed) {
            return true;
        }
        if self.state == SchedulerState::Running {
            self.state = SchedulerState::Idle;
        }
        false
    }

    // -- Video pump ---------------------------------------------------------

    /// Start the auxiliary video frame loop. Idempotent.
    pub fn start_video_pump(&mut self) {
        let live = self.video.is_some_and(|h| self.frames.is_pending(h));
        if !live {
            self.video = self.request(FrameTask::VideoPump);
        }
    }

    /// Cancel the video frame loop. The main loop is unaffected.
    pub fn stop_video_pump(&mut self) {
        if let Some(handle) = self.video.take() {
            let _ = self.frames.cancel(handle);
        }
    }

    /// Whether the video frame loop is live.
    #[must_use]
    pub fn video_pump_active(&self) -> bool {
        self.video.is_some_and(|h| self.frames.is_pending(h))
    }

    // -- Teardown -----------------------------------------------------------

    /// Invalidate every handle and refuse further work.
    pub fn dispose(&mut self) {
        self.frames.clear();
        self.main = None;
        self.video = None;
        self.owed = false;
        self.state = SchedulerState::Cancelling;
    }
}

#[cfg(test)]
mod tests {
    use web_time::Duration;

    use super::*;

    fn run_tick(s: &mut RenderScheduler, now: Instant) -> Vec<FrameTask> {
        let due = s.begin_frame(now);
        let tasks = due.into_iter().filter_map(|h| s.claim(h)).collect();
        let _ = s.end_frame();
        tasks
    }

    #[test]
    fn main_loop_keeps_itself_alive() {
        let mut s = RenderScheduler::new(RenderSchedule::Continuous);
        s.start();
        s.start();
        assert_eq!(s.pending(), 1);
        let t0 = Instant::now();
        for i in 0..3 {
            let tasks = run_tick(&mut s, t0 + Duration::from_millis(16 * i));
            assert_eq!(tasks, vec![FrameTask::Main]);
        }
        assert!(s.is_looping());
        s.stop();
        assert!(run_tick(&mut s, t0).is_empty());
    }

    #[test]
    fn notification_runs_immediately_when_idle() {
        let mut s = RenderScheduler::new(RenderSchedule::Passive);
        assert!(s.notify());
        assert_eq!(s.state(), SchedulerState::Running);
        assert!(!s.finish_notification());
        assert_eq!(s.state(), SchedulerState::Idle);
    }

    #[test]
    fn notification_during_tick_is_owed_once() {
        let mut s = RenderScheduler::new(RenderSchedule::Passive);
        let _ = s.begin_frame(Instant::now());
        assert!(!s.notify());
        assert!(!s.notify());
        assert!(s.end_frame());
        assert!(!s.end_frame());
    }

    #[test]
    fn reentrant_notification_loops_once_more() {
        let mut s = RenderScheduler::new(RenderSchedule::Passive);
        assert!(s.notify());
        assert!(!s.notify());
        assert!(s.finish_notification());
        assert!(!s.finish_notification());
        assert_eq!(s.state(), SchedulerState::Idle);
    }

    #[test]
    fn video_pump_is_independent_of_main_loop() {
        let mut s = RenderScheduler::new(RenderSchedule::Passive);
        s.start();
        s.start_video_pump();
        let tasks = run_tick(&mut s, Instant::now());
        assert_eq!(tasks, vec![FrameTask::Main, FrameTask::VideoPump]);
        assert!(s.video_pump_active());

        s.stop_video_pump();
        assert!(!s.video_pump_active());
        assert!(s.is_looping());
        assert_eq!(run_tick(&mut s, Instant::now()), vec![FrameTask::Main]);
    }

    #[test]
    fn dispose_leaves_nothing_pending() {
        let mut s = RenderScheduler::new(RenderSchedule::Continuous);
        s.start();
        s.start_video_pump();
        let _ = s.request(FrameTask::ReticleDwell);
        s.dispose();
        assert_eq!(s.pending(), 0);
        assert_eq!(s.state(), SchedulerState::Cancelling);
        assert!(s.request(FrameTask::Main).is_none());
        assert!(!s.notify());
        assert!(s.begin_frame(Instant::now()).is_empty());
    }
}
