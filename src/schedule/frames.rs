use std::collections::BTreeMap;

/// Cancelable handle to one requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

/// What a frame callback does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameTask {
    /// Main loop tick: update, and render in continuous mode.
    Main,
    /// Video frame pump: keeps frames flowing in passive mode.
    VideoPump,
    /// Reticle dwell check.
    ReticleDwell,
}

/// One-shot frame callbacks, fired in request order on the next tick.
///
/// Recurring loops re-request themselves from inside their own callback,
/// so a callback requested during a tick never fires in that same tick.
#[derive(Debug, Default)]
pub struct FrameQueue {
    pending: BTreeMap<FrameHandle, FrameTask>,
    next: u64,
}

impl FrameQueue {
    /// Empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request `task` on the next tick.
    pub fn request(&mut self, task: FrameTask) -> FrameHandle {
        let handle = FrameHandle(self.next);
        self.next += 1;
        let _ = self.pending.insert(handle, task);
        handle
    }

    /// Invalidate a handle. Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, handle: FrameHandle) -> bool {
        self.pending.remove(&handle).is_some()
    }

    /// Whether `handle` will still fire.
    #[must_use]
    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    /// Handles due on this tick, in request order.
    #[must_use]
    pub fn due(&self) -> Vec<FrameHandle> {
        self.pending.keys().copied().collect()
    }

    /// Take a due handle for execution. Returns `None` if it was cancelled
    /// after the tick's snapshot was taken.
    pub fn claim(&mut self, handle: FrameHandle) -> Option<FrameTask> {
        self.pending.remove(&handle)
    }

    /// Number of outstanding callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Invalidate every outstanding handle.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
