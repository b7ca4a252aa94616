use web_time::{Duration, Instant};

use crate::util::easing::Easing;

/// Handle to a queued tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(u64);

/// A single time-based interpolation.
///
/// `apply` receives eased progress in [0, 1] on every step, including a
/// final step with exactly 1.0.
pub struct Tween {
    start: Instant,
    duration: Duration,
    easing: Easing,
    apply: Box<dyn FnMut(f32)>,
}

impl Tween {
    /// Tween starting at `start` and lasting `duration`.
    #[must_use]
    pub fn new(
        start: Instant,
        duration: Duration,
        easing: Easing,
        apply: impl FnMut(f32) + 'static,
    ) -> Self {
        Self {
            start,
            duration,
            easing,
            apply: Box::new(apply),
        }
    }

    /// Normalized time at `now`. Zero-length tweens are complete at once.
    fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Apply the tween at `now`. Returns `true` once complete.
    fn step(&mut self, now: Instant) -> bool {
        if now < self.start {
            return false;
        }
        let t = self.progress(now);
        (self.apply)(self.easing.evaluate(t));
        t >= 1.0
    }
}

impl std::fmt::Debug for Tween {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tween")
            .field("start", &self.start)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .finish_non_exhaustive()
    }
}

/// Queue of running tweens.
#[derive(Debug, Default)]
pub struct TweenQueue {
    tweens: Vec<(TweenId, Tween)>,
    next_id: u64,
}

impl TweenQueue {
    /// Empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a tween.
    pub fn add(&mut self, tween: Tween) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.push((id, tween));
        id
    }

    /// Drop a tween without completing it. Returns `false` if it already
    /// finished or never existed.
    pub fn cancel(&mut self, id: TweenId) -> bool {
        let before = self.tweens.len();
        self.tweens.retain(|(tid, _)| *tid != id);
        self.tweens.len() != before
    }

    /// Advance every tween to `now` and drop the completed ones. Returns
    /// `true` if any tween stepped.
    pub fn update(&mut self, now: Instant) -> bool {
        let mut stepped = false;
        self.tweens.retain_mut(|(_, tween)| {
            if now >= tween.start {
                stepped = true;
            }
            !tween.step(now)
        });
        stepped
    }

    /// Number of queued tweens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// Whether no tween is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Drop every tween.
    pub fn clear(&mut self) {
        self.tweens.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn recording(
        start: Instant,
        ms: u64,
    ) -> (Tween, Rc<RefCell<Vec<f32>>>) {
        let values = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&values);
        let tween = Tween::new(
            start,
            Duration::from_millis(ms),
            Easing::Linear,
            move |v| sink.borrow_mut().push(v),
        );
        (tween, values)
    }

    #[test]
    fn steps_until_complete_then_drops() {
        let t0 = Instant::now();
        let (tween, values) = recording(t0, 100);
        let mut queue = TweenQueue::new();
        let _ = queue.add(tween);

        assert!(queue.update(t0 + Duration::from_millis(50)));
        assert_eq!(queue.len(), 1);
        assert!(queue.update(t0 + Duration::from_millis(150)));
        assert!(queue.is_empty());
        assert!(!queue.update(t0 + Duration::from_millis(200)));

        let values = values.borrow();
        assert_eq!(values.len(), 2);
        assert!((values[0] - 0.5).abs() < 1e-3);
        assert!((values[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn delayed_tween_waits_for_start() {
        let t0 = Instant::now();
        let (tween, values) = recording(t0 + Duration::from_millis(100), 10);
        let mut queue = TweenQueue::new();
        let _ = queue.add(tween);
        assert!(!queue.update(t0));
        assert!(values.borrow().is_empty());
    }

    #[test]
    fn cancelled_tween_never_steps() {
        let t0 = Instant::now();
        let (tween, values) = recording(t0, 100);
        let mut queue = TweenQueue::new();
        let id = queue.add(tween);
        assert!(queue.cancel(id));
        assert!(!queue.cancel(id));
        let _ = queue.update(t0 + Duration::from_millis(10));
        assert!(values.borrow().is_empty());
    }
}
