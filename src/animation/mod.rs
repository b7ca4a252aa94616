//! Time-based tweens advanced at the start of every update.

mod tween;

pub use tween::{Tween, TweenId, TweenQueue};
