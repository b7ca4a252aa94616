//! Easing curves for tweens.
//!
//! Every curve maps normalized time in [0, 1] to progress in [0, 1] and
//! hits both endpoints exactly.

/// Easing curve variants.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,
    /// Quadratic ease-in-out.
    QuadraticInOut,
    /// Cubic ease-out (fast start, gentle stop).
    CubicOut,
    /// Quartic ease-in-out, used for camera tweens.
    QuarticInOut,
    /// Exponential ease-out, used for fades.
    ExponentialOut,
}

impl Easing {
    /// Evaluate the curve at `t`. Input is clamped to [0, 1].
    #[inline]
    #[must_use]
    pub fn evaluate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadraticInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let omt = 1.0 - t;
                    1.0 - 2.0 * omt * omt
                }
            }
            Self::CubicOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt * omt
            }
            Self::QuarticInOut => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    let omt = 1.0 - t;
                    1.0 - 8.0 * omt * omt * omt * omt
                }
            }
            Self::ExponentialOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
        }
    }
}
