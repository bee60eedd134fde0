mod animatable;
mod animator;
mod interpolator;

pub use animatable::Animatable;
pub use animator::{AnimationRun, RunId, Tick};
pub use interpolator::Interpolator;

use std::time::Duration;

/// Default duration of a full collapse or expand.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

/// How the container animates between collapsed and expanded.
#[derive(Clone, Debug)]
pub struct Transition {
    /// Duration of a full-distance animation
    pub duration: Duration,
    /// Easing curve
    pub interpolator: Interpolator,
}

impl Transition {
    pub fn new(duration: Duration, interpolator: Interpolator) -> Self {
        Self {
            duration,
            interpolator,
        }
    }

    /// Duration for travelling `distance` out of a full extent of `max_extent`.
    ///
    /// Partial distances (reversing mid-animation) take proportionally less
    /// time. A zero `max_extent` yields a zero duration.
    pub fn duration_for(&self, distance: i32, max_extent: i32) -> Duration {
        if max_extent <= 0 {
            return Duration::ZERO;
        }
        let ms = self.duration.as_millis() * distance.unsigned_abs() as u128 / max_extent as u128;
        Duration::from_millis(u64::try_from(ms).unwrap_or(u64::MAX))
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION, Interpolator::default())
    }
}
