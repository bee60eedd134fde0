use std::time::Duration;

use super::{Animatable, Interpolator};

/// Identifies one animation run. A fresh id is issued for every run, so a
/// tick can always be traced back to the run that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(pub u64);

/// One frame's worth of progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick<T> {
    pub run: RunId,
    pub value: T,
    /// True on the last tick of the run.
    pub finished: bool,
}

/// A frame-driven interpolation from one value to another.
///
/// Time is supplied by the caller on every [`advance`](Self::advance) as a
/// monotonic timestamp. The first advance anchors the start of the run.
#[derive(Debug, Clone)]
pub struct AnimationRun<T: Animatable = i32> {
    id: RunId,
    from: T,
    to: T,
    duration: Duration,
    interpolator: Interpolator,
    /// Timestamp of the first frame, set on the first advance
    start: Option<Duration>,
    /// Value reported by the last tick
    current: T,
    finished: bool,
}

impl<T: Animatable> AnimationRun<T> {
    pub fn new(id: RunId, from: T, to: T, duration: Duration, interpolator: Interpolator) -> Self {
        Self {
            id,
            from,
            to,
            duration,
            interpolator,
            start: None,
            current: from,
            finished: false,
        }
    }

    pub fn id(&self) -> RunId {
        self.id
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Value reported by the most recent tick (`from` before the first one).
    pub fn current(&self) -> T {
        self.current
    }

    /// Advance to the frame at `now`.
    ///
    /// The final tick reports exactly `to`, whatever the curve evaluates to
    /// at 1.0. Advancing a finished run repeats its final tick.
    pub fn advance(&mut self, now: Duration) -> Tick<T> {
        if self.finished {
            return self.tick();
        }

        let start = *self.start.get_or_insert(now);
        let elapsed = now.saturating_sub(start);
        let fraction = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };

        if fraction >= 1.0 {
            self.current = self.to;
            self.finished = true;
        } else {
            let eased = self.interpolator.evaluate(fraction);
            self.current = T::lerp(&self.from, &self.to, eased);
        }
        self.tick()
    }

    fn tick(&self) -> Tick<T> {
        Tick {
            run: self.id,
            value: self.current,
            finished: self.finished,
        }
    }
}
