//! Easing curves for expand/collapse animations.
//!
//! An interpolator maps elapsed fraction `t` in `[0, 1]` to an eased
//! fraction. Some curves leave `[0, 1]` on purpose:
//!
//! - [`Interpolator::Anticipate`] dips below 0 before moving forward
//! - [`Interpolator::Overshoot`] passes 1 and settles back
//! - [`Interpolator::AnticipateOvershoot`] does both
//! - [`Interpolator::Cycle`] returns to 0 at the end
//!
//! ## Example
//!
//! ```
//! use expandable::animation::Interpolator;
//!
//! let curve: Interpolator = "accelerate".parse().unwrap();
//! assert!(curve.evaluate(0.5) < 0.5);
//! ```

use std::f32::consts::PI;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::Error;

#[derive(Clone, Deserialize)]
#[serde(try_from = "String")]
pub enum Interpolator {
    /// Slow start and end, fast middle
    AccelerateDecelerate,
    /// Starts slow, ends fast
    Accelerate(f32),
    /// Pulls back before moving forward
    Anticipate(f32),
    /// Pulls back, passes the target, then settles
    AnticipateOvershoot(f32),
    /// Bounces at the end
    Bounce,
    /// Repeats a sine wave the given number of cycles
    Cycle(f32),
    /// Starts fast, ends slow
    Decelerate(f32),
    /// Passes the target and settles back
    Overshoot(f32),
    /// Constant speed
    Linear,
    Custom(Arc<dyn Fn(f32) -> f32 + Send + Sync>),
}

impl Interpolator {
    /// Kebab-case names accepted by [`FromStr`], in attribute index order.
    pub const NAMES: [&'static str; 9] = [
        "accelerate-decelerate",
        "accelerate",
        "anticipate",
        "anticipate-overshoot",
        "bounce",
        "cycle",
        "decelerate",
        "overshoot",
        "linear",
    ];

    /// Decode the integer attribute form. Unknown indices fall back to linear.
    pub fn from_index(index: i32) -> Self {
        match index {
            0 => Interpolator::AccelerateDecelerate,
            1 => Interpolator::Accelerate(1.0),
            2 => Interpolator::Anticipate(2.0),
            3 => Interpolator::AnticipateOvershoot(3.0),
            4 => Interpolator::Bounce,
            5 => Interpolator::Cycle(1.0),
            6 => Interpolator::Decelerate(1.0),
            7 => Interpolator::Overshoot(2.0),
            _ => Interpolator::Linear,
        }
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        Interpolator::Custom(Arc::new(f))
    }

    /// Evaluate the curve at `t` (0.0 to 1.0).
    pub fn evaluate(&self, t: f32) -> f32 {
        match self {
            Interpolator::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
            Interpolator::Accelerate(factor) => {
                if *factor == 1.0 {
                    t * t
                } else {
                    t.powf(2.0 * factor)
                }
            }
            Interpolator::Anticipate(tension) => anticipate(t, *tension),
            Interpolator::AnticipateOvershoot(tension) => {
                if t < 0.5 {
                    0.5 * anticipate(t * 2.0, *tension)
                } else {
                    0.5 * (overshoot(t * 2.0 - 2.0, *tension) + 2.0)
                }
            }
            Interpolator::Bounce => bounce_curve(t),
            Interpolator::Cycle(cycles) => (2.0 * cycles * PI * t).sin(),
            Interpolator::Decelerate(factor) => {
                if *factor == 1.0 {
                    1.0 - (1.0 - t) * (1.0 - t)
                } else {
                    1.0 - (1.0 - t).powf(2.0 * factor)
                }
            }
            Interpolator::Overshoot(tension) => overshoot(t - 1.0, *tension) + 1.0,
            Interpolator::Linear => t,
            Interpolator::Custom(f) => f(t),
        }
    }
}

impl Default for Interpolator {
    fn default() -> Self {
        Interpolator::Decelerate(1.0)
    }
}

impl FromStr for Interpolator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::NAMES
            .iter()
            .position(|name| *name == s)
            .map(|index| Self::from_index(index as i32))
            .ok_or_else(|| Error::UnknownInterpolator(s.to_string()))
    }
}

impl TryFrom<String> for Interpolator {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Debug for Interpolator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Interpolator::AccelerateDecelerate => write!(f, "AccelerateDecelerate"),
            Interpolator::Accelerate(factor) => write!(f, "Accelerate({})", factor),
            Interpolator::Anticipate(tension) => write!(f, "Anticipate({})", tension),
            Interpolator::AnticipateOvershoot(tension) => {
                write!(f, "AnticipateOvershoot({})", tension)
            }
            Interpolator::Bounce => write!(f, "Bounce"),
            Interpolator::Cycle(cycles) => write!(f, "Cycle({})", cycles),
            Interpolator::Decelerate(factor) => write!(f, "Decelerate({})", factor),
            Interpolator::Overshoot(tension) => write!(f, "Overshoot({})", tension),
            Interpolator::Linear => write!(f, "Linear"),
            Interpolator::Custom(_) => write!(f, "Custom"),
        }
    }
}

// Curve helpers

fn anticipate(t: f32, tension: f32) -> f32 {
    t * t * ((tension + 1.0) * t - tension)
}

fn overshoot(t: f32, tension: f32) -> f32 {
    t * t * ((tension + 1.0) * t + tension)
}

fn bounce(t: f32) -> f32 {
    t * t * 8.0
}

fn bounce_curve(t: f32) -> f32 {
    let t = t * 1.1226;
    if t < 0.3535 {
        bounce(t)
    } else if t < 0.7408 {
        bounce(t - 0.54719) + 0.7
    } else if t < 0.9644 {
        bounce(t - 0.8526) + 0.9
    } else {
        bounce(t - 1.0435) + 0.95
    }
}
