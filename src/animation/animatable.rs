/// Trait for values an animation can interpolate between
pub trait Animatable: Copy + PartialEq + std::fmt::Debug + 'static {
    /// Linear interpolation between two values
    /// t = 0.0 returns `from`, t = 1.0 returns `to`
    /// t can exceed [0, 1] range for overshoot effects
    fn lerp(from: &Self, to: &Self, t: f32) -> Self;
}

/// Pixel extents truncate towards zero, like the host's integer evaluator.
impl Animatable for i32 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        from + ((to - from) as f32 * t) as i32
    }
}
