use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub const fn zero() -> Self {
        Self {
            width: 0,
            height: 0,
        }
    }
}

/// How a child wants to be sized along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dimension {
    /// An explicit size in pixels.
    Exact(i32),
    /// As large as the parent allows.
    FillParent,
    /// As large as the child's own content.
    #[default]
    FitContent,
}

/// A (mode, size) pair handed down by the parent during measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureSpec {
    /// The parent has decided the exact size.
    Exactly(i32),
    /// The child may be as large as it wants up to the size.
    AtMost(i32),
    /// No constraint. The size is a hint only.
    Unspecified(i32),
}

const MODE_SHIFT: u32 = 30;
const MODE_MASK: u32 = 0b11 << MODE_SHIFT;
const SIZE_MASK: u32 = !MODE_MASK;

const MODE_UNSPECIFIED: u32 = 0b00;
const MODE_EXACTLY: u32 = 0b01;
const MODE_AT_MOST: u32 = 0b10;

impl MeasureSpec {
    pub const UNSPECIFIED: MeasureSpec = MeasureSpec::Unspecified(0);

    pub fn size(&self) -> i32 {
        match *self {
            MeasureSpec::Exactly(size)
            | MeasureSpec::AtMost(size)
            | MeasureSpec::Unspecified(size) => size,
        }
    }

    /// Pack into the host's 32-bit encoding: two high mode bits, 30 size bits.
    pub fn to_raw(self) -> u32 {
        let mode = match self {
            MeasureSpec::Unspecified(_) => MODE_UNSPECIFIED,
            MeasureSpec::Exactly(_) => MODE_EXACTLY,
            MeasureSpec::AtMost(_) => MODE_AT_MOST,
        };
        (mode << MODE_SHIFT) | (self.size().max(0) as u32 & SIZE_MASK)
    }

    /// Decode a packed spec coming from the host.
    pub fn from_raw(raw: u32) -> Result<Self> {
        let size = (raw & SIZE_MASK) as i32;
        match (raw & MODE_MASK) >> MODE_SHIFT {
            MODE_UNSPECIFIED => Ok(MeasureSpec::Unspecified(size)),
            MODE_EXACTLY => Ok(MeasureSpec::Exactly(size)),
            MODE_AT_MOST => Ok(MeasureSpec::AtMost(size)),
            bits => Err(Error::UnknownMeasureMode(bits)),
        }
    }
}

/// Derive the spec for one axis of a child from the parent's spec for that
/// axis, the space already consumed (padding plus margins) and the child's
/// requested dimension.
pub fn child_measure_spec(parent: MeasureSpec, padding: i32, dimension: Dimension) -> MeasureSpec {
    let available = (parent.size() - padding).max(0);

    match (parent, dimension) {
        (_, Dimension::Exact(size)) => MeasureSpec::Exactly(size),
        (MeasureSpec::Exactly(_), Dimension::FillParent) => MeasureSpec::Exactly(available),
        (MeasureSpec::Exactly(_), Dimension::FitContent) => MeasureSpec::AtMost(available),
        (MeasureSpec::AtMost(_), _) => MeasureSpec::AtMost(available),
        (MeasureSpec::Unspecified(_), _) => MeasureSpec::Unspecified(available),
    }
}

/// Reconcile a desired content size with a spec.
pub fn resolve_size(content: i32, spec: MeasureSpec) -> i32 {
    match spec {
        MeasureSpec::Exactly(size) => size,
        MeasureSpec::AtMost(size) => content.min(size),
        MeasureSpec::Unspecified(_) => content,
    }
}
