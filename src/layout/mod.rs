pub mod engine;
pub mod gravity;
pub mod spec;

pub use engine::{Extent, LayoutEngine, Measurement};
pub use gravity::Gravity;
pub use spec::{child_measure_spec, resolve_size, Dimension, MeasureSpec, Size};

use std::str::FromStr;

use serde::Deserialize;

use crate::error::Error;

/// The axis along which the container collapses and expands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpandDirection {
    Horizontal,
    #[default]
    Vertical,
}

impl ExpandDirection {
    /// Extent of `size` along this axis.
    pub fn main(self, size: Size) -> i32 {
        match self {
            ExpandDirection::Horizontal => size.width,
            ExpandDirection::Vertical => size.height,
        }
    }

    /// Extent of `size` across this axis.
    pub fn cross(self, size: Size) -> i32 {
        match self {
            ExpandDirection::Horizontal => size.height,
            ExpandDirection::Vertical => size.width,
        }
    }

    /// Build a size from extents along and across this axis.
    pub fn size(self, main: i32, cross: i32) -> Size {
        match self {
            ExpandDirection::Horizontal => Size::new(main, cross),
            ExpandDirection::Vertical => Size::new(cross, main),
        }
    }
}

impl FromStr for ExpandDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(ExpandDirection::Horizontal),
            "vertical" => Ok(ExpandDirection::Vertical),
            other => Err(Error::UnknownDirection(other.to_string())),
        }
    }
}
