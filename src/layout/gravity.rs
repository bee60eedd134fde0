use std::str::FromStr;

use bitflags::bitflags;

use crate::error::Error;
use crate::widgets::Rect;

bitflags! {
    /// Alignment of children inside the container's content rectangle.
    ///
    /// Each axis is resolved on its own: the start flag wins over the end
    /// flag, and an axis with neither is centered.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Gravity: u8 {
        const LEFT              = 0b00_0001;
        const RIGHT             = 0b00_0010;
        const CENTER_HORIZONTAL = 0b00_0100;
        const TOP               = 0b00_1000;
        const BOTTOM            = 0b01_0000;
        const CENTER_VERTICAL   = 0b10_0000;
        const CENTER = Self::CENTER_HORIZONTAL.bits() | Self::CENTER_VERTICAL.bits();
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Gravity::TOP | Gravity::LEFT
    }
}

impl Gravity {
    /// Position a `width` x `height` box inside `display`.
    pub fn apply(self, display: Rect, width: i32, height: i32) -> Rect {
        let x = if self.contains(Gravity::LEFT) {
            display.x
        } else if self.contains(Gravity::RIGHT) {
            display.right() - width
        } else {
            display.x + (display.width - width) / 2
        };
        let y = if self.contains(Gravity::TOP) {
            display.y
        } else if self.contains(Gravity::BOTTOM) {
            display.bottom() - height
        } else {
            display.y + (display.height - height) / 2
        };
        Rect::new(x, y, width, height)
    }
}

/// Parses the attribute form: flag names joined by `|`, e.g. `"bottom|right"`.
impl FromStr for Gravity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split('|')
            .map(str::trim)
            .try_fold(Gravity::empty(), |gravity, name| {
                let flag = match name {
                    "left" | "start" => Gravity::LEFT,
                    "right" | "end" => Gravity::RIGHT,
                    "center_horizontal" => Gravity::CENTER_HORIZONTAL,
                    "top" => Gravity::TOP,
                    "bottom" => Gravity::BOTTOM,
                    "center_vertical" => Gravity::CENTER_VERTICAL,
                    "center" => Gravity::CENTER,
                    other => return Err(Error::UnknownGravity(other.to_string())),
                };
                Ok(gravity | flag)
            })
    }
}
