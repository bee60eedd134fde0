use std::rc::Weak;
use std::time::Duration;

use crate::layout::{Dimension, MeasureSpec, Size};
use crate::scheduler::FrameScheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self {
            x: 0,
            y: 0,
            width: size.width,
            height: size.height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Shrink by the given insets. Width and height never go negative.
    pub fn deflate(&self, insets: Padding) -> Self {
        Self {
            x: self.x + insets.left,
            y: self.y + insets.top,
            width: (self.width - insets.horizontal()).max(0),
            height: (self.height - insets.vertical()).max(0),
        }
    }
}

/// Insets on the four edges. Used for both container padding and child
/// margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

pub type Margins = Padding;

impl Padding {
    pub fn all(value: i32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn symmetric(horizontal: i32, vertical: i32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

impl From<i32> for Padding {
    fn from(v: i32) -> Self {
        Padding::all(v)
    }
}

/// `[vertical, horizontal]` shorthand.
impl From<[i32; 2]> for Padding {
    fn from(v: [i32; 2]) -> Self {
        Padding::symmetric(v[1], v[0])
    }
}

/// `[top, right, bottom, left]` shorthand.
impl From<[i32; 4]> for Padding {
    fn from(v: [i32; 4]) -> Self {
        Padding {
            top: v[0],
            right: v[1],
            bottom: v[2],
            left: v[3],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    /// Takes space but is not drawn.
    Invisible,
    /// Takes no space and is skipped by measurement and placement.
    Gone,
}

/// What a child asks of its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutParams {
    pub width: Dimension,
    pub height: Dimension,
    pub margins: Margins,
}

impl LayoutParams {
    pub fn new(width: Dimension, height: Dimension) -> Self {
        Self {
            width,
            height,
            margins: Margins::default(),
        }
    }

    pub fn margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = margins.into();
        self
    }
}

/// The contract between the container and each child it owns.
pub trait Widget {
    /// Measure against the given specs and return the measured size.
    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size;

    /// Receive the frame assigned by the parent, in parent coordinates.
    fn set_frame(&mut self, frame: Rect) {
        let _ = frame;
    }

    fn layout_params(&self) -> LayoutParams {
        LayoutParams::default()
    }

    fn visibility(&self) -> Visibility {
        Visibility::Visible
    }

    fn is_gone(&self) -> bool {
        self.visibility() == Visibility::Gone
    }

    /// The parent joined a live view tree driven by `scheduler`.
    fn attach(&mut self, scheduler: Weak<dyn FrameScheduler>) {
        let _ = scheduler;
    }

    /// The parent left its view tree.
    fn detach(&mut self) {}

    /// Advance any running animations to the frame at `now`.
    /// Returns true if another frame is needed.
    fn advance_animations(&mut self, now: Duration) -> bool {
        let _ = now;
        false
    }
}

impl Widget for Box<dyn Widget> {
    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size {
        (**self).measure(width, height)
    }
    fn set_frame(&mut self, frame: Rect) {
        (**self).set_frame(frame)
    }
    fn layout_params(&self) -> LayoutParams {
        (**self).layout_params()
    }
    fn visibility(&self) -> Visibility {
        (**self).visibility()
    }
    fn attach(&mut self, scheduler: Weak<dyn FrameScheduler>) {
        (**self).attach(scheduler)
    }
    fn detach(&mut self) {
        (**self).detach()
    }
    fn advance_animations(&mut self, now: Duration) -> bool {
        (**self).advance_animations(now)
    }
}
