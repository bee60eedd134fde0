use crate::layout::{resolve_size, Dimension, MeasureSpec, Size};

use super::widget::{LayoutParams, Rect, Visibility, Widget};

/// A leaf widget with a fixed intrinsic content size.
///
/// Stands in for any content the host measures (text, images, nested
/// layouts). It resolves its intrinsic size against the specs it receives.
#[derive(Debug, Clone, PartialEq)]
pub struct SizedBox {
    intrinsic: Size,
    params: LayoutParams,
    visibility: Visibility,
    measured: Size,
    frame: Option<Rect>,
}

/// Create a fit-content box with the given intrinsic size.
pub fn sized_box(width: i32, height: i32) -> SizedBox {
    SizedBox::new(width, height)
}

impl SizedBox {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            intrinsic: Size::new(width, height),
            params: LayoutParams::default(),
            visibility: Visibility::Visible,
            measured: Size::zero(),
            frame: None,
        }
    }

    pub fn width(mut self, width: Dimension) -> Self {
        self.params.width = width;
        self
    }

    pub fn height(mut self, height: Dimension) -> Self {
        self.params.height = height;
        self
    }

    pub fn params(mut self, params: LayoutParams) -> Self {
        self.params = params;
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn measured_size(&self) -> Size {
        self.measured
    }

    /// Frame from the last placement pass.
    pub fn frame(&self) -> Option<Rect> {
        self.frame
    }
}

impl Widget for SizedBox {
    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size {
        self.measured = Size::new(
            resolve_size(self.intrinsic.width, width),
            resolve_size(self.intrinsic.height, height),
        );
        self.measured
    }

    fn set_frame(&mut self, frame: Rect) {
        self.frame = Some(frame);
    }

    fn layout_params(&self) -> LayoutParams {
        self.params
    }

    fn visibility(&self) -> Visibility {
        self.visibility
    }
}
