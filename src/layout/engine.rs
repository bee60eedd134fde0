//! Measurement and placement for a container that collapses along one axis.
//!
//! Children are measured unconstrained along the expand axis so they report
//! their natural size, and with the host's usual child spec resolution across
//! it. The container's own extent along the expand axis is then resolved from
//! the parent spec, the expanded flag and, while an animation runs, the
//! animated extent. Children keep their natural size throughout; only the
//! container's outer extent changes.

use super::{child_measure_spec, resolve_size, ExpandDirection, Gravity, MeasureSpec, Size};
use crate::widgets::{Padding, Rect, Widget};

/// Result of one measurement pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Measurement {
    /// The container's own measured size.
    pub size: Size,
    /// Largest child extent on each axis, including margins and padding.
    pub content: Size,
    /// Extent along the expand axis the container has when fully expanded
    /// under the same parent spec.
    pub expanded_extent: i32,
    /// Measured size per child, `None` for gone children.
    pub children: Vec<Option<Size>>,
}

/// Extent along the expand axis requested by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    Collapsed,
    Expanded,
    /// An animation is in flight and currently at this extent.
    Animated(i32),
}

#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    pub direction: ExpandDirection,
    pub gravity: Gravity,
    pub padding: Padding,
}

impl LayoutEngine {
    pub fn new(direction: ExpandDirection, gravity: Gravity, padding: Padding) -> Self {
        Self {
            direction,
            gravity,
            padding,
        }
    }

    /// Measure `children` and resolve the container size.
    pub fn measure<W: Widget>(
        &self,
        children: &mut [W],
        width_spec: MeasureSpec,
        height_spec: MeasureSpec,
        extent: Extent,
    ) -> Measurement {
        let padding = self.padding;
        let mut content = Size::zero();
        let mut child_sizes = Vec::with_capacity(children.len());

        for child in children.iter_mut() {
            if child.is_gone() {
                child_sizes.push(None);
                continue;
            }

            let params = child.layout_params();
            let margins = params.margins;
            let used_w = padding.horizontal() + margins.horizontal();
            let used_h = padding.vertical() + margins.vertical();

            let (child_w, child_h) = match self.direction {
                ExpandDirection::Horizontal => (
                    MeasureSpec::UNSPECIFIED,
                    child_measure_spec(height_spec, used_h, params.height),
                ),
                ExpandDirection::Vertical => (
                    child_measure_spec(width_spec, used_w, params.width),
                    MeasureSpec::UNSPECIFIED,
                ),
            };

            let measured = child.measure(child_w, child_h);
            content.width = content.width.max(measured.width + used_w);
            content.height = content.height.max(measured.height + used_h);
            child_sizes.push(Some(measured));
        }

        let (main_spec, cross_spec) = match self.direction {
            ExpandDirection::Horizontal => (width_spec, height_spec),
            ExpandDirection::Vertical => (height_spec, width_spec),
        };

        let cross = resolve_size(self.direction.cross(content), cross_spec);

        // A fixed parent slot always wins over the expand state.
        let expanded_extent = match main_spec {
            MeasureSpec::Exactly(size) => size,
            _ => self.direction.main(content),
        };
        let main = match (main_spec, extent) {
            (MeasureSpec::Exactly(size), _) => size,
            (_, Extent::Animated(value)) => value.max(0),
            (_, Extent::Expanded) => expanded_extent,
            (_, Extent::Collapsed) => 0,
        };

        let size = self.direction.size(main, cross);
        log::trace!(
            "measured {:?} (content {:?}, extent {:?}) under {:?} x {:?}",
            size,
            content,
            extent,
            width_spec,
            height_spec
        );

        Measurement {
            size,
            content,
            expanded_extent,
            children: child_sizes,
        }
    }

    /// Position every measured child inside the container.
    ///
    /// Frames are in container coordinates. The display rectangle is the
    /// padded content rectangle of the fully expanded container, so children
    /// stay put while the outer extent animates.
    pub fn place<W: Widget>(&self, children: &mut [W], measurement: &Measurement) -> Vec<Option<Rect>> {
        let cross = self.direction.cross(measurement.size);
        let full = self.direction.size(measurement.expanded_extent, cross);
        let content_rect = Rect::from_size(full).deflate(self.padding);

        children
            .iter_mut()
            .zip(measurement.children.iter())
            .map(|(child, measured)| {
                let measured = (*measured)?;
                let display = content_rect.deflate(child.layout_params().margins);
                let frame = self
                    .gravity
                    .apply(display, measured.width, measured.height);
                child.set_frame(frame);
                Some(frame)
            })
            .collect()
    }
}
