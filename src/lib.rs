//! An expand/collapse container widget.
//!
//! [`ExpandableLayout`](widgets::ExpandableLayout) animates its own size
//! along one axis between zero and the natural size of its content. The
//! [`layout`] module reconciles parent specs with child sizes, the [`expand`]
//! module serializes expand/collapse requests and owns the single animation
//! run, and the host drives both through a [`FrameScheduler`](scheduler::FrameScheduler).

pub mod animation;
pub mod config;
pub mod error;
pub mod expand;
pub mod layout;
pub mod scheduler;
pub mod widgets;

pub use error::{Error, Result};

pub mod prelude {
    pub use crate::animation::{Interpolator, RunId, Tick, Transition};
    pub use crate::config::ExpandableConfig;
    pub use crate::expand::{ExpandState, ListenerId, Outcome, StateChangeListener};
    pub use crate::layout::{Dimension, ExpandDirection, Gravity, MeasureSpec, Size};
    pub use crate::scheduler::{FrameQueue, FrameScheduler};
    pub use crate::widgets::{
        expandable_layout, sized_box, ExpandableLayout, LayoutParams, Margins, Padding, Rect, SizedBox,
        Visibility, Widget,
    };
}
