pub mod expandable;
pub mod sized_box;
pub mod widget;

pub use expandable::{expandable_layout, ExpandableLayout};
pub use sized_box::{sized_box, SizedBox};
pub use widget::{LayoutParams, Margins, Padding, Rect, Visibility, Widget};
