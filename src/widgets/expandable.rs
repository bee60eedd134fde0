//! The expandable container.
//!
//! `ExpandableLayout` owns an ordered list of children and sizes itself
//! between zero and its natural content extent along one axis. It ties the
//! [`LayoutEngine`] to the [`ExpandController`] and talks to the host through
//! a weakly held [`FrameScheduler`].
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use std::time::Duration;
//! use expandable::prelude::*;
//!
//! let host = Rc::new(FrameQueue::new());
//! let mut layout = expandable_layout().child(sized_box(100, 40));
//! layout.attach(&host);
//!
//! let spec = MeasureSpec::AtMost(500);
//! assert_eq!(layout.measure(spec, spec), Size::new(100, 0));
//! layout.layout();
//!
//! layout.set_expanded(true, true);
//! let mut now = Duration::ZERO;
//! while layout.advance_animations(now) {
//!     layout.measure(spec, spec);
//!     now += Duration::from_millis(16);
//! }
//! assert_eq!(layout.measure(spec, spec), Size::new(100, 40));
//! ```

use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::animation::{Interpolator, RunId, Tick, Transition};
use crate::config::ExpandableConfig;
use crate::expand::{
    AnimationContext, ExpandController, ExpandTask, ListenerId, Outcome, StateChangeListener,
};
use crate::layout::{
    ExpandDirection, Extent, Gravity, LayoutEngine, MeasureSpec, Measurement, Size,
};
use crate::scheduler::FrameScheduler;

use super::widget::{LayoutParams, Padding, Rect, Widget};

pub struct ExpandableLayout {
    engine: LayoutEngine,
    transition: Transition,
    controller: ExpandController,
    children: Vec<Box<dyn Widget>>,
    params: LayoutParams,

    // Host
    scheduler: Option<Weak<dyn FrameScheduler>>,
    laid_out: bool,

    // Results of the last passes
    measurement: Option<Measurement>,
    frames: Vec<Option<Rect>>,
}

/// Create a collapsed, vertical container with default settings.
pub fn expandable_layout() -> ExpandableLayout {
    ExpandableLayout::new()
}

impl ExpandableLayout {
    pub fn new() -> Self {
        Self::from_config(&ExpandableConfig::default())
    }

    pub fn from_config(config: &ExpandableConfig) -> Self {
        Self {
            engine: LayoutEngine::new(config.expand_direction, config.gravity, Padding::default()),
            transition: config.transition(),
            controller: ExpandController::new(config.expanded),
            children: Vec::new(),
            params: LayoutParams::default(),
            scheduler: None,
            laid_out: false,
            measurement: None,
            frames: Vec::new(),
        }
    }

    // Builder methods

    pub fn child(mut self, child: impl Widget + 'static) -> Self {
        self.add_child(child);
        self
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.controller.reset(expanded);
        self
    }

    pub fn direction(mut self, direction: ExpandDirection) -> Self {
        self.engine.direction = direction;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.transition.duration = duration;
        self
    }

    pub fn interpolator(mut self, interpolator: Interpolator) -> Self {
        self.transition.interpolator = interpolator;
        self
    }

    pub fn gravity(mut self, gravity: Gravity) -> Self {
        self.engine.gravity = gravity;
        self
    }

    pub fn padding(mut self, padding: impl Into<Padding>) -> Self {
        self.engine.padding = padding.into();
        self
    }

    /// What this container asks of its own parent when nested.
    pub fn params(mut self, params: LayoutParams) -> Self {
        self.params = params;
        self
    }

    // Children

    pub fn add_child(&mut self, child: impl Widget + 'static) {
        let mut child: Box<dyn Widget> = Box::new(child);
        if let Some(scheduler) = &self.scheduler {
            child.attach(scheduler.clone());
        }
        self.children.push(child);
        self.request_layout_if_live();
    }

    pub fn remove_child(&mut self, index: usize) -> Option<Box<dyn Widget>> {
        if index >= self.children.len() {
            return None;
        }
        let mut child = self.children.remove(index);
        if self.scheduler.is_some() {
            child.detach();
        }
        self.request_layout_if_live();
        Some(child)
    }

    pub fn child_at(&self, index: usize) -> Option<&dyn Widget> {
        self.children.get(index).map(|child| child.as_ref())
    }

    pub fn child_at_mut(&mut self, index: usize) -> Option<&mut (dyn Widget + 'static)> {
        self.children.get_mut(index).map(|child| child.as_mut())
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    // Host lifecycle

    /// Join a live view tree driven by `scheduler`. Only a weak reference is
    /// kept. Children are attached to the same scheduler.
    pub fn attach<S: FrameScheduler + 'static>(&mut self, scheduler: &Rc<S>) {
        let weak = Rc::downgrade(scheduler);
        let weak: Weak<dyn FrameScheduler> = weak;
        self.attach_weak(weak);
    }

    fn attach_weak(&mut self, scheduler: Weak<dyn FrameScheduler>) {
        for child in self.children.iter_mut() {
            child.attach(scheduler.clone());
        }
        self.scheduler = Some(scheduler);
        self.laid_out = false;
        log::debug!("attached");
        self.request_layout();
    }

    /// Leave the view tree, together with all children. A running animation
    /// is cancelled.
    pub fn detach(&mut self) {
        self.controller.cancel();
        for child in self.children.iter_mut() {
            child.detach();
        }
        self.scheduler = None;
        self.laid_out = false;
        log::debug!("detached");
    }

    pub fn is_attached(&self) -> bool {
        self.scheduler().is_some()
    }

    /// True once attached and placed at least once.
    pub fn is_laid_out(&self) -> bool {
        self.laid_out && self.is_attached()
    }

    fn scheduler(&self) -> Option<Rc<dyn FrameScheduler>> {
        self.scheduler.as_ref().and_then(Weak::upgrade)
    }

    fn request_layout(&self) {
        if let Some(scheduler) = self.scheduler() {
            scheduler.request_layout();
        }
    }

    fn request_frame(&self) {
        if let Some(scheduler) = self.scheduler() {
            scheduler.request_frame();
        }
    }

    fn request_layout_if_live(&self) {
        if self.is_laid_out() {
            self.request_layout();
        }
    }

    // Measure / layout

    /// Measure the children and resolve the container size.
    pub fn measure(&mut self, width_spec: MeasureSpec, height_spec: MeasureSpec) -> Size {
        let extent = match self.controller.animated_extent() {
            Some(value) => Extent::Animated(value),
            None if self.controller.is_expanded() => Extent::Expanded,
            None => Extent::Collapsed,
        };
        let measurement = self
            .engine
            .measure(&mut self.children, width_spec, height_spec, extent);
        let size = measurement.size;
        self.measurement = Some(measurement);
        size
    }

    /// Place the children using the last measurement. Frames are in
    /// container coordinates.
    pub fn layout(&mut self) -> &[Option<Rect>] {
        match &self.measurement {
            Some(measurement) => {
                self.frames = self.engine.place(&mut self.children, measurement);
                self.laid_out = true;
            }
            None => log::warn!("layout requested before the first measurement"),
        }
        &self.frames
    }

    /// Size from the last measurement, zero before the first one.
    pub fn measured_size(&self) -> Size {
        self.measurement
            .as_ref()
            .map(|m| m.size)
            .unwrap_or_default()
    }

    /// Natural content size (largest child plus margins and padding) from the
    /// last measurement. `None` until measured.
    pub fn content_size(&self) -> Option<Size> {
        self.measurement.as_ref().map(|m| m.content)
    }

    pub fn child_frames(&self) -> &[Option<Rect>] {
        &self.frames
    }

    // Expand / collapse

    pub fn is_expanded(&self) -> bool {
        self.controller.is_expanded()
    }

    pub fn is_animating(&self) -> bool {
        self.controller.is_animating()
    }

    pub fn active_run(&self) -> Option<RunId> {
        self.controller.active_run().map(|run| run.id())
    }

    /// Request a transition to `expand`.
    ///
    /// The state commits and listeners hear about it before this returns.
    /// A running animation is cancelled first. Without a live, measured
    /// host the change is applied without animation on the next pass.
    pub fn set_expanded(&mut self, expand: bool, animate: bool) -> Outcome {
        let direction = self.engine.direction;
        let current_extent = self
            .controller
            .animated_extent()
            .unwrap_or_else(|| direction.main(self.measured_size()));
        let max_extent = self.content_size().map(|c| direction.main(c));

        let ctx = AnimationContext {
            can_animate: self.is_laid_out() && max_extent.is_some(),
            current_extent,
            max_extent: max_extent.unwrap_or(0),
            transition: &self.transition,
        };
        let outcome = self.controller.submit(ExpandTask::new(expand, animate), ctx);

        match outcome {
            Outcome::Ignored => {}
            Outcome::Snapped => self.request_layout(),
            Outcome::Animating(_) => {
                self.request_layout();
                self.request_frame();
            }
        }
        outcome
    }

    pub fn toggle_expanded(&mut self, animate: bool) -> Outcome {
        self.set_expanded(!self.is_expanded(), animate)
    }

    /// Advance the running animation to the frame at `now`.
    ///
    /// Every tick requests a layout pass; unfinished runs also request the
    /// next frame.
    pub fn tick(&mut self, now: Duration) -> Option<Tick<i32>> {
        let tick = self.controller.advance(now)?;
        log::trace!("run {:?} at {}", tick.run, tick.value);
        self.request_layout();
        if !tick.finished {
            self.request_frame();
        }
        Some(tick)
    }

    /// Advance this container's run and every nested container's run.
    /// Returns true while any of them still needs frames.
    pub fn advance_animations(&mut self, now: Duration) -> bool {
        let mut running = self.tick(now).is_some_and(|tick| !tick.finished);
        for child in self.children.iter_mut() {
            running |= child.advance_animations(now);
        }
        running
    }

    /// Register a listener. It is invoked immediately with the current
    /// state, then once per committed transition.
    pub fn add_state_change_listener(
        &mut self,
        listener: impl StateChangeListener + 'static,
    ) -> ListenerId {
        self.controller.add_listener(Box::new(listener))
    }

    pub fn remove_state_change_listener(&mut self, id: ListenerId) -> bool {
        self.controller.remove_listener(id)
    }

    // Properties

    pub fn expand_direction(&self) -> ExpandDirection {
        self.engine.direction
    }

    /// Switching axes cancels a running animation; its extent belonged to the
    /// old axis.
    pub fn set_expand_direction(&mut self, direction: ExpandDirection) {
        if self.engine.direction == direction {
            return;
        }
        self.controller.cancel();
        self.engine.direction = direction;
        self.request_layout_if_live();
    }

    pub fn animation_duration(&self) -> Duration {
        self.transition.duration
    }

    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.transition.duration = duration;
        self.request_layout_if_live();
    }

    pub fn animation_interpolator(&self) -> &Interpolator {
        &self.transition.interpolator
    }

    pub fn set_interpolator(&mut self, interpolator: Interpolator) {
        self.transition.interpolator = interpolator;
        self.request_layout_if_live();
    }

    pub fn content_gravity(&self) -> Gravity {
        self.engine.gravity
    }

    pub fn set_content_gravity(&mut self, gravity: Gravity) {
        self.engine.gravity = gravity;
        self.request_layout_if_live();
    }

    pub fn padding_insets(&self) -> Padding {
        self.engine.padding
    }

    pub fn set_padding(&mut self, padding: impl Into<Padding>) {
        self.engine.padding = padding.into();
        self.request_layout_if_live();
    }
}

impl Default for ExpandableLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ExpandableLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpandableLayout")
            .field("engine", &self.engine)
            .field("transition", &self.transition)
            .field("controller", &self.controller)
            .field("children", &self.children.len())
            .field("attached", &self.is_attached())
            .field("measurement", &self.measurement)
            .finish()
    }
}

/// Containers nest: a parent measures and places this one like any child.
impl Widget for ExpandableLayout {
    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size {
        ExpandableLayout::measure(self, width, height)
    }

    fn set_frame(&mut self, _frame: Rect) {
        ExpandableLayout::layout(self);
    }

    fn layout_params(&self) -> LayoutParams {
        self.params
    }

    fn attach(&mut self, scheduler: Weak<dyn FrameScheduler>) {
        self.attach_weak(scheduler);
    }

    fn detach(&mut self) {
        ExpandableLayout::detach(self);
    }

    fn advance_animations(&mut self, now: Duration) -> bool {
        ExpandableLayout::advance_animations(self, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::FrameQueue;
    use crate::widgets::sized_box;
    use std::cell::RefCell;

    const SPEC: MeasureSpec = MeasureSpec::AtMost(1000);

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn live_layout(host: &Rc<FrameQueue>) -> ExpandableLayout {
        let mut layout = expandable_layout()
            .interpolator(Interpolator::Linear)
            .duration(ms(100))
            .child(sized_box(50, 200));
        layout.attach(host);
        layout.measure(SPEC, SPEC);
        layout.layout();
        host.drain();
        layout
    }

    #[test]
    fn test_defaults() {
        let layout = ExpandableLayout::default();
        assert!(!layout.is_expanded());
        assert_eq!(layout.expand_direction(), ExpandDirection::Vertical);
        assert_eq!(layout.animation_duration(), ms(300));
        assert_eq!(layout.content_gravity(), Gravity::TOP | Gravity::LEFT);
        assert_eq!(layout.content_size(), None);
        assert_eq!(layout.measured_size(), Size::zero());
    }

    #[test]
    fn test_detached_request_commits_and_applies_on_measure() {
        let mut layout = expandable_layout().child(sized_box(50, 200));
        assert_eq!(layout.set_expanded(true, true), Outcome::Snapped);
        assert!(layout.is_expanded());
        assert_eq!(layout.measure(SPEC, SPEC), Size::new(50, 200));
    }

    #[test]
    fn test_ignored_request_does_not_request_layout() {
        let host = Rc::new(FrameQueue::new());
        let mut layout = live_layout(&host);
        assert_eq!(layout.set_expanded(false, true), Outcome::Ignored);
        assert!(!host.has_pending());
    }

    #[test]
    fn test_animation_drives_measurement() {
        let host = Rc::new(FrameQueue::new());
        let mut layout = live_layout(&host);

        assert!(matches!(layout.set_expanded(true, true), Outcome::Animating(_)));
        assert!(host.needs_frame());

        assert!(layout.advance_animations(ms(1000)));
        assert_eq!(layout.measure(SPEC, SPEC).height, 0);
        assert!(layout.advance_animations(ms(1050)));
        assert_eq!(layout.measure(SPEC, SPEC).height, 100);
        assert!(!layout.advance_animations(ms(1100)));
        assert_eq!(layout.measure(SPEC, SPEC).height, 200);
        assert!(!layout.is_animating());
    }

    #[test]
    fn test_children_keep_natural_size_while_animating() {
        let host = Rc::new(FrameQueue::new());
        let mut layout = live_layout(&host);
        layout.set_expanded(true, true);
        layout.advance_animations(ms(0));
        layout.advance_animations(ms(30));
        layout.measure(SPEC, SPEC);
        let frames = layout.layout().to_vec();
        assert_eq!(frames, vec![Some(Rect::new(0, 0, 50, 200))]);
    }

    #[test]
    fn test_detach_cancels_and_drops_host() {
        let host = Rc::new(FrameQueue::new());
        let mut layout = live_layout(&host);
        layout.set_expanded(true, true);
        layout.detach();
        assert!(!layout.is_animating());
        assert!(!layout.is_attached());
        assert_eq!(layout.measure(SPEC, SPEC).height, 200);
    }

    #[test]
    fn test_weak_host_reference() {
        let host = Rc::new(FrameQueue::new());
        let mut layout = live_layout(&host);
        drop(host);
        assert!(!layout.is_attached());
        // Without a host there is nothing to animate against.
        assert_eq!(layout.set_expanded(true, true), Outcome::Snapped);
    }

    #[test]
    fn test_setters_request_layout_only_when_live() {
        let mut detached = expandable_layout();
        detached.set_content_gravity(Gravity::CENTER);
        assert_eq!(detached.content_gravity(), Gravity::CENTER);

        let host = Rc::new(FrameQueue::new());
        let mut layout = live_layout(&host);
        layout.set_content_gravity(Gravity::CENTER);
        assert_eq!(host.layout_requests(), 2);
        layout.set_animation_duration(ms(10));
        layout.set_interpolator(Interpolator::Bounce);
        assert!(matches!(layout.animation_interpolator(), Interpolator::Bounce));
        layout.set_padding(4);
        assert_eq!(host.layout_requests(), 5);
    }

    #[test]
    fn test_direction_change_cancels_animation() {
        let host = Rc::new(FrameQueue::new());
        let mut layout = live_layout(&host);
        layout.set_expanded(true, true);
        layout.set_expand_direction(ExpandDirection::Horizontal);
        assert!(!layout.is_animating());
        assert_eq!(layout.measure(SPEC, SPEC), Size::new(50, 200));
    }

    #[test]
    fn test_child_management() {
        let host = Rc::new(FrameQueue::new());
        let mut layout = live_layout(&host);
        layout.add_child(sized_box(10, 10));
        assert_eq!(layout.child_count(), 2);
        assert!(layout.remove_child(5).is_none());
        assert!(layout.remove_child(0).is_some());
        assert_eq!(layout.child_count(), 1);
        assert!(layout.child_at(0).is_some());
        assert_eq!(layout.measure(SPEC, SPEC), Size::new(10, 0));
    }

    #[test]
    fn test_listener_hears_toggle() {
        let mut layout = expandable_layout();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        layout.add_state_change_listener(move |expanded: bool| sink.borrow_mut().push(expanded));
        layout.toggle_expanded(false);
        layout.toggle_expanded(false);
        assert_eq!(*seen.borrow(), vec![false, true, false]);
    }

    /// Child that records lifecycle calls from its parent.
    #[derive(Default)]
    struct LifecycleLog {
        events: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Widget for LifecycleLog {
        fn measure(&mut self, _width: MeasureSpec, _height: MeasureSpec) -> Size {
            Size::new(10, 10)
        }

        fn attach(&mut self, scheduler: Weak<dyn FrameScheduler>) {
            assert!(scheduler.upgrade().is_some());
            self.events.borrow_mut().push("attach");
        }

        fn detach(&mut self) {
            self.events.borrow_mut().push("detach");
        }

        fn advance_animations(&mut self, _now: Duration) -> bool {
            self.events.borrow_mut().push("frame");
            false
        }
    }

    #[test]
    fn test_lifecycle_reaches_children() {
        let host = Rc::new(FrameQueue::new());
        let early = LifecycleLog::default();
        let events = early.events.clone();
        let mut layout = expandable_layout().child(early);
        layout.attach(&host);

        let late = LifecycleLog::default();
        let late_events = late.events.clone();
        layout.add_child(late);

        assert!(!layout.advance_animations(ms(0)));
        layout.detach();
        assert_eq!(*events.borrow(), vec!["attach", "frame", "detach"]);
        assert_eq!(*late_events.borrow(), vec!["attach", "frame", "detach"]);
    }

    #[test]
    fn test_nested_container() {
        let inner = expandable_layout().expanded(true).child(sized_box(30, 40));
        let mut outer = expandable_layout().expanded(true).padding(5).child(inner);
        assert_eq!(outer.measure(SPEC, SPEC), Size::new(40, 50));
        assert_eq!(outer.layout()[0], Some(Rect::new(5, 5, 30, 40)));
    }
}
