use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use expandable::prelude::*;
use expandable::scheduler::JobType;

const FRAME: Duration = Duration::from_millis(16);

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn recorder(layout: &mut ExpandableLayout) -> Rc<RefCell<Vec<bool>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    layout.add_state_change_listener(move |expanded: bool| sink.borrow_mut().push(expanded));
    // Drop the immediate callback from registration.
    seen.borrow_mut().clear();
    seen
}

/// Two children 200 and 500 tall inside a horizontally expanding container.
fn horizontal_pair() -> ExpandableLayout {
    expandable_layout()
        .direction(ExpandDirection::Horizontal)
        .child(sized_box(120, 200))
        .child(sized_box(80, 500))
}

fn attach_and_lay_out(
    layout: &mut ExpandableLayout,
    host: &Rc<FrameQueue>,
    width: MeasureSpec,
    height: MeasureSpec,
) -> Size {
    layout.attach(host);
    let size = layout.measure(width, height);
    layout.layout();
    host.drain();
    size
}

#[test]
fn test_collapsed_horizontal_takes_max_cross_and_zero_extent() {
    let mut layout = horizontal_pair();
    let size = layout.measure(MeasureSpec::Unspecified(0), MeasureSpec::AtMost(1000));
    assert_eq!(size.height, 500);
    assert_eq!(size.width, 0);
}

#[test]
fn test_expanding_without_animation_uses_measured_content_extent() {
    let host = Rc::new(FrameQueue::new());
    let mut layout = horizontal_pair();
    let (w, h) = (MeasureSpec::Unspecified(0), MeasureSpec::AtMost(1000));
    attach_and_lay_out(&mut layout, &host, w, h);
    let content = layout.content_size().expect("measured");
    assert_eq!(content.width, 120);

    let seen = recorder(&mut layout);
    assert_eq!(layout.set_expanded(true, false), Outcome::Snapped);
    assert_eq!(*seen.borrow(), vec![true]);
    assert!(host.needs_layout());

    assert_eq!(layout.measure(w, h), Size::new(120, 500));
}

#[test]
fn test_exact_parent_extent_always_wins() {
    let mut layout = expandable_layout().child(sized_box(40, 300));
    let (w, h) = (MeasureSpec::AtMost(500), MeasureSpec::Exactly(100));
    assert_eq!(layout.measure(w, h).height, 100);
    layout.set_expanded(true, false);
    assert_eq!(layout.measure(w, h).height, 100);
}

#[test]
fn test_repeated_requests_for_current_state_are_silent() {
    let host = Rc::new(FrameQueue::new());
    let mut layout = expandable_layout().child(sized_box(40, 300));
    let spec = MeasureSpec::AtMost(500);
    attach_and_lay_out(&mut layout, &host, spec, spec);
    let seen = recorder(&mut layout);

    for animate in [true, false, true] {
        assert_eq!(layout.set_expanded(false, animate), Outcome::Ignored);
    }
    assert!(seen.borrow().is_empty());
    assert!(!host.has_pending());
    assert_eq!(host.layout_requests(), 1);
}

#[test]
fn test_toggling_round_trips_to_the_same_extents() {
    let host = Rc::new(FrameQueue::new());
    let mut layout = expandable_layout().child(sized_box(40, 300)).child(sized_box(60, 120));
    let spec = MeasureSpec::AtMost(500);
    attach_and_lay_out(&mut layout, &host, spec, spec);

    layout.set_expanded(true, false);
    let expanded = layout.measure(spec, spec).height;
    assert_eq!(expanded, 300);

    for _ in 0..3 {
        layout.set_expanded(false, false);
        assert_eq!(layout.measure(spec, spec).height, 0);
        layout.set_expanded(true, false);
        assert_eq!(layout.measure(spec, spec).height, expanded);
    }
}

#[test]
fn test_superseded_run_never_ticks_again() {
    let host = Rc::new(FrameQueue::new());
    let mut layout = expandable_layout()
        .interpolator(Interpolator::Linear)
        .duration(ms(300))
        .child(sized_box(40, 300));
    let spec = MeasureSpec::AtMost(500);
    attach_and_lay_out(&mut layout, &host, spec, spec);

    let Outcome::Animating(first) = layout.set_expanded(true, true) else {
        panic!("expected an animation");
    };
    let mut now = Duration::ZERO;
    for _ in 0..5 {
        let tick = layout.tick(now).expect("running");
        assert_eq!(tick.run, first);
        layout.measure(spec, spec);
        now += FRAME;
    }
    let extent = layout.measured_size().height;
    assert!(extent > 0 && extent < 300);

    let Outcome::Animating(second) = layout.set_expanded(false, true) else {
        panic!("expected an animation");
    };
    assert_ne!(first, second);

    let mut ticks = Vec::new();
    while let Some(tick) = layout.tick(now) {
        ticks.push(tick);
        layout.measure(spec, spec);
        now += FRAME;
    }
    assert!(ticks.iter().all(|tick| tick.run == second));
    // The reverse run starts where the first one stopped.
    assert_eq!(ticks.first().map(|t| t.value), Some(extent));
    assert_eq!(ticks.last().map(|t| t.value), Some(0));
    assert_eq!(layout.measure(spec, spec).height, 0);
}

#[test]
fn test_rapid_toggling_keeps_only_the_latest_target() {
    let host = Rc::new(FrameQueue::new());
    let mut layout = expandable_layout().child(sized_box(40, 300));
    let spec = MeasureSpec::AtMost(500);
    attach_and_lay_out(&mut layout, &host, spec, spec);
    let seen = recorder(&mut layout);

    for _ in 0..5 {
        layout.toggle_expanded(true);
    }
    assert!(layout.is_expanded());
    assert_eq!(*seen.borrow(), vec![true, false, true, false, true]);

    let mut now = Duration::ZERO;
    while layout.advance_animations(now) {
        layout.measure(spec, spec);
        now += FRAME;
    }
    assert_eq!(layout.measure(spec, spec).height, 300);
}

#[test]
fn test_animation_requests_frames_until_done() {
    let host = Rc::new(FrameQueue::new());
    let mut layout = expandable_layout()
        .interpolator(Interpolator::Linear)
        .duration(ms(100))
        .child(sized_box(40, 300));
    let spec = MeasureSpec::AtMost(500);
    attach_and_lay_out(&mut layout, &host, spec, spec);

    layout.set_expanded(true, true);
    let mut frames = 0;
    let mut now = Duration::ZERO;
    while host.drain().contains(JobType::FRAME) {
        layout.advance_animations(now);
        layout.measure(spec, spec);
        now += ms(20);
        frames += 1;
    }
    // First frame anchors, then 100 ms in 20 ms steps.
    assert_eq!(frames, 6);
    assert!(!layout.is_animating());
    assert_eq!(layout.measured_size().height, 300);
}

#[test]
fn test_overshooting_curves_never_measure_negative() {
    let host = Rc::new(FrameQueue::new());
    let mut layout = expandable_layout()
        .expanded(true)
        .interpolator(Interpolator::Anticipate(2.0))
        .duration(ms(200))
        .child(sized_box(40, 300));
    let spec = MeasureSpec::AtMost(500);
    attach_and_lay_out(&mut layout, &host, spec, spec);

    layout.set_expanded(false, true);
    let mut now = Duration::ZERO;
    loop {
        let running = layout.advance_animations(now);
        assert!(layout.measure(spec, spec).height >= 0);
        if !running {
            break;
        }
        now += ms(10);
    }
}

#[test]
fn test_built_from_config() {
    let config = ExpandableConfig::from_toml_str(
        r#"
        expanded = true
        expandDirection = "horizontal"
        duration = 2000
        gravity = "center"
        "#,
    )
    .expect("valid config");
    let mut layout = ExpandableLayout::from_config(&config)
        .child(sized_box(100, 20))
        .child(sized_box(50, 60));

    assert!(layout.is_expanded());
    assert_eq!(layout.animation_duration(), ms(2000));
    let spec = MeasureSpec::AtMost(1000);
    assert_eq!(layout.measure(spec, spec), Size::new(100, 60));
    let frames = layout.layout().to_vec();
    assert_eq!(frames[0], Some(Rect::new(0, 20, 100, 20)));
    assert_eq!(frames[1], Some(Rect::new(25, 0, 50, 60)));
}

#[test]
fn test_raw_specs_from_the_host() {
    let mut layout = expandable_layout().expanded(true).child(sized_box(40, 300));
    let width = MeasureSpec::from_raw(MeasureSpec::AtMost(500).to_raw()).expect("valid");
    let height = MeasureSpec::from_raw(0).expect("valid");
    assert_eq!(layout.measure(width, height), Size::new(40, 300));

    let bogus = MeasureSpec::from_raw(0xC000_0000);
    assert!(matches!(bogus, Err(expandable::Error::UnknownMeasureMode(_))));
}

#[test]
fn test_huge_configured_duration_does_not_overflow() {
    let config = ExpandableConfig::from_toml_str("duration = 9223372036854775807")
        .expect("valid config");
    let host = Rc::new(FrameQueue::new());
    let mut layout = ExpandableLayout::from_config(&config).child(sized_box(40, 300));
    let spec = MeasureSpec::AtMost(500);
    attach_and_lay_out(&mut layout, &host, spec, spec);

    assert!(matches!(layout.set_expanded(true, true), Outcome::Animating(_)));
    assert!(layout.advance_animations(Duration::ZERO));
    assert!(layout.advance_animations(ms(1000)));
    assert!(layout.measure(spec, spec).height < 300);
}

#[test]
fn test_expanded_builder_keeps_registered_listeners() {
    let mut layout = expandable_layout().child(sized_box(40, 300));
    let seen = recorder(&mut layout);

    let mut layout = layout.expanded(true);
    assert!(layout.is_expanded());
    assert!(seen.borrow().is_empty());

    layout.toggle_expanded(false);
    assert_eq!(*seen.borrow(), vec![false]);
}

#[test]
fn test_nested_container_animates_through_its_parent() {
    let host = Rc::new(FrameQueue::new());
    let spec = MeasureSpec::AtMost(1000);
    let mut inner = expandable_layout()
        .interpolator(Interpolator::Linear)
        .duration(ms(100))
        .child(sized_box(40, 200));
    attach_and_lay_out(&mut inner, &host, spec, spec);
    assert!(matches!(inner.set_expanded(true, true), Outcome::Animating(_)));

    let mut outer = expandable_layout().expanded(true).child(inner);
    attach_and_lay_out(&mut outer, &host, spec, spec);
    assert_eq!(outer.measured_size(), Size::new(40, 0));

    let mut heights = Vec::new();
    let mut now = Duration::ZERO;
    while outer.advance_animations(now) {
        heights.push(outer.measure(spec, spec).height);
        now += ms(25);
    }
    assert_eq!(heights.len(), 4);
    assert_eq!(heights[0], 0);
    assert!(heights.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(heights.iter().all(|&height| height < 200));
    assert_eq!(outer.measure(spec, spec).height, 200);
}
