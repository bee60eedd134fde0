//! Drives an expandable container through a few toggles with a simulated
//! 60 Hz frame loop and logs the container extent on every frame.
//!
//! Run with `RUST_LOG=debug` to also see the state machine's own logging.

use std::rc::Rc;
use std::time::Duration;

use expandable::prelude::*;
use expandable::scheduler::JobType;

const FRAME: Duration = Duration::from_millis(16);

/// Run the host loop until nothing is pending. Returns the new clock.
fn run_frames(layout: &mut ExpandableLayout, host: &FrameQueue, mut now: Duration) -> Duration {
    let spec = MeasureSpec::AtMost(800);
    loop {
        let jobs = host.drain();
        if jobs.is_empty() {
            return now;
        }
        if jobs.contains(JobType::FRAME) {
            layout.advance_animations(now);
        }
        let size = layout.measure(spec, spec);
        layout.layout();
        log::info!("t={:>4}ms  height={:>3}", now.as_millis(), size.height);
        now += FRAME;
    }
}

fn main() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let host = Rc::new(FrameQueue::new());
    let mut layout = expandable_layout()
        .interpolator(Interpolator::Overshoot(2.0))
        .gravity(Gravity::CENTER_HORIZONTAL)
        .padding(8)
        .child(sized_box(200, 120))
        .child(sized_box(160, 180));

    layout.add_state_change_listener(|expanded: bool| {
        log::info!("listener: expanded = {}", expanded);
    });
    layout.attach(&host);

    let mut now = run_frames(&mut layout, &host, Duration::ZERO);

    log::info!("=== expand ===");
    layout.toggle_expanded(true);
    now = run_frames(&mut layout, &host, now);

    log::info!("=== collapse, reversed halfway ===");
    layout.toggle_expanded(true);
    let spec = MeasureSpec::AtMost(800);
    for _ in 0..6 {
        layout.advance_animations(now);
        layout.measure(spec, spec);
        now += FRAME;
    }
    layout.toggle_expanded(true);
    now = run_frames(&mut layout, &host, now);

    log::info!("=== collapse without animation ===");
    layout.set_expanded(false, false);
    run_frames(&mut layout, &host, now);

    log::info!("frames requested: {}", host.frame_requests());
}
