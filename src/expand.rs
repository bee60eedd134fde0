//! Expand/collapse state machine.
//!
//! Requests are committed in call order and the latest one always wins:
//! committing a new target cancels the animation of the previous one before
//! anything else happens. A request for the state that is already committed
//! is dropped without notifying anyone.
//!
//! The machine owns at most one [`AnimationRun`]. Each run gets a fresh
//! [`RunId`], and only the single active run is ever advanced, so a cancelled
//! run can never produce another tick.

use std::time::Duration;

use crate::animation::{AnimationRun, RunId, Tick, Transition};

/// Committed logical state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandState {
    Collapsed,
    Expanded,
}

impl From<bool> for ExpandState {
    fn from(expanded: bool) -> Self {
        if expanded {
            ExpandState::Expanded
        } else {
            ExpandState::Collapsed
        }
    }
}

impl ExpandState {
    pub fn is_expanded(self) -> bool {
        self == ExpandState::Expanded
    }
}

/// One request to change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandTask {
    pub expand: bool,
    pub animate: bool,
}

impl ExpandTask {
    pub fn new(expand: bool, animate: bool) -> Self {
        Self { expand, animate }
    }
}

/// What the container knows about its geometry when a request arrives.
#[derive(Debug, Clone, Copy)]
pub struct AnimationContext<'a> {
    /// False until the container is attached and has been measured.
    pub can_animate: bool,
    /// Extent along the expand axis right now.
    pub current_extent: i32,
    /// Natural content extent along the expand axis.
    pub max_extent: i32,
    pub transition: &'a Transition,
}

/// How a request was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Same target as the committed state.
    Ignored,
    /// Committed and applied without animation.
    Snapped,
    /// Committed and animating with the given run.
    Animating(RunId),
}

/// Handle returned when registering a listener, used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Observer of committed state changes.
pub trait StateChangeListener {
    fn on_state_change(&mut self, expanded: bool);
}

impl<F: FnMut(bool)> StateChangeListener for F {
    fn on_state_change(&mut self, expanded: bool) {
        self(expanded)
    }
}

pub struct ExpandController {
    state: ExpandState,
    active: Option<AnimationRun>,
    next_run: u64,
    listeners: Vec<(ListenerId, Box<dyn StateChangeListener>)>,
    next_listener: u64,
}

impl ExpandController {
    pub fn new(expanded: bool) -> Self {
        Self {
            state: ExpandState::from(expanded),
            active: None,
            next_run: 0,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn state(&self) -> ExpandState {
        self.state
    }

    /// Overwrite the committed state without notifying listeners. Any run is
    /// dropped. Meant for construction time, before the state is observable.
    pub fn reset(&mut self, expanded: bool) {
        self.cancel();
        self.state = ExpandState::from(expanded);
    }

    pub fn is_expanded(&self) -> bool {
        self.state.is_expanded()
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_run(&self) -> Option<&AnimationRun> {
        self.active.as_ref()
    }

    /// Extent the active run currently reports, if one is running.
    pub fn animated_extent(&self) -> Option<i32> {
        self.active.as_ref().map(AnimationRun::current)
    }

    /// Register a listener. It is called right away with the current state.
    pub fn add_listener(&mut self, mut listener: Box<dyn StateChangeListener>) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        listener.on_state_change(self.is_expanded());
        self.listeners.push((id, listener));
        id
    }

    /// Returns false if the id was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Commit `task` and decide how to reach its target.
    pub fn submit(&mut self, task: ExpandTask, ctx: AnimationContext<'_>) -> Outcome {
        let target = ExpandState::from(task.expand);
        if target == self.state {
            log::trace!("ignoring request for current state {:?}", target);
            return Outcome::Ignored;
        }

        self.state = target;
        log::debug!("state -> {:?} (animate: {})", target, task.animate);
        for (_, listener) in self.listeners.iter_mut() {
            listener.on_state_change(task.expand);
        }

        self.cancel();

        if !task.animate || !ctx.can_animate {
            return Outcome::Snapped;
        }

        let from = ctx.current_extent;
        let to = if task.expand { ctx.max_extent } else { 0 };
        let duration = ctx.transition.duration_for(to - from, ctx.max_extent);
        if duration.is_zero() {
            log::trace!("nothing to animate from {} to {}", from, to);
            return Outcome::Snapped;
        }

        let id = RunId(self.next_run);
        self.next_run += 1;
        log::debug!("run {:?}: {} -> {} over {:?}", id, from, to, duration);
        self.active = Some(AnimationRun::new(
            id,
            from,
            to,
            duration,
            ctx.transition.interpolator.clone(),
        ));
        Outcome::Animating(id)
    }

    /// Stop the active run, if any. The container falls back to the extent
    /// of the committed state on its next measurement.
    pub fn cancel(&mut self) -> Option<RunId> {
        let run = self.active.take()?;
        log::debug!("run {:?} cancelled at {}", run.id(), run.current());
        Some(run.id())
    }

    /// Advance the active run to `now`. A finished run is released after
    /// reporting its last tick.
    pub fn advance(&mut self, now: Duration) -> Option<Tick<i32>> {
        let run = self.active.as_mut()?;
        let tick = run.advance(now);
        if tick.finished {
            log::debug!("run {:?} finished at {}", tick.run, tick.value);
            self.active = None;
        }
        Some(tick)
    }
}

impl std::fmt::Debug for ExpandController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpandController")
            .field("state", &self.state)
            .field("active", &self.active)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
