//! Size transition controller.
//!
//! Moves a box's displayed width and height toward the declared size one
//! cell per tick while animation is enabled.
//!
//! ```text
//!            enabled(true)
//!   Idle ─────────────────────▶ Animating { timer }
//!    ▲                               │
//!    └──── enabled(false) / destroy ─┘
//! ```
//!
//! Renders only report the latest target via [`SizeTransition::on_render`];
//! the displayed size changes solely on entry into `Animating` and in
//! [`SizeTransition::on_tick`].

use crate::scheduler::{Scheduler, TimerId};
use crate::style::Styles;
use std::rc::Rc;
use std::time::Duration;

/// Fixed animation period.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Declared size, reduced to what can be animated.
///
/// `None` on an axis means the declared size is unset, a percentage, or auto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetSize {
    pub width: Option<u16>,
    pub height: Option<u16>,
}

impl TargetSize {
    pub fn new(width: Option<u16>, height: Option<u16>) -> Self {
        Self { width, height }
    }

    pub fn from_style(style: &Styles) -> Self {
        Self {
            width: style.width.and_then(|d| d.cells()),
            height: style.height.and_then(|d| d.cells()),
        }
    }
}

/// The size actually rendered this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransitionState {
    pub displayed_width: Option<u16>,
    pub displayed_height: Option<u16>,
}

impl From<TargetSize> for TransitionState {
    fn from(target: TargetSize) -> Self {
        Self {
            displayed_width: target.width,
            displayed_height: target.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Animating { timer: TimerId },
}

/// One step of the animation on a single axis.
///
/// With either side undefined there is nothing to interpolate, so the
/// displayed value snaps to the target.
pub fn step_toward(displayed: Option<u16>, target: Option<u16>) -> Option<u16> {
    match (displayed, target) {
        (Some(current), Some(goal)) if current < goal => Some(current + 1),
        (Some(current), Some(goal)) if current > goal => Some(current - 1),
        (Some(current), Some(_)) => Some(current),
        _ => target,
    }
}

/// Per-instance size animation state machine.
///
/// Owns at most one interval on the injected scheduler. The interval is
/// cleared when animation is disabled, on [`SizeTransition::on_destroy`],
/// and when the controller is dropped.
pub struct SizeTransition {
    scheduler: Rc<dyn Scheduler>,
    state: TransitionState,
    target: TargetSize,
    phase: Phase,
}

impl SizeTransition {
    /// Creates an idle controller seeded from the first declared size.
    pub fn new(scheduler: Rc<dyn Scheduler>, initial: TargetSize) -> Self {
        Self {
            scheduler,
            state: initial.into(),
            target: initial,
            phase: Phase::Idle,
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Animating { .. })
    }

    /// The interval currently owned by this controller.
    pub fn timer(&self) -> Option<TimerId> {
        match self.phase {
            Phase::Animating { timer } => Some(timer),
            Phase::Idle => None,
        }
    }

    pub fn target(&self) -> TargetSize {
        self.target
    }

    /// Size to render. Equal to the target while idle.
    pub fn displayed(&self) -> TransitionState {
        match self.phase {
            Phase::Idle => self.target.into(),
            Phase::Animating { .. } => self.state,
        }
    }

    /// Records the latest declared size. The next tick steps toward it.
    pub fn on_render(&mut self, target: TargetSize) {
        if target != self.target {
            tracing::trace!(?target, previous = ?self.target, "transition retargeted");
        }
        self.target = target;
    }

    pub fn on_animation_enabled_changed(&mut self, enabled: bool) {
        match (self.phase, enabled) {
            (Phase::Idle, true) => {
                self.state = self.target.into();
                let timer = self.scheduler.set_interval(TICK_INTERVAL);
                self.phase = Phase::Animating { timer };
                tracing::debug!(%timer, seed = ?self.state, "size transition started");
            }
            (Phase::Animating { timer }, false) => {
                self.stop(timer);
                tracing::debug!(%timer, "size transition stopped");
            }
            _ => {}
        }
    }

    /// Advances both axes by one step. Ignored while idle.
    pub fn on_tick(&mut self) {
        if !self.is_animating() {
            return;
        }

        let next = TransitionState {
            displayed_width: step_toward(self.state.displayed_width, self.target.width),
            displayed_height: step_toward(self.state.displayed_height, self.target.height),
        };
        if next != self.state {
            tracing::trace!(from = ?self.state, to = ?next, "size transition step");
        }
        self.state = next;
    }

    /// Routes a fired interval. Returns `false` for ids this controller does
    /// not currently own, which are dropped without touching state.
    pub fn handle_timer(&mut self, id: TimerId) -> bool {
        if self.timer() != Some(id) {
            return false;
        }
        self.on_tick();
        true
    }

    /// Cancels any running interval. Safe to call more than once.
    pub fn on_destroy(&mut self) {
        if let Phase::Animating { timer } = self.phase {
            self.stop(timer);
            tracing::debug!(%timer, "size transition torn down");
        }
    }

    fn stop(&mut self, timer: TimerId) {
        self.scheduler.clear_interval(timer);
        self.phase = Phase::Idle;
    }
}

impl Drop for SizeTransition {
    fn drop(&mut self) {
        self.on_destroy();
    }
}

impl std::fmt::Debug for SizeTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SizeTransition")
            .field("state", &self.state)
            .field("target", &self.target)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
