//! Periodic timers injected into the size transition controller.
//!
//! The controller never reads a clock. It asks a [`Scheduler`] for an
//! interval and the host calls back with the [`TimerId`] each time that
//! interval fires. Two implementations ship with the crate:
//!
//! - [`ManualScheduler`] - a fake clock advanced explicitly, for tests and
//!   headless hosts
//! - [`TokioScheduler`] - real intervals on the tokio runtime, delivered as
//!   [`TimerFired`] messages (feature `tokio-scheduler`)

mod manual;
#[cfg(feature = "tokio-scheduler")]
mod runtime;

pub use manual::ManualScheduler;
#[cfg(feature = "tokio-scheduler")]
pub use runtime::{TimerFired, TokioScheduler};

use std::fmt;
use std::time::Duration;

/// Identifies one interval registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// Host facility for periodic callbacks.
///
/// Implementations are shared between box instances behind an `Rc`, so both
/// methods take `&self`. Clearing an unknown or already-cleared id must be a
/// no-op.
pub trait Scheduler {
    fn set_interval(&self, period: Duration) -> TimerId;

    fn clear_interval(&self, id: TimerId);
}
