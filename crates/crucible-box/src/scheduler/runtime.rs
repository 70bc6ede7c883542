use super::{Scheduler, TimerId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Delivered on the scheduler's channel each time an interval elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired(pub TimerId);

/// Interval timers backed by tokio tasks.
///
/// Each registration spawns one task that sends [`TimerFired`] every period
/// until cleared. The host loop drains the receiver returned by
/// [`TokioScheduler::new`] and routes each id to the instance that owns it,
/// so all state mutation stays on the host's thread.
///
/// `set_interval` must be called from within a tokio runtime.
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<TimerFired>,
    next_id: Cell<u64>,
    tasks: RefCell<HashMap<TimerId, JoinHandle<()>>>,
}

impl TokioScheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerFired>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            tx,
            next_id: Cell::new(0),
            tasks: RefCell::new(HashMap::new()),
        };
        (scheduler, rx)
    }

    pub fn active_timers(&self) -> usize {
        self.tasks.borrow().len()
    }
}

impl Scheduler for TokioScheduler {
    fn set_interval(&self, period: Duration) -> TimerId {
        let id = TimerId::new(self.next_id.get());
        self.next_id.set(id.raw() + 1);

        let period = period.max(Duration::from_millis(1));
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(TimerFired(id)).is_err() {
                    tracing::debug!(%id, "timer receiver dropped, stopping interval");
                    break;
                }
            }
        });

        tracing::debug!(%id, ?period, "interval registered");
        self.tasks.borrow_mut().insert(id, handle);
        id
    }

    fn clear_interval(&self, id: TimerId) {
        if let Some(handle) = self.tasks.borrow_mut().remove(&id) {
            handle.abort();
            tracing::debug!(%id, "interval cleared");
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.get_mut().drain() {
            handle.abort();
        }
    }
}
