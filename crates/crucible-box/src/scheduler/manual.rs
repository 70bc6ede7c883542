use super::{Scheduler, TimerId};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
struct Interval {
    period: Duration,
    next_due: Duration,
}

#[derive(Debug, Default)]
struct Inner {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<TimerId, Interval>,
    registered: usize,
}

/// Deterministic scheduler driven by [`ManualScheduler::advance`].
#[derive(Debug, Default)]
pub struct ManualScheduler {
    inner: RefCell<Inner>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward and returns every timer that fired, in firing
    /// order. An interval that falls due several times yields its id once
    /// per period. Ties fire in registration order.
    pub fn advance(&self, by: Duration) -> Vec<TimerId> {
        let mut inner = self.inner.borrow_mut();
        let until = inner.now + by;
        let mut fired = Vec::new();

        loop {
            let due = inner
                .timers
                .iter()
                .filter(|(_, interval)| interval.next_due <= until)
                .min_by_key(|(id, interval)| (interval.next_due, **id))
                .map(|(id, _)| *id);

            let Some(id) = due else { break };
            if let Some(interval) = inner.timers.get_mut(&id) {
                interval.next_due += interval.period;
            }
            fired.push(id);
        }

        inner.now = until;
        fired
    }

    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    pub fn active_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.inner.borrow().timers.contains_key(&id)
    }

    /// Total number of intervals ever registered, cleared ones included.
    pub fn registrations(&self) -> usize {
        self.inner.borrow().registered
    }
}

impl Scheduler for ManualScheduler {
    fn set_interval(&self, period: Duration) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        let id = TimerId::new(inner.next_id);
        inner.next_id += 1;
        inner.registered += 1;
        // A zero period would fire forever within a single advance.
        let period = period.max(Duration::from_millis(1));
        let next_due = inner.now + period;
        inner.timers.insert(id, Interval { period, next_due });
        id
    }

    fn clear_interval(&self, id: TimerId) {
        self.inner.borrow_mut().timers.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn nothing_fires_before_first_period() {
        let sched = ManualScheduler::new();
        sched.set_interval(MS_100);

        assert!(sched.advance(Duration::from_millis(99)).is_empty());
        assert_eq!(sched.advance(Duration::from_millis(1)).len(), 1);
    }

    #[test]
    fn interval_fires_once_per_period() {
        let sched = ManualScheduler::new();
        let id = sched.set_interval(MS_100);

        let fired = sched.advance(Duration::from_millis(350));

        assert_eq!(fired, vec![id, id, id]);
        assert_eq!(sched.now(), Duration::from_millis(350));
    }

    #[test]
    fn timers_interleave_by_due_time() {
        let sched = ManualScheduler::new();
        let slow = sched.set_interval(Duration::from_millis(150));
        let fast = sched.set_interval(MS_100);

        let fired = sched.advance(Duration::from_millis(300));

        assert_eq!(fired, vec![fast, slow, fast, slow, fast]);
    }

    #[test]
    fn cleared_timer_stops_firing() {
        let sched = ManualScheduler::new();
        let id = sched.set_interval(MS_100);
        sched.clear_interval(id);

        assert!(!sched.is_active(id));
        assert!(sched.advance(Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn clearing_twice_is_a_no_op() {
        let sched = ManualScheduler::new();
        let id = sched.set_interval(MS_100);
        let other = sched.set_interval(MS_100);

        sched.clear_interval(id);
        sched.clear_interval(id);

        assert_eq!(sched.active_timers(), 1);
        assert!(sched.is_active(other));
        assert_eq!(sched.registrations(), 2);
    }

    #[test]
    fn zero_period_is_clamped() {
        let sched = ManualScheduler::new();
        sched.set_interval(Duration::ZERO);

        assert_eq!(sched.advance(Duration::from_millis(5)).len(), 5);
    }
}
