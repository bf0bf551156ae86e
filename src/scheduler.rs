use std::time::{Duration, Instant};

/// Periodic tick source owned by a game.
///
/// At most one callback is outstanding at a time: `arm` replaces whatever was
/// scheduled before, and after `cancel` returns no further tick is delivered.
pub trait Scheduler {
    /// Cancels any outstanding tick and schedules ticks every `interval`.
    fn arm(&mut self, interval: Duration);

    /// Stops delivering ticks.
    fn cancel(&mut self);

    /// Current interval, or `None` while cancelled.
    fn interval(&self) -> Option<Duration>;

    fn is_armed(&self) -> bool {
        self.interval().is_some()
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct Deadline {
    interval: Duration,
    due: Instant,
}

/// Wall-clock scheduler holding a single deadline.
///
/// The owner polls it: `time_until_due` says how long to wait, `fire` reports
/// whether a tick is due and pushes the deadline one interval past `now`.
#[derive(Debug, Clone, Default)]
pub struct IntervalTimer {
    deadline: Option<Deadline>,
}

impl IntervalTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms relative to an explicit clock reading.
    pub fn arm_at(&mut self, interval: Duration, now: Instant) {
        self.deadline = Some(Deadline {
            interval,
            due: now + interval,
        });
    }

    /// Time left before the next tick, zero if overdue, `None` if cancelled.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.due.saturating_duration_since(now))
    }

    /// Consumes a due tick. The next one is scheduled no earlier than one
    /// interval after `now`, so late polls never produce a burst of ticks.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline.as_mut() {
            Some(deadline) if deadline.due <= now => {
                deadline.due = now + deadline.interval;
                true
            }
            _ => false,
        }
    }
}

impl Scheduler for IntervalTimer {
    fn arm(&mut self, interval: Duration) {
        self.arm_at(interval, Instant::now());
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }

    fn interval(&self) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.interval)
    }
}

/// Scheduler whose ticks are delivered by hand.
///
/// Records every arm and cancel so tests and replays can inspect the
/// lifecycle without waiting on a clock.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    interval: Option<Duration>,
    arms: Vec<Duration>,
    cancels: u32,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every interval passed to `arm`, oldest first.
    #[must_use]
    pub fn arm_history(&self) -> &[Duration] {
        &self.arms
    }

    /// Number of `cancel` calls that stopped an armed schedule.
    #[must_use]
    pub fn cancel_count(&self) -> u32 {
        self.cancels
    }
}

impl Scheduler for ManualScheduler {
    fn arm(&mut self, interval: Duration) {
        self.interval = Some(interval);
        self.arms.push(interval);
    }

    fn cancel(&mut self) {
        if self.interval.take().is_some() {
            self.cancels += 1;
        }
    }

    fn interval(&self) -> Option<Duration> {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{IntervalTimer, ManualScheduler, Scheduler};

    #[test]
    fn timer_fires_only_when_due() {
        let start = Instant::now();
        let mut timer = IntervalTimer::new();
        timer.arm_at(Duration::from_millis(150), start);

        assert!(!timer.fire(start + Duration::from_millis(149)));
        assert!(timer.fire(start + Duration::from_millis(150)));
        assert_eq!(
            timer.time_until_due(start + Duration::from_millis(150)),
            Some(Duration::from_millis(150))
        );
    }

    #[test]
    fn late_poll_does_not_burst() {
        let start = Instant::now();
        let mut timer = IntervalTimer::new();
        timer.arm_at(Duration::from_millis(100), start);

        let late = start + Duration::from_millis(450);
        assert!(timer.fire(late));
        assert!(!timer.fire(late));
    }

    #[test]
    fn rearm_replaces_outstanding_deadline() {
        let start = Instant::now();
        let mut timer = IntervalTimer::new();
        timer.arm_at(Duration::from_millis(150), start);

        let later = start + Duration::from_millis(100);
        timer.arm_at(Duration::from_millis(145), later);

        // The old deadline at +150ms is gone; the new one is at +245ms.
        assert!(!timer.fire(start + Duration::from_millis(150)));
        assert!(timer.fire(start + Duration::from_millis(245)));
        assert_eq!(timer.interval(), Some(Duration::from_millis(145)));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let start = Instant::now();
        let mut timer = IntervalTimer::new();
        timer.arm_at(Duration::from_millis(10), start);
        timer.cancel();

        assert!(!timer.fire(start + Duration::from_secs(10)));
        assert_eq!(timer.time_until_due(start), None);
        assert!(!timer.is_armed());
    }

    #[test]
    fn manual_scheduler_records_lifecycle() {
        let mut scheduler = ManualScheduler::new();

        scheduler.arm(Duration::from_millis(150));
        scheduler.arm(Duration::from_millis(145));
        scheduler.cancel();
        scheduler.cancel();

        assert_eq!(
            scheduler.arm_history(),
            &[Duration::from_millis(150), Duration::from_millis(145)]
        );
        assert_eq!(scheduler.cancel_count(), 1);
        assert!(!scheduler.is_armed());
    }
}
