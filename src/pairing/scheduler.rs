use std::fmt;
use std::time::Duration;

/// Identifies a single armed timer. Tickets are never reused by a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerTicket(pub u64);

impl fmt::Display for TimerTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/**
 * Clock and one-shot timer facility used by the pairing controller.
 *
 * `schedule` must eventually lead to the controller's `timer_elapsed` being called with the same
 * ticket, unless `cancel` was called for it first. Cancelling an unknown or already fired ticket is
 * a no-op.
 */
pub trait Scheduler {
    fn schedule(&mut self, ticket: TimerTicket, delay: Duration);
    fn cancel(&mut self, ticket: TimerTicket);
    /// Wall clock time in milliseconds, used to derive device identifiers.
    fn timestamp_millis(&self) -> u64;
}

/// Virtual time scheduler. Time only moves when `fire_next` or `advance_to` is called.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    epoch_millis: u64,
    elapsed: Duration,
    // (deadline, ticket) in arming order
    pending: Vec<(Duration, TimerTicket)>,
}

impl ManualScheduler {
    pub fn new(epoch_millis: u64) -> Self {
        ManualScheduler {
            epoch_millis,
            elapsed: Duration::ZERO,
            pending: Vec::new(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /**
     * Removes the earliest timer due at or before `until` and moves the clock to its deadline.
     * Timers with equal deadlines fire in the order they were armed.
     */
    pub fn fire_next(&mut self, until: Duration) -> Option<TimerTicket> {
        let index = self.pending
            .iter()
            .enumerate()
            .filter(|(_, (deadline, _))| *deadline <= until)
            .min_by_key(|(index, (deadline, _))| (*deadline, *index))
            .map(|(index, _)| index)?;

        let (deadline, ticket) = self.pending.remove(index);
        self.elapsed = self.elapsed.max(deadline);
        Some(ticket)
    }

    pub fn advance_to(&mut self, target: Duration) {
        self.elapsed = self.elapsed.max(target);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, ticket: TimerTicket, delay: Duration) {
        self.pending.push((self.elapsed + delay, ticket));
    }

    fn cancel(&mut self, ticket: TimerTicket) {
        self.pending.retain(|(_, pending)| *pending != ticket);
    }

    fn timestamp_millis(&self) -> u64 {
        self.epoch_millis + self.elapsed.as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_deadline_order() {
        let mut scheduler = ManualScheduler::new(0);
        scheduler.schedule(TimerTicket(1), Duration::from_millis(300));
        scheduler.schedule(TimerTicket(2), Duration::from_millis(100));
        scheduler.schedule(TimerTicket(3), Duration::from_millis(100));

        let until = Duration::from_millis(1000);
        assert_eq!(scheduler.fire_next(until), Some(TimerTicket(2)));
        assert_eq!(scheduler.elapsed(), Duration::from_millis(100));
        assert_eq!(scheduler.fire_next(until), Some(TimerTicket(3)));
        assert_eq!(scheduler.fire_next(until), Some(TimerTicket(1)));
        assert_eq!(scheduler.elapsed(), Duration::from_millis(300));
        assert_eq!(scheduler.fire_next(until), None);
    }

    #[test]
    fn does_not_fire_before_deadline() {
        let mut scheduler = ManualScheduler::new(0);
        scheduler.schedule(TimerTicket(1), Duration::from_millis(3000));

        assert_eq!(scheduler.fire_next(Duration::from_millis(2999)), None);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.fire_next(Duration::from_millis(3000)), Some(TimerTicket(1)));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut scheduler = ManualScheduler::new(0);
        scheduler.schedule(TimerTicket(7), Duration::from_millis(10));
        scheduler.cancel(TimerTicket(7));
        scheduler.cancel(TimerTicket(8));

        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.fire_next(Duration::from_secs(60)), None);
    }

    #[test]
    fn timestamp_follows_virtual_clock() {
        let mut scheduler = ManualScheduler::new(1_700_000_000_000);
        scheduler.advance_to(Duration::from_millis(2500));
        assert_eq!(scheduler.timestamp_millis(), 1_700_000_002_500);

        // the clock never runs backwards
        scheduler.advance_to(Duration::from_millis(10));
        assert_eq!(scheduler.elapsed(), Duration::from_millis(2500));
    }
}
