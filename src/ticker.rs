//! A cancellable periodic deadline.
//!
//! The ticker never fires on its own: the owner asks whether a tick is due
//! and how long it may wait for one. Dropping the ticker cancels it.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticker {
    period: Duration,
    next_due: Instant,
}

impl Ticker {
    /// Schedules the first tick one full `period` after `now`.
    pub fn start(now: Instant, period: Duration) -> Self {
        Ticker {
            period,
            next_due: now + period,
        }
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Time left before the next tick, zero when it is already due.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    /// Consumes the due tick, if any, and schedules the following one.
    ///
    /// At most one tick is reported per call. When the caller has fallen a
    /// whole period behind, the missed ticks are dropped and the cadence
    /// restarts from `now`.
    pub fn fire(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }

        self.next_due += self.period;
        if self.next_due <= now {
            self.next_due = now + self.period;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF_SECOND: Duration = Duration::from_millis(500);

    #[test]
    fn test_first_tick_after_one_period() {
        let t0 = Instant::now();
        let mut ticker = Ticker::start(t0, HALF_SECOND);

        assert_eq!(ticker.remaining(t0), HALF_SECOND);
        assert!(!ticker.fire(t0 + Duration::from_millis(499)));
        assert!(ticker.fire(t0 + HALF_SECOND));
        assert_eq!(ticker.next_due(), t0 + 2 * HALF_SECOND);
    }

    #[test]
    fn test_fire_once_per_deadline() {
        let t0 = Instant::now();
        let mut ticker = Ticker::start(t0, HALF_SECOND);

        let due = t0 + HALF_SECOND;
        assert!(ticker.fire(due));
        assert!(!ticker.fire(due));
    }

    #[test]
    fn test_late_poll_keeps_cadence() {
        let t0 = Instant::now();
        let mut ticker = Ticker::start(t0, HALF_SECOND);

        assert!(ticker.fire(t0 + Duration::from_millis(600)));
        assert_eq!(ticker.next_due(), t0 + Duration::from_millis(1000));
    }

    #[test]
    fn test_missed_ticks_are_skipped() {
        let t0 = Instant::now();
        let mut ticker = Ticker::start(t0, HALF_SECOND);

        let late = t0 + Duration::from_millis(2200);
        assert!(ticker.fire(late));
        assert!(!ticker.fire(late));
        assert_eq!(ticker.next_due(), late + HALF_SECOND);
        assert_eq!(ticker.remaining(late + Duration::from_secs(5)), Duration::ZERO);
    }
}
