//! Cancellable sleeping and fixed-cadence ticking for background loops.
//!
//! Both background loops (frame capture and pointer replay) run on plain OS
//! threads and are stopped by clearing a shared `AtomicBool`.  A thread that
//! is asleep cannot look at the flag, so every sleep here is cut into slices
//! of at most [`SLEEP_SLICE`]; a cleared flag is noticed within one slice.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Longest uninterrupted sleep before the running flag is checked again.
pub const SLEEP_SLICE: Duration = Duration::from_millis(50);

/// Sleeps until `deadline` or until `running` is cleared.
///
/// Returns `true` if the deadline was reached while still running, `false`
/// if the caller should stop.
pub fn sleep_until(deadline: Instant, running: &AtomicBool) -> bool {
    loop {
        if !running.load(Ordering::Relaxed) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep((deadline - now).min(SLEEP_SLICE));
    }
}

/// Sleeps for `duration`; see [`sleep_until`].
pub fn sleep_for(duration: Duration, running: &AtomicBool) -> bool {
    sleep_until(Instant::now() + duration, running)
}

/// Wakes up every `interval` measured from a fixed schedule, not from the end
/// of the previous iteration, so the cadence does not drift with work time.
///
/// When an iteration overruns by more than a whole interval the missed ticks
/// are skipped instead of being fired back-to-back.
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    next: Instant,
}

impl Ticker {
    /// Creates a ticker whose first tick is one `interval` from now.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: Instant::now() + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Blocks until the next scheduled tick.
    ///
    /// Returns `false` as soon as `running` is cleared.
    pub fn tick(&mut self, running: &AtomicBool) -> bool {
        if !sleep_until(self.next, running) {
            return false;
        }
        self.next += self.interval;
        let now = Instant::now();
        if self.next <= now {
            self.next = now + self.interval;
        }
        true
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_sleep_until_past_deadline_returns_immediately() {
        let running = AtomicBool::new(true);
        let start = Instant::now();

        assert!(sleep_until(start, &running));
        assert!(start.elapsed() < Duration::from_millis(20));
    }

    #[test]
    fn test_sleep_for_waits_at_least_the_duration() {
        let running = AtomicBool::new(true);
        let start = Instant::now();

        assert!(sleep_for(Duration::from_millis(30), &running));
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_sleep_returns_false_when_not_running() {
        let running = AtomicBool::new(false);
        let start = Instant::now();

        assert!(!sleep_for(Duration::from_secs(10), &running));
        assert!(start.elapsed() < Duration::from_millis(20));
    }

    #[test]
    fn test_sleep_is_interrupted_by_flag_within_one_slice() {
        // Arrange
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            flag.store(false, Ordering::Relaxed);
        });
        let start = Instant::now();

        // Act
        let reached = sleep_for(Duration::from_secs(10), &running);

        // Assert
        stopper.join().unwrap();
        assert!(!reached);
        assert!(start.elapsed() < Duration::from_millis(30) + SLEEP_SLICE * 4);
    }

    #[test]
    fn test_ticker_keeps_cadence() {
        // Arrange
        let running = AtomicBool::new(true);
        let mut ticker = Ticker::new(Duration::from_millis(10));
        let start = Instant::now();

        // Act
        for _ in 0..5 {
            assert!(ticker.tick(&running));
        }

        // Assert: five ticks take at least five intervals
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_ticker_skips_missed_ticks() {
        // Arrange: overrun by several intervals
        let running = AtomicBool::new(true);
        let mut ticker = Ticker::new(Duration::from_millis(10));
        thread::sleep(Duration::from_millis(60));

        // Act: the overdue tick fires at once, the next one is a full interval away
        assert!(ticker.tick(&running));
        let after_overdue = Instant::now();
        assert!(ticker.tick(&running));

        // Assert
        assert!(after_overdue.elapsed() >= Duration::from_millis(9));
    }

    #[test]
    fn test_ticker_stops_when_flag_cleared() {
        let running = AtomicBool::new(false);
        let mut ticker = Ticker::new(Duration::from_millis(10));
        assert!(!ticker.tick(&running));
    }
}
