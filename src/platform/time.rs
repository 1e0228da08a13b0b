//! Fixed-rate tick pacing

use std::time::{Duration, Instant};

/// Sleeps until the next frame slot.
///
/// Slots are scheduled from the previous slot rather than from "now", so a
/// short stall is caught up; a stall longer than one period resets the
/// schedule instead of bursting.
#[derive(Debug)]
pub struct TickPacer {
    period: Duration,
    next: Instant,
}

impl TickPacer {
    pub fn new(hz: u32) -> Self {
        assert!(hz > 0, "tick rate must be positive");
        let period = Duration::from_secs(1) / hz;
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Block until the next slot
    pub fn wait(&mut self) {
        let now = Instant::now();
        if let Some(remaining) = self.next.checked_duration_since(now) {
            std::thread::sleep(remaining);
            self.next += self.period;
        } else {
            if now - self.next > self.period {
                log::trace!("Tick pacer fell behind by {:?}", now - self.next);
            }
            self.next = now + self.period;
        }
    }
}
