//! Fixed-interval tick clock
//!
//! Accumulates wall-clock time handed in by the runner and releases whole
//! ticks. The interval is supplied per tick so an engine whose speed changes
//! (Block-Stacker gravity after a level-up) is honoured immediately.

/// Maximum ticks released per `update` call, so a long stall does not replay
/// an unbounded backlog.
pub const MAX_CATCH_UP_TICKS: u32 = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickClock {
    accumulated_ms: u32,
    paused: bool,
    ticks: u64,
}

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Total ticks released since the last reset
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Time banked toward the next tick
    pub fn pending_ms(&self) -> u32 {
        self.accumulated_ms
    }

    /// Drop banked time and counters. Any tick that was about to fire is cancelled.
    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
        self.ticks = 0;
    }

    /// Bank elapsed time. Ignored while paused.
    pub fn accumulate(&mut self, elapsed_ms: u32) {
        if self.paused {
            return;
        }
        self.accumulated_ms = self.accumulated_ms.saturating_add(elapsed_ms);
    }

    /// Release one tick if enough time is banked for `interval_ms`
    pub fn take_tick(&mut self, interval_ms: u32) -> bool {
        let interval_ms = interval_ms.max(1);
        if self.paused || self.accumulated_ms < interval_ms {
            return false;
        }
        self.accumulated_ms -= interval_ms;
        self.ticks += 1;
        true
    }

    /// Discard a backlog larger than one interval (after hitting the catch-up cap)
    pub fn drop_backlog(&mut self, interval_ms: u32) {
        self.accumulated_ms = self.accumulated_ms.min(interval_ms.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_releases_whole_ticks_only() {
        let mut clock = TickClock::new();
        clock.accumulate(100);
        assert!(!clock.take_tick(120));
        clock.accumulate(30);
        assert!(clock.take_tick(120));
        assert_eq!(clock.pending_ms(), 10);
        assert!(!clock.take_tick(120));
        assert_eq!(clock.ticks(), 1);
    }

    #[test]
    fn test_paused_clock_banks_nothing() {
        let mut clock = TickClock::new();
        clock.pause();
        clock.accumulate(1000);
        assert!(!clock.take_tick(120));
        clock.resume();
        assert_eq!(clock.pending_ms(), 0);
        clock.accumulate(120);
        assert!(clock.take_tick(120));
    }

    #[test]
    fn test_reset_cancels_pending_time() {
        let mut clock = TickClock::new();
        clock.accumulate(119);
        clock.reset();
        clock.accumulate(1);
        assert!(!clock.take_tick(120));
    }

    #[test]
    fn test_drop_backlog_keeps_partial_interval() {
        let mut clock = TickClock::new();
        clock.accumulate(5000);
        clock.drop_backlog(120);
        assert_eq!(clock.pending_ms(), 119);
    }
}
