//! Control loop clock
//!
//! The runner uses a clock to learn the current time and to wait for the
//! next control tick between command updates.

/// Time source for the control loop
pub trait ControlClock {
    /// Current control loop time in milliseconds
    ///
    /// Wraps after ~49 days; consumers compare times with `wrapping_sub`.
    fn now_ms(&self) -> u32;

    /// Block until the next control tick
    fn wait_tick(&mut self);
}

/// Clock that advances a fixed period per tick without waiting
///
/// Used for host-side simulation and tests, where ticks should elapse
/// instantly but deterministically.
#[derive(Debug, Clone)]
pub struct ManualClock {
    /// Tick period in milliseconds
    period_ms: u32,
    /// Current time in milliseconds
    now_ms: u32,
    /// Number of ticks waited
    ticks: u32,
}

impl ManualClock {
    /// Create a clock starting at zero
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            now_ms: 0,
            ticks: 0,
        }
    }

    /// Number of ticks that have elapsed
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Tick period in milliseconds
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Advance time without counting a tick
    pub fn advance(&mut self, delta_ms: u32) {
        self.now_ms = self.now_ms.wrapping_add(delta_ms);
    }
}

impl ControlClock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now_ms
    }

    fn wait_tick(&mut self) {
        self.now_ms = self.now_ms.wrapping_add(self.period_ms);
        self.ticks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_ticks() {
        let mut clock = ManualClock::new(20);
        assert_eq!(clock.now_ms(), 0);

        clock.wait_tick();
        clock.wait_tick();
        assert_eq!(clock.now_ms(), 40);
        assert_eq!(clock.ticks(), 2);
    }

    #[test]
    fn test_manual_clock_wraps() {
        let mut clock = ManualClock::new(10);
        clock.advance(u32::MAX - 4);
        clock.wait_tick();
        assert_eq!(clock.now_ms(), 5);
    }
}
