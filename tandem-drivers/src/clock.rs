//! Blocking control clock over an `embedded-hal` delay

use embedded_hal::delay::DelayNs;
use tandem_core::ControlClock;

/// Clock that sleeps one tick period between updates
///
/// Time is the sum of the periods waited, so it drifts by however long
/// the commands take to update. Use `tandem_core::run_async` where a
/// hardware timer is available.
pub struct DelayClock<D> {
    delay: D,
    period_ms: u32,
    now_ms: u32,
}

impl<D: DelayNs> DelayClock<D> {
    /// Create a clock with the given tick period
    pub fn new(delay: D, period_ms: u32) -> Self {
        Self {
            delay,
            period_ms,
            now_ms: 0,
        }
    }

    /// Tick period in milliseconds
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Release the delay provider
    pub fn release(self) -> D {
        self.delay
    }
}

impl<D: DelayNs> ControlClock for DelayClock<D> {
    fn now_ms(&self) -> u32 {
        self.now_ms
    }

    fn wait_tick(&mut self) {
        self.delay.delay_ms(self.period_ms);
        self.now_ms = self.now_ms.wrapping_add(self.period_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Pause;
    use tandem_core::Runner;

    #[derive(Default)]
    struct MockDelay {
        waited_ns: u64,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.waited_ns += u64::from(ns);
        }
    }

    #[test]
    fn test_waits_one_period_per_tick() {
        let mut clock = DelayClock::new(MockDelay::default(), 20);
        clock.wait_tick();
        clock.wait_tick();

        assert_eq!(clock.now_ms(), 40);
        assert_eq!(clock.release().waited_ns, 40_000_000);
    }

    #[test]
    fn test_drives_runner() {
        let mut clock = DelayClock::new(MockDelay::default(), 10);
        Runner::new(&mut clock).run(&mut Pause::new(30)).unwrap();
        assert_eq!(clock.now_ms(), 30);
    }
}
