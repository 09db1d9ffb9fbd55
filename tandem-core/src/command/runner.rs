//! Command runner
//!
//! Runs one command to completion on a [`ControlClock`]. The runner calls
//! `execute` exactly once, then `update` once per control tick while the
//! command reports [`Progress::Running`]. Failures are returned unchanged;
//! the runner never retries.

use super::{Command, CommandError, Progress};
use crate::batch::ConcurrentBatch;
use crate::clock::ControlClock;

/// Blocking command runner
pub struct Runner<'k, K: ControlClock + ?Sized> {
    clock: &'k mut K,
}

impl<'k, K: ControlClock + ?Sized> Runner<'k, K> {
    /// Create a runner driven by the given clock
    pub fn new(clock: &'k mut K) -> Self {
        Self { clock }
    }

    /// Current control loop time
    pub fn now_ms(&self) -> u32 {
        self.clock.now_ms()
    }

    /// Run a command to completion
    ///
    /// Returns only when the command has completed or failed.
    pub fn run(&mut self, command: &mut dyn Command) -> Result<(), CommandError> {
        trace!("run {}", command.name());

        let mut progress = command.execute(self.clock.now_ms())?;
        while progress == Progress::Running {
            self.clock.wait_tick();
            progress = command.update(self.clock.now_ms())?;
        }

        trace!("done {}", command.name());
        Ok(())
    }

    /// Run a set of commands as one concurrent batch
    ///
    /// An empty or oversized set is rejected with [`CommandError::Failed`]
    /// before any member is started.
    pub fn run_batch(&mut self, commands: &mut [&mut dyn Command]) -> Result<(), CommandError> {
        let mut batch = ConcurrentBatch::new(commands).map_err(|e| {
            warn!("batch rejected: {:?}", e);
            CommandError::Failed
        })?;
        self.run(&mut batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    /// Command that completes after a fixed number of updates
    struct Ticks {
        remaining: u8,
        executes: u8,
        updates: u8,
        fail_on_update: bool,
    }

    impl Ticks {
        fn new(remaining: u8) -> Self {
            Self {
                remaining,
                executes: 0,
                updates: 0,
                fail_on_update: false,
            }
        }
    }

    impl Command for Ticks {
        fn execute(&mut self, _now_ms: u32) -> Result<Progress, CommandError> {
            self.executes += 1;
            if self.remaining == 0 {
                Ok(Progress::Complete)
            } else {
                Ok(Progress::Running)
            }
        }

        fn update(&mut self, _now_ms: u32) -> Result<Progress, CommandError> {
            self.updates += 1;
            if self.fail_on_update {
                return Err(CommandError::Failed);
            }
            self.remaining -= 1;
            if self.remaining == 0 {
                Ok(Progress::Complete)
            } else {
                Ok(Progress::Running)
            }
        }
    }

    #[test]
    fn test_instant_command_needs_no_ticks() {
        let mut clock = ManualClock::new(20);
        let mut cmd = Ticks::new(0);

        Runner::new(&mut clock).run(&mut cmd).unwrap();

        assert_eq!(cmd.executes, 1);
        assert_eq!(cmd.updates, 0);
        assert_eq!(clock.ticks(), 0);
    }

    #[test]
    fn test_runs_until_complete() {
        let mut clock = ManualClock::new(20);
        let mut cmd = Ticks::new(3);

        Runner::new(&mut clock).run(&mut cmd).unwrap();

        assert_eq!(cmd.executes, 1);
        assert_eq!(cmd.updates, 3);
        assert_eq!(clock.ticks(), 3);
        assert_eq!(clock.now_ms(), 60);
    }

    #[test]
    fn test_failure_is_propagated_without_retry() {
        let mut clock = ManualClock::new(20);
        let mut cmd = Ticks::new(3);
        cmd.fail_on_update = true;

        let result = Runner::new(&mut clock).run(&mut cmd);

        assert_eq!(result, Err(CommandError::Failed));
        assert_eq!(cmd.executes, 1);
        assert_eq!(cmd.updates, 1);
    }

    #[test]
    fn test_run_batch_waits_for_slowest() {
        let mut clock = ManualClock::new(10);
        let mut fast = Ticks::new(1);
        let mut slow = Ticks::new(4);

        {
            let mut members: [&mut dyn Command; 2] = [&mut fast, &mut slow];
            Runner::new(&mut clock).run_batch(&mut members).unwrap();
        }

        assert_eq!(fast.updates, 1);
        assert_eq!(slow.updates, 4);
        assert_eq!(clock.ticks(), 4);
    }

    #[test]
    fn test_run_batch_rejects_empty_set() {
        let mut clock = ManualClock::new(10);
        let mut members: [&mut dyn Command; 0] = [];

        assert_eq!(
            Runner::new(&mut clock).run_batch(&mut members),
            Err(CommandError::Failed)
        );
        assert_eq!(clock.ticks(), 0);
    }
}
