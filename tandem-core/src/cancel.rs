//! Cooperative cancellation
//!
//! The scheduler never preempts a command. Cancellation is an external
//! signal that commands observe between ticks.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::command::{Command, CommandError, Progress};
use crate::resource::ResourceSet;

/// Cancellation flag shared between the control loop and its owner
///
/// Usually placed in a `static` so an interrupt or another task can raise it.
#[derive(Debug, Default)]
pub struct CancelToken {
    raised: AtomicBool,
}

impl CancelToken {
    /// Create a lowered token
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }

    /// Raise the token
    pub fn cancel(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// Check if the token has been raised
    pub fn is_cancelled(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }

    /// Lower the token for the next run
    pub fn reset(&self) {
        self.raised.store(false, Ordering::Release);
    }
}

/// Wraps a command so it stops with [`CommandError::Cancelled`] once the
/// token is raised
///
/// The token is checked before `execute` and before every `update`. The
/// wrapped command is not told it was abandoned.
pub struct Cancellable<'t, C> {
    inner: C,
    token: &'t CancelToken,
}

impl<'t, C: Command> Cancellable<'t, C> {
    /// Wrap a command
    pub fn new(inner: C, token: &'t CancelToken) -> Self {
        Self { inner, token }
    }

    /// Unwrap the command
    pub fn into_inner(self) -> C {
        self.inner
    }

    fn check(&self) -> Result<(), CommandError> {
        if self.token.is_cancelled() {
            info!("{} cancelled", self.inner.name());
            Err(CommandError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl<C: Command> Command for Cancellable<'_, C> {
    fn execute(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
        self.check()?;
        self.inner.execute(now_ms)
    }

    fn update(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
        self.check()?;
        self.inner.update(now_ms)
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn resources(&self) -> ResourceSet {
        self.inner.resources()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::command::Runner;
    use crate::testing::Recorder;
    use core::cell::RefCell;

    #[test]
    fn test_token_lifecycle() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());

        token.cancel();
        assert!(token.is_cancelled());

        token.reset();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_raised_token_skips_execute() {
        let log = RefCell::new(std::vec::Vec::new());
        let token = CancelToken::new();
        token.cancel();

        let mut cmd = Cancellable::new(Recorder::new('a', 0, &log), &token);
        assert_eq!(cmd.execute(0), Err(CommandError::Cancelled));
        assert_eq!(cmd.into_inner().executes, 0);
    }

    #[test]
    fn test_cancel_mid_run() {
        static TOKEN: CancelToken = CancelToken::new();

        struct CancelAfter<'l> {
            recorder: Recorder<'l>,
            after: u32,
        }

        impl Command for CancelAfter<'_> {
            fn execute(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
                self.recorder.execute(now_ms)
            }

            fn update(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
                if self.recorder.updates + 1 == self.after {
                    TOKEN.cancel();
                }
                self.recorder.update(now_ms)
            }
        }

        let log = RefCell::new(std::vec::Vec::new());
        let inner = CancelAfter {
            recorder: Recorder::new('a', 10, &log),
            after: 3,
        };
        let mut cmd = Cancellable::new(inner, &TOKEN);
        let mut clock = ManualClock::new(10);

        let result = Runner::new(&mut clock).run(&mut cmd);

        assert_eq!(result, Err(CommandError::Cancelled));
        assert_eq!(cmd.into_inner().recorder.updates, 3);
        TOKEN.reset();
    }
}
