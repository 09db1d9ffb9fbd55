//! General-purpose commands

use core::fmt::Write;

use heapless::String;

use tandem_core::traits::{Encoder, Gyro};
use tandem_core::{CancelToken, Command, CommandError, Progress, ResourceSet, Shared};

use super::elapsed;

/// Maximum logged message length
pub const MAX_MESSAGE_LEN: usize = 64;

/// Wait for a fixed time
///
/// Fails with [`CommandError::Cancelled`] if its token is raised while
/// waiting.
pub struct Pause<'t> {
    duration_ms: u32,
    started_ms: u32,
    cancel: Option<&'t CancelToken>,
}

impl<'t> Pause<'t> {
    /// Create a pause
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            started_ms: 0,
            cancel: None,
        }
    }

    /// Create a pause from seconds
    ///
    /// Negative and non-finite durations are treated as zero.
    pub fn from_secs(seconds: f32) -> Self {
        let ms = if seconds.is_finite() && seconds > 0.0 {
            (seconds * 1000.0) as u32
        } else {
            0
        };
        Self::new(ms)
    }

    /// Abort the pause when `token` is raised
    pub fn cancelled_by(mut self, token: &'t CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Pause length in milliseconds
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    fn check(&self) -> Result<(), CommandError> {
        match self.cancel {
            Some(token) if token.is_cancelled() => Err(CommandError::Cancelled),
            _ => Ok(()),
        }
    }
}

impl Command for Pause<'_> {
    fn execute(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
        self.check()?;
        self.started_ms = now_ms;
        if self.duration_ms == 0 {
            return Ok(Progress::Complete);
        }
        Ok(Progress::Running)
    }

    fn update(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
        self.check()?;
        if elapsed(self.started_ms, now_ms) >= self.duration_ms {
            Ok(Progress::Complete)
        } else {
            Ok(Progress::Running)
        }
    }

    fn name(&self) -> &'static str {
        "wait"
    }
}

/// Log a message
pub struct Log {
    message: String<MAX_MESSAGE_LEN>,
}

impl Log {
    /// Create the command, truncating long messages
    pub fn new(message: &str) -> Self {
        let mut text = Truncating(String::new());
        text.push_chars(message);
        Self { message: text.0 }
    }

    /// Create the command from any displayable value, truncating
    pub fn display(value: &impl core::fmt::Display) -> Self {
        let mut text = Truncating(String::new());
        // Never fails: overflow is dropped char by char
        let _ = write!(text, "{}", value);
        Self { message: text.0 }
    }

    /// Message text
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Writer that keeps as many whole chars as fit
struct Truncating(String<MAX_MESSAGE_LEN>);

impl Truncating {
    fn push_chars(&mut self, s: &str) {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
    }
}

impl Write for Truncating {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.push_chars(s);
        Ok(())
    }
}

impl Command for Log {
    fn execute(&mut self, _now_ms: u32) -> Result<Progress, CommandError> {
        info!("{}", self.message.as_str());
        Ok(Progress::Complete)
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// Zero an encoder
pub struct ResetEncoder<'r, E> {
    encoder: &'r Shared<E>,
}

impl<'r, E: Encoder> ResetEncoder<'r, E> {
    /// Create the command
    pub fn new(encoder: &'r Shared<E>) -> Self {
        Self { encoder }
    }
}

impl<E: Encoder> Command for ResetEncoder<'_, E> {
    fn execute(&mut self, _now_ms: u32) -> Result<Progress, CommandError> {
        self.encoder.with(|e| e.reset())?;
        Ok(Progress::Complete)
    }

    fn name(&self) -> &'static str {
        "resetDistance"
    }

    fn resources(&self) -> ResourceSet {
        self.encoder.resources()
    }
}

/// Zero a gyro
pub struct ResetGyro<'r, G> {
    gyro: &'r Shared<G>,
}

impl<'r, G: Gyro> ResetGyro<'r, G> {
    /// Create the command
    pub fn new(gyro: &'r Shared<G>) -> Self {
        Self { gyro }
    }
}

impl<G: Gyro> Command for ResetGyro<'_, G> {
    fn execute(&mut self, _now_ms: u32) -> Result<Progress, CommandError> {
        self.gyro.with(|g| g.reset())?;
        Ok(Progress::Complete)
    }

    fn name(&self) -> &'static str {
        "resetAngle"
    }

    fn resources(&self) -> ResourceSet {
        self.gyro.resources()
    }
}
