//! Command contract
//!
//! A command is the atomic unit of work. It has a single execution entry
//! point, [`Command::execute`], invoked exactly once per scheduled
//! occurrence. Work that spans several control ticks is advanced by
//! [`Command::update`] until it reports [`Progress::Complete`].

pub mod runner;

pub use runner::Runner;

use crate::resource::{ResourceId, ResourceSet};
use crate::traits::{ActuatorError, SensorError};

/// Progress reported by a started command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Progress {
    /// Work is still in flight; call `update` on the next tick
    Running,
    /// Work is done
    Complete,
}

impl Progress {
    /// Check if the command has finished
    pub fn is_complete(&self) -> bool {
        *self == Progress::Complete
    }
}

/// Errors that can occur while executing a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// An actuator rejected the requested output
    Actuator(ActuatorError),
    /// A sensor could not be read
    Sensor(SensorError),
    /// The resource was already borrowed by another access
    ResourceBusy(ResourceId),
    /// The command did not reach its goal in time
    Timeout,
    /// An external cancellation signal was observed
    Cancelled,
    /// Command-specific failure
    Failed,
}

impl From<ActuatorError> for CommandError {
    fn from(e: ActuatorError) -> Self {
        CommandError::Actuator(e)
    }
}

impl From<SensorError> for CommandError {
    fn from(e: SensorError) -> Self {
        CommandError::Sensor(e)
    }
}

/// A unit of work driven by the control loop
///
/// `execute` is the only entry point the scheduler calls to start a command,
/// and it is called exactly once per scheduled occurrence. If it returns
/// [`Progress::Running`], `update` is called once per control tick until the
/// command completes or fails. `update` is never called on a command that
/// has not been started or has already finished.
pub trait Command {
    /// Start (and possibly finish) the unit of work
    ///
    /// # Arguments
    /// - `now_ms`: Control loop time in milliseconds
    fn execute(&mut self, now_ms: u32) -> Result<Progress, CommandError>;

    /// Advance work begun by `execute` by one control tick
    fn update(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
        let _ = now_ms;
        Ok(Progress::Complete)
    }

    /// Short label used in log output
    fn name(&self) -> &'static str {
        "command"
    }

    /// Resources this command drives
    ///
    /// Only consulted by [`GroupBuilder::build_exclusive`](crate::GroupBuilder::build_exclusive).
    fn resources(&self) -> ResourceSet {
        ResourceSet::EMPTY
    }
}

/// Instantaneous command wrapping a closure
///
/// ```
/// use tandem_core::{Command, FnCommand, Progress};
///
/// let mut hits = 0;
/// let mut cmd = FnCommand::new("count", || {
///     hits += 1;
///     Ok(())
/// });
/// assert_eq!(cmd.execute(0), Ok(Progress::Complete));
/// drop(cmd);
/// assert_eq!(hits, 1);
/// ```
pub struct FnCommand<F> {
    name: &'static str,
    action: F,
    resources: ResourceSet,
}

impl<F> FnCommand<F>
where
    F: FnMut() -> Result<(), CommandError>,
{
    /// Create a command from a closure
    pub fn new(name: &'static str, action: F) -> Self {
        Self {
            name,
            action,
            resources: ResourceSet::EMPTY,
        }
    }

    /// Declare a resource the closure drives
    pub fn driving(mut self, id: ResourceId) -> Self {
        self.resources = self.resources.with(id);
        self
    }
}

impl<F> Command for FnCommand<F>
where
    F: FnMut() -> Result<(), CommandError>,
{
    fn execute(&mut self, _now_ms: u32) -> Result<Progress, CommandError> {
        (self.action)()?;
        Ok(Progress::Complete)
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn resources(&self) -> ResourceSet {
        self.resources
    }
}
