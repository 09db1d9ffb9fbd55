//! Concurrent batches
//!
//! A batch starts every member in the same tick and reports completion only
//! once every member has completed (fan-out + join barrier). Members are
//! advanced round-robin, one `update` each per tick, in declaration order.
//!
//! A member failure does not stop its siblings. The batch keeps advancing the
//! remaining members and surfaces the first failure it observed once all of
//! them have finished.

use heapless::Vec;

use crate::command::{Command, CommandError, Progress};
use crate::group::{BuildError, MAX_GROUP_ENTRIES};
use crate::resource::ResourceSet;

/// Maximum number of members in one batch
pub const MAX_BATCH_SIZE: usize = MAX_GROUP_ENTRIES;

/// Per-member progress inside a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum MemberState {
    Running,
    Complete,
    Failed,
}

/// Join barrier bookkeeping for a set of concurrently running commands
///
/// Holds no commands itself, so the same state can track a batch owned by
/// [`ConcurrentBatch`] or a slice of a group's entries.
#[derive(Debug)]
pub struct JoinState {
    /// State of each member, in declaration order
    members: Vec<MemberState, MAX_BATCH_SIZE>,
    /// First failure observed
    failure: Option<CommandError>,
}

impl JoinState {
    /// Create an idle join state
    pub const fn new() -> Self {
        Self {
            members: Vec::new(),
            failure: None,
        }
    }

    /// Start every command in the batch
    ///
    /// Every member's `execute` is called, even after an earlier member has
    /// failed.
    pub fn start(
        &mut self,
        commands: &mut [&mut dyn Command],
        now_ms: u32,
    ) -> Result<Progress, CommandError> {
        self.members.clear();
        self.failure = None;

        if commands.len() > MAX_BATCH_SIZE {
            return Err(CommandError::Failed);
        }

        debug!("batch start: {} members", commands.len());

        for command in commands.iter_mut() {
            let result = command.execute(now_ms);
            let state = record(&mut self.failure, command.name(), result);
            // Length checked above
            let _ = self.members.push(state);
        }

        self.progress()
    }

    /// Advance every still-running member by one tick
    pub fn update(
        &mut self,
        commands: &mut [&mut dyn Command],
        now_ms: u32,
    ) -> Result<Progress, CommandError> {
        for (command, state) in commands.iter_mut().zip(self.members.iter_mut()) {
            if *state == MemberState::Running {
                let result = command.update(now_ms);
                *state = record(&mut self.failure, command.name(), result);
            }
        }

        self.progress()
    }

    /// Number of members still running
    pub fn running(&self) -> usize {
        self.members
            .iter()
            .filter(|s| **s == MemberState::Running)
            .count()
    }

    /// Combined progress of the batch
    fn progress(&self) -> Result<Progress, CommandError> {
        if self.running() > 0 {
            return Ok(Progress::Running);
        }

        debug!("batch joined");

        match self.failure {
            Some(e) => Err(e),
            None => Ok(Progress::Complete),
        }
    }
}

impl Default for JoinState {
    fn default() -> Self {
        Self::new()
    }
}

/// Fold one member result into the batch state
fn record(
    failure: &mut Option<CommandError>,
    name: &'static str,
    result: Result<Progress, CommandError>,
) -> MemberState {
    match result {
        Ok(Progress::Running) => MemberState::Running,
        Ok(Progress::Complete) => MemberState::Complete,
        Err(e) => {
            warn!("batch member {} failed: {:?}", name, e);
            if failure.is_none() {
                *failure = Some(e);
            }
            MemberState::Failed
        }
    }
}

/// A set of commands run together as one command
///
/// ```
/// use tandem_core::{Command, ConcurrentBatch, FnCommand, ManualClock, Runner};
///
/// let mut left = FnCommand::new("left", || Ok(()));
/// let mut right = FnCommand::new("right", || Ok(()));
/// let mut members: [&mut dyn Command; 2] = [&mut left, &mut right];
///
/// let mut batch = ConcurrentBatch::new(&mut members).unwrap();
/// let mut clock = ManualClock::new(20);
/// Runner::new(&mut clock).run(&mut batch).unwrap();
/// ```
pub struct ConcurrentBatch<'a, 'c> {
    commands: &'a mut [&'c mut dyn Command],
    join: JoinState,
}

impl<'a, 'c> ConcurrentBatch<'a, 'c> {
    /// Create a batch
    ///
    /// # Errors
    /// - [`BuildError::EmptyBatch`] if `commands` is empty
    /// - [`BuildError::CapacityExceeded`] if it holds more than
    ///   [`MAX_BATCH_SIZE`] commands
    pub fn new(commands: &'a mut [&'c mut dyn Command]) -> Result<Self, BuildError> {
        if commands.is_empty() {
            return Err(BuildError::EmptyBatch);
        }
        if commands.len() > MAX_BATCH_SIZE {
            return Err(BuildError::CapacityExceeded);
        }

        Ok(Self {
            commands,
            join: JoinState::new(),
        })
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Always false; empty batches cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Command for ConcurrentBatch<'_, '_> {
    fn execute(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
        self.join.start(self.commands, now_ms)
    }

    fn update(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
        self.join.update(self.commands, now_ms)
    }

    fn name(&self) -> &'static str {
        "batch"
    }

    fn resources(&self) -> ResourceSet {
        self.commands
            .iter()
            .fold(ResourceSet::EMPTY, |set, c| set.union(c.resources()))
    }
}
