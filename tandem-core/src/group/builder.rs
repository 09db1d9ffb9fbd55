//! Group construction and execution

use heapless::Vec;

use super::{Partition, Step, Tag, MAX_GROUP_ENTRIES};
use crate::batch::JoinState;
use crate::command::{Command, CommandError, Progress};
use crate::resource::ResourceSet;

/// Errors reported while composing commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BuildError {
    /// Tag text is neither "sequential" nor "concurrent"
    UnknownTag,
    /// Too many commands
    CapacityExceeded,
    /// A batch must hold at least one command
    EmptyBatch,
    /// Two members of one concurrent step drive the same resource
    ResourceConflict {
        /// Index of the offending step
        step: usize,
    },
}

/// Append-only builder for a [`Group`]
///
/// Every `add*` method either appends one entry or fails and leaves the
/// builder unchanged.
pub struct GroupBuilder<'c> {
    commands: Vec<&'c mut dyn Command, MAX_GROUP_ENTRIES>,
    tags: Vec<Tag, MAX_GROUP_ENTRIES>,
}

impl<'c> GroupBuilder<'c> {
    /// Create an empty builder
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Append a command that runs alone
    pub fn add_sequential(&mut self, command: &'c mut dyn Command) -> Result<&mut Self, BuildError> {
        self.add(Tag::Sequential, command)
    }

    /// Append a command that runs alongside adjacent concurrent commands
    pub fn add_concurrent(&mut self, command: &'c mut dyn Command) -> Result<&mut Self, BuildError> {
        self.add(Tag::Concurrent, command)
    }

    /// Append a command with a tag parsed from text
    pub fn add_tagged(
        &mut self,
        tag: &str,
        command: &'c mut dyn Command,
    ) -> Result<&mut Self, BuildError> {
        let tag = tag.parse()?;
        self.add(tag, command)
    }

    /// Append a tagged command
    pub fn add(&mut self, tag: Tag, command: &'c mut dyn Command) -> Result<&mut Self, BuildError> {
        if self.commands.is_full() {
            return Err(BuildError::CapacityExceeded);
        }

        self.commands
            .push(command)
            .map_err(|_| BuildError::CapacityExceeded)?;
        if self.tags.push(tag).is_err() {
            self.commands.pop();
            return Err(BuildError::CapacityExceeded);
        }

        Ok(self)
    }

    /// Number of entries so far
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if nothing has been added
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Tags in append order
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Finish composition
    ///
    /// Does not check for shared resources within a concurrent step.
    pub fn build(self) -> Group<'c> {
        // Capacity is enforced on append, so this cannot fail
        let partition = Partition::derive(&self.tags).unwrap_or_default();

        debug!(
            "group built: {} entries, {} steps",
            self.commands.len(),
            partition.len()
        );

        Group {
            commands: self.commands,
            partition,
            cursor: None,
            join: JoinState::new(),
        }
    }

    /// Finish composition, rejecting resource sharing within a step
    ///
    /// # Errors
    /// [`BuildError::ResourceConflict`] if two members of one concurrent
    /// step declare overlapping [`Command::resources`].
    pub fn build_exclusive(self) -> Result<Group<'c>, BuildError> {
        let group = self.build();

        for (step_index, step) in group.partition.steps().iter().enumerate() {
            if !step.is_concurrent() {
                continue;
            }

            let mut claimed = ResourceSet::EMPTY;
            for command in &group.commands[step.range()] {
                let resources = command.resources();
                if claimed.overlaps(&resources) {
                    warn!("resource conflict in step {}", step_index);
                    return Err(BuildError::ResourceConflict { step: step_index });
                }
                claimed = claimed.union(resources);
            }
        }

        Ok(group)
    }
}

impl Default for GroupBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Composed, immutable sequence of tagged commands
///
/// A group is itself a command: it can be run by a [`Runner`](crate::Runner),
/// nested in another group, or run again. Each run walks the same partition
/// from the first step. Within a tick, as soon as one step completes the
/// next one is started.
pub struct Group<'c> {
    commands: Vec<&'c mut dyn Command, MAX_GROUP_ENTRIES>,
    partition: Partition,
    /// Index of the step in flight
    cursor: Option<usize>,
    /// Join state of the current concurrent step
    join: JoinState,
}

impl<'c> Group<'c> {
    /// Number of entries
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the group has no entries
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Execution steps
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Index of the step currently running, if any
    pub fn current_step(&self) -> Option<usize> {
        self.cursor
    }

    /// Start steps from `first` until one is still running after start
    fn start_from(&mut self, first: usize, now_ms: u32) -> Result<Progress, CommandError> {
        let mut index = first;

        while let Some(&step) = self.partition.steps().get(index) {
            debug!("group step {} start", index);

            let result = match step {
                Step::Sequential { index: entry } => self.commands[entry].execute(now_ms),
                Step::Concurrent { .. } => {
                    self.join.start(&mut self.commands[step.range()], now_ms)
                }
            };

            match self.settle(index, result)? {
                Progress::Running => return Ok(Progress::Running),
                Progress::Complete => index += 1,
            }
        }

        self.cursor = None;
        Ok(Progress::Complete)
    }

    /// Record the outcome of the step at `index`
    fn settle(
        &mut self,
        index: usize,
        result: Result<Progress, CommandError>,
    ) -> Result<Progress, CommandError> {
        match result {
            Ok(Progress::Running) => {
                self.cursor = Some(index);
                Ok(Progress::Running)
            }
            Ok(Progress::Complete) => Ok(Progress::Complete),
            Err(e) => {
                warn!("group step {} failed: {:?}", index, e);
                self.cursor = None;
                Err(e)
            }
        }
    }
}

impl Command for Group<'_> {
    fn execute(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
        self.start_from(0, now_ms)
    }

    fn update(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
        let Some(index) = self.cursor else {
            return Ok(Progress::Complete);
        };
        let Some(&step) = self.partition.steps().get(index) else {
            self.cursor = None;
            return Ok(Progress::Complete);
        };

        let result = match step {
            Step::Sequential { index: entry } => self.commands[entry].update(now_ms),
            Step::Concurrent { .. } => self.join.update(&mut self.commands[step.range()], now_ms),
        };

        match self.settle(index, result)? {
            Progress::Running => Ok(Progress::Running),
            Progress::Complete => self.start_from(index + 1, now_ms),
        }
    }

    fn name(&self) -> &'static str {
        "group"
    }

    fn resources(&self) -> ResourceSet {
        self.commands
            .iter()
            .fold(ResourceSet::EMPTY, |set, c| set.union(c.resources()))
    }
}
