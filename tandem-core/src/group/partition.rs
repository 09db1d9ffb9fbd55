//! Group partitioning
//!
//! Splits an ordered list of tagged entries into execution steps. Each step
//! is either one sequential entry or a maximal run of consecutive concurrent
//! entries. A lone concurrent entry still forms a one-element batch.
//!
//! ```text
//! tags:   S  C  C  S  C
//! steps: [0][1..3][3][4..5]
//! ```

use core::ops::Range;

use heapless::Vec;

use super::{BuildError, Tag, MAX_GROUP_ENTRIES};

/// One execution step of a group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// A single sequential entry
    Sequential {
        /// Entry index
        index: usize,
    },
    /// A run of concurrent entries, started together and joined
    Concurrent {
        /// Index of the first entry
        start: usize,
        /// Number of entries (at least one)
        len: usize,
    },
}

impl Step {
    /// Entry indices covered by this step
    pub fn range(&self) -> Range<usize> {
        match *self {
            Step::Sequential { index } => index..index + 1,
            Step::Concurrent { start, len } => start..start + len,
        }
    }

    /// Check if this step runs through the join barrier
    pub fn is_concurrent(&self) -> bool {
        matches!(self, Step::Concurrent { .. })
    }
}

/// Ordered execution steps of a group
#[derive(Debug, Clone, Default)]
pub struct Partition {
    steps: Vec<Step, MAX_GROUP_ENTRIES>,
}

impl Partition {
    /// Partition a tag sequence in a single pass
    ///
    /// # Errors
    /// [`BuildError::CapacityExceeded`] if there are more than
    /// [`MAX_GROUP_ENTRIES`] tags.
    pub fn derive(tags: &[Tag]) -> Result<Self, BuildError> {
        if tags.len() > MAX_GROUP_ENTRIES {
            return Err(BuildError::CapacityExceeded);
        }

        let mut steps = Vec::new();
        // Start of the pending concurrent run
        let mut pending: Option<usize> = None;

        for (i, tag) in tags.iter().enumerate() {
            match tag {
                Tag::Concurrent => {
                    if pending.is_none() {
                        pending = Some(i);
                    }
                }
                Tag::Sequential => {
                    if let Some(start) = pending.take() {
                        push(&mut steps, Step::Concurrent { start, len: i - start })?;
                    }
                    push(&mut steps, Step::Sequential { index: i })?;
                }
            }
        }

        if let Some(start) = pending {
            push(
                &mut steps,
                Step::Concurrent {
                    start,
                    len: tags.len() - start,
                },
            )?;
        }

        Ok(Self { steps })
    }

    /// Steps in execution order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if there are no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

fn push(steps: &mut Vec<Step, MAX_GROUP_ENTRIES>, step: Step) -> Result<(), BuildError> {
    steps.push(step).map_err(|_| BuildError::CapacityExceeded)
}
