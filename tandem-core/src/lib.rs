//! Board-agnostic command scheduling core
//!
//! This crate contains the command engine that does not depend on
//! specific hardware implementations:
//!
//! - Command contract and runner
//! - Concurrent batches (fan-out + join barrier)
//! - Group scheduler (sequential/concurrent partitioning)
//! - Shared resource handles
//! - Module and subsystem traits
//! - Control clock and cancellation
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod batch;
pub mod cancel;
pub mod clock;
pub mod command;
pub mod config;
pub mod group;
pub mod resource;
#[cfg(feature = "embassy")]
pub mod runtime;
pub mod traits;

#[cfg(test)]
mod testing;

pub use batch::{ConcurrentBatch, JoinState, MAX_BATCH_SIZE};
pub use cancel::{CancelToken, Cancellable};
pub use clock::{ControlClock, ManualClock};
pub use command::{Command, CommandError, FnCommand, Progress, Runner};
pub use group::{BuildError, Group, GroupBuilder, Partition, Step, Tag, MAX_GROUP_ENTRIES};
pub use resource::{ResourceId, ResourceSet, Shared};
#[cfg(feature = "embassy")]
pub use runtime::run_async;
