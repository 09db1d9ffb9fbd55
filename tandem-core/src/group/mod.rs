//! Group scheduler
//!
//! Composes commands into an ordered group. Each command is tagged
//! sequential or concurrent when it is appended:
//!
//! - Sequential commands never overlap with anything else in the group
//! - A maximal run of consecutive concurrent commands starts together and
//!   the group does not move on until all of them have completed
//! - A sequential command breaks a run of concurrent commands
//!
//! The partition into steps is computed once, when the group is built.

mod builder;
mod partition;
mod tag;

pub use builder::{BuildError, Group, GroupBuilder};
pub use partition::{Partition, Step};
pub use tag::Tag;

/// Maximum number of entries in one group
pub const MAX_GROUP_ENTRIES: usize = 32;
