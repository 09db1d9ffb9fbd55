//! Resources (subsystems)
//!
//! Each resource owns a fixed set of modules, enables and disables them as a
//! unit, and exposes a narrow API to commands. Resources do not arbitrate
//! between commands; see `tandem_core::Shared`.

pub mod alignment;
pub mod drivetrain;
pub mod shooter;

pub use alignment::{Aligner, AlignmentSystem};
pub use drivetrain::{Drivetrain, ShiftingDrivetrain};
pub use shooter::{Launcher, Shooter};
