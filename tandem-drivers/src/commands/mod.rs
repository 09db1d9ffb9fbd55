//! Commands that act on shared resources
//!
//! Every command here borrows its resources through `tandem_core::Shared`
//! and reports them from `resources()`, so groups can check them for
//! conflicts before running.

pub mod alignment;
pub mod drive;
pub mod shooter;
pub mod util;

#[cfg(test)]
pub(crate) mod testing;

pub use alignment::{AlignShooter, CollapseAlignment, ExtendAlignment};
pub use drive::{ArcadeDrive, DriveDistance, ShiftGear, StopDrive, TankDrive, TurnToAngle};
pub use shooter::{AutoShoot, AutoShootPhase, SetShooterSpeed, Shoot, StopShooter};
pub use util::{Log, Pause, ResetEncoder, ResetGyro, MAX_MESSAGE_LEN};

/// Milliseconds from `since_ms` to `now_ms`, tolerating clock wrap
pub(crate) fn elapsed(since_ms: u32, now_ms: u32) -> u32 {
    now_ms.wrapping_sub(since_ms)
}
