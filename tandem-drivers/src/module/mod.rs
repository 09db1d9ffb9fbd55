//! Module implementations
//!
//! - GPIO solenoids and PWM speed controllers over `embedded-hal`
//! - Two-sided robot drive with arcade mixing
//! - Module aggregates
//! - In-memory modules for host-side runs

pub mod drive;
pub mod gpio;
pub mod group;
pub mod pwm;
pub mod sim;

pub use drive::{arcade_mix, RobotDrive};
pub use gpio::GpioSolenoid;
pub use group::{ModuleGroup, ModuleGroupBuilder, SpeedControllerGroup};
pub use pwm::{PwmConfig, PwmSpeedController};
