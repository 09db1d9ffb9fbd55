//! Modules, resources and commands for Tandem control loops
//!
//! Concrete implementations of the `tandem-core` traits:
//!
//! - Modules: GPIO solenoids, PWM speed controllers, the two-motor drive,
//!   module groups and simulated devices
//! - Controllers: PID and bang-bang
//! - Resources: a shifting drivetrain and a flywheel shooter
//! - Commands acting on those resources

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod clock;
pub mod commands;
pub mod control;
pub mod module;
pub mod subsystem;

pub use clock::DelayClock;
