//! Hardware abstraction traits
//!
//! These traits define the interface between commands, the resources they
//! drive, and hardware-specific module implementations.

pub mod actuator;
pub mod module;
pub mod sensor;

pub use actuator::{ActuatorError, DriveOutput, Solenoid, SpeedController};
pub use module::{Module, Subsystem};
pub use sensor::{Encoder, Gyro, SensorError};
