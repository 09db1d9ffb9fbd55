//! Actuator traits
//!
//! This module defines traits for the actuator modules commands drive
//! through a resource:
//! - Speed controllers (signed output, -1.0 to 1.0)
//! - Solenoids (on/off valves)
//! - Drive outputs (left/right speed controller pairs)

use super::Module;

/// Errors that can occur with actuator operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorError {
    /// Actuator (or its owning subsystem) is disabled
    Disabled,
    /// The hardware write failed
    Fault,
}

/// Motor speed controller with signed output
pub trait SpeedController: Module {
    /// Set the output in the range -1.0 (full reverse) to 1.0 (full forward)
    ///
    /// Values outside the range are clamped.
    fn set(&mut self, output: f32) -> Result<(), ActuatorError>;

    /// Get the last commanded output
    fn get(&self) -> f32;
}

/// Single-acting solenoid valve
pub trait Solenoid: Module {
    /// Engage (`true`) or release (`false`) the valve
    fn set(&mut self, on: bool) -> Result<(), ActuatorError>;

    /// Get the last commanded state
    fn get(&self) -> bool;
}

/// Two-sided drive output
pub trait DriveOutput: Module {
    /// Drive with a forward speed and a turn rate, both -1.0 to 1.0
    fn arcade(&mut self, speed: f32, turn: f32) -> Result<(), ActuatorError>;

    /// Drive each side independently, both -1.0 to 1.0
    fn tank(&mut self, left: f32, right: f32) -> Result<(), ActuatorError>;

    /// Zero both sides
    fn stop(&mut self) -> Result<(), ActuatorError> {
        self.tank(0.0, 0.0)
    }

    /// Last commanded (left, right) outputs
    fn outputs(&self) -> (f32, f32);
}

impl<T: SpeedController + ?Sized> SpeedController for &mut T {
    fn set(&mut self, output: f32) -> Result<(), ActuatorError> {
        (**self).set(output)
    }

    fn get(&self) -> f32 {
        (**self).get()
    }
}

impl<T: Solenoid + ?Sized> Solenoid for &mut T {
    fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        (**self).set(on)
    }

    fn get(&self) -> bool {
        (**self).get()
    }
}

impl<T: DriveOutput + ?Sized> DriveOutput for &mut T {
    fn arcade(&mut self, speed: f32, turn: f32) -> Result<(), ActuatorError> {
        (**self).arcade(speed, turn)
    }

    fn tank(&mut self, left: f32, right: f32) -> Result<(), ActuatorError> {
        (**self).tank(left, right)
    }

    fn stop(&mut self) -> Result<(), ActuatorError> {
        (**self).stop()
    }

    fn outputs(&self) -> (f32, f32) {
        (**self).outputs()
    }
}
