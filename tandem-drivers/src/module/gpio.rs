//! GPIO solenoid output
//!
//! Drives a solenoid valve through a GPIO pin (directly or via a driver
//! transistor/relay).

use embedded_hal::digital::OutputPin;

use tandem_core::traits::{ActuatorError, Module, Solenoid};

/// GPIO solenoid output
///
/// The pin can be configured as active-high (default) or active-low.
/// A disabled solenoid is released and rejects `set`.
pub struct GpioSolenoid<P> {
    pin: P,
    /// If true, solenoid engaged = pin LOW
    inverted: bool,
    /// Current logical state (true = engaged)
    on: bool,
    enabled: bool,
}

impl<P: OutputPin> GpioSolenoid<P> {
    /// Create a new GPIO solenoid output
    ///
    /// The solenoid starts released and disabled.
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, the solenoid is engaged when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut solenoid = Self {
            pin,
            inverted,
            on: false,
            enabled: false,
        };
        // Best effort; a failing pin is reported on the next set
        let _ = solenoid.write(false);
        solenoid
    }

    /// Create a new GPIO solenoid with active-high output
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create a new GPIO solenoid with active-low output
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Release the pin
    pub fn release(self) -> P {
        self.pin
    }

    fn write(&mut self, on: bool) -> Result<(), ActuatorError> {
        let result = if on != self.inverted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|_| ActuatorError::Fault)?;
        self.on = on;
        Ok(())
    }
}

impl<P: OutputPin> Module for GpioSolenoid<P> {
    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
        let _ = self.write(false);
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl<P: OutputPin> Solenoid for GpioSolenoid<P> {
    fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        if !self.enabled {
            return Err(ActuatorError::Disabled);
        }
        self.write(on)
    }

    fn get(&self) -> bool {
        self.on
    }
}
