//! PWM speed controller
//!
//! Drives an H-bridge with a PWM duty output and a direction pin. The
//! signed output (-1.0 to 1.0) maps to a duty cycle magnitude and a
//! direction.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use tandem_core::traits::{ActuatorError, Module, SpeedController};

/// PWM speed controller configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmConfig {
    /// Minimum duty fraction below which the motor won't turn (0.0 - 1.0)
    ///
    /// Non-zero outputs are scaled into `min_duty..=1.0`.
    pub min_duty: f32,
    /// Swap the meaning of the direction pin
    pub inverted: bool,
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self {
            min_duty: 0.0,
            inverted: false,
        }
    }
}

/// PWM + direction pin speed controller
pub struct PwmSpeedController<P, D> {
    pwm: P,
    direction: D,
    config: PwmConfig,
    /// Last commanded output
    output: f32,
    enabled: bool,
}

impl<P: SetDutyCycle, D: OutputPin> PwmSpeedController<P, D> {
    /// Create a new speed controller
    ///
    /// The output starts at zero and the controller starts disabled.
    pub fn new(pwm: P, direction: D, config: PwmConfig) -> Self {
        let mut controller = Self {
            pwm,
            direction,
            config,
            output: 0.0,
            enabled: false,
        };
        let _ = controller.write(0.0);
        controller
    }

    /// Get the configuration
    pub fn config(&self) -> &PwmConfig {
        &self.config
    }

    /// Scale an output magnitude (0.0 - 1.0) to a duty cycle
    ///
    /// Maps non-zero magnitudes into `min_duty..=1.0`, so that 0.0 = off
    /// and 1.0 = full power, with the dead zone below `min_duty` skipped.
    fn scale_duty(&self, magnitude: f32) -> u16 {
        if magnitude <= 0.0 {
            return 0;
        }
        let min = self.config.min_duty.clamp(0.0, 1.0);
        let fraction = (min + magnitude * (1.0 - min)).min(1.0);
        let max = self.pwm.max_duty_cycle();
        (fraction * max as f32) as u16
    }

    fn write(&mut self, output: f32) -> Result<(), ActuatorError> {
        let output = output.clamp(-1.0, 1.0);
        let forward = (output >= 0.0) != self.config.inverted;
        let magnitude = if output < 0.0 { -output } else { output };

        let dir = if forward {
            self.direction.set_high()
        } else {
            self.direction.set_low()
        };
        dir.map_err(|_| ActuatorError::Fault)?;

        let duty = self.scale_duty(magnitude);
        self.pwm
            .set_duty_cycle(duty)
            .map_err(|_| ActuatorError::Fault)?;

        self.output = output;
        Ok(())
    }
}

impl<P: SetDutyCycle, D: OutputPin> Module for PwmSpeedController<P, D> {
    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
        let _ = self.write(0.0);
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl<P: SetDutyCycle, D: OutputPin> SpeedController for PwmSpeedController<P, D> {
    fn set(&mut self, output: f32) -> Result<(), ActuatorError> {
        if !self.enabled {
            return Err(ActuatorError::Disabled);
        }
        self.write(output)
    }

    fn get(&self) -> f32 {
        self.output
    }
}
