//! Flywheel shooter
//!
//! A flywheel speed controller regulated bang-bang against a rate sensor,
//! plus a feeder piston that pushes a ball into the wheel.

use tandem_core::traits::{ActuatorError, Encoder, Solenoid, SpeedController, Subsystem};
use tandem_core::CommandError;

use crate::control::BangBang;

/// Shooter resource API used by shooter commands
pub trait Launcher: Subsystem {
    /// Set the flywheel rate setpoint
    fn set_setpoint(&mut self, rate: f32);

    /// Current flywheel rate setpoint
    fn setpoint(&self) -> f32;

    /// Read the flywheel rate and apply one bang-bang step
    fn regulate(&mut self) -> Result<(), CommandError>;

    /// Check if the last regulated reading reached the setpoint
    fn is_past_setpoint(&self) -> bool;

    /// Zero the setpoint and the flywheel output
    fn stop(&mut self) -> Result<(), ActuatorError>;

    /// Extend the feeder
    fn fire(&mut self) -> Result<(), ActuatorError>;

    /// Retract the feeder
    fn retract(&mut self) -> Result<(), ActuatorError>;
}

/// Bang-bang flywheel with a feeder piston
pub struct Shooter<F, R, P> {
    flywheel: F,
    rate: R,
    feeder: P,
    regulator: BangBang,
}

impl<F: SpeedController, R: Encoder, P: Solenoid> Shooter<F, R, P> {
    /// Create a shooter and enable its modules
    ///
    /// The flywheel starts at zero output with the feeder retracted.
    pub fn new(flywheel: F, rate: R, feeder: P) -> Result<Self, ActuatorError> {
        let mut shooter = Self {
            flywheel,
            rate,
            feeder,
            regulator: BangBang::new(),
        };
        shooter.enable();
        shooter.flywheel.set(0.0)?;
        shooter.feeder.set(false)?;
        Ok(shooter)
    }

    /// Get the flywheel speed controller
    pub fn flywheel(&self) -> &F {
        &self.flywheel
    }

    /// Get the rate sensor
    pub fn rate_sensor(&mut self) -> &mut R {
        &mut self.rate
    }

    /// Get the feeder solenoid
    pub fn feeder(&self) -> &P {
        &self.feeder
    }

    fn ensure_enabled(&self) -> Result<(), ActuatorError> {
        if Subsystem::is_enabled(self) {
            Ok(())
        } else {
            Err(ActuatorError::Disabled)
        }
    }
}

impl<F: SpeedController, R: Encoder, P: Solenoid> Subsystem for Shooter<F, R, P> {
    fn enable(&mut self) {
        self.flywheel.enable();
        self.rate.enable();
        self.feeder.enable();
    }

    fn disable(&mut self) {
        self.flywheel.disable();
        self.rate.disable();
        self.feeder.disable();
    }

    fn is_enabled(&self) -> bool {
        self.flywheel.is_enabled() && self.rate.is_enabled() && self.feeder.is_enabled()
    }
}

impl<F: SpeedController, R: Encoder, P: Solenoid> Launcher for Shooter<F, R, P> {
    fn set_setpoint(&mut self, rate: f32) {
        debug!("shooter setpoint {}", rate);
        self.regulator.set_setpoint(rate);
    }

    fn setpoint(&self) -> f32 {
        self.regulator.setpoint()
    }

    fn regulate(&mut self) -> Result<(), CommandError> {
        self.ensure_enabled()?;
        let rate = self.rate.rate()?;
        let output = self.regulator.calculate(rate);
        self.flywheel.set(output)?;
        Ok(())
    }

    fn is_past_setpoint(&self) -> bool {
        self.regulator.is_past_setpoint()
    }

    fn stop(&mut self) -> Result<(), ActuatorError> {
        self.ensure_enabled()?;
        self.regulator.set_setpoint(0.0);
        self.flywheel.set(0.0)
    }

    fn fire(&mut self) -> Result<(), ActuatorError> {
        self.ensure_enabled()?;
        self.feeder.set(true)
    }

    fn retract(&mut self) -> Result<(), ActuatorError> {
        self.ensure_enabled()?;
        self.feeder.set(false)
    }
}
