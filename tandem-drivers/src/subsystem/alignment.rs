//! Shooter alignment
//!
//! A dual-action piston pair that extends or collapses the alignment arms,
//! plus a positional actuator that tilts the shooter. The two pistons are
//! always driven in opposite states.

use tandem_core::traits::{ActuatorError, Solenoid, SpeedController, Subsystem};

/// Alignment resource API used by alignment commands
pub trait Aligner: Subsystem {
    /// Push the alignment arms out
    fn extend(&mut self) -> Result<(), ActuatorError>;

    /// Pull the alignment arms in
    fn collapse(&mut self) -> Result<(), ActuatorError>;

    /// Check if the arms are extended
    fn is_extended(&self) -> bool;

    /// Tilt the shooter to `degrees`, clamped to the mechanism's range
    fn set_angle(&mut self, degrees: f32) -> Result<(), ActuatorError>;

    /// Last commanded shooter angle in degrees
    fn angle(&self) -> f32;
}

/// Dual-action arms and a tilting shooter mount
pub struct AlignmentSystem<S, A> {
    extend: S,
    retract: S,
    tilt: A,
    max_angle: f32,
    angle: f32,
    extended: bool,
}

impl<S: Solenoid, A: SpeedController> AlignmentSystem<S, A> {
    /// Create an alignment system and enable its modules
    ///
    /// The arms start collapsed and the shooter at zero degrees.
    ///
    /// # Arguments
    /// - `max_angle`: Angle in degrees reached at full actuator output
    pub fn new(extend: S, retract: S, tilt: A, max_angle: f32) -> Result<Self, ActuatorError> {
        let mut alignment = Self {
            extend,
            retract,
            tilt,
            max_angle,
            angle: 0.0,
            extended: false,
        };
        alignment.enable();
        alignment.apply(false)?;
        alignment.tilt.set(0.0)?;
        Ok(alignment)
    }

    /// Get the extending solenoid
    pub fn extend_solenoid(&self) -> &S {
        &self.extend
    }

    /// Get the retracting solenoid
    pub fn retract_solenoid(&self) -> &S {
        &self.retract
    }

    /// Get the tilt actuator
    pub fn tilt(&self) -> &A {
        &self.tilt
    }

    fn apply(&mut self, extended: bool) -> Result<(), ActuatorError> {
        self.extend.set(extended)?;
        self.retract.set(!extended)?;
        self.extended = extended;
        Ok(())
    }

    fn ensure_enabled(&self) -> Result<(), ActuatorError> {
        if Subsystem::is_enabled(self) {
            Ok(())
        } else {
            Err(ActuatorError::Disabled)
        }
    }
}

impl<S: Solenoid, A: SpeedController> Subsystem for AlignmentSystem<S, A> {
    fn enable(&mut self) {
        self.extend.enable();
        self.retract.enable();
        self.tilt.enable();
    }

    fn disable(&mut self) {
        self.extend.disable();
        self.retract.disable();
        self.tilt.disable();
    }

    fn is_enabled(&self) -> bool {
        self.extend.is_enabled() && self.retract.is_enabled() && self.tilt.is_enabled()
    }
}

impl<S: Solenoid, A: SpeedController> Aligner for AlignmentSystem<S, A> {
    fn extend(&mut self) -> Result<(), ActuatorError> {
        self.ensure_enabled()?;
        debug!("extending alignment");
        self.apply(true)
    }

    fn collapse(&mut self) -> Result<(), ActuatorError> {
        self.ensure_enabled()?;
        debug!("collapsing alignment");
        self.apply(false)
    }

    fn is_extended(&self) -> bool {
        self.extended
    }

    fn set_angle(&mut self, degrees: f32) -> Result<(), ActuatorError> {
        self.ensure_enabled()?;
        if self.max_angle.is_nan() || self.max_angle <= 0.0 {
            return Err(ActuatorError::Fault);
        }
        let degrees = if degrees.is_nan() {
            0.0
        } else {
            degrees.clamp(0.0, self.max_angle)
        };
        self.tilt.set(degrees / self.max_angle)?;
        self.angle = degrees;
        Ok(())
    }

    fn angle(&self) -> f32 {
        self.angle
    }
}
