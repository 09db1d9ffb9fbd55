//! Shifting drivetrain
//!
//! Owns a two-sided drive output and two gear solenoids. The solenoids are
//! always in complementary states: first gear = shifted, second gear =
//! !shifted.

use tandem_core::traits::{ActuatorError, DriveOutput, Solenoid, Subsystem};

/// Drive resource API used by drive commands
pub trait Drivetrain: Subsystem {
    /// Drive with a forward speed and a turn rate, both -1.0 to 1.0
    fn arcade_drive(&mut self, speed: f32, turn: f32) -> Result<(), ActuatorError>;

    /// Drive each side independently, both -1.0 to 1.0
    fn tank_drive(&mut self, left: f32, right: f32) -> Result<(), ActuatorError>;

    /// Zero both sides
    fn stop(&mut self) -> Result<(), ActuatorError>;

    /// Toggle the gear
    fn shift_gear(&mut self) -> Result<(), ActuatorError>;

    /// Check if the drivetrain is in the shifted gear
    fn is_shifted(&self) -> bool;
}

/// Drivetrain with a two-solenoid gearbox
pub struct ShiftingDrivetrain<D, S> {
    drive: D,
    first_gear: S,
    second_gear: S,
    shifted: bool,
}

impl<D: DriveOutput, S: Solenoid> ShiftingDrivetrain<D, S> {
    /// Create a drivetrain and enable its modules
    ///
    /// The gear solenoids are put in the complementary state for
    /// `initial_shifted` before this returns.
    ///
    /// # Errors
    /// Returns the first solenoid write error.
    pub fn new(
        drive: D,
        first_gear: S,
        second_gear: S,
        initial_shifted: bool,
    ) -> Result<Self, ActuatorError> {
        let mut drivetrain = Self {
            drive,
            first_gear,
            second_gear,
            shifted: initial_shifted,
        };
        drivetrain.enable();
        drivetrain.apply_gear(initial_shifted)?;
        Ok(drivetrain)
    }

    /// Get the drive output
    pub fn drive(&self) -> &D {
        &self.drive
    }

    /// Get the first gear solenoid
    pub fn first_gear(&self) -> &S {
        &self.first_gear
    }

    /// Get the second gear solenoid
    pub fn second_gear(&self) -> &S {
        &self.second_gear
    }

    fn apply_gear(&mut self, shifted: bool) -> Result<(), ActuatorError> {
        self.first_gear.set(shifted)?;
        if let Err(e) = self.second_gear.set(!shifted) {
            // Restore the previous complementary state
            let _ = self.first_gear.set(!shifted);
            return Err(e);
        }
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

impl<D: DriveOutput, S: Solenoid> Subsystem for ShiftingDrivetrain<D, S> {
    fn enable(&mut self) {
        self.drive.enable();
        self.first_gear.enable();
        self.second_gear.enable();
    }

    fn disable(&mut self) {
        self.drive.disable();
        self.first_gear.disable();
        self.second_gear.disable();
    }

    fn is_enabled(&self) -> bool {
        self.drive.is_enabled() && self.first_gear.is_enabled() && self.second_gear.is_enabled()
    }
}

impl<D: DriveOutput, S: Solenoid> Drivetrain for ShiftingDrivetrain<D, S> {
    fn arcade_drive(&mut self, speed: f32, turn: f32) -> Result<(), ActuatorError> {
        self.ensure_enabled()?;
        self.drive.arcade(speed, turn)
    }

    fn tank_drive(&mut self, left: f32, right: f32) -> Result<(), ActuatorError> {
        self.ensure_enabled()?;
        self.drive.tank(left, right)
    }

    fn stop(&mut self) -> Result<(), ActuatorError> {
        self.ensure_enabled()?;
        self.drive.stop()
    }

    fn shift_gear(&mut self) -> Result<(), ActuatorError> {
        self.ensure_enabled()?;

        let shifted = !self.shifted;
        self.apply_gear(shifted)?;
        self.shifted = shifted;

        info!("gear shifted: {}", shifted);
        Ok(())
    }

    fn is_shifted(&self) -> bool {
        self.shifted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::sim::{SimSolenoid, SimSpeedController};
    use crate::module::RobotDrive;
    use tandem_core::config::DriveConfig;
    use tandem_core::traits::Module;

    type SimDrivetrain =
        ShiftingDrivetrain<RobotDrive<SimSpeedController, SimSpeedController>, SimSolenoid>;

    fn drivetrain(initial_shifted: bool) -> SimDrivetrain {
        let drive = RobotDrive::new(
            SimSpeedController::new(),
            SimSpeedController::new(),
            DriveConfig::default(),
        );
        ShiftingDrivetrain::new(drive, SimSolenoid::new(), SimSolenoid::new(), initial_shifted)
            .unwrap()
    }

    fn gears(d: &SimDrivetrain) -> (bool, bool) {
        (d.first_gear().get(), d.second_gear().get())
    }

    #[test]
    fn test_constructor_sets_complementary_gears() {
        let d = drivetrain(false);
        assert_eq!(gears(&d), (false, true));
        assert!(Subsystem::is_enabled(&d));

        let d = drivetrain(true);
        assert_eq!(gears(&d), (true, false));
    }

    #[test]
    fn test_constructor_enables_every_module() {
        let mut d = drivetrain(false);
        assert!(d.drive().is_enabled());
        assert!(d.first_gear().is_enabled() && d.second_gear().is_enabled());

        Subsystem::disable(&mut d);
        assert!(!d.drive().is_enabled());
        assert!(!d.first_gear().is_enabled() && !d.second_gear().is_enabled());
    }

    #[test]
    fn test_shift_twice_restores_state() {
        let mut d = drivetrain(false);
        let initial = gears(&d);

        d.shift_gear().unwrap();
        assert!(d.is_shifted());
        assert_eq!(gears(&d), (true, false));

        d.shift_gear().unwrap();
        assert!(!d.is_shifted());
        assert_eq!(gears(&d), initial);
    }

    #[test]
    fn test_gears_never_match() {
        let mut d = drivetrain(false);
        for _ in 0..5 {
            d.shift_gear().unwrap();
            let (first, second) = gears(&d);
            assert_ne!(first, second);
        }
    }

    #[test]
    fn test_drive_delegates() {
        let mut d = drivetrain(false);
        d.arcade_drive(1.0, 0.0).unwrap();
        assert_eq!(d.drive().outputs(), (1.0, 1.0));

        d.tank_drive(0.25, -0.25).unwrap();
        assert_eq!(d.drive().outputs(), (0.25, -0.25));

        d.stop().unwrap();
        assert_eq!(d.drive().outputs(), (0.0, 0.0));
    }

    #[test]
    fn test_disabled_drivetrain_rejects_and_keeps_state() {
        let mut d = drivetrain(false);
        Subsystem::disable(&mut d);

        assert_eq!(d.shift_gear(), Err(ActuatorError::Disabled));
        assert!(!d.is_shifted());
        assert_eq!(d.arcade_drive(0.5, 0.0), Err(ActuatorError::Disabled));
        assert!(!Subsystem::is_enabled(&d));

        Subsystem::enable(&mut d);
        d.shift_gear().unwrap();
        assert!(d.is_shifted());
    }
}
