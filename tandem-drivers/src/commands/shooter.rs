//! Shooter commands

use tandem_core::{Command, CommandError, Progress, ResourceSet, Shared};

use crate::subsystem::Launcher;

use super::elapsed;

/// Set the flywheel rate setpoint
pub struct SetShooterSpeed<'r, S> {
    shooter: &'r Shared<S>,
    rate: f32,
}

impl<'r, S: Launcher> SetShooterSpeed<'r, S> {
    /// Create the command
    pub fn new(shooter: &'r Shared<S>, rate: f32) -> Self {
        Self { shooter, rate }
    }
}

impl<S: Launcher> Command for SetShooterSpeed<'_, S> {
    fn execute(&mut self, _now_ms: u32) -> Result<Progress, CommandError> {
        let rate = self.rate;
        info!("setting shooter to {}", rate);
        self.shooter.with(|s| s.set_setpoint(rate))?;
        Ok(Progress::Complete)
    }

    fn name(&self) -> &'static str {
        "setShooterSpeed"
    }

    fn resources(&self) -> ResourceSet {
        self.shooter.resources()
    }
}

/// Zero the flywheel setpoint and output
pub struct StopShooter<'r, S> {
    shooter: &'r Shared<S>,
}

impl<'r, S: Launcher> StopShooter<'r, S> {
    /// Create the command
    pub fn new(shooter: &'r Shared<S>) -> Self {
        Self { shooter }
    }
}

impl<S: Launcher> Command for StopShooter<'_, S> {
    fn execute(&mut self, _now_ms: u32) -> Result<Progress, CommandError> {
        self.shooter.with(|s| s.stop())??;
        Ok(Progress::Complete)
    }

    fn name(&self) -> &'static str {
        "stopShooter"
    }

    fn resources(&self) -> ResourceSet {
        self.shooter.resources()
    }
}

/// Extend the feeder, hold it, then retract
pub struct Shoot<'r, S> {
    shooter: &'r Shared<S>,
    feed_ms: u32,
    fired_ms: u32,
}

impl<'r, S: Launcher> Shoot<'r, S> {
    /// Create the command
    ///
    /// # Arguments
    /// - `feed_ms`: How long the feeder stays extended
    pub fn new(shooter: &'r Shared<S>, feed_ms: u32) -> Self {
        Self {
            shooter,
            feed_ms,
            fired_ms: 0,
        }
    }
}

impl<S: Launcher> Command for Shoot<'_, S> {
    fn execute(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
        self.shooter.with(|s| s.fire())??;
        self.fired_ms = now_ms;
        if self.feed_ms == 0 {
            self.shooter.with(|s| s.retract())??;
            return Ok(Progress::Complete);
        }
        Ok(Progress::Running)
    }

    fn update(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
        if elapsed(self.fired_ms, now_ms) < self.feed_ms {
            return Ok(Progress::Running);
        }
        self.shooter.with(|s| s.retract())??;
        Ok(Progress::Complete)
    }

    fn name(&self) -> &'static str {
        "shoot"
    }

    fn resources(&self) -> ResourceSet {
        self.shooter.resources()
    }
}

/// Progress of an [`AutoShoot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AutoShootPhase {
    /// Regulating until the flywheel reaches its setpoint
    SpinUp,
    /// Feeder extended since the given time
    Feeding(u32),
}

/// Regulate the flywheel until it reaches its setpoint, then shoot
///
/// The flywheel keeps being regulated while the feeder is extended.
pub struct AutoShoot<'r, S> {
    shooter: &'r Shared<S>,
    feed_ms: u32,
    /// 0 = no timeout
    timeout_ms: u32,
    started_ms: u32,
    phase: AutoShootPhase,
}

impl<'r, S: Launcher> AutoShoot<'r, S> {
    /// Create the command
    ///
    /// # Arguments
    /// - `feed_ms`: How long the feeder stays extended
    /// - `timeout_ms`: Give up spinning up after this long (0 = never)
    pub fn new(shooter: &'r Shared<S>, feed_ms: u32, timeout_ms: u32) -> Self {
        Self {
            shooter,
            feed_ms,
            timeout_ms,
            started_ms: 0,
            phase: AutoShootPhase::SpinUp,
        }
    }

    /// Current phase
    pub fn phase(&self) -> AutoShootPhase {
        self.phase
    }

    fn step(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
        self.shooter.with(|s| s.regulate())??;

        match self.phase {
            AutoShootPhase::SpinUp => {
                if self.shooter.with(|s| s.is_past_setpoint())? {
                    debug!("flywheel at speed, firing");
                    self.shooter.with(|s| s.fire())??;
                    self.phase = AutoShootPhase::Feeding(now_ms);
                    return Ok(Progress::Running);
                }
                if self.timeout_ms > 0 && elapsed(self.started_ms, now_ms) >= self.timeout_ms {
                    warn!("flywheel spin-up timed out");
                    return Err(CommandError::Timeout);
                }
                Ok(Progress::Running)
            }
            AutoShootPhase::Feeding(since) => {
                if elapsed(since, now_ms) < self.feed_ms {
                    return Ok(Progress::Running);
                }
                self.shooter.with(|s| s.retract())??;
                Ok(Progress::Complete)
            }
        }
    }
}

impl<S: Launcher> Command for AutoShoot<'_, S> {
    fn execute(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
        self.started_ms = now_ms;
        self.phase = AutoShootPhase::SpinUp;
        self.step(now_ms)
    }

    fn update(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
        self.step(now_ms)
    }

    fn name(&self) -> &'static str {
        "autoShoot"
    }

    fn resources(&self) -> ResourceSet {
        self.shooter.resources()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{sim_shooter, SimShooter, SHOOTER};
    use tandem_core::traits::{Solenoid, SpeedController};
    use tandem_core::{ManualClock, Runner};

    fn feeder_out(shooter: &Shared<SimShooter>) -> bool {
        shooter.with(|s| s.feeder().get()).unwrap()
    }

    #[test]
    fn test_set_and_stop() {
        let shooter = Shared::new(SHOOTER, sim_shooter());
        let mut clock = ManualClock::new(20);
        let mut runner = Runner::new(&mut clock);

        runner.run(&mut SetShooterSpeed::new(&shooter, 2500.0)).unwrap();
        assert_eq!(shooter.with(|s| s.setpoint()).unwrap(), 2500.0);

        runner.run(&mut StopShooter::new(&shooter)).unwrap();
        assert_eq!(shooter.with(|s| s.setpoint()).unwrap(), 0.0);
    }

    #[test]
    fn test_shoot_holds_feeder() {
        let shooter = Shared::new(SHOOTER, sim_shooter());
        let mut cmd = Shoot::new(&shooter, 100);

        assert_eq!(cmd.execute(0), Ok(Progress::Running));
        assert!(feeder_out(&shooter));

        assert_eq!(cmd.update(60), Ok(Progress::Running));
        assert!(feeder_out(&shooter));

        assert_eq!(cmd.update(100), Ok(Progress::Complete));
        assert!(!feeder_out(&shooter));
    }

    #[test]
    fn test_auto_shoot_waits_for_speed() {
        let shooter = Shared::new(SHOOTER, sim_shooter());
        shooter.with(|s| s.set_setpoint(3000.0)).unwrap();
        let mut cmd = AutoShoot::new(&shooter, 40, 0);

        assert_eq!(cmd.execute(0), Ok(Progress::Running));
        assert_eq!(cmd.phase(), AutoShootPhase::SpinUp);
        assert_eq!(shooter.with(|s| s.flywheel().get()).unwrap(), 1.0);
        assert!(!feeder_out(&shooter));

        shooter
            .with(|s| s.rate_sensor().set_rate(3100.0))
            .unwrap();
        assert_eq!(cmd.update(20), Ok(Progress::Running));
        assert_eq!(cmd.phase(), AutoShootPhase::Feeding(20));
        assert!(feeder_out(&shooter));
        assert_eq!(shooter.with(|s| s.flywheel().get()).unwrap(), 0.0);

        assert_eq!(cmd.update(40), Ok(Progress::Running));
        assert_eq!(cmd.update(60), Ok(Progress::Complete));
        assert!(!feeder_out(&shooter));
    }

    #[test]
    fn test_auto_shoot_times_out() {
        let shooter = Shared::new(SHOOTER, sim_shooter());
        shooter.with(|s| s.set_setpoint(3000.0)).unwrap();
        let mut clock = ManualClock::new(20);

        let mut cmd = AutoShoot::new(&shooter, 40, 100);
        assert_eq!(
            Runner::new(&mut clock).run(&mut cmd),
            Err(CommandError::Timeout)
        );
        assert!(!feeder_out(&shooter));
    }
}
