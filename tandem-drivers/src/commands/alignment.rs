//! Alignment commands

use tandem_core::{Command, CommandError, Progress, ResourceSet, Shared};

use crate::subsystem::Aligner;

/// Tilt the shooter to a fixed angle
pub struct AlignShooter<'r, A> {
    alignment: &'r Shared<A>,
    degrees: f32,
}

impl<'r, A: Aligner> AlignShooter<'r, A> {
    /// Create the command
    pub fn new(alignment: &'r Shared<A>, degrees: f32) -> Self {
        Self { alignment, degrees }
    }
}

impl<A: Aligner> Command for AlignShooter<'_, A> {
    fn execute(&mut self, _now_ms: u32) -> Result<Progress, CommandError> {
        let degrees = self.degrees;
        info!("aligning shooter to {}", degrees);
        self.alignment.with(|a| a.set_angle(degrees))??;
        Ok(Progress::Complete)
    }

    fn name(&self) -> &'static str {
        "alignShooter"
    }

    fn resources(&self) -> ResourceSet {
        self.alignment.resources()
    }
}

/// Push the alignment arms out
pub struct ExtendAlignment<'r, A> {
    alignment: &'r Shared<A>,
}

impl<'r, A: Aligner> ExtendAlignment<'r, A> {
    /// Create the command
    pub fn new(alignment: &'r Shared<A>) -> Self {
        Self { alignment }
    }
}

impl<A: Aligner> Command for ExtendAlignment<'_, A> {
    fn execute(&mut self, _now_ms: u32) -> Result<Progress, CommandError> {
        self.alignment.with(|a| a.extend())??;
        Ok(Progress::Complete)
    }

    fn name(&self) -> &'static str {
        "extendAlignment"
    }

    fn resources(&self) -> ResourceSet {
        self.alignment.resources()
    }
}

/// Pull the alignment arms in
pub struct CollapseAlignment<'r, A> {
    alignment: &'r Shared<A>,
}

impl<'r, A: Aligner> CollapseAlignment<'r, A> {
    /// Create the command
    pub fn new(alignment: &'r Shared<A>) -> Self {
        Self { alignment }
    }
}

impl<A: Aligner> Command for CollapseAlignment<'_, A> {
    fn execute(&mut self, _now_ms: u32) -> Result<Progress, CommandError> {
        self.alignment.with(|a| a.collapse())??;
        Ok(Progress::Complete)
    }

    fn name(&self) -> &'static str {
        "collapseAlignment"
    }

    fn resources(&self) -> ResourceSet {
        self.alignment.resources()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{sim_alignment, ALIGNMENT};
    use tandem_core::traits::{ActuatorError, Subsystem};
    use tandem_core::{ManualClock, Runner};

    #[test]
    fn test_extend_then_collapse() {
        let alignment = Shared::new(ALIGNMENT, sim_alignment());
        let mut clock = ManualClock::new(20);
        let mut runner = Runner::new(&mut clock);

        runner.run(&mut ExtendAlignment::new(&alignment)).unwrap();
        assert!(alignment.with(|a| a.is_extended()).unwrap());

        runner.run(&mut CollapseAlignment::new(&alignment)).unwrap();
        assert!(!alignment.with(|a| a.is_extended()).unwrap());
        drop(runner);
        assert_eq!(clock.ticks(), 0);
    }

    #[test]
    fn test_align_shooter_sets_angle() {
        let alignment = Shared::new(ALIGNMENT, sim_alignment());
        let mut cmd = AlignShooter::new(&alignment, 45.0);

        assert_eq!(cmd.execute(0), Ok(Progress::Complete));
        assert_eq!(alignment.with(|a| a.angle()).unwrap(), 45.0);
        assert_eq!(cmd.resources(), ResourceSet::of(ALIGNMENT));
    }

    #[test]
    fn test_disabled_alignment_fails() {
        let alignment = Shared::new(ALIGNMENT, sim_alignment());
        alignment.with(|a| Subsystem::disable(a)).unwrap();

        assert_eq!(
            ExtendAlignment::new(&alignment).execute(0),
            Err(CommandError::Actuator(ActuatorError::Disabled))
        );
        assert_eq!(
            AlignShooter::new(&alignment, 10.0).execute(0),
            Err(CommandError::Actuator(ActuatorError::Disabled))
        );
    }
}
