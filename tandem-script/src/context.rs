//! Collaborators available to native methods

use tandem_core::config::AutonomousConfig;
use tandem_core::traits::{Encoder, Gyro};
use tandem_core::{CancelToken, Shared};
use tandem_drivers::subsystem::{Aligner, Drivetrain, Launcher};

/// Concrete resource types a script drives
///
/// Implemented by a marker type per robot so the context and built-in
/// commands can name the resource types once.
pub trait Hardware {
    type Drive: Drivetrain;
    type Shooter: Launcher;
    type Alignment: Aligner;
    type Encoder: Encoder;
    type Gyro: Gyro;
}

/// Robot-level state outside any resource
pub trait RobotState {
    /// Check if the robot is enabled by the field or operator
    fn is_enabled(&self) -> bool;
}

/// Everything native methods may touch, injected once at construction
pub struct ScriptContext<'r, H: Hardware> {
    drivetrain: &'r Shared<H::Drive>,
    shooter: &'r Shared<H::Shooter>,
    alignment: &'r Shared<H::Alignment>,
    encoder: &'r Shared<H::Encoder>,
    gyro: &'r Shared<H::Gyro>,
    state: &'r dyn RobotState,
    tuning: AutonomousConfig,
    cancel: Option<&'r CancelToken>,
}

impl<'r, H: Hardware> ScriptContext<'r, H> {
    /// Create a context
    pub fn new(
        drivetrain: &'r Shared<H::Drive>,
        shooter: &'r Shared<H::Shooter>,
        alignment: &'r Shared<H::Alignment>,
        encoder: &'r Shared<H::Encoder>,
        gyro: &'r Shared<H::Gyro>,
        state: &'r dyn RobotState,
        tuning: AutonomousConfig,
    ) -> Self {
        Self {
            drivetrain,
            shooter,
            alignment,
            encoder,
            gyro,
            state,
            tuning,
            cancel: None,
        }
    }

    /// Abort pauses and routines when `token` is raised
    pub fn with_cancel(mut self, token: &'r CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn drivetrain(&self) -> &'r Shared<H::Drive> {
        self.drivetrain
    }

    pub fn shooter(&self) -> &'r Shared<H::Shooter> {
        self.shooter
    }

    pub fn alignment(&self) -> &'r Shared<H::Alignment> {
        self.alignment
    }

    pub fn encoder(&self) -> &'r Shared<H::Encoder> {
        self.encoder
    }

    pub fn gyro(&self) -> &'r Shared<H::Gyro> {
        self.gyro
    }

    pub fn state(&self) -> &'r dyn RobotState {
        self.state
    }

    /// Autonomous tuning
    pub fn tuning(&self) -> &AutonomousConfig {
        &self.tuning
    }

    /// Cancellation token, if any
    pub fn cancel(&self) -> Option<&'r CancelToken> {
        self.cancel
    }
}
