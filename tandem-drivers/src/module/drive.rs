//! Two-sided robot drive
//!
//! Mixes arcade (speed + turn) inputs into left/right speed controller
//! outputs, with per-side inversion and an input deadband.

use tandem_core::config::DriveConfig;
use tandem_core::traits::{ActuatorError, DriveOutput, Module, SpeedController};

/// Left/right speed controller pair
pub struct RobotDrive<L, R> {
    left: L,
    right: R,
    config: DriveConfig,
}

impl<L: SpeedController, R: SpeedController> RobotDrive<L, R> {
    /// Create a new drive
    ///
    /// Only `invert_left`, `invert_right` and `deadband` are used from
    /// `config`.
    pub fn new(left: L, right: R, config: DriveConfig) -> Self {
        Self {
            left,
            right,
            config,
        }
    }

    /// Get the left speed controller
    pub fn left(&self) -> &L {
        &self.left
    }

    /// Get the right speed controller
    pub fn right(&self) -> &R {
        &self.right
    }

    /// Zero inputs inside the deadband and clamp the rest
    fn condition(&self, input: f32) -> f32 {
        let input = input.clamp(-1.0, 1.0);
        let magnitude = if input < 0.0 { -input } else { input };
        if magnitude < self.config.deadband {
            0.0
        } else {
            input
        }
    }

    fn write(&mut self, left: f32, right: f32) -> Result<(), ActuatorError> {
        if !self.is_enabled() {
            return Err(ActuatorError::Disabled);
        }

        let left = if self.config.invert_left { -left } else { left };
        let right = if self.config.invert_right { -right } else { right };

        self.left.set(left)?;
        self.right.set(right)
    }
}

/// Mix arcade inputs into (left, right) outputs
///
/// Keeps the larger of the two inputs at full magnitude on the outer side
/// so that full speed plus a turn does not saturate both sides.
pub fn arcade_mix(speed: f32, turn: f32) -> (f32, f32) {
    if speed > 0.0 {
        if turn > 0.0 {
            (speed - turn, speed.max(turn))
        } else {
            (speed.max(-turn), speed + turn)
        }
    } else if turn > 0.0 {
        (-(-speed).max(turn), speed + turn)
    } else {
        (speed - turn, -(-speed).max(-turn))
    }
}

impl<L: SpeedController, R: SpeedController> Module for RobotDrive<L, R> {
    fn enable(&mut self) {
        self.left.enable();
        self.right.enable();
    }

    fn disable(&mut self) {
        self.left.disable();
        self.right.disable();
    }

    fn is_enabled(&self) -> bool {
        self.left.is_enabled() && self.right.is_enabled()
    }
}

impl<L: SpeedController, R: SpeedController> DriveOutput for RobotDrive<L, R> {
    fn arcade(&mut self, speed: f32, turn: f32) -> Result<(), ActuatorError> {
        let (left, right) = arcade_mix(self.condition(speed), self.condition(turn));
        self.write(left, right)
    }

    fn tank(&mut self, left: f32, right: f32) -> Result<(), ActuatorError> {
        let left = self.condition(left);
        let right = self.condition(right);
        self.write(left, right)
    }

    fn outputs(&self) -> (f32, f32) {
        let left = self.left.get();
        let right = self.right.get();
        (
            if self.config.invert_left { -left } else { left },
            if self.config.invert_right { -right } else { right },
        )
    }
}
