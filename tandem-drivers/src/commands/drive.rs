//! Drivetrain commands

use tandem_core::config::AutonomousConfig;
use tandem_core::traits::{Encoder, Gyro};
use tandem_core::{Command, CommandError, Progress, ResourceSet, Shared};

use crate::control::Pid;
use crate::subsystem::Drivetrain;

use super::elapsed;

/// Set arcade drive output once
pub struct ArcadeDrive<'r, D> {
    drivetrain: &'r Shared<D>,
    speed: f32,
    turn: f32,
}

impl<'r, D: Drivetrain> ArcadeDrive<'r, D> {
    /// Create the command
    pub fn new(drivetrain: &'r Shared<D>, speed: f32, turn: f32) -> Self {
        Self {
            drivetrain,
            speed,
            turn,
        }
    }
}

impl<D: Drivetrain> Command for ArcadeDrive<'_, D> {
    fn execute(&mut self, _now_ms: u32) -> Result<Progress, CommandError> {
        let (speed, turn) = (self.speed, self.turn);
        self.drivetrain.with(|d| d.arcade_drive(speed, turn))??;
        Ok(Progress::Complete)
    }

    fn name(&self) -> &'static str {
        "arcade"
    }

    fn resources(&self) -> ResourceSet {
        self.drivetrain.resources()
    }
}

/// Set tank drive output once
pub struct TankDrive<'r, D> {
    drivetrain: &'r Shared<D>,
    left: f32,
    right: f32,
}

impl<'r, D: Drivetrain> TankDrive<'r, D> {
    /// Create the command
    pub fn new(drivetrain: &'r Shared<D>, left: f32, right: f32) -> Self {
        Self {
            drivetrain,
            left,
            right,
        }
    }
}

impl<D: Drivetrain> Command for TankDrive<'_, D> {
    fn execute(&mut self, _now_ms: u32) -> Result<Progress, CommandError> {
        let (left, right) = (self.left, self.right);
        self.drivetrain.with(|d| d.tank_drive(left, right))??;
        Ok(Progress::Complete)
    }

    fn name(&self) -> &'static str {
        "tank"
    }

    fn resources(&self) -> ResourceSet {
        self.drivetrain.resources()
    }
}

/// Zero drive output
pub struct StopDrive<'r, D> {
    drivetrain: &'r Shared<D>,
}

impl<'r, D: Drivetrain> StopDrive<'r, D> {
    /// Create the command
    pub fn new(drivetrain: &'r Shared<D>) -> Self {
        Self { drivetrain }
    }
}

impl<D: Drivetrain> Command for StopDrive<'_, D> {
    fn execute(&mut self, _now_ms: u32) -> Result<Progress, CommandError> {
        self.drivetrain.with(|d| d.stop())??;
        Ok(Progress::Complete)
    }

    fn name(&self) -> &'static str {
        "stop"
    }

    fn resources(&self) -> ResourceSet {
        self.drivetrain.resources()
    }
}

/// Toggle the drivetrain gear
pub struct ShiftGear<'r, D> {
    drivetrain: &'r Shared<D>,
}

impl<'r, D: Drivetrain> ShiftGear<'r, D> {
    /// Create the command
    pub fn new(drivetrain: &'r Shared<D>) -> Self {
        Self { drivetrain }
    }
}

impl<D: Drivetrain> Command for ShiftGear<'_, D> {
    fn execute(&mut self, _now_ms: u32) -> Result<Progress, CommandError> {
        self.drivetrain.with(|d| d.shift_gear())??;
        Ok(Progress::Complete)
    }

    fn name(&self) -> &'static str {
        "shiftGear"
    }

    fn resources(&self) -> ResourceSet {
        self.drivetrain.resources()
    }
}

/// Drive straight until the encoder reads a setpoint
///
/// Output comes from a PID on encoder distance. Completes (and stops the
/// drive) once the error is within tolerance.
pub struct DriveDistance<'r, D, E> {
    drivetrain: &'r Shared<D>,
    encoder: &'r Shared<E>,
    pid: Pid,
    distance: f32,
    tolerance: f32,
    /// 0 = no timeout
    timeout_ms: u32,
    started_ms: u32,
    last_ms: u32,
}

impl<'r, D: Drivetrain, E: Encoder> DriveDistance<'r, D, E> {
    /// Create the command from autonomous tuning
    pub fn new(
        drivetrain: &'r Shared<D>,
        encoder: &'r Shared<E>,
        distance: f32,
        tuning: &AutonomousConfig,
    ) -> Self {
        Self {
            drivetrain,
            encoder,
            pid: Pid::new(tuning.drive_pid),
            distance,
            tolerance: tuning.distance_tolerance,
            timeout_ms: tuning.drive_timeout_ms,
            started_ms: 0,
            last_ms: 0,
        }
    }

    fn step(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
        let position = self.encoder.with(|e| e.distance())??;
        let error = self.pid.error(position);

        if -self.tolerance <= error && error <= self.tolerance {
            self.drivetrain.with(|d| d.stop())??;
            debug!("drive distance reached {}", position);
            return Ok(Progress::Complete);
        }

        if self.timeout_ms > 0 && elapsed(self.started_ms, now_ms) >= self.timeout_ms {
            self.drivetrain.with(|d| d.stop())??;
            warn!("drive distance timed out at {}", position);
            return Err(CommandError::Timeout);
        }

        let dt = elapsed(self.last_ms, now_ms);
        self.last_ms = now_ms;
        let output = self.pid.calculate(position, dt);
        self.drivetrain.with(|d| d.arcade_drive(output, 0.0))??;

        Ok(Progress::Running)
    }
}

impl<D: Drivetrain, E: Encoder> Command for DriveDistance<'_, D, E> {
    fn execute(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
        info!("driving to {}", self.distance);
        self.pid.set_setpoint(self.distance);
        self.started_ms = now_ms;
        self.last_ms = now_ms;
        self.step(now_ms)
    }

    fn update(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
        self.step(now_ms)
    }

    fn name(&self) -> &'static str {
        "driveToSetpoint"
    }

    fn resources(&self) -> ResourceSet {
        self.drivetrain.resources().union(self.encoder.resources())
    }
}

/// Tank drive until the gyro passes a heading
///
/// Positive targets complete once the angle is at or above the target,
/// negative targets once it is at or below.
pub struct TurnToAngle<'r, D, G> {
    drivetrain: &'r Shared<D>,
    gyro: &'r Shared<G>,
    angle: f32,
    left: f32,
    right: f32,
    /// 0 = no timeout
    timeout_ms: u32,
    started_ms: u32,
}

impl<'r, D: Drivetrain, G: Gyro> TurnToAngle<'r, D, G> {
    /// Create the command
    ///
    /// # Arguments
    /// - `angle`: Target heading in degrees
    /// - `left`, `right`: Tank outputs used while turning
    pub fn new(
        drivetrain: &'r Shared<D>,
        gyro: &'r Shared<G>,
        angle: f32,
        left: f32,
        right: f32,
        tuning: &AutonomousConfig,
    ) -> Self {
        Self {
            drivetrain,
            gyro,
            angle,
            left,
            right,
            timeout_ms: tuning.turn_timeout_ms,
            started_ms: 0,
        }
    }

    fn passed(&self, heading: f32) -> bool {
        if self.angle >= 0.0 {
            heading >= self.angle
        } else {
            heading <= self.angle
        }
    }

    fn step(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
        let heading = self.gyro.with(|g| g.angle())??;

        if self.passed(heading) {
            self.drivetrain.with(|d| d.stop())??;
            return Ok(Progress::Complete);
        }

        if self.timeout_ms > 0 && elapsed(self.started_ms, now_ms) >= self.timeout_ms {
            self.drivetrain.with(|d| d.stop())??;
            warn!("turn timed out at {}", heading);
            return Err(CommandError::Timeout);
        }

        let (left, right) = (self.left, self.right);
        self.drivetrain.with(|d| d.tank_drive(left, right))??;
        Ok(Progress::Running)
    }
}

impl<D: Drivetrain, G: Gyro> Command for TurnToAngle<'_, D, G> {
    fn execute(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
        info!("turning to {}", self.angle);
        self.started_ms = now_ms;
        self.step(now_ms)
    }

    fn update(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
        self.step(now_ms)
    }

    fn name(&self) -> &'static str {
        "gyroTurn"
    }

    fn resources(&self) -> ResourceSet {
        self.drivetrain.resources().union(self.gyro.resources())
    }
}
