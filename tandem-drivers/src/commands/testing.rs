//! Simulated resources shared by command tests

use tandem_core::config::DriveConfig;
use tandem_core::ResourceId;

use crate::module::sim::{SimEncoder, SimSolenoid, SimSpeedController};
use crate::module::RobotDrive;
use crate::subsystem::{AlignmentSystem, ShiftingDrivetrain, Shooter};

pub const DRIVE: ResourceId = ResourceId::new(0);
pub const SHOOTER: ResourceId = ResourceId::new(1);
pub const ENCODER: ResourceId = ResourceId::new(2);
pub const GYRO: ResourceId = ResourceId::new(3);
pub const ALIGNMENT: ResourceId = ResourceId::new(4);

pub type SimDrivetrain =
    ShiftingDrivetrain<RobotDrive<SimSpeedController, SimSpeedController>, SimSolenoid>;

pub type SimShooter = Shooter<SimSpeedController, SimEncoder, SimSolenoid>;

pub type SimAlignment = AlignmentSystem<SimSolenoid, SimSpeedController>;

/// Enabled drivetrain in low gear
pub fn sim_drivetrain() -> SimDrivetrain {
    let drive = RobotDrive::new(
        SimSpeedController::new(),
        SimSpeedController::new(),
        DriveConfig::default(),
    );
    ShiftingDrivetrain::new(drive, SimSolenoid::new(), SimSolenoid::new(), false).unwrap()
}

/// Enabled shooter with the feeder retracted
pub fn sim_shooter() -> SimShooter {
    Shooter::new(
        SimSpeedController::new(),
        SimEncoder::new(),
        SimSolenoid::new(),
    )
    .unwrap()
}

/// Enabled alignment, collapsed, with a 60 degree tilt range
pub fn sim_alignment() -> SimAlignment {
    AlignmentSystem::new(
        SimSolenoid::new(),
        SimSolenoid::new(),
        SimSpeedController::new(),
        60.0,
    )
    .unwrap()
}
