//! Simulated robot for bridge tests

use tandem_core::config::{AutonomousConfig, DriveConfig};
use tandem_core::traits::Module;
use tandem_core::{ResourceId, Shared};
use tandem_drivers::module::sim::{SimEncoder, SimGyro, SimSolenoid, SimSpeedController};
use tandem_drivers::module::RobotDrive;
use tandem_drivers::subsystem::{AlignmentSystem, ShiftingDrivetrain, Shooter};

use crate::context::{Hardware, RobotState, ScriptContext};

pub struct Sim;

impl Hardware for Sim {
    type Drive = ShiftingDrivetrain<RobotDrive<SimSpeedController, SimSpeedController>, SimSolenoid>;
    type Shooter = Shooter<SimSpeedController, SimEncoder, SimSolenoid>;
    type Alignment = AlignmentSystem<SimSolenoid, SimSpeedController>;
    type Encoder = SimEncoder;
    type Gyro = SimGyro;
}

pub struct Enabled(pub bool);

impl RobotState for Enabled {
    fn is_enabled(&self) -> bool {
        self.0
    }
}

/// Enabled resources with sensors at zero
pub struct Rig {
    pub drivetrain: Shared<<Sim as Hardware>::Drive>,
    pub shooter: Shared<<Sim as Hardware>::Shooter>,
    pub alignment: Shared<<Sim as Hardware>::Alignment>,
    pub encoder: Shared<SimEncoder>,
    pub gyro: Shared<SimGyro>,
    pub state: Enabled,
}

impl Rig {
    pub fn new() -> Self {
        let drive = RobotDrive::new(
            SimSpeedController::new(),
            SimSpeedController::new(),
            DriveConfig::default(),
        );
        let drivetrain =
            ShiftingDrivetrain::new(drive, SimSolenoid::new(), SimSolenoid::new(), false).unwrap();
        let shooter = Shooter::new(
            SimSpeedController::new(),
            SimEncoder::new(),
            SimSolenoid::new(),
        )
        .unwrap();
        let alignment = AlignmentSystem::new(
            SimSolenoid::new(),
            SimSolenoid::new(),
            SimSpeedController::new(),
            60.0,
        )
        .unwrap();

        let mut encoder = SimEncoder::new();
        encoder.enable();
        let mut gyro = SimGyro::new();
        gyro.enable();

        Self {
            drivetrain: Shared::new(ResourceId::new(0), drivetrain),
            shooter: Shared::new(ResourceId::new(1), shooter),
            encoder: Shared::new(ResourceId::new(2), encoder),
            gyro: Shared::new(ResourceId::new(3), gyro),
            alignment: Shared::new(ResourceId::new(4), alignment),
            state: Enabled(true),
        }
    }

    pub fn context(&self) -> ScriptContext<'_, Sim> {
        ScriptContext::new(
            &self.drivetrain,
            &self.shooter,
            &self.alignment,
            &self.encoder,
            &self.gyro,
            &self.state,
            AutonomousConfig::default(),
        )
    }
}
