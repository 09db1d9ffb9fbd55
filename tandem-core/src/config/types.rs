//! Configuration type definitions
//!
//! These types describe the control loop, the drivetrain, autonomous tuning
//! and declared routines. They are plain data; text parsing lives with the
//! integrator (see `tandem-script`).

use core::fmt;

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::group::Tag;

/// Maximum routine name length
pub const MAX_NAME_LEN: usize = 32;

/// Maximum native method name length
pub const MAX_CALL_LEN: usize = 24;

/// Maximum text argument length
pub const MAX_TEXT_LEN: usize = 32;

/// Maximum arguments per routine step
pub const MAX_ARGS: usize = 3;

/// Maximum steps per routine
pub const MAX_ROUTINE_STEPS: usize = 16;

/// Maximum routines per config
pub const MAX_ROUTINES: usize = 4;

/// Control loop configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControlConfig {
    /// Control tick period in milliseconds
    pub tick_ms: u32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self { tick_ms: 20 }
    }
}

/// Drivetrain configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriveConfig {
    /// Invert the left side output
    pub invert_left: bool,
    /// Invert the right side output
    pub invert_right: bool,
    /// Inputs with magnitude below this are treated as zero (0.0 - 1.0)
    pub deadband: f32,
    /// Start in the shifted gear
    pub initial_shifted: bool,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            invert_left: false,
            invert_right: false,
            deadband: 0.02,
            initial_shifted: false,
        }
    }
}

/// PID controller gains
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PidGains {
    /// Proportional gain
    pub kp: f32,
    /// Integral gain (per second)
    pub ki: f32,
    /// Derivative gain (seconds)
    pub kd: f32,
    /// Output magnitude limit
    pub output_limit: f32,
}

impl Default for PidGains {
    fn default() -> Self {
        Self {
            kp: 0.05,
            ki: 0.0,
            kd: 0.0,
            output_limit: 1.0,
        }
    }
}

/// Autonomous command tuning
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AutonomousConfig {
    /// Gains for driving to an encoder setpoint
    pub drive_pid: PidGains,
    /// Distance error counted as on target
    pub distance_tolerance: f32,
    /// Give up driving to a setpoint after this long (0 = never)
    pub drive_timeout_ms: u32,
    /// Give up turning to an angle after this long (0 = never)
    pub turn_timeout_ms: u32,
    /// How long the feeder stays extended when shooting
    pub feed_ms: u32,
    /// Give up waiting for the flywheel after this long (0 = never)
    pub spin_up_timeout_ms: u32,
}

impl Default for AutonomousConfig {
    fn default() -> Self {
        Self {
            drive_pid: PidGains::default(),
            distance_tolerance: 1.0,
            drive_timeout_ms: 5000,
            turn_timeout_ms: 3000,
            feed_ms: 500,
            spin_up_timeout_ms: 4000,
        }
    }
}

/// Scalar argument of a routine step
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ArgValue {
    /// Boolean literal
    Bool(bool),
    /// Numeric literal
    Number(f32),
    /// Text literal
    Text(String<MAX_TEXT_LEN>),
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for ArgValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ArgVisitor;

        impl serde::de::Visitor<'_> for ArgVisitor {
            type Value = ArgValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a boolean, number or short string")
            }

            fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<ArgValue, E> {
                Ok(ArgValue::Bool(v))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<ArgValue, E> {
                Ok(ArgValue::Number(v as f32))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<ArgValue, E> {
                Ok(ArgValue::Number(v as f32))
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<ArgValue, E> {
                Ok(ArgValue::Number(v as f32))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<ArgValue, E> {
                let mut text = String::new();
                text.push_str(v)
                    .map_err(|_| E::invalid_length(v.len(), &self))?;
                Ok(ArgValue::Text(text))
            }
        }

        deserializer.deserialize_any(ArgVisitor)
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Bool(v) => write!(f, "{}", v),
            ArgValue::Number(v) => write!(f, "{}", v),
            ArgValue::Text(v) => f.write_str(v),
        }
    }
}

/// One step of a declared routine
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoutineStep {
    /// How the step is scheduled relative to its neighbours
    pub tag: Tag,
    /// Native method name
    pub call: String<MAX_CALL_LEN>,
    /// Scalar arguments
    #[cfg_attr(feature = "serde", serde(default))]
    pub args: Vec<ArgValue, MAX_ARGS>,
}

/// Named routine (a group declared in configuration)
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoutineConfig {
    /// Routine name
    pub name: String<MAX_NAME_LEN>,
    /// Steps in declaration order
    #[cfg_attr(feature = "serde", serde(default))]
    pub steps: Vec<RoutineStep, MAX_ROUTINE_STEPS>,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValidationError {
    /// Tick period is zero
    InvalidTickPeriod,
    /// Deadband is outside 0.0 - 1.0
    InvalidDeadband,
    /// A gain or tolerance is negative or not finite
    InvalidTuning,
    /// Two routines share a name
    DuplicateRoutine,
    /// A routine has no name
    UnnamedRoutine,
}

/// Complete robot configuration
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RobotConfig {
    /// Control loop settings
    pub control: ControlConfig,
    /// Drivetrain settings
    pub drive: DriveConfig,
    /// Autonomous tuning
    pub autonomous: AutonomousConfig,
    /// Declared routines
    #[cfg_attr(feature = "serde", serde(rename = "routine"))]
    pub routines: Vec<RoutineConfig, MAX_ROUTINES>,
}

impl RobotConfig {
    /// Check semantic constraints the type system does not
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.control.tick_ms == 0 {
            return Err(ValidationError::InvalidTickPeriod);
        }

        let deadband = self.drive.deadband;
        if !(0.0..=1.0).contains(&deadband) {
            return Err(ValidationError::InvalidDeadband);
        }

        let auto = &self.autonomous;
        let tuning = [
            auto.drive_pid.kp,
            auto.drive_pid.ki,
            auto.drive_pid.kd,
            auto.drive_pid.output_limit,
            auto.distance_tolerance,
        ];
        if tuning.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ValidationError::InvalidTuning);
        }

        for (i, routine) in self.routines.iter().enumerate() {
            if routine.name.is_empty() {
                return Err(ValidationError::UnnamedRoutine);
            }
            if self.routines[..i].iter().any(|r| r.name == routine.name) {
                return Err(ValidationError::DuplicateRoutine);
            }
        }

        Ok(())
    }

    /// Find a routine by name
    pub fn routine(&self, name: &str) -> Option<&RoutineConfig> {
        self.routines.iter().find(|r| r.name.as_str() == name)
    }
}
