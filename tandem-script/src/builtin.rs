//! Built-in native methods
//!
//! Each adapter checks argument count and types, then constructs one
//! concrete command bound to the script context's resources. Queries read
//! a sensor or robot state and return a scalar.

use tandem_core::traits::{Encoder, Gyro};
use tandem_core::{Command, CommandError, Progress, ResourceSet};
use tandem_drivers::commands::{
    AlignShooter, ArcadeDrive, AutoShoot, CollapseAlignment, DriveDistance, ExtendAlignment, Log,
    Pause, ResetEncoder, ResetGyro, SetShooterSpeed, ShiftGear, Shoot, StopDrive, StopShooter,
    TankDrive, TurnToAngle,
};
use tandem_drivers::subsystem::Launcher;

use crate::context::{Hardware, ScriptContext};
use crate::error::BridgeError;
use crate::registry::{Native, NativeRegistry};
use crate::value::{Value, ValueKind};

/// Any command a built-in native method can construct
pub enum Builtin<'r, H: Hardware> {
    Log(Log),
    Pause(Pause<'r>),
    Arcade(ArcadeDrive<'r, H::Drive>),
    Tank(TankDrive<'r, H::Drive>),
    Stop(StopDrive<'r, H::Drive>),
    ShiftGear(ShiftGear<'r, H::Drive>),
    DriveDistance(DriveDistance<'r, H::Drive, H::Encoder>),
    TurnToAngle(TurnToAngle<'r, H::Drive, H::Gyro>),
    SetShooterSpeed(SetShooterSpeed<'r, H::Shooter>),
    StopShooter(StopShooter<'r, H::Shooter>),
    Shoot(Shoot<'r, H::Shooter>),
    AutoShoot(AutoShoot<'r, H::Shooter>),
    AlignShooter(AlignShooter<'r, H::Alignment>),
    ExtendAlignment(ExtendAlignment<'r, H::Alignment>),
    CollapseAlignment(CollapseAlignment<'r, H::Alignment>),
    ResetEncoder(ResetEncoder<'r, H::Encoder>),
    ResetGyro(ResetGyro<'r, H::Gyro>),
}

macro_rules! dispatch {
    ($self:expr, $cmd:ident => $body:expr) => {
        match $self {
            Builtin::Log($cmd) => $body,
            Builtin::Pause($cmd) => $body,
            Builtin::Arcade($cmd) => $body,
            Builtin::Tank($cmd) => $body,
            Builtin::Stop($cmd) => $body,
            Builtin::ShiftGear($cmd) => $body,
            Builtin::DriveDistance($cmd) => $body,
            Builtin::TurnToAngle($cmd) => $body,
            Builtin::SetShooterSpeed($cmd) => $body,
            Builtin::StopShooter($cmd) => $body,
            Builtin::Shoot($cmd) => $body,
            Builtin::AutoShoot($cmd) => $body,
            Builtin::AlignShooter($cmd) => $body,
            Builtin::ExtendAlignment($cmd) => $body,
            Builtin::CollapseAlignment($cmd) => $body,
            Builtin::ResetEncoder($cmd) => $body,
            Builtin::ResetGyro($cmd) => $body,
        }
    };
}

impl<H: Hardware> Command for Builtin<'_, H> {
    fn execute(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
        dispatch!(self, cmd => cmd.execute(now_ms))
    }

    fn update(&mut self, now_ms: u32) -> Result<Progress, CommandError> {
        dispatch!(self, cmd => cmd.update(now_ms))
    }

    fn name(&self) -> &'static str {
        dispatch!(self, cmd => cmd.name())
    }

    fn resources(&self) -> ResourceSet {
        dispatch!(self, cmd => cmd.resources())
    }
}

/// Register every built-in method
pub fn register_builtins<'r, H: Hardware>(
    registry: &mut NativeRegistry<'r, H>,
) -> Result<(), BridgeError> {
    registry.register("print", Native::Run(log))?;
    registry.register("log", Native::Run(log))?;
    registry.register("wait", Native::Run(wait))?;
    registry.register("arcade", Native::Run(arcade))?;
    registry.register("tank", Native::Run(tank))?;
    registry.register("stop", Native::Run(stop))?;
    registry.register("shiftGear", Native::Run(shift_gear))?;
    registry.register("driveToSetpoint", Native::Run(drive_to_setpoint))?;
    registry.register("gyroTurn", Native::Run(gyro_turn))?;
    registry.register("setShooterSpeed", Native::Run(set_shooter_speed))?;
    registry.register("stopShooter", Native::Run(stop_shooter))?;
    registry.register("shoot", Native::Run(shoot))?;
    registry.register("autoShoot", Native::Run(auto_shoot))?;
    registry.register("alignShooter", Native::Run(align_shooter))?;
    registry.register("extendAlignment", Native::Run(extend_alignment))?;
    registry.register("collapseAlignment", Native::Run(collapse_alignment))?;
    registry.register("resetAngle", Native::Run(reset_angle))?;
    registry.register("resetDistance", Native::Run(reset_distance))?;
    registry.register("encoderDistance", Native::Number(encoder_distance))?;
    registry.register("gyro", Native::Number(gyro_angle))?;
    registry.register("isPastSetpoint", Native::Boolean(is_past_setpoint))?;
    registry.register("isEnabled", Native::Boolean(is_enabled))?;
    Ok(())
}

/// Check the argument count
pub fn expect_arity(args: &[Value<'_>], expected: u8) -> Result<(), BridgeError> {
    if args.len() == usize::from(expected) {
        Ok(())
    } else {
        Err(BridgeError::Arity {
            expected,
            found: u8::try_from(args.len()).unwrap_or(u8::MAX),
        })
    }
}

/// Read a numeric argument
pub fn number_arg(args: &[Value<'_>], index: u8) -> Result<f32, BridgeError> {
    args.get(usize::from(index))
        .and_then(Value::as_number)
        .ok_or(BridgeError::ArgumentType {
            index,
            expected: ValueKind::Number,
        })
}

fn log<'r, H: Hardware>(
    _ctx: &ScriptContext<'r, H>,
    args: &[Value<'_>],
) -> Result<Builtin<'r, H>, BridgeError> {
    expect_arity(args, 1)?;
    Ok(Builtin::Log(Log::display(&args[0])))
}

fn wait<'r, H: Hardware>(
    ctx: &ScriptContext<'r, H>,
    args: &[Value<'_>],
) -> Result<Builtin<'r, H>, BridgeError> {
    expect_arity(args, 1)?;
    let pause = Pause::from_secs(number_arg(args, 0)?);
    Ok(Builtin::Pause(match ctx.cancel() {
        Some(token) => pause.cancelled_by(token),
        None => pause,
    }))
}

fn arcade<'r, H: Hardware>(
    ctx: &ScriptContext<'r, H>,
    args: &[Value<'_>],
) -> Result<Builtin<'r, H>, BridgeError> {
    expect_arity(args, 2)?;
    let speed = number_arg(args, 0)?;
    let turn = number_arg(args, 1)?;
    Ok(Builtin::Arcade(ArcadeDrive::new(ctx.drivetrain(), speed, turn)))
}

fn tank<'r, H: Hardware>(
    ctx: &ScriptContext<'r, H>,
    args: &[Value<'_>],
) -> Result<Builtin<'r, H>, BridgeError> {
    expect_arity(args, 2)?;
    let left = number_arg(args, 0)?;
    let right = number_arg(args, 1)?;
    Ok(Builtin::Tank(TankDrive::new(ctx.drivetrain(), left, right)))
}

fn stop<'r, H: Hardware>(
    ctx: &ScriptContext<'r, H>,
    args: &[Value<'_>],
) -> Result<Builtin<'r, H>, BridgeError> {
    expect_arity(args, 0)?;
    Ok(Builtin::Stop(StopDrive::new(ctx.drivetrain())))
}

fn shift_gear<'r, H: Hardware>(
    ctx: &ScriptContext<'r, H>,
    args: &[Value<'_>],
) -> Result<Builtin<'r, H>, BridgeError> {
    expect_arity(args, 0)?;
    Ok(Builtin::ShiftGear(ShiftGear::new(ctx.drivetrain())))
}

fn drive_to_setpoint<'r, H: Hardware>(
    ctx: &ScriptContext<'r, H>,
    args: &[Value<'_>],
) -> Result<Builtin<'r, H>, BridgeError> {
    expect_arity(args, 1)?;
    let distance = number_arg(args, 0)?;
    Ok(Builtin::DriveDistance(DriveDistance::new(
        ctx.drivetrain(),
        ctx.encoder(),
        distance,
        ctx.tuning(),
    )))
}

fn gyro_turn<'r, H: Hardware>(
    ctx: &ScriptContext<'r, H>,
    args: &[Value<'_>],
) -> Result<Builtin<'r, H>, BridgeError> {
    expect_arity(args, 3)?;
    let angle = number_arg(args, 0)?;
    let left = number_arg(args, 1)?;
    let right = number_arg(args, 2)?;
    Ok(Builtin::TurnToAngle(TurnToAngle::new(
        ctx.drivetrain(),
        ctx.gyro(),
        angle,
        left,
        right,
        ctx.tuning(),
    )))
}

fn set_shooter_speed<'r, H: Hardware>(
    ctx: &ScriptContext<'r, H>,
    args: &[Value<'_>],
) -> Result<Builtin<'r, H>, BridgeError> {
    expect_arity(args, 1)?;
    let rate = number_arg(args, 0)?;
    Ok(Builtin::SetShooterSpeed(SetShooterSpeed::new(ctx.shooter(), rate)))
}

fn stop_shooter<'r, H: Hardware>(
    ctx: &ScriptContext<'r, H>,
    args: &[Value<'_>],
) -> Result<Builtin<'r, H>, BridgeError> {
    expect_arity(args, 0)?;
    Ok(Builtin::StopShooter(StopShooter::new(ctx.shooter())))
}

fn shoot<'r, H: Hardware>(
    ctx: &ScriptContext<'r, H>,
    args: &[Value<'_>],
) -> Result<Builtin<'r, H>, BridgeError> {
    expect_arity(args, 0)?;
    Ok(Builtin::Shoot(Shoot::new(ctx.shooter(), ctx.tuning().feed_ms)))
}

fn auto_shoot<'r, H: Hardware>(
    ctx: &ScriptContext<'r, H>,
    args: &[Value<'_>],
) -> Result<Builtin<'r, H>, BridgeError> {
    expect_arity(args, 0)?;
    let tuning = ctx.tuning();
    Ok(Builtin::AutoShoot(AutoShoot::new(
        ctx.shooter(),
        tuning.feed_ms,
        tuning.spin_up_timeout_ms,
    )))
}

fn align_shooter<'r, H: Hardware>(
    ctx: &ScriptContext<'r, H>,
    args: &[Value<'_>],
) -> Result<Builtin<'r, H>, BridgeError> {
    expect_arity(args, 1)?;
    let angle = number_arg(args, 0)?;
    Ok(Builtin::AlignShooter(AlignShooter::new(ctx.alignment(), angle)))
}

fn extend_alignment<'r, H: Hardware>(
    ctx: &ScriptContext<'r, H>,
    args: &[Value<'_>],
) -> Result<Builtin<'r, H>, BridgeError> {
    expect_arity(args, 0)?;
    Ok(Builtin::ExtendAlignment(ExtendAlignment::new(ctx.alignment())))
}

fn collapse_alignment<'r, H: Hardware>(
    ctx: &ScriptContext<'r, H>,
    args: &[Value<'_>],
) -> Result<Builtin<'r, H>, BridgeError> {
    expect_arity(args, 0)?;
    Ok(Builtin::CollapseAlignment(CollapseAlignment::new(ctx.alignment())))
}

fn reset_angle<'r, H: Hardware>(
    ctx: &ScriptContext<'r, H>,
    args: &[Value<'_>],
) -> Result<Builtin<'r, H>, BridgeError> {
    expect_arity(args, 0)?;
    Ok(Builtin::ResetGyro(ResetGyro::new(ctx.gyro())))
}

fn reset_distance<'r, H: Hardware>(
    ctx: &ScriptContext<'r, H>,
    args: &[Value<'_>],
) -> Result<Builtin<'r, H>, BridgeError> {
    expect_arity(args, 0)?;
    Ok(Builtin::ResetEncoder(ResetEncoder::new(ctx.encoder())))
}

fn encoder_distance<H: Hardware>(ctx: &ScriptContext<'_, H>) -> Result<f32, BridgeError> {
    let distance = ctx.encoder().with(|e| e.distance())?;
    Ok(distance.map_err(CommandError::from)?)
}

fn gyro_angle<H: Hardware>(ctx: &ScriptContext<'_, H>) -> Result<f32, BridgeError> {
    let angle = ctx.gyro().with(|g| g.angle())?;
    Ok(angle.map_err(CommandError::from)?)
}

fn is_past_setpoint<H: Hardware>(ctx: &ScriptContext<'_, H>) -> Result<bool, BridgeError> {
    Ok(ctx.shooter().with(|s| s.is_past_setpoint())?)
}

fn is_enabled<H: Hardware>(ctx: &ScriptContext<'_, H>) -> Result<bool, BridgeError> {
    Ok(ctx.state().is_enabled())
}
