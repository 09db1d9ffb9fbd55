//! Native method registry and the script bridge

use heapless::{FnvIndexMap, Vec};

use tandem_core::config::{RoutineConfig, MAX_ARGS, MAX_ROUTINE_STEPS};
use tandem_core::{BuildError, Cancellable, ControlClock, GroupBuilder, Runner};

use crate::builtin::{register_builtins, Builtin};
use crate::context::{Hardware, ScriptContext};
use crate::error::BridgeError;
use crate::value::{Reply, Value};

/// Maximum registered native methods
pub const MAX_NATIVES: usize = 32;

/// Builds a command from call arguments
pub type RunAdapter<'r, H> =
    fn(&ScriptContext<'r, H>, &[Value<'_>]) -> Result<Builtin<'r, H>, BridgeError>;

/// Answers a numeric query
pub type NumberQuery<'r, H> = fn(&ScriptContext<'r, H>) -> Result<f32, BridgeError>;

/// Answers a boolean query
pub type BooleanQuery<'r, H> = fn(&ScriptContext<'r, H>) -> Result<bool, BridgeError>;

/// A native method bound to a name
pub enum Native<'r, H: Hardware> {
    /// Construct a command and run it once
    Run(RunAdapter<'r, H>),
    /// Return a number
    Number(NumberQuery<'r, H>),
    /// Return a boolean
    Boolean(BooleanQuery<'r, H>),
}

impl<H: Hardware> Clone for Native<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H: Hardware> Copy for Native<'_, H> {}

/// Name-keyed table of native methods
pub struct NativeRegistry<'r, H: Hardware> {
    methods: FnvIndexMap<&'static str, Native<'r, H>, MAX_NATIVES>,
}

impl<'r, H: Hardware> NativeRegistry<'r, H> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            methods: FnvIndexMap::new(),
        }
    }

    /// Bind `native` to `name`
    ///
    /// Names are bound once; rebinding fails with
    /// [`BridgeError::DuplicateMethod`].
    pub fn register(&mut self, name: &'static str, native: Native<'r, H>) -> Result<(), BridgeError> {
        if self.methods.contains_key(name) {
            return Err(BridgeError::DuplicateMethod);
        }
        self.methods
            .insert(name, native)
            .map_err(|_| BridgeError::RegistryFull)?;
        Ok(())
    }

    /// Look up a method
    pub fn get(&self, name: &str) -> Option<Native<'r, H>> {
        self.methods.get(name).copied()
    }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + use<'_, 'r, H> {
        self.methods.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl<H: Hardware> Default for NativeRegistry<'_, H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Entry point for scripts: resolves names and runs the commands they build
pub struct Bridge<'r, H: Hardware> {
    context: ScriptContext<'r, H>,
    registry: NativeRegistry<'r, H>,
}

impl<'r, H: Hardware> Bridge<'r, H> {
    /// Create a bridge with an empty registry
    pub fn new(context: ScriptContext<'r, H>) -> Self {
        Self {
            context,
            registry: NativeRegistry::new(),
        }
    }

    /// Create a bridge with every built-in method registered
    pub fn with_builtins(context: ScriptContext<'r, H>) -> Result<Self, BridgeError> {
        let mut bridge = Self::new(context);
        register_builtins(&mut bridge.registry)?;
        Ok(bridge)
    }

    pub fn context(&self) -> &ScriptContext<'r, H> {
        &self.context
    }

    pub fn registry(&self) -> &NativeRegistry<'r, H> {
        &self.registry
    }

    /// Bind an additional native method
    pub fn register(&mut self, name: &'static str, native: Native<'r, H>) -> Result<(), BridgeError> {
        self.registry.register(name, native)
    }

    /// Construct the command a call names without running it
    pub fn build(&self, name: &str, args: &[Value<'_>]) -> Result<Builtin<'r, H>, BridgeError> {
        match self.registry.get(name) {
            Some(Native::Run(adapter)) => adapter(&self.context, args),
            Some(_) => Err(BridgeError::NotACommand),
            None => {
                warn!("unknown native method {}", name);
                Err(BridgeError::UnknownMethod)
            }
        }
    }

    /// Call a native method
    ///
    /// Commands run once to completion on `runner` before this returns.
    pub fn invoke<K: ControlClock + ?Sized>(
        &self,
        runner: &mut Runner<'_, K>,
        name: &str,
        args: &[Value<'_>],
    ) -> Result<Reply, BridgeError> {
        let native = self.registry.get(name).ok_or(BridgeError::UnknownMethod)?;
        match native {
            Native::Run(adapter) => {
                let mut command = adapter(&self.context, args)?;
                info!("invoking {}", name);
                runner.run(&mut command)?;
                Ok(Reply::Done)
            }
            Native::Number(query) => {
                expect_no_args(args)?;
                Ok(Reply::Number(query(&self.context)?))
            }
            Native::Boolean(query) => {
                expect_no_args(args)?;
                Ok(Reply::Bool(query(&self.context)?))
            }
        }
    }

    /// Compose a declared routine into a group and run it once
    ///
    /// Every step is built before anything runs, so a bad call leaves the
    /// robot untouched.
    pub fn run_routine<K: ControlClock + ?Sized>(
        &self,
        runner: &mut Runner<'_, K>,
        routine: &RoutineConfig,
    ) -> Result<(), BridgeError> {
        let mut commands: Vec<Builtin<'r, H>, MAX_ROUTINE_STEPS> = Vec::new();
        for step in routine.steps.iter() {
            let args: Vec<Value<'_>, MAX_ARGS> = step.args.iter().map(Value::from).collect();
            let command = self.build(step.call.as_str(), &args)?;
            commands
                .push(command)
                .map_err(|_| BridgeError::Build(BuildError::CapacityExceeded))?;
        }

        let mut builder = GroupBuilder::new();
        for (command, step) in commands.iter_mut().zip(routine.steps.iter()) {
            builder.add(step.tag, command)?;
        }
        let mut group = builder.build();
        info!(
            "running routine {} ({} steps)",
            routine.name.as_str(),
            group.partition().len()
        );

        match self.context.cancel() {
            Some(token) => runner.run(&mut Cancellable::new(group, token))?,
            None => runner.run(&mut group)?,
        }
        Ok(())
    }
}

fn expect_no_args(args: &[Value<'_>]) -> Result<(), BridgeError> {
    crate::builtin::expect_arity(args, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::testing::{Rig, Sim};
    use crate::value::ValueKind;
    use tandem_core::traits::{DriveOutput, Solenoid};
    use tandem_core::{CancelToken, CommandError, ManualClock};
    use tandem_drivers::commands::MAX_MESSAGE_LEN;
    use tandem_drivers::subsystem::{Aligner, Drivetrain, Launcher};

    const ROUTINE: &str = r#"
        [[routine]]
        name = "two-ball"
        steps = [
            { tag = "sequential", call = "shiftGear" },
            { tag = "concurrent", call = "setShooterSpeed", args = [3000] },
            { tag = "concurrent", call = "arcade", args = [0.5, 0.0] },
            { tag = "sequential", call = "wait", args = [0.1] },
            { tag = "sequential", call = "stop" },
        ]

        [[routine]]
        name = "bad"
        steps = [{ tag = "sequential", call = "gyro" }]
    "#;

    #[test]
    fn test_builtins_registered() {
        let rig = Rig::new();
        let bridge = Bridge::with_builtins(rig.context()).unwrap();
        assert_eq!(bridge.registry().len(), 22);
        let names: std::vec::Vec<&str> = bridge.registry().names().collect();
        for name in ["gyroTurn", "alignShooter", "extendAlignment", "collapseAlignment"] {
            assert!(names.contains(&name), "{} missing", name);
        }
    }

    #[test]
    fn test_alignment_builtins() {
        let rig = Rig::new();
        let bridge = Bridge::with_builtins(rig.context()).unwrap();
        let mut clock = ManualClock::new(20);
        let mut runner = Runner::new(&mut clock);

        bridge.invoke(&mut runner, "extendAlignment", &[]).unwrap();
        assert!(rig.alignment.with(|a| a.is_extended()).unwrap());

        bridge
            .invoke(&mut runner, "alignShooter", &[Value::Number(30.0)])
            .unwrap();
        assert_eq!(rig.alignment.with(|a| a.angle()).unwrap(), 30.0);
        assert_eq!(
            bridge.invoke(&mut runner, "alignShooter", &[]),
            Err(BridgeError::Arity {
                expected: 1,
                found: 0
            })
        );

        bridge.invoke(&mut runner, "collapseAlignment", &[]).unwrap();
        assert!(!rig.alignment.with(|a| a.is_extended()).unwrap());
    }

    #[test]
    fn test_print_truncates_long_text() {
        let rig = Rig::new();
        let bridge = Bridge::with_builtins(rig.context()).unwrap();
        let long = "w".repeat(MAX_MESSAGE_LEN + 20);

        let command = bridge.build("print", &[Value::Text(&long)]).unwrap();
        let Builtin::Log(log) = command else {
            panic!("print did not build a log command");
        };
        assert_eq!(log.message(), &long[..MAX_MESSAGE_LEN]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let rig = Rig::new();
        let mut bridge = Bridge::with_builtins(rig.context()).unwrap();
        fn always(_: &ScriptContext<'_, Sim>) -> Result<bool, BridgeError> {
            Ok(true)
        }
        assert_eq!(
            bridge.register("isEnabled", Native::Boolean(always)),
            Err(BridgeError::DuplicateMethod)
        );
        assert_eq!(bridge.register("always", Native::Boolean(always)), Ok(()));
    }

    #[test]
    fn test_registry_full() {
        fn zero(_: &ScriptContext<'_, Sim>) -> Result<f32, BridgeError> {
            Ok(0.0)
        }
        let mut registry = NativeRegistry::<Sim>::new();
        for i in 0..MAX_NATIVES {
            let name: &'static str = Box::leak(format!("m{}", i).into_boxed_str());
            registry.register(name, Native::Number(zero)).unwrap();
        }
        assert_eq!(
            registry.register("overflow", Native::Number(zero)),
            Err(BridgeError::RegistryFull)
        );
    }

    #[test]
    fn test_invoke_validates_arguments() {
        let rig = Rig::new();
        let bridge = Bridge::with_builtins(rig.context()).unwrap();
        let mut clock = ManualClock::new(20);
        let mut runner = Runner::new(&mut clock);

        assert_eq!(
            bridge.invoke(&mut runner, "fly", &[]),
            Err(BridgeError::UnknownMethod)
        );
        assert_eq!(
            bridge.invoke(&mut runner, "arcade", &[Value::Number(0.5)]),
            Err(BridgeError::Arity {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            bridge.invoke(&mut runner, "arcade", &[Value::Number(0.5), "left".into()]),
            Err(BridgeError::ArgumentType {
                index: 1,
                expected: ValueKind::Number
            })
        );
        assert_eq!(
            bridge.invoke(&mut runner, "gyro", &[true.into()]),
            Err(BridgeError::Arity {
                expected: 0,
                found: 1
            })
        );
    }

    #[test]
    fn test_invoke_runs_command() {
        let rig = Rig::new();
        let bridge = Bridge::with_builtins(rig.context()).unwrap();
        let mut clock = ManualClock::new(20);
        let mut runner = Runner::new(&mut clock);

        let reply = bridge.invoke(&mut runner, "tank", &[Value::Number(0.3), Value::Number(-0.3)]);
        assert_eq!(reply, Ok(Reply::Done));
        let outputs = rig.drivetrain.with(|d| d.drive().outputs()).unwrap();
        assert_eq!(outputs, (0.3, -0.3));

        bridge.invoke(&mut runner, "print", &["hello".into()]).unwrap();
        bridge.invoke(&mut runner, "wait", &[Value::Number(0.1)]).unwrap();
        drop(runner);
        assert_eq!(clock.ticks(), 5);
    }

    #[test]
    fn test_queries() {
        let rig = Rig::new();
        rig.gyro.with(|g| g.set_angle(30.0)).unwrap();
        rig.encoder.with(|e| e.set_distance(4.0)).unwrap();
        let bridge = Bridge::with_builtins(rig.context()).unwrap();
        let mut clock = ManualClock::new(20);
        let mut runner = Runner::new(&mut clock);

        assert_eq!(bridge.invoke(&mut runner, "gyro", &[]), Ok(Reply::Number(30.0)));
        assert_eq!(
            bridge.invoke(&mut runner, "encoderDistance", &[]),
            Ok(Reply::Number(4.0))
        );
        assert_eq!(bridge.invoke(&mut runner, "isEnabled", &[]), Ok(Reply::Bool(true)));
        assert_eq!(
            bridge.invoke(&mut runner, "isPastSetpoint", &[]),
            Ok(Reply::Bool(false))
        );

        bridge.invoke(&mut runner, "resetAngle", &[]).unwrap();
        assert_eq!(bridge.invoke(&mut runner, "gyro", &[]), Ok(Reply::Number(0.0)));
    }

    #[test]
    fn test_query_is_not_a_command() {
        let rig = Rig::new();
        let bridge = Bridge::with_builtins(rig.context()).unwrap();
        assert!(matches!(
            bridge.build("encoderDistance", &[]),
            Err(BridgeError::NotACommand)
        ));
    }

    #[test]
    fn test_run_routine_from_config() {
        let config = parse_config(ROUTINE).unwrap();
        let rig = Rig::new();
        let bridge = Bridge::with_builtins(rig.context()).unwrap();
        let mut clock = ManualClock::new(20);
        let mut runner = Runner::new(&mut clock);

        let routine = config.routine("two-ball").unwrap();
        bridge.run_routine(&mut runner, routine).unwrap();
        drop(runner);

        assert!(rig.drivetrain.with(|d| d.is_shifted()).unwrap());
        assert_eq!(rig.shooter.with(|s| s.setpoint()).unwrap(), 3000.0);
        assert_eq!(
            rig.drivetrain.with(|d| d.drive().outputs()).unwrap(),
            (0.0, 0.0)
        );
        assert_eq!(clock.ticks(), 5);
    }

    #[test]
    fn test_bad_routine_runs_nothing() {
        let config = parse_config(ROUTINE).unwrap();
        let rig = Rig::new();
        let bridge = Bridge::with_builtins(rig.context()).unwrap();
        let mut clock = ManualClock::new(20);
        let mut runner = Runner::new(&mut clock);

        assert_eq!(
            bridge.run_routine(&mut runner, config.routine("bad").unwrap()),
            Err(BridgeError::NotACommand)
        );
        assert!(!rig.drivetrain.with(|d| d.is_shifted()).unwrap());
    }

    #[test]
    fn test_cancelled_routine() {
        let config = parse_config(ROUTINE).unwrap();
        let rig = Rig::new();
        let token = CancelToken::new();
        token.cancel();
        let bridge = Bridge::with_builtins(rig.context().with_cancel(&token)).unwrap();
        let mut clock = ManualClock::new(20);
        let mut runner = Runner::new(&mut clock);

        assert_eq!(
            bridge.run_routine(&mut runner, config.routine("two-ball").unwrap()),
            Err(BridgeError::Command(CommandError::Cancelled))
        );
        assert!(!rig.drivetrain.with(|d| d.is_shifted()).unwrap());
        assert!(!rig.shooter.with(|s| s.feeder().get()).unwrap());
    }
}
