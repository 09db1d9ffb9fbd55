//! Bridge errors

use tandem_core::{BuildError, CommandError};

use crate::value::ValueKind;

/// Errors raised while registering, building or invoking native methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeError {
    /// No native method has this name
    UnknownMethod,
    /// A native method with this name is already registered
    DuplicateMethod,
    /// The registry has no room for another method
    RegistryFull,
    /// Wrong number of arguments
    Arity { expected: u8, found: u8 },
    /// An argument has the wrong type
    ArgumentType { index: u8, expected: ValueKind },
    /// A query was used where a command is required
    NotACommand,
    /// The routine could not be composed into a group
    Build(BuildError),
    /// The command failed while running
    Command(CommandError),
}

impl From<BuildError> for BridgeError {
    fn from(e: BuildError) -> Self {
        BridgeError::Build(e)
    }
}

impl From<CommandError> for BridgeError {
    fn from(e: CommandError) -> Self {
        BridgeError::Command(e)
    }
}
