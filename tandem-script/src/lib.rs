//! Native-method bridge between autonomous scripts and Tandem commands
//!
//! A script interpreter calls named native methods. The [`Bridge`] resolves
//! each name in a [`NativeRegistry`], checks the arguments, builds the
//! matching command against the resources in its [`ScriptContext`] and
//! runs it once. Routines declared in configuration are composed into
//! groups the same way.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod builtin;
pub mod config;
pub mod context;
pub mod error;
pub mod registry;
pub mod value;

#[cfg(test)]
mod testing;

pub use builtin::Builtin;
pub use config::{parse_config, ConfigError};
pub use context::{Hardware, RobotState, ScriptContext};
pub use error::BridgeError;
pub use registry::{Bridge, Native, NativeRegistry, MAX_NATIVES};
pub use value::{Reply, Value, ValueKind};
