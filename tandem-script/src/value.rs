//! Script values passed to and returned from native methods

use core::fmt;

use tandem_core::config::ArgValue;

/// Type of a script value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValueKind {
    Number,
    Bool,
    Text,
}

/// Scalar argument handed to a native method
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'v> {
    Number(f32),
    Bool(bool),
    Text(&'v str),
}

impl<'v> Value<'v> {
    /// Type of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Bool,
            Value::Text(_) => ValueKind::Text,
        }
    }

    /// Numeric value, if this is a number
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Boolean value, if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl<'v> From<&'v ArgValue> for Value<'v> {
    fn from(arg: &'v ArgValue) -> Self {
        match arg {
            ArgValue::Bool(v) => Value::Bool(*v),
            ArgValue::Number(v) => Value::Number(*v),
            ArgValue::Text(v) => Value::Text(v.as_str()),
        }
    }
}

impl From<f32> for Value<'_> {
    fn from(v: f32) -> Self {
        Value::Number(v)
    }
}

impl From<bool> for Value<'_> {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl<'v> From<&'v str> for Value<'v> {
    fn from(v: &'v str) -> Self {
        Value::Text(v)
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
        }
    }
}

/// Result of invoking a native method
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    /// A command ran to completion
    Done,
    /// A number query answered
    Number(f32),
    /// A boolean query answered
    Bool(bool),
}
