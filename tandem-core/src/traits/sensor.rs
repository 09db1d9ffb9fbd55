//! Sensor traits

use super::Module;

/// Errors that can occur with sensor reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor not responding (or disabled)
    Disconnected,
    /// Reading out of expected range
    OutOfRange,
}

/// Distance/rate encoder
///
/// Takes `&mut self` for reads because hardware reads typically require
/// mutable access.
pub trait Encoder: Module {
    /// Distance travelled since the last reset, in configured units
    fn distance(&mut self) -> Result<f32, SensorError>;

    /// Current rate in configured units per second
    fn rate(&mut self) -> Result<f32, SensorError>;

    /// Zero the distance
    fn reset(&mut self);
}

/// Heading gyro
pub trait Gyro: Module {
    /// Heading in degrees since the last reset
    fn angle(&mut self) -> Result<f32, SensorError>;

    /// Zero the heading
    fn reset(&mut self);
}

impl<T: Encoder + ?Sized> Encoder for &mut T {
    fn distance(&mut self) -> Result<f32, SensorError> {
        (**self).distance()
    }

    fn rate(&mut self) -> Result<f32, SensorError> {
        (**self).rate()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

impl<T: Gyro + ?Sized> Gyro for &mut T {
    fn angle(&mut self) -> Result<f32, SensorError> {
        (**self).angle()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
