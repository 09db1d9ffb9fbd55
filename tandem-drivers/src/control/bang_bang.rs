//! Bang-bang speed regulation
//!
//! Full output below the setpoint, none at or above it. Suited to
//! flywheels, where overshoot costs nothing and coasting back down is slow.

/// Bang-bang regulator state
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BangBang {
    setpoint: f32,
    /// Last measurement seen by `calculate`
    last: Option<f32>,
}

impl BangBang {
    /// Create a regulator with a zero setpoint
    pub const fn new() -> Self {
        Self {
            setpoint: 0.0,
            last: None,
        }
    }

    /// Change the setpoint
    pub fn set_setpoint(&mut self, setpoint: f32) {
        self.setpoint = setpoint;
    }

    /// Current setpoint
    pub fn setpoint(&self) -> f32 {
        self.setpoint
    }

    /// Output (0.0 or 1.0) for a measurement
    ///
    /// A setpoint at or below zero always yields zero output.
    pub fn calculate(&mut self, measurement: f32) -> f32 {
        self.last = Some(measurement);

        if self.setpoint > 0.0 && measurement < self.setpoint {
            1.0
        } else {
            0.0
        }
    }

    /// Check if the last measurement reached the setpoint
    ///
    /// False until the first measurement.
    pub fn is_past_setpoint(&self) -> bool {
        match self.last {
            Some(m) => m >= self.setpoint,
            None => false,
        }
    }
}
