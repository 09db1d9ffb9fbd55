//! PID controller
//!
//! Positional PID on `f32`, evaluated once per control tick with the tick's
//! elapsed time. Used to drive toward an encoder setpoint.

use tandem_core::config::PidGains;

/// PID controller state
#[derive(Debug, Clone)]
pub struct Pid {
    gains: PidGains,
    setpoint: f32,
    /// Accumulated error × seconds
    integral: f32,
    /// Previous error for the derivative term
    prev_error: Option<f32>,
}

impl Pid {
    /// Create a controller with a zero setpoint
    pub fn new(gains: PidGains) -> Self {
        Self {
            gains,
            setpoint: 0.0,
            integral: 0.0,
            prev_error: None,
        }
    }

    /// Get the gains
    pub fn gains(&self) -> &PidGains {
        &self.gains
    }

    /// Change the setpoint
    ///
    /// Resets accumulated state so a previous target's integral does not
    /// carry over.
    pub fn set_setpoint(&mut self, setpoint: f32) {
        self.setpoint = setpoint;
        self.reset();
    }

    /// Current setpoint
    pub fn setpoint(&self) -> f32 {
        self.setpoint
    }

    /// Clear integral and derivative history
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.prev_error = None;
    }

    /// Signed error for a measurement
    pub fn error(&self, measurement: f32) -> f32 {
        self.setpoint - measurement
    }

    /// Calculate the output for one tick
    ///
    /// # Arguments
    /// - `measurement`: Current process value
    /// - `dt_ms`: Time since the previous call
    pub fn calculate(&mut self, measurement: f32, dt_ms: u32) -> f32 {
        let error = self.error(measurement);
        let dt = dt_ms as f32 / 1000.0;
        let limit = self.gains.output_limit;

        // Proportional term
        let p_term = self.gains.kp * error;

        // Integral term with anti-windup: the integral alone may not exceed
        // the output limit
        if self.gains.ki > 0.0 {
            let bound = limit / self.gains.ki;
            self.integral = (self.integral + error * dt).clamp(-bound, bound);
        }
        let i_term = self.gains.ki * self.integral;

        // Derivative on error; skipped on the first call and for dt = 0
        let d_term = match self.prev_error {
            Some(prev) if dt > 0.0 => self.gains.kd * (error - prev) / dt,
            _ => 0.0,
        };
        self.prev_error = Some(error);

        (p_term + i_term + d_term).clamp(-limit, limit)
    }
}
