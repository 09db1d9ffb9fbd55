//! In-memory modules
//!
//! Stand-ins for hardware when running the control loop on a host. Actuators
//! record what they were told; sensors report whatever the test or
//! simulation sets.

use tandem_core::traits::{
    ActuatorError, Encoder, Gyro, Module, SensorError, Solenoid, SpeedController,
};

/// Simulated speed controller
#[derive(Debug, Default)]
pub struct SimSpeedController {
    output: f32,
    enabled: bool,
    /// Number of accepted `set` calls
    pub writes: u32,
}

impl SimSpeedController {
    /// Create a disabled controller at zero output
    pub const fn new() -> Self {
        Self {
            output: 0.0,
            enabled: false,
            writes: 0,
        }
    }
}

impl Module for SimSpeedController {
    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
        self.output = 0.0;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl SpeedController for SimSpeedController {
    fn set(&mut self, output: f32) -> Result<(), ActuatorError> {
        if !self.enabled {
            return Err(ActuatorError::Disabled);
        }
        self.output = output.clamp(-1.0, 1.0);
        self.writes += 1;
        Ok(())
    }

    fn get(&self) -> f32 {
        self.output
    }
}

/// Simulated solenoid
#[derive(Debug, Default)]
pub struct SimSolenoid {
    on: bool,
    enabled: bool,
    /// Number of accepted `set` calls
    pub writes: u32,
}

impl SimSolenoid {
    /// Create a disabled, released solenoid
    pub const fn new() -> Self {
        Self {
            on: false,
            enabled: false,
            writes: 0,
        }
    }
}

impl Module for SimSolenoid {
    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Solenoid for SimSolenoid {
    fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        if !self.enabled {
            return Err(ActuatorError::Disabled);
        }
        self.on = on;
        self.writes += 1;
        Ok(())
    }

    fn get(&self) -> bool {
        self.on
    }
}

/// Simulated encoder
#[derive(Debug, Default)]
pub struct SimEncoder {
    distance: f32,
    rate: f32,
    enabled: bool,
}

impl SimEncoder {
    /// Create a disabled encoder at zero
    pub const fn new() -> Self {
        Self {
            distance: 0.0,
            rate: 0.0,
            enabled: false,
        }
    }

    /// Set the reported distance
    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance;
    }

    /// Set the reported rate
    pub fn set_rate(&mut self, rate: f32) {
        self.rate = rate;
    }

    /// Integrate the current rate over `dt_ms`
    pub fn advance(&mut self, dt_ms: u32) {
        self.distance += self.rate * dt_ms as f32 / 1000.0;
    }
}

impl Module for SimEncoder {
    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Encoder for SimEncoder {
    fn distance(&mut self) -> Result<f32, SensorError> {
        if !self.enabled {
            return Err(SensorError::Disconnected);
        }
        Ok(self.distance)
    }

    fn rate(&mut self) -> Result<f32, SensorError> {
        if !self.enabled {
            return Err(SensorError::Disconnected);
        }
        Ok(self.rate)
    }

    fn reset(&mut self) {
        self.distance = 0.0;
    }
}

/// Simulated gyro
#[derive(Debug, Default)]
pub struct SimGyro {
    angle: f32,
    enabled: bool,
}

impl SimGyro {
    /// Create a disabled gyro at zero heading
    pub const fn new() -> Self {
        Self {
            angle: 0.0,
            enabled: false,
        }
    }

    /// Set the reported heading
    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }
}

impl Module for SimGyro {
    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Gyro for SimGyro {
    fn angle(&mut self) -> Result<f32, SensorError> {
        if !self.enabled {
            return Err(SensorError::Disconnected);
        }
        Ok(self.angle)
    }

    fn reset(&mut self) {
        self.angle = 0.0;
    }
}
