//! Module aggregates
//!
//! [`ModuleGroup`] is a subsystem with no API beyond enable/disable, built
//! from a list of modules. [`SpeedControllerGroup`] drives several speed
//! controllers as one.

use heapless::Vec;

use tandem_core::traits::{ActuatorError, Module, SpeedController, Subsystem};
use tandem_core::BuildError;

/// Subsystem that only enables and disables a fixed set of modules
///
/// ```
/// use tandem_core::traits::{Module, Subsystem};
/// use tandem_drivers::module::sim::{SimSolenoid, SimSpeedController};
/// use tandem_drivers::module::ModuleGroup;
///
/// let mut motor = SimSpeedController::new();
/// let mut piston = SimSolenoid::new();
/// let mut loader = ModuleGroup::<2>::builder()
///     .add(&mut motor).unwrap()
///     .add(&mut piston).unwrap()
///     .build();
///
/// loader.enable();
/// assert!(loader.is_enabled());
/// ```
pub struct ModuleGroup<'m, const N: usize> {
    modules: Vec<&'m mut dyn Module, N>,
}

impl<'m, const N: usize> ModuleGroup<'m, N> {
    /// Start building a group
    pub fn builder() -> ModuleGroupBuilder<'m, N> {
        ModuleGroupBuilder {
            modules: Vec::new(),
        }
    }

    /// Number of modules
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Check if the group owns no modules
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<const N: usize> Subsystem for ModuleGroup<'_, N> {
    fn enable(&mut self) {
        for module in self.modules.iter_mut() {
            module.enable();
        }
    }

    fn disable(&mut self) {
        for module in self.modules.iter_mut() {
            module.disable();
        }
    }

    fn is_enabled(&self) -> bool {
        self.modules.iter().all(|m| m.is_enabled())
    }
}

/// Builder for a [`ModuleGroup`]
pub struct ModuleGroupBuilder<'m, const N: usize> {
    modules: Vec<&'m mut dyn Module, N>,
}

impl<'m, const N: usize> ModuleGroupBuilder<'m, N> {
    /// Add a module
    ///
    /// # Errors
    /// [`BuildError::CapacityExceeded`] if the group already holds `N`
    /// modules.
    pub fn add(mut self, module: &'m mut dyn Module) -> Result<Self, BuildError> {
        self.modules
            .push(module)
            .map_err(|_| BuildError::CapacityExceeded)?;
        Ok(self)
    }

    /// Finish the group
    pub fn build(self) -> ModuleGroup<'m, N> {
        ModuleGroup {
            modules: self.modules,
        }
    }
}

/// Several speed controllers driven with the same output
pub struct SpeedControllerGroup<'m, const N: usize> {
    controllers: Vec<&'m mut dyn SpeedController, N>,
    output: f32,
}

impl<'m, const N: usize> SpeedControllerGroup<'m, N> {
    /// Create an empty group
    pub fn new() -> Self {
        Self {
            controllers: Vec::new(),
            output: 0.0,
        }
    }

    /// Add a speed controller
    pub fn add(mut self, controller: &'m mut dyn SpeedController) -> Result<Self, BuildError> {
        self.controllers
            .push(controller)
            .map_err(|_| BuildError::CapacityExceeded)?;
        Ok(self)
    }
}

impl<const N: usize> Default for SpeedControllerGroup<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Module for SpeedControllerGroup<'_, N> {
    fn enable(&mut self) {
        for c in self.controllers.iter_mut() {
            c.enable();
        }
    }

    fn disable(&mut self) {
        for c in self.controllers.iter_mut() {
            c.disable();
        }
    }

    fn is_enabled(&self) -> bool {
        self.controllers.iter().all(|c| c.is_enabled())
    }
}

impl<const N: usize> SpeedController for SpeedControllerGroup<'_, N> {
    fn set(&mut self, output: f32) -> Result<(), ActuatorError> {
        if !self.is_enabled() {
            return Err(ActuatorError::Disabled);
        }
        for c in self.controllers.iter_mut() {
            c.set(output)?;
        }
        self.output = output.clamp(-1.0, 1.0);
        Ok(())
    }

    fn get(&self) -> f32 {
        self.output
    }
}
