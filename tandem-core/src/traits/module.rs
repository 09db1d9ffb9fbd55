//! Module and subsystem traits
//!
//! A module is a single hardware actuator or sensor. A subsystem (resource)
//! owns a fixed set of modules and enables or disables them as a unit.

/// Base trait for all hardware modules
pub trait Module {
    /// Enable the module
    fn enable(&mut self);

    /// Disable the module
    ///
    /// A disabled actuator must stop driving its output.
    fn disable(&mut self);

    /// Check if the module is enabled
    fn is_enabled(&self) -> bool;
}

impl<T: Module + ?Sized> Module for &mut T {
    fn enable(&mut self) {
        (**self).enable()
    }

    fn disable(&mut self) {
        (**self).disable()
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }
}

/// Aggregate owner of a fixed set of modules
///
/// Enabling or disabling a subsystem moves every owned module together.
/// There is no partially-enabled state: `is_enabled` is true only when
/// all owned modules are enabled.
pub trait Subsystem {
    /// Enable every owned module
    fn enable(&mut self);

    /// Disable every owned module
    fn disable(&mut self);

    /// Check if every owned module is enabled
    fn is_enabled(&self) -> bool;
}
