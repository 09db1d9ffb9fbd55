//! Shared resource handles
//!
//! Commands reach a resource (subsystem) through a [`Shared`] handle. Each
//! access is scoped to a single closure call, so several commands in one
//! concurrent batch can interleave their accesses tick by tick. Nothing here
//! stops two commands from driving the same resource in one batch; that is
//! the author's responsibility (see `GroupBuilder::build_exclusive` for an
//! opt-in check).

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::{NoopRawMutex, RawMutex};
use embassy_sync::blocking_mutex::Mutex;

use crate::command::CommandError;

/// Maximum number of distinct resource ids
pub const MAX_RESOURCES: u8 = 32;

/// Identifier of a resource, unique within one control loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResourceId(u8);

impl ResourceId {
    /// Create a resource id
    ///
    /// # Panics
    /// If `id` is not below [`MAX_RESOURCES`]. In a `const` item this is a
    /// compile error.
    pub const fn new(id: u8) -> Self {
        match Self::try_new(id) {
            Some(id) => id,
            None => panic!("resource id out of range"),
        }
    }

    /// Create a resource id, or `None` if `id` is not below
    /// [`MAX_RESOURCES`]
    pub const fn try_new(id: u8) -> Option<Self> {
        if id < MAX_RESOURCES {
            Some(Self(id))
        } else {
            None
        }
    }

    /// Raw id value
    pub const fn get(&self) -> u8 {
        self.0
    }
}

/// Set of resource ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResourceSet {
    bits: u32,
}

impl ResourceSet {
    /// The empty set
    pub const EMPTY: Self = Self { bits: 0 };

    /// Set containing a single resource
    pub const fn of(id: ResourceId) -> Self {
        Self { bits: 1 << id.0 }
    }

    /// Add a resource to the set
    pub const fn with(self, id: ResourceId) -> Self {
        Self {
            bits: self.bits | (1 << id.0),
        }
    }

    /// Union of two sets
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Check if the set contains a resource
    pub const fn contains(&self, id: ResourceId) -> bool {
        self.bits & (1 << id.0) != 0
    }

    /// Check if two sets share any resource
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.bits & other.bits != 0
    }

    /// Check if the set is empty
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl From<ResourceId> for ResourceSet {
    fn from(id: ResourceId) -> Self {
        Self::of(id)
    }
}

/// Handle to a resource shared between commands
///
/// The raw mutex defaults to [`NoopRawMutex`], which is correct for a
/// single control loop. Use a `CriticalSectionRawMutex` when the resource
/// must also be reachable from an interrupt.
pub struct Shared<T, M: RawMutex = NoopRawMutex> {
    id: ResourceId,
    inner: Mutex<M, RefCell<T>>,
}

impl<T, M: RawMutex> Shared<T, M> {
    /// Wrap a resource
    pub const fn new(id: ResourceId, resource: T) -> Self {
        Self {
            id,
            inner: Mutex::new(RefCell::new(resource)),
        }
    }

    /// Resource id
    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// Resource id as a set
    pub fn resources(&self) -> ResourceSet {
        ResourceSet::of(self.id)
    }

    /// Access the resource for the duration of `f`
    ///
    /// Returns [`CommandError::ResourceBusy`] if the resource is already
    /// borrowed (re-entrant access from within another `with` call).
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R, CommandError> {
        self.inner.lock(|cell| match cell.try_borrow_mut() {
            Ok(mut resource) => Ok(f(&mut resource)),
            Err(_) => Err(CommandError::ResourceBusy(self.id)),
        })
    }

    /// Unwrap the resource
    pub fn into_inner(self) -> T {
        self.inner.into_inner().into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_set_membership() {
        let a = ResourceId::new(0);
        let b = ResourceId::new(5);
        let set = ResourceSet::of(a).with(b);

        assert!(set.contains(a));
        assert!(set.contains(b));
        assert!(!set.contains(ResourceId::new(6)));
        assert!(!set.is_empty());
        assert!(ResourceSet::EMPTY.is_empty());
    }

    #[test]
    fn test_resource_set_overlap() {
        let drive = ResourceSet::of(ResourceId::new(1));
        let shooter = ResourceSet::of(ResourceId::new(2));

        assert!(!drive.overlaps(&shooter));
        assert!(drive.union(shooter).overlaps(&shooter));
        assert!(!ResourceSet::EMPTY.overlaps(&ResourceSet::EMPTY));
    }

    #[test]
    fn test_resource_id_range() {
        assert_eq!(ResourceId::try_new(MAX_RESOURCES - 1).map(|id| id.get()), Some(31));
        assert_eq!(ResourceId::try_new(MAX_RESOURCES), None);
        assert_eq!(ResourceId::try_new(MAX_RESOURCES + 3), None);
        assert_ne!(ResourceId::new(3), ResourceId::new(1));
    }

    #[test]
    #[should_panic(expected = "resource id out of range")]
    fn test_out_of_range_resource_id_rejected() {
        let _ = ResourceId::new(MAX_RESOURCES + 3);
    }

    #[test]
    fn test_shared_access() {
        let shared: Shared<u32> = Shared::new(ResourceId::new(1), 10);

        shared.with(|v| *v += 5).unwrap();
        assert_eq!(shared.with(|v| *v), Ok(15));
        assert_eq!(shared.into_inner(), 15);
    }

    #[test]
    fn test_reentrant_access_is_busy() {
        let shared: Shared<u32> = Shared::new(ResourceId::new(4), 0);

        let nested = shared.with(|_| shared.with(|v| *v)).unwrap();
        assert_eq!(nested, Err(CommandError::ResourceBusy(ResourceId::new(4))));
    }
}
