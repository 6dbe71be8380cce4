//! Type-keyed extension slots on a service collection
//!
//! Configuration-time helpers use these slots to share one component per
//! collection (for example the child declarations) across calls.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Map from a type to one shared value of that type
#[derive(Clone, Default)]
pub struct Extensions {
    slots: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Extensions {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value stored for `T`
    pub fn get<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.slots
            .get(&TypeId::of::<T>())
            .and_then(|value| Arc::clone(value).downcast::<T>().ok())
    }

    /// Store `value` for `T`, returning the value it replaced
    pub fn insert<T: Send + Sync + 'static>(&mut self, value: Arc<T>) -> Option<Arc<T>> {
        self.slots
            .insert(TypeId::of::<T>(), value)
            .and_then(|old| old.downcast::<T>().ok())
    }

    /// Get the value stored for `T`, inserting the result of `init` first if absent
    pub fn get_or_insert_with<T, F>(&mut self, init: F) -> Arc<T>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        if let Some(existing) = self.get::<T>() {
            return existing;
        }
        let value = Arc::new(init());
        self.insert(Arc::clone(&value));
        value
    }

    /// Whether a value is stored for `T`
    pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
        self.slots.contains_key(&TypeId::of::<T>())
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no values are stored
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl fmt::Debug for Extensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extensions")
            .field("len", &self.slots.len())
            .finish()
    }
}
