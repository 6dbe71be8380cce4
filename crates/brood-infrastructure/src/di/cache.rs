//! Per-provider instance cache
//!
//! Each service type gets its own `OnceCell` slot. The map shard is only
//! locked long enough to fetch or create the slot; construction runs
//! outside of it, so a factory may resolve other services from the same
//! cache without deadlocking.

use super::descriptor::Instance;
use brood_domain::error::Result;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::any::TypeId;
use std::sync::Arc;

#[derive(Default)]
pub(crate) struct InstanceCache {
    slots: DashMap<TypeId, Arc<OnceCell<Instance>>>,
}

impl InstanceCache {
    /// Return the cached instance for `type_id`, constructing it with `create` at most once
    ///
    /// A failed construction leaves the slot empty so a later call retries.
    pub(crate) fn get_or_create<F>(&self, type_id: TypeId, create: F) -> Result<Instance>
    where
        F: FnOnce() -> Result<Instance>,
    {
        let slot = Arc::clone(&self.slots.entry(type_id).or_default());
        slot.get_or_try_init(create).map(Arc::clone)
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.value().get().is_some()).count()
    }

    pub(crate) fn clear(&self) {
        self.slots.clear();
    }
}
