//! Child container registry
//!
//! Keyed store of built child root providers. Each identity owns one
//! `OnceCell` slot: inserting the slot is an atomic insert-if-absent on the
//! map, and the build itself runs inside the slot, outside any map lock.
//! Concurrent first accesses therefore agree on one slot and exactly one
//! build runs; the others wait for its result.

use crate::di::ServiceProvider;
use crate::di::guard::ResolutionGuard;
use brood_domain::error::Result;
use brood_domain::value_objects::ChildId;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Built child root providers keyed by child identity
#[derive(Default)]
pub struct ChildContainerRegistry {
    providers: DashMap<ChildId, Arc<OnceCell<ServiceProvider>>>,
    builds: AtomicUsize,
}

impl ChildContainerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the provider built for `id`, running `build` if there is none yet
    ///
    /// `build` runs at most once per identity. If it fails, nothing is stored
    /// and a later call builds again. A build that re-enters its own identity
    /// fails with `Error::CircularDependency` instead of blocking.
    pub fn get_or_build<F>(&self, id: ChildId, build: F) -> Result<ServiceProvider>
    where
        F: FnOnce() -> Result<ServiceProvider>,
    {
        let slot = Arc::clone(&self.providers.entry(id).or_default());
        if let Some(provider) = slot.get() {
            return Ok(provider.clone());
        }

        let _guard = ResolutionGuard::enter_child_build(id)?;
        slot.get_or_try_init(|| {
            let provider = build()?;
            self.builds.fetch_add(1, Ordering::SeqCst);
            debug!(child = %id, root = provider.root_id(), "Registered child container");
            Ok(provider)
        })
        .cloned()
    }

    /// The provider built for `id`, if any
    pub fn get(&self, id: ChildId) -> Option<ServiceProvider> {
        self.providers
            .get(&id)
            .and_then(|slot| slot.value().get().cloned())
    }

    /// Whether a provider has been built for `id`
    pub fn is_built(&self, id: ChildId) -> bool {
        self.providers
            .get(&id)
            .is_some_and(|slot| slot.value().get().is_some())
    }

    /// Number of built child containers
    pub fn len(&self) -> usize {
        self.providers
            .iter()
            .filter(|slot| slot.value().get().is_some())
            .count()
    }

    /// Whether no child container has been built
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of successful builds since creation
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    /// Dispose every built child and forget it
    pub fn dispose_all(&self) {
        let providers: Vec<ServiceProvider> = self
            .providers
            .iter()
            .filter_map(|slot| slot.value().get().cloned())
            .collect();
        self.providers.clear();
        for provider in providers {
            provider.dispose();
        }
    }
}

impl fmt::Debug for ChildContainerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChildContainerRegistry")
            .field("built", &self.len())
            .field("builds", &self.build_count())
            .finish()
    }
}
