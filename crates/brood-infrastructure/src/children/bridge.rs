//! Import bridging
//!
//! An import lets a child resolve a parent service. Each import becomes a
//! synthetic descriptor in the child, with the imported type and lifetime,
//! whose factory looks up the matching parent reference cell at resolution
//! time and delegates to the provider bound there. A scoped import cannot
//! capture a parent scope when the child is built, so it always goes
//! through the cell bound for the current child scope.

use super::cell::{ScopedParentCell, SingletonParentCell};
use crate::di::{ServiceDescriptor, ServiceProvider};
use brood_domain::error::Result;
use brood_domain::value_objects::{ServiceKey, ServiceLifetime};
use tracing::trace;

/// A parent service type the child may resolve, with the lifetime to honor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportDescriptor {
    key: ServiceKey,
    lifetime: ServiceLifetime,
}

impl ImportDescriptor {
    pub fn new(key: ServiceKey, lifetime: ServiceLifetime) -> Self {
        Self { key, lifetime }
    }

    /// Import `T` with `lifetime`
    pub fn of<T: Send + Sync + 'static>(lifetime: ServiceLifetime) -> Self {
        Self::new(ServiceKey::of::<T>(), lifetime)
    }

    pub fn singleton<T: Send + Sync + 'static>() -> Self {
        Self::of::<T>(ServiceLifetime::Singleton)
    }

    pub fn scoped<T: Send + Sync + 'static>() -> Self {
        Self::of::<T>(ServiceLifetime::Scoped)
    }

    pub fn transient<T: Send + Sync + 'static>() -> Self {
        Self::of::<T>(ServiceLifetime::Transient)
    }

    pub fn key(&self) -> ServiceKey {
        self.key
    }

    pub fn lifetime(&self) -> ServiceLifetime {
        self.lifetime
    }
}

/// The child-side descriptor that bridges `import` to the parent
pub(crate) fn bridge_descriptor(import: ImportDescriptor) -> ServiceDescriptor {
    let key = import.key();
    let lifetime = import.lifetime();
    ServiceDescriptor::describe(key, lifetime, move |child| {
        let parent = parent_for(child, lifetime)?;
        trace!(
            service = key.type_name(),
            lifetime = %lifetime,
            parent = parent.id(),
            "Resolving import from parent"
        );
        parent.get_instance(key)
    })
}

fn parent_for(child: &ServiceProvider, lifetime: ServiceLifetime) -> Result<ServiceProvider> {
    match lifetime {
        ServiceLifetime::Scoped => child.get::<ScopedParentCell>()?.get(),
        ServiceLifetime::Singleton | ServiceLifetime::Transient => {
            child.get::<SingletonParentCell>()?.get()
        }
    }
}
