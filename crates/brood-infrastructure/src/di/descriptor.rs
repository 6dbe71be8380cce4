//! Service descriptors
//!
//! A descriptor pairs a [`ServiceKey`] with a lifetime and a type-erased
//! factory. Typed constructors wrap an ordinary closure returning `T`;
//! [`ServiceDescriptor::describe`] is the erased form used when the service
//! type is only known as a key at runtime.

use super::provider::ServiceProvider;
use brood_domain::error::Result;
use brood_domain::value_objects::{ServiceKey, ServiceLifetime};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A resolved, type-erased service instance
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Type-erased factory invoked with the provider performing the resolution
pub type ServiceFactory = Arc<dyn Fn(&ServiceProvider) -> Result<Instance> + Send + Sync>;

/// Registration of one service type
#[derive(Clone)]
pub struct ServiceDescriptor {
    key: ServiceKey,
    lifetime: ServiceLifetime,
    factory: ServiceFactory,
}

impl ServiceDescriptor {
    /// Describe a service from a key, a lifetime and an erased factory
    ///
    /// The factory must return an `Arc<T>` where `T` is the type behind
    /// `key`; anything else surfaces as `Error::TypeMismatch` when a typed
    /// caller downcasts the instance.
    pub fn describe<F>(key: ServiceKey, lifetime: ServiceLifetime, factory: F) -> Self
    where
        F: Fn(&ServiceProvider) -> Result<Instance> + Send + Sync + 'static,
    {
        Self {
            key,
            lifetime,
            factory: Arc::new(factory),
        }
    }

    /// Describe `T` with the given lifetime and a typed factory
    pub fn new<T, F>(lifetime: ServiceLifetime, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> Result<T> + Send + Sync + 'static,
    {
        Self::describe(ServiceKey::of::<T>(), lifetime, move |provider| {
            factory(provider).map(|value| Arc::new(value) as Instance)
        })
    }

    /// Describe a singleton `T`
    pub fn singleton<T, F>(factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> Result<T> + Send + Sync + 'static,
    {
        Self::new(ServiceLifetime::Singleton, factory)
    }

    /// Describe a scoped `T`
    pub fn scoped<T, F>(factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> Result<T> + Send + Sync + 'static,
    {
        Self::new(ServiceLifetime::Scoped, factory)
    }

    /// Describe a transient `T`
    pub fn transient<T, F>(factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> Result<T> + Send + Sync + 'static,
    {
        Self::new(ServiceLifetime::Transient, factory)
    }

    /// Describe a singleton backed by an already constructed instance
    pub fn instance<T: Send + Sync + 'static>(value: Arc<T>) -> Self {
        Self::describe(
            ServiceKey::of::<T>(),
            ServiceLifetime::Singleton,
            move |_| Ok(Arc::clone(&value) as Instance),
        )
    }

    /// The service type this descriptor registers
    pub fn key(&self) -> ServiceKey {
        self.key
    }

    /// The lifetime of resolved instances
    pub fn lifetime(&self) -> ServiceLifetime {
        self.lifetime
    }

    /// Type name of the registered service
    pub fn service_name(&self) -> &'static str {
        self.key.type_name()
    }

    /// Run the factory against `provider`
    pub(crate) fn create(&self, provider: &ServiceProvider) -> Result<Instance> {
        (self.factory)(provider)
    }
}

impl fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceDescriptor")
            .field("service", &self.key.type_name())
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}
