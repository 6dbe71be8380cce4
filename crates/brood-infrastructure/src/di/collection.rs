//! Service collection
//!
//! The configuration-time half of the resolution engine: an ordered list of
//! descriptors that becomes an immutable [`ServiceProvider`] once built.
//!
//! ```rust,ignore
//! let mut services = ServiceCollection::new();
//! services
//!     .add_singleton(|_| Ok(Database::connect("postgres://localhost")))
//!     .add_scoped(|sp| Ok(Repository::new(sp.get::<Database>()?)));
//!
//! let provider = services.build();
//! let scope = provider.create_scope()?;
//! let repository = scope.get::<Repository>()?;
//! ```

use super::descriptor::ServiceDescriptor;
use super::extensions::Extensions;
use super::provider::{ProviderOptions, ServiceProvider};
use brood_domain::error::Result;
use brood_domain::value_objects::ServiceKey;
use std::sync::Arc;

/// Ordered, mutable set of service registrations
///
/// When the same service type is registered more than once, the last
/// registration wins.
#[derive(Clone, Debug, Default)]
pub struct ServiceCollection {
    descriptors: Vec<ServiceDescriptor>,
    extensions: Extensions,
    options: ProviderOptions,
}

impl ServiceCollection {
    /// Create an empty collection with default provider options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty collection whose providers use `options`
    pub fn with_options(options: ProviderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Options applied to providers built from this collection
    pub fn options(&self) -> ProviderOptions {
        self.options
    }

    /// Replace the provider options
    pub fn set_options(&mut self, options: ProviderOptions) -> &mut Self {
        self.options = options;
        self
    }

    /// Add a descriptor
    pub fn add(&mut self, descriptor: ServiceDescriptor) -> &mut Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Add a descriptor unless its service type is already registered
    pub fn try_add(&mut self, descriptor: ServiceDescriptor) -> &mut Self {
        if !self.contains_key(descriptor.key()) {
            self.descriptors.push(descriptor);
        }
        self
    }

    /// Register a singleton `T` built by `factory`
    pub fn add_singleton<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> Result<T> + Send + Sync + 'static,
    {
        self.add(ServiceDescriptor::singleton(factory))
    }

    /// Register a scoped `T` built by `factory`
    pub fn add_scoped<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> Result<T> + Send + Sync + 'static,
    {
        self.add(ServiceDescriptor::scoped(factory))
    }

    /// Register a transient `T` built by `factory`
    pub fn add_transient<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> Result<T> + Send + Sync + 'static,
    {
        self.add(ServiceDescriptor::transient(factory))
    }

    /// Register an existing value as a singleton
    pub fn add_instance<T: Send + Sync + 'static>(&mut self, value: T) -> &mut Self {
        self.add(ServiceDescriptor::instance(Arc::new(value)))
    }

    /// Whether `T` is registered
    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.contains_key(ServiceKey::of::<T>())
    }

    /// Whether a service with `key` is registered
    pub fn contains_key(&self, key: ServiceKey) -> bool {
        self.descriptors.iter().any(|d| d.key() == key)
    }

    /// The effective descriptor for `key` (the last one registered)
    pub fn descriptor(&self, key: ServiceKey) -> Option<&ServiceDescriptor> {
        self.descriptors.iter().rev().find(|d| d.key() == key)
    }

    /// Registered descriptors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.descriptors.iter()
    }

    /// Number of descriptors, including overridden ones
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether no descriptors are registered
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Shared configuration-time components
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Shared configuration-time components (mutable)
    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }

    /// Build a root provider from the registrations
    ///
    /// The collection is left untouched, so it can be built again into an
    /// independent root.
    pub fn build(&self) -> ServiceProvider {
        ServiceProvider::new_root(self.descriptors.iter().cloned(), self.options)
    }
}
