//! Service provider
//!
//! A [`ServiceProvider`] is a cheap, cloneable handle over either a root
//! (built from a [`ServiceCollection`](super::ServiceCollection)) or a scope
//! derived from that root.
//!
//! | Lifetime | Cached in | Factory receives |
//! |----------|-----------|------------------|
//! | Singleton | root | the root provider |
//! | Scoped | scope | the scope |
//! | Transient | nowhere | the resolving provider |
//!
//! Disposal is explicit through [`ServiceProvider::dispose`] and also
//! happens when the last handle to a scope (or root) is dropped. Hooks
//! registered with [`ServiceProvider::on_dispose`] run in reverse
//! registration order, which is how disposal graphs are composed.

use super::cache::InstanceCache;
use super::descriptor::{Instance, ServiceDescriptor};
use super::guard::ResolutionGuard;
use crate::constants::DEFAULT_VALIDATE_SCOPES;
use brood_domain::error::{Error, Result};
use brood_domain::value_objects::{ServiceKey, ServiceLifetime};
use serde::{Deserialize, Serialize};
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tracing::{debug, trace};

static NEXT_PROVIDER_ID: AtomicU64 = AtomicU64::new(1);

fn next_provider_id() -> u64 {
    NEXT_PROVIDER_ID.fetch_add(1, Ordering::Relaxed)
}

/// Behavior switches for built providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderOptions {
    /// Reject scoped resolutions from a root provider
    ///
    /// When disabled, a root behaves as its own scope for scoped services.
    pub validate_scopes: bool,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self {
            validate_scopes: DEFAULT_VALIDATE_SCOPES,
        }
    }
}

type DisposeHook = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct Lifecycle {
    disposed: AtomicBool,
    hooks: Mutex<Vec<DisposeHook>>,
}

impl Lifecycle {
    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    fn push(&self, hook: DisposeHook) -> Result<()> {
        let mut hooks = self.hooks.lock().unwrap_or_else(PoisonError::into_inner);
        if self.is_disposed() {
            return Err(Error::Disposed);
        }
        hooks.push(hook);
        Ok(())
    }

    /// Returns `false` when already disposed
    fn dispose(&self) -> bool {
        let hooks = {
            let mut hooks = self.hooks.lock().unwrap_or_else(PoisonError::into_inner);
            if self.disposed.swap(true, Ordering::AcqRel) {
                return false;
            }
            std::mem::take(&mut *hooks)
        };
        for hook in hooks.into_iter().rev() {
            hook();
        }
        true
    }
}

struct RootState {
    id: u64,
    registrations: HashMap<TypeId, ServiceDescriptor>,
    singletons: InstanceCache,
    root_scoped: InstanceCache,
    options: ProviderOptions,
    lifecycle: Lifecycle,
}

impl Drop for RootState {
    fn drop(&mut self) {
        self.lifecycle.dispose();
    }
}

struct ScopeState {
    id: u64,
    scoped: InstanceCache,
    lifecycle: Lifecycle,
}

impl Drop for ScopeState {
    fn drop(&mut self) {
        self.lifecycle.dispose();
    }
}

/// Handle over a root provider or one of its scopes
#[derive(Clone)]
pub struct ServiceProvider {
    root: Arc<RootState>,
    scope: Option<Arc<ScopeState>>,
}

impl ServiceProvider {
    pub(crate) fn new_root<I>(descriptors: I, options: ProviderOptions) -> Self
    where
        I: IntoIterator<Item = ServiceDescriptor>,
    {
        let mut registrations = HashMap::new();
        for descriptor in descriptors {
            registrations.insert(descriptor.key().type_id(), descriptor);
        }
        let root = RootState {
            id: next_provider_id(),
            registrations,
            singletons: InstanceCache::default(),
            root_scoped: InstanceCache::default(),
            options,
            lifecycle: Lifecycle::default(),
        };
        debug!(
            root = root.id,
            services = root.registrations.len(),
            "Built root service provider"
        );
        Self {
            root: Arc::new(root),
            scope: None,
        }
    }

    /// Resolve `T`
    pub fn get<T: Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        let key = ServiceKey::of::<T>();
        self.get_instance(key)?
            .downcast::<T>()
            .map_err(|_| Error::type_mismatch(key.type_name()))
    }

    /// Resolve `T`, returning `None` when it is not registered
    ///
    /// Failures other than a missing registration still surface as errors.
    pub fn try_get<T: Send + Sync + 'static>(&self) -> Result<Option<Arc<T>>> {
        if self.is_registered::<T>() {
            self.get::<T>().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Resolve the service identified by `key` as a type-erased instance
    pub fn get_instance(&self, key: ServiceKey) -> Result<Instance> {
        self.ensure_live()?;
        let descriptor = self
            .root
            .registrations
            .get(&key.type_id())
            .ok_or_else(|| Error::not_registered(key.type_name()))?;
        let _guard = ResolutionGuard::enter(self.root.id, key)?;

        trace!(
            root = self.root.id,
            service = key.type_name(),
            lifetime = %descriptor.lifetime(),
            "Resolving service"
        );

        match descriptor.lifetime() {
            ServiceLifetime::Singleton => {
                let root = self.root();
                self.root
                    .singletons
                    .get_or_create(key.type_id(), || descriptor.create(&root))
            }
            ServiceLifetime::Scoped => match &self.scope {
                Some(scope) => scope
                    .scoped
                    .get_or_create(key.type_id(), || descriptor.create(self)),
                None if self.root.options.validate_scopes => {
                    Err(Error::scoped_from_root(key.type_name()))
                }
                None => self
                    .root
                    .root_scoped
                    .get_or_create(key.type_id(), || descriptor.create(self)),
            },
            ServiceLifetime::Transient => descriptor.create(self),
        }
    }

    /// Whether `T` is registered with this provider's root
    pub fn is_registered<T: ?Sized + 'static>(&self) -> bool {
        self.contains_key(ServiceKey::of::<T>())
    }

    /// Whether a service with `key` is registered with this provider's root
    pub fn contains_key(&self, key: ServiceKey) -> bool {
        self.root.registrations.contains_key(&key.type_id())
    }

    /// Lifetime registered for `key`, if any
    pub fn lifetime_of(&self, key: ServiceKey) -> Option<ServiceLifetime> {
        self.root
            .registrations
            .get(&key.type_id())
            .map(ServiceDescriptor::lifetime)
    }

    /// Derive a new scope from this provider's root
    ///
    /// Creating a scope from a scope yields a sibling, not a nested scope.
    pub fn create_scope(&self) -> Result<ServiceProvider> {
        self.ensure_live()?;
        let scope = ScopeState {
            id: next_provider_id(),
            scoped: InstanceCache::default(),
            lifecycle: Lifecycle::default(),
        };
        debug!(root = self.root.id, scope = scope.id, "Created scope");
        Ok(Self {
            root: Arc::clone(&self.root),
            scope: Some(Arc::new(scope)),
        })
    }

    /// The root this provider derives from (itself when it is a root)
    pub fn root(&self) -> ServiceProvider {
        Self {
            root: Arc::clone(&self.root),
            scope: None,
        }
    }

    /// Whether this handle is a root rather than a scope
    pub fn is_root(&self) -> bool {
        self.scope.is_none()
    }

    /// Identifier of this root or scope, unique within the process
    pub fn id(&self) -> u64 {
        self.scope.as_ref().map_or(self.root.id, |scope| scope.id)
    }

    /// Identifier of the root this provider derives from
    pub fn root_id(&self) -> u64 {
        self.root.id
    }

    /// Options the root was built with
    pub fn options(&self) -> ProviderOptions {
        self.root.options
    }

    /// Whether both handles refer to the same root or the same scope
    pub fn same_as(&self, other: &ServiceProvider) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
            && match (&self.scope, &other.scope) {
                (None, None) => true,
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                _ => false,
            }
    }

    /// Whether both handles derive from the same root
    pub fn same_root(&self, other: &ServiceProvider) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
    }

    /// Non-owning handle that does not keep the provider alive
    pub fn downgrade(&self) -> WeakServiceProvider {
        WeakServiceProvider {
            root: Arc::downgrade(&self.root),
            scope: self.scope.as_ref().map(Arc::downgrade),
        }
    }

    /// Register a hook to run when this root or scope is disposed
    pub fn on_dispose<F>(&self, hook: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.lifecycle().push(Box::new(hook))
    }

    /// Dispose this root or scope
    ///
    /// Idempotent. Hooks run in reverse registration order and cached
    /// instances are released; later resolutions fail with `Error::Disposed`.
    pub fn dispose(&self) {
        if !self.lifecycle().dispose() {
            return;
        }
        match &self.scope {
            Some(scope) => {
                scope.scoped.clear();
                debug!(root = self.root.id, scope = scope.id, "Disposed scope");
            }
            None => {
                self.root.singletons.clear();
                self.root.root_scoped.clear();
                debug!(root = self.root.id, "Disposed root service provider");
            }
        }
    }

    /// Whether this provider (or, for a scope, its root) has been disposed
    pub fn is_disposed(&self) -> bool {
        self.root.lifecycle.is_disposed()
            || self
                .scope
                .as_ref()
                .is_some_and(|scope| scope.lifecycle.is_disposed())
    }

    /// Number of instances currently cached by this root or scope
    pub fn cached_instances(&self) -> usize {
        match &self.scope {
            Some(scope) => scope.scoped.len(),
            None => self.root.singletons.len() + self.root.root_scoped.len(),
        }
    }

    fn lifecycle(&self) -> &Lifecycle {
        self.scope
            .as_ref()
            .map_or(&self.root.lifecycle, |scope| &scope.lifecycle)
    }

    fn ensure_live(&self) -> Result<()> {
        if self.is_disposed() {
            Err(Error::Disposed)
        } else {
            Ok(())
        }
    }
}

impl fmt::Debug for ServiceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceProvider")
            .field("root", &self.root.id)
            .field("scope", &self.scope.as_ref().map(|scope| scope.id))
            .field("services", &self.root.registrations.len())
            .finish()
    }
}

/// Non-owning counterpart of [`ServiceProvider`]
#[derive(Clone, Debug)]
pub struct WeakServiceProvider {
    root: Weak<RootState>,
    scope: Option<Weak<ScopeState>>,
}

impl WeakServiceProvider {
    /// Recover a strong handle if the root (and scope) are still alive
    pub fn upgrade(&self) -> Option<ServiceProvider> {
        let root = self.root.upgrade()?;
        let scope = match &self.scope {
            Some(scope) => Some(scope.upgrade()?),
            None => None,
        };
        Some(ServiceProvider { root, scope })
    }

    /// Whether both handles point at the same root or scope
    pub fn ptr_eq(&self, other: &WeakServiceProvider) -> bool {
        Weak::ptr_eq(&self.root, &other.root)
            && match (&self.scope, &other.scope) {
                (None, None) => true,
                (Some(a), Some(b)) => Weak::ptr_eq(a, b),
                _ => false,
            }
    }
}
