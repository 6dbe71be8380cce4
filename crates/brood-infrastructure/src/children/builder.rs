//! Child container registration
//!
//! Configuration-time API for declaring child containers on a parent
//! [`ServiceCollection`].
//!
//! ```rust,ignore
//! services
//!     .add_singleton(|_| Ok(Settings::default()))
//!     .add_child_container(|child, parent| {
//!         let settings = parent.get::<Settings>()?;
//!         child.add_singleton(move |_| Ok(Mailer::new(&settings)));
//!         Ok(())
//!     })
//!     .import_scoped::<RequestContext>()
//!     .forward_singleton::<Mailer>();
//! ```
//!
//! The child is declared when the builder is dropped, so every import
//! chained on the builder is part of the recorded recipe. Forwards are
//! registered on the parent immediately. Recipes live on the collection;
//! each root built from it resolves its own [`ChildProviderFactory`].

use super::bridge::ImportDescriptor;
use super::declarations::{ChildDeclarations, ConfigureChild};
use super::factory::ChildProviderFactory;
use crate::di::{ServiceCollection, ServiceDescriptor, ServiceProvider};
use brood_domain::error::Result;
use brood_domain::value_objects::{ChildId, ServiceKey, ServiceLifetime};
use std::sync::Arc;

/// Child container registration on a service collection
pub trait ChildContainerExt {
    /// Declare a child container whose services are registered by `configure`
    fn add_child_container<F>(&mut self, configure: F) -> ChildContainerBuilder<'_>
    where
        F: Fn(&mut ServiceCollection, &ServiceProvider) -> Result<()> + Send + Sync + 'static;

    /// Declare a child container seeded with `child_services`
    fn add_child_container_with<F>(
        &mut self,
        child_services: ServiceCollection,
        configure: F,
    ) -> ChildContainerBuilder<'_>
    where
        F: Fn(&mut ServiceCollection, &ServiceProvider) -> Result<()> + Send + Sync + 'static;

    /// The child declarations of this collection, created on first use
    ///
    /// Also registers the per-root [`ChildProviderFactory`] singleton.
    fn child_declarations(&mut self) -> Arc<ChildDeclarations>;
}

impl ChildContainerExt for ServiceCollection {
    fn add_child_container<F>(&mut self, configure: F) -> ChildContainerBuilder<'_>
    where
        F: Fn(&mut ServiceCollection, &ServiceProvider) -> Result<()> + Send + Sync + 'static,
    {
        self.add_child_container_with(ServiceCollection::new(), configure)
    }

    fn add_child_container_with<F>(
        &mut self,
        child_services: ServiceCollection,
        configure: F,
    ) -> ChildContainerBuilder<'_>
    where
        F: Fn(&mut ServiceCollection, &ServiceProvider) -> Result<()> + Send + Sync + 'static,
    {
        let declarations = self.child_declarations();
        ChildContainerBuilder {
            parent: self,
            declarations,
            id: ChildId::new(),
            child_services,
            configure: Some(Arc::new(configure)),
            imports: Vec::new(),
        }
    }

    fn child_declarations(&mut self) -> Arc<ChildDeclarations> {
        let declarations = self
            .extensions_mut()
            .get_or_insert_with(ChildDeclarations::default);
        let shared = Arc::clone(&declarations);
        self.try_add(ServiceDescriptor::singleton(move |_| {
            Ok(ChildProviderFactory::for_root(Arc::clone(&shared)))
        }));
        declarations
    }
}

/// Imports and forwards of one child container
pub struct ChildContainerBuilder<'a> {
    parent: &'a mut ServiceCollection,
    declarations: Arc<ChildDeclarations>,
    id: ChildId,
    child_services: ServiceCollection,
    configure: Option<ConfigureChild>,
    imports: Vec<ImportDescriptor>,
}

impl ChildContainerBuilder<'_> {
    /// Identity of the child being declared
    pub fn id(&self) -> ChildId {
        self.id
    }

    /// Let the child resolve a parent service
    pub fn import(&mut self, import: ImportDescriptor) -> &mut Self {
        self.imports.push(import);
        self
    }

    /// Import a parent singleton `T`
    pub fn import_singleton<T: Send + Sync + 'static>(&mut self) -> &mut Self {
        self.import(ImportDescriptor::singleton::<T>())
    }

    /// Import a parent scoped `T`, resolved against the caller's parent scope
    pub fn import_scoped<T: Send + Sync + 'static>(&mut self) -> &mut Self {
        self.import(ImportDescriptor::scoped::<T>())
    }

    /// Import a parent transient `T`
    pub fn import_transient<T: Send + Sync + 'static>(&mut self) -> &mut Self {
        self.import(ImportDescriptor::transient::<T>())
    }

    /// Let the parent resolve the child service identified by `key`
    pub fn forward(&mut self, key: ServiceKey, lifetime: ServiceLifetime) -> &mut Self {
        self.parent.add(forward_descriptor(self.id, key, lifetime));
        self
    }

    /// Forward a child singleton `T`: one instance per parent root
    pub fn forward_singleton<T: Send + Sync + 'static>(&mut self) -> &mut Self {
        self.forward(ServiceKey::of::<T>(), ServiceLifetime::Singleton)
    }

    /// Forward a child scoped `T`: one instance per parent scope
    pub fn forward_scoped<T: Send + Sync + 'static>(&mut self) -> &mut Self {
        self.forward(ServiceKey::of::<T>(), ServiceLifetime::Scoped)
    }

    /// Forward a child transient `T`: a fresh instance per resolution
    ///
    /// Resolved from a parent scope, every resolution opens its own child
    /// scope, which stays alive until that parent scope is disposed. A
    /// long-lived scope that resolves `T` repeatedly grows accordingly.
    pub fn forward_transient<T: Send + Sync + 'static>(&mut self) -> &mut Self {
        self.forward(ServiceKey::of::<T>(), ServiceLifetime::Transient)
    }

    /// The parent collection, for further registrations
    pub fn parent(&mut self) -> &mut ServiceCollection {
        self.parent
    }

    /// Declare the child now and return its identity
    pub fn finish(self) -> ChildId {
        self.id
    }
}

impl Drop for ChildContainerBuilder<'_> {
    fn drop(&mut self) {
        let Some(configure) = self.configure.take() else {
            return;
        };
        let child_services = std::mem::take(&mut self.child_services);
        let imports = std::mem::take(&mut self.imports);
        self.declarations.declare(
            self.id,
            child_services,
            move |services, parent| configure(services, parent),
            imports,
        );
    }
}

/// The parent-side descriptor that resolves `key` from child `id`
fn forward_descriptor(
    id: ChildId,
    key: ServiceKey,
    lifetime: ServiceLifetime,
) -> ServiceDescriptor {
    ServiceDescriptor::describe(key, lifetime, move |parent| {
        let factory = parent.get::<ChildProviderFactory>()?;
        let child = match lifetime {
            ServiceLifetime::Singleton => factory.get_singleton_provider(id, parent)?,
            ServiceLifetime::Transient if parent.is_root() => {
                factory.get_singleton_provider(id, parent)?
            }
            ServiceLifetime::Scoped | ServiceLifetime::Transient => {
                let scope = factory.get_scoped_provider(id, parent)?;
                let owned = scope.clone();
                parent.on_dispose(move || owned.dispose())?;
                scope
            }
        };
        child.get_instance(key)
    })
}
