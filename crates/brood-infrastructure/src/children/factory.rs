//! Child provider lifecycle manager
//!
//! [`ChildProviderFactory`] records how each child container is built,
//! materializes a child root provider on first use through the
//! [`ChildContainerRegistry`], and hands out resolution handles bound to
//! the caller's parent provider.
//!
//! ```text
//! declare(id, services, configure, imports)     configuration time, no build
//!                 │
//!                 ▼ first get_*_provider(id, parent)
//! registry.get_or_build(id)
//!   ├─ register SingletonParentCell + ScopedParentCell
//!   ├─ configure(child_services, parent_root)
//!   ├─ one bridging descriptor per import
//!   └─ build child root, dispose it with the parent root
//!                 │
//!                 ▼ every call
//! bind singleton cell → parent root
//! get_scoped_provider: fresh child scope, bind scoped cell → parent
//! ```
//!
//! One factory belongs to one composition root. Building a collection
//! registers a fresh factory as a root singleton, so two roots built from
//! the same (or a cloned) collection share recipes but never child state.

use super::bridge::{ImportDescriptor, bridge_descriptor};
use super::cell::{ScopedParentCell, SingletonParentCell};
use super::declarations::{ChildDeclarations, ChildRecipe};
use super::registry::ChildContainerRegistry;
use crate::config::ContainerConfig;
use crate::di::{ServiceCollection, ServiceDescriptor, ServiceProvider};
use brood_domain::error::{Error, Result};
use brood_domain::value_objects::{BindPolicy, ChildId};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Builds, caches and scopes child containers for one composition root
pub struct ChildProviderFactory {
    declarations: Arc<ChildDeclarations>,
    registry: Arc<ChildContainerRegistry>,
}

impl Default for ChildProviderFactory {
    fn default() -> Self {
        Self::with_policy(BindPolicy::default())
    }
}

impl ChildProviderFactory {
    /// Create a factory reading `declarations` and storing built children in `registry`
    pub fn new(
        declarations: Arc<ChildDeclarations>,
        registry: Arc<ChildContainerRegistry>,
    ) -> Self {
        Self {
            declarations,
            registry,
        }
    }

    /// Create a factory over shared `declarations` with an empty registry
    pub fn for_root(declarations: Arc<ChildDeclarations>) -> Self {
        Self::new(declarations, Arc::new(ChildContainerRegistry::new()))
    }

    /// Create a standalone factory with the given binding policy
    pub fn with_policy(bind_policy: BindPolicy) -> Self {
        Self::for_root(Arc::new(ChildDeclarations::with_policy(bind_policy)))
    }

    /// Create a standalone factory from container configuration
    pub fn from_config(config: &ContainerConfig) -> Self {
        Self::with_policy(config.bind_policy)
    }

    /// Record the build recipe for child `id`
    ///
    /// Nothing is built here. Returns `false`, keeping the existing recipe,
    /// when `id` was already declared.
    pub fn declare<F>(
        &self,
        id: ChildId,
        child_services: ServiceCollection,
        configure: F,
        imports: Vec<ImportDescriptor>,
    ) -> bool
    where
        F: Fn(&mut ServiceCollection, &ServiceProvider) -> Result<()> + Send + Sync + 'static,
    {
        self.declarations.declare(id, child_services, configure, imports)
    }

    /// Append an import to a declared child that has not been built yet
    pub fn add_import(&self, id: ChildId, import: ImportDescriptor) -> Result<()> {
        if self.registry.is_built(id) {
            return Err(Error::ChildAlreadyMaterialized { id });
        }
        self.declarations.push_import(id, import)
    }

    /// Whether `id` has been declared
    pub fn is_declared(&self, id: ChildId) -> bool {
        self.declarations.is_declared(id)
    }

    /// Imports declared for `id`
    pub fn imports(&self, id: ChildId) -> Option<Vec<ImportDescriptor>> {
        self.declarations.imports(id)
    }

    /// Number of declared children
    pub fn declared_count(&self) -> usize {
        self.declarations.len()
    }

    /// The recipes this factory builds from
    pub fn declarations(&self) -> &Arc<ChildDeclarations> {
        &self.declarations
    }

    /// The registry holding built children
    pub fn registry(&self) -> &Arc<ChildContainerRegistry> {
        &self.registry
    }

    /// The policy applied when a parent reference is rebound
    pub fn bind_policy(&self) -> BindPolicy {
        self.declarations.bind_policy()
    }

    /// A fresh child scope bound to `parent`
    ///
    /// Scoped imports resolved from the returned scope delegate to `parent`;
    /// singleton and transient imports delegate to `parent`'s root. The
    /// scope is bound before it is returned, so no caller can observe it
    /// unbound. Call once per parent-side scope.
    pub fn get_scoped_provider(
        &self,
        id: ChildId,
        parent: &ServiceProvider,
    ) -> Result<ServiceProvider> {
        let child = self.bound_root(id, parent)?;
        let scope = child.create_scope()?;
        scope.get::<ScopedParentCell>()?.bind(parent)?;
        debug!(
            child = %id,
            scope = scope.id(),
            parent = parent.id(),
            "Created child scope"
        );
        Ok(scope)
    }

    /// The child root provider, bound to `parent`'s root
    ///
    /// Used for forwarded singleton and transient services that need no
    /// child scope.
    pub fn get_singleton_provider(
        &self,
        id: ChildId,
        parent: &ServiceProvider,
    ) -> Result<ServiceProvider> {
        self.bound_root(id, parent)
    }

    fn bound_root(&self, id: ChildId, parent: &ServiceProvider) -> Result<ServiceProvider> {
        let parent_root = parent.root();
        let child = self.materialize(id, &parent_root)?;
        child.get::<SingletonParentCell>()?.bind(&parent_root)?;
        Ok(child)
    }

    fn materialize(&self, id: ChildId, parent_root: &ServiceProvider) -> Result<ServiceProvider> {
        if let Some(child) = self.registry.get(id) {
            return Ok(child);
        }
        if !self.is_declared(id) {
            return Err(Error::unknown_child(id));
        }
        self.registry
            .get_or_build(id, || self.build_child(id, parent_root))
    }

    fn build_child(&self, id: ChildId, parent_root: &ServiceProvider) -> Result<ServiceProvider> {
        let ChildRecipe {
            mut services,
            configure,
            imports,
        } = self
            .declarations
            .recipe(id)
            .ok_or_else(|| Error::unknown_child(id))?;

        let policy = self.bind_policy();
        services
            .add(ServiceDescriptor::singleton(move |_| {
                Ok(SingletonParentCell::new(id, policy))
            }))
            .add(ServiceDescriptor::scoped(move |_| {
                Ok(ScopedParentCell::new(id, policy))
            }));

        configure(&mut services, parent_root)?;

        for import in &imports {
            services.add(bridge_descriptor(*import));
        }

        services.set_options(parent_root.options());
        let child = services.build();

        let disposer = child.clone();
        parent_root.on_dispose(move || disposer.dispose())?;

        info!(
            child = %id,
            root = child.root_id(),
            parent = parent_root.id(),
            imports = imports.len(),
            services = services.len(),
            "Materialized child container"
        );
        Ok(child)
    }
}

impl fmt::Debug for ChildProviderFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChildProviderFactory")
            .field("declarations", &self.declarations)
            .field("registry", &self.registry)
            .finish()
    }
}
