//! Child container declarations
//!
//! The configuration-time record of every child declared on a collection.
//! Declarations hold recipes only. Each root built from the collection gets
//! its own [`ChildProviderFactory`](super::ChildProviderFactory) that reads
//! these recipes and materializes children into a registry of its own.

use super::bridge::ImportDescriptor;
use crate::config::ContainerConfig;
use crate::di::{ServiceCollection, ServiceProvider};
use brood_domain::error::{Error, Result};
use brood_domain::value_objects::{BindPolicy, ChildId};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Callback that registers a child's own services
///
/// Invoked once per composition root, when the child is first materialized
/// there, with that parent root so the child can use parent singletons
/// while registering.
pub type ConfigureChild =
    Arc<dyn Fn(&mut ServiceCollection, &ServiceProvider) -> Result<()> + Send + Sync>;

#[derive(Clone)]
pub(crate) struct ChildRecipe {
    pub(crate) services: ServiceCollection,
    pub(crate) configure: ConfigureChild,
    pub(crate) imports: Vec<ImportDescriptor>,
}

/// Build recipes of the child containers declared on one collection
#[derive(Default)]
pub struct ChildDeclarations {
    recipes: DashMap<ChildId, ChildRecipe>,
    bind_policy: BindPolicy,
}

impl ChildDeclarations {
    /// Empty declarations applying `bind_policy` to every child
    pub fn with_policy(bind_policy: BindPolicy) -> Self {
        Self {
            recipes: DashMap::new(),
            bind_policy,
        }
    }

    /// Empty declarations from container configuration
    pub fn from_config(config: &ContainerConfig) -> Self {
        Self::with_policy(config.bind_policy)
    }

    /// Record the build recipe for child `id`
    ///
    /// Returns `false`, keeping the existing recipe, when `id` was already
    /// declared.
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
        match self.recipes.entry(id) {
            Entry::Occupied(_) => {
                warn!(
                    child = %id,
                    "Child container already declared, keeping the first recipe"
                );
                false
            }
            Entry::Vacant(entry) => {
                debug!(child = %id, imports = imports.len(), "Declared child container");
                entry.insert(ChildRecipe {
                    services: child_services,
                    configure: Arc::new(configure),
                    imports,
                });
                true
            }
        }
    }

    /// Append an import to the recipe of `id`
    pub(crate) fn push_import(&self, id: ChildId, import: ImportDescriptor) -> Result<()> {
        let mut recipe = self
            .recipes
            .get_mut(&id)
            .ok_or_else(|| Error::unknown_child(id))?;
        recipe.imports.push(import);
        Ok(())
    }

    pub(crate) fn recipe(&self, id: ChildId) -> Option<ChildRecipe> {
        self.recipes.get(&id).map(|recipe| recipe.value().clone())
    }

    /// Whether `id` has been declared
    pub fn is_declared(&self, id: ChildId) -> bool {
        self.recipes.contains_key(&id)
    }

    /// Imports declared for `id`
    pub fn imports(&self, id: ChildId) -> Option<Vec<ImportDescriptor>> {
        self.recipes.get(&id).map(|recipe| recipe.imports.clone())
    }

    /// Number of declared children
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Whether no child has been declared
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// The policy applied when a parent reference is rebound
    pub fn bind_policy(&self) -> BindPolicy {
        self.bind_policy
    }
}

impl fmt::Debug for ChildDeclarations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChildDeclarations")
            .field("declared", &self.recipes.len())
            .field("bind_policy", &self.bind_policy)
            .finish()
    }
}
