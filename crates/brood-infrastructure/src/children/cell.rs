//! Parent reference cells
//!
//! A child container resolves imports through a cell that holds the parent
//! provider relevant to the current resolution. Two cell types are
//! registered into every child:
//!
//! | Cell | Child lifetime | Bound to | Used by |
//! |------|----------------|----------|---------|
//! | [`SingletonParentCell`] | singleton | the parent root | singleton and transient imports |
//! | [`ScopedParentCell`] | scoped | the parent scope | scoped imports |
//!
//! Cells hold a weak reference, so a child never keeps its parent alive.

use crate::di::{ServiceProvider, WeakServiceProvider};
use brood_domain::error::{Error, Result};
use brood_domain::value_objects::{BindPolicy, ChildId, ServiceLifetime};
use std::ops::Deref;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// Holder of the parent provider a child resolves imports against
pub struct ParentProviderCell {
    child: ChildId,
    lifetime: ServiceLifetime,
    policy: BindPolicy,
    parent: RwLock<Option<WeakServiceProvider>>,
}

impl ParentProviderCell {
    /// Create an unbound cell
    pub fn new(child: ChildId, lifetime: ServiceLifetime, policy: BindPolicy) -> Self {
        Self {
            child,
            lifetime,
            policy,
            parent: RwLock::new(None),
        }
    }

    /// Bind the cell to `parent`
    ///
    /// Binding the provider already held is a no-op. Binding a different
    /// live provider fails with `Error::ParentMismatch` under
    /// [`BindPolicy::Strict`] and replaces it under [`BindPolicy::LastWins`].
    pub fn bind(&self, parent: &ServiceProvider) -> Result<()> {
        let candidate = parent.downgrade();
        let mut slot = self.parent.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(current) = slot.as_ref() {
            if current.ptr_eq(&candidate) {
                return Ok(());
            }
            if self.policy == BindPolicy::Strict && current.upgrade().is_some() {
                return Err(Error::parent_mismatch(self.child, self.lifetime));
            }
        }

        debug!(
            child = %self.child,
            lifetime = %self.lifetime,
            parent = parent.id(),
            "Bound parent provider"
        );
        *slot = Some(candidate);
        Ok(())
    }

    /// The bound parent provider
    ///
    /// Fails with `Error::UnboundParentReference` before [`bind`](Self::bind)
    /// and with `Error::Disposed` once the parent has been dropped.
    pub fn get(&self) -> Result<ServiceProvider> {
        let slot = self.parent.read().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref()
            .ok_or_else(|| Error::unbound_parent_reference(self.lifetime))?
            .upgrade()
            .ok_or(Error::Disposed)
    }

    /// Whether a parent has been bound
    pub fn is_bound(&self) -> bool {
        self.parent
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The child container owning this cell
    pub fn child(&self) -> ChildId {
        self.child
    }

    /// The child-side lifetime of this cell
    pub fn lifetime(&self) -> ServiceLifetime {
        self.lifetime
    }
}

/// Parent root reference, one per child container
pub struct SingletonParentCell(ParentProviderCell);

impl SingletonParentCell {
    pub fn new(child: ChildId, policy: BindPolicy) -> Self {
        Self(ParentProviderCell::new(
            child,
            ServiceLifetime::Singleton,
            policy,
        ))
    }
}

impl Deref for SingletonParentCell {
    type Target = ParentProviderCell;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Parent scope reference, one per child scope
pub struct ScopedParentCell(ParentProviderCell);

impl ScopedParentCell {
    pub fn new(child: ChildId, policy: BindPolicy) -> Self {
        Self(ParentProviderCell::new(child, ServiceLifetime::Scoped, policy))
    }
}

impl Deref for ScopedParentCell {
    type Target = ParentProviderCell;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
