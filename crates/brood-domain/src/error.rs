//! Error handling types

use crate::constants::RESOLUTION_PATH_SEPARATOR;
use crate::value_objects::{ChildId, ServiceLifetime};
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for brood
#[derive(Error, Debug)]
pub enum Error {
    /// No descriptor is registered for the requested service
    #[error("Service not registered: {service}")]
    NotRegistered {
        /// Type name of the requested service
        service: &'static str,
    },

    /// Resolution re-entered a service that is already being constructed
    #[error("Circular dependency detected: {}", .path.join(RESOLUTION_PATH_SEPARATOR))]
    CircularDependency {
        /// Services on the resolution stack, outermost first, ending with the repeated one
        path: Vec<String>,
    },

    /// A scoped service was requested from a root provider
    #[error("Scoped service {service} cannot be resolved from a root provider")]
    ScopedFromRoot {
        /// Type name of the scoped service
        service: &'static str,
    },

    /// The provider (root or scope) has already been disposed
    #[error("Service provider has been disposed")]
    Disposed,

    /// A factory produced an instance of a different type than its key
    #[error("Service {service} resolved to an instance of an unexpected type")]
    TypeMismatch {
        /// Type name of the requested service
        service: &'static str,
    },

    /// An import was resolved before its parent reference was bound
    #[error("Parent reference for {lifetime} imports was used before it was bound")]
    UnboundParentReference {
        /// Lifetime of the parent reference cell that was not bound
        lifetime: ServiceLifetime,
    },

    /// A child container was requested that was never declared
    #[error("Unknown child container: {id}")]
    UnknownChildIdentity {
        /// The identity that was requested
        id: ChildId,
    },

    /// A parent reference was rebound to a different provider under the strict policy
    #[error("Child container {id} is already bound to a different {lifetime} parent provider")]
    ParentMismatch {
        /// The child container whose cell was rebound
        id: ChildId,
        /// Lifetime of the rebound cell
        lifetime: ServiceLifetime,
    },

    /// The child container recipe can no longer change because it was already built
    #[error("Child container {id} has already been materialized")]
    ChildAlreadyMaterialized {
        /// The materialized child container
        id: ChildId,
    },

    /// A user-supplied factory failed
    #[error("Factory for {service} failed: {message}")]
    Factory {
        /// Type name of the service being constructed
        service: &'static str,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Resolution error creation methods
impl Error {
    /// Create a not registered error
    pub fn not_registered(service: &'static str) -> Self {
        Self::NotRegistered { service }
    }

    /// Create a circular dependency error from the offending resolution path
    pub fn circular_dependency<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::CircularDependency {
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a scoped-from-root error
    pub fn scoped_from_root(service: &'static str) -> Self {
        Self::ScopedFromRoot { service }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(service: &'static str) -> Self {
        Self::TypeMismatch { service }
    }

    /// Check whether this error reports a circular dependency
    pub fn is_circular_dependency(&self) -> bool {
        matches!(self, Self::CircularDependency { .. })
    }

    /// Check whether this error reports a missing registration
    pub fn is_not_registered(&self) -> bool {
        matches!(self, Self::NotRegistered { .. })
    }
}

// Child container error creation methods
impl Error {
    /// Create an unbound parent reference error
    pub fn unbound_parent_reference(lifetime: ServiceLifetime) -> Self {
        Self::UnboundParentReference { lifetime }
    }

    /// Create an unknown child identity error
    pub fn unknown_child(id: ChildId) -> Self {
        Self::UnknownChildIdentity { id }
    }

    /// Create a parent mismatch error
    pub fn parent_mismatch(id: ChildId, lifetime: ServiceLifetime) -> Self {
        Self::ParentMismatch { id, lifetime }
    }
}

// Factory error creation methods
impl Error {
    /// Create a factory error
    pub fn factory<S: Into<String>>(service: &'static str, message: S) -> Self {
        Self::Factory {
            service,
            message: message.into(),
            source: None,
        }
    }

    /// Create a factory error with source
    pub fn factory_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        service: &'static str,
        message: S,
        source: E,
    ) -> Self {
        Self::Factory {
            service,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration and internal error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
