//! Resolution engine
//!
//! The host engine child containers are layered on: descriptors with
//! singleton, scoped and transient lifetimes, root providers, scopes,
//! disposal hooks and circular dependency detection.
//!
//! ```text
//! ServiceCollection ──build()──▶ ServiceProvider (root)
//!                                   │ create_scope()
//!                                   ▼
//!                               ServiceProvider (scope)
//! ```

pub mod bootstrap;
mod cache;
pub mod collection;
pub mod descriptor;
pub mod extensions;
pub(crate) mod guard;
pub mod provider;

pub use bootstrap::service_collection;
pub use collection::ServiceCollection;
pub use descriptor::{Instance, ServiceDescriptor, ServiceFactory};
pub use extensions::Extensions;
pub use provider::{ProviderOptions, ServiceProvider, WeakServiceProvider};
