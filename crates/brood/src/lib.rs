//! # Brood
//!
//! Child service containers for a lifetime-aware dependency injection
//! runtime.
//!
//! A child container is an independently configured sub-graph of services
//! declared on a parent collection. It can import parent services into its
//! own resolution scope and forward its services back out to the parent,
//! and every service keeps its declared lifetime (singleton, scoped,
//! transient) across the boundary.
//!
//! ## Example
//!
//! ```
//! use brood::prelude::*;
//!
//! struct Settings {
//!     sender: String,
//! }
//!
//! struct Mailer {
//!     sender: String,
//! }
//!
//! # fn main() -> brood::Result<()> {
//! let mut services = ServiceCollection::new();
//! services.add_singleton(|_| {
//!     Ok(Settings {
//!         sender: "noreply@example.com".to_string(),
//!     })
//! });
//! services
//!     .add_child_container(|child, parent| {
//!         let settings = parent.get::<Settings>()?;
//!         child.add_singleton(move |_| {
//!             Ok(Mailer {
//!                 sender: settings.sender.clone(),
//!             })
//!         });
//!         Ok(())
//!     })
//!     .forward_singleton::<Mailer>();
//!
//! let provider = services.build();
//! let mailer = provider.get::<Mailer>()?;
//! assert_eq!(mailer.sender, "noreply@example.com");
//! assert!(std::sync::Arc::ptr_eq(&mailer, &provider.get::<Mailer>()?));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Error type and value objects
//! - `infrastructure` - Resolution engine, child containers, configuration, logging

/// Domain layer - error type and value objects
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use brood_domain::*;
}

/// Infrastructure layer - containers, configuration and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use brood_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::{BindPolicy, ChildId, Error, Result, ServiceKey, ServiceLifetime};

// Re-export container types at the crate root
pub use infrastructure::children::{
    ChildContainerBuilder, ChildContainerExt, ChildContainerRegistry, ChildDeclarations,
    ChildProviderFactory, ImportDescriptor,
};
pub use infrastructure::config::{AppConfig, ConfigLoader};
pub use infrastructure::di::{
    ProviderOptions, ServiceCollection, ServiceDescriptor, ServiceProvider, service_collection,
};
pub use infrastructure::logging::init_logging;

/// Everything needed to declare and resolve services
pub mod prelude {
    pub use crate::{
        ChildContainerExt, Error, ImportDescriptor, Result, ServiceCollection,
        ServiceDescriptor, ServiceLifetime, ServiceProvider,
    };
}
