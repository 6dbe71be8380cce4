//! Composition root bootstrap
//!
//! Turns configuration into a service collection that is ready for
//! registrations: provider options applied and child declarations with the
//! configured binding policy installed.
//!
//! ```rust,ignore
//! let config = ConfigLoader::new().load()?;
//! let mut services = service_collection(&config);
//! services.add_child_container(|child, _| Ok(())).forward_singleton::<Mailer>();
//! let provider = services.build();
//! ```

use crate::children::{ChildContainerExt, ChildDeclarations};
use crate::config::AppConfig;
use crate::di::ServiceCollection;
use std::sync::Arc;
use tracing::info;

/// Create the composition root's service collection from `config`
pub fn service_collection(config: &AppConfig) -> ServiceCollection {
    let mut services = ServiceCollection::with_options(config.containers.provider_options());
    services
        .extensions_mut()
        .insert(Arc::new(ChildDeclarations::from_config(&config.containers)));
    services.child_declarations();

    info!(
        bind_policy = ?config.containers.bind_policy,
        validate_scopes = config.containers.validate_scopes,
        "Prepared service collection"
    );
    services
}
