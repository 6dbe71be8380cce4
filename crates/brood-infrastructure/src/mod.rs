//! # Infrastructure Layer
//!
//! The resolution engine, the child-container protocol layered on it, and
//! the cross-cutting concerns around them.
//!
//! ### Containers
//! | Module | Description |
//! |--------|-------------|
//! | [`di`] | Service collections, providers, scopes and lifetimes |
//! | [`children`] | Child containers with imports and forwards |
//!
//! ### Configuration & Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML and environment configuration via figment |
//! | [`constants`] | Centralized configuration constants |
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context helpers for foreign errors |

pub mod children;
pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use children::{ChildContainerExt, ChildDeclarations, ChildProviderFactory, ImportDescriptor};
pub use di::{ServiceCollection, ServiceDescriptor, ServiceProvider};
pub use error_ext::ErrorContext;
