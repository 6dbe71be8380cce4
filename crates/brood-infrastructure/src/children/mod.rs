//! Child containers
//!
//! Isolated sub-graphs of services declared on a parent collection. A child
//! can import parent services into its own resolution scope and forward its
//! services back out to the parent, with every service keeping its declared
//! lifetime across the boundary.
//!
//! | Module | Role |
//! |--------|------|
//! | [`builder`] | Configuration-time declaration of imports and forwards |
//! | [`declarations`] | Build recipes shared by every root of a collection |
//! | [`factory`] | Lifecycle manager: deferred build, binding, scoping |
//! | [`registry`] | At-most-once storage of built child roots |
//! | [`cell`] | Parent reference cells used by bridged imports |
//! | [`bridge`] | Import descriptors and their bridging factories |

pub mod bridge;
pub mod builder;
pub mod cell;
pub mod declarations;
pub mod factory;
pub mod registry;

pub use bridge::ImportDescriptor;
pub use builder::{ChildContainerBuilder, ChildContainerExt};
pub use cell::{ParentProviderCell, ScopedParentCell, SingletonParentCell};
pub use declarations::{ChildDeclarations, ConfigureChild};
pub use factory::ChildProviderFactory;
pub use registry::ChildContainerRegistry;
