//! Value objects describing services and child containers

pub mod bind_policy;
pub mod child_id;
pub mod lifetime;
pub mod service_key;

pub use bind_policy::BindPolicy;
pub use child_id::ChildId;
pub use lifetime::ServiceLifetime;
pub use service_key::ServiceKey;
