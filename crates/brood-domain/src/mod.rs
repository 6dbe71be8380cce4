//! # Brood Domain
//!
//! Core types shared by every layer of brood: the error type, the value
//! objects that describe services and child containers, and constants.
//!
//! This crate carries no resolution logic. The resolution engine and the
//! child-container lifecycle live in `brood-infrastructure`.

pub mod constants;
pub mod error;
pub mod value_objects;

pub use error::{Error, Result};
pub use value_objects::{BindPolicy, ChildId, ServiceKey, ServiceLifetime};
