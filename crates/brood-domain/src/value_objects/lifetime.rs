//! Service lifetimes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sharing policy for a resolved instance
///
/// - `Singleton`: one instance per root provider
/// - `Scoped`: one instance per scope derived from a root
/// - `Transient`: a fresh instance per resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceLifetime {
    /// Single instance per root provider, cached until the root is disposed
    Singleton,
    /// Single instance per scope, cached until the scope is disposed
    Scoped,
    /// New instance per resolution, never cached
    Transient,
}

impl ServiceLifetime {
    /// Lowercase name used in logs and configuration
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Singleton => "singleton",
            Self::Scoped => "scoped",
            Self::Transient => "transient",
        }
    }

    /// Whether instances of this lifetime are cached by a provider
    pub fn is_cached(self) -> bool {
        !matches!(self, Self::Transient)
    }
}

impl fmt::Display for ServiceLifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
