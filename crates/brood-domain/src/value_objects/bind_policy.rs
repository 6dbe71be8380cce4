//! Parent reference binding policy

use serde::{Deserialize, Serialize};

/// What happens when a parent reference that is already bound is bound again
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindPolicy {
    /// Rebinding to the same provider is a no-op; rebinding to a different
    /// provider fails with `Error::ParentMismatch`
    #[default]
    Strict,
    /// Rebinding silently replaces the previous provider
    LastWins,
}
