//! Domain constants

/// Separator used when rendering a resolution path in diagnostics
pub const RESOLUTION_PATH_SEPARATOR: &str = " -> ";

/// Prefix used when a child container build appears on a resolution path
pub const CHILD_CONTAINER_PATH_PREFIX: &str = "child container ";
