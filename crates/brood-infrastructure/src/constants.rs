//! Infrastructure layer constants
//!
//! Domain-specific constants are defined in `brood_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "brood.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "brood";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "BROOD";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "BROOD_LOG";

/// File stem used for rolling log files when none is given
pub const DEFAULT_LOG_FILE_STEM: &str = "brood";

// ============================================================================
// CONTAINER CONSTANTS
// ============================================================================

/// Whether providers reject scoped resolutions from a root by default
pub const DEFAULT_VALIDATE_SCOPES: bool = true;
