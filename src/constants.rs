//! Application-wide constants
//!
//! Defaults and environment variable names used by the demo binary.

// =============================================================================
// LOGGING DEFAULTS
// =============================================================================

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_RUST_LOG: &str = "info";

/// Default log output format
pub const DEFAULT_LOG_FORMAT: &str = "pretty";

// =============================================================================
// ENVIRONMENT VARIABLES
// =============================================================================

pub const ENV_RUST_LOG: &str = "RUST_LOG";

pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

/// Optional path to a JSON rule file run against the demo catalogue
pub const ENV_RULE_FILE: &str = "RULE_FILE";
