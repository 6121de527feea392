//! Configuration errors.

use gst_core::GstError;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("{0} environment variable is required")]
    Missing(String),
    /// A variable is set but does not parse.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Parser message.
        message: String,
    },
    /// A variable is not a valid URL. Holds the variable name and the
    /// parser message.
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    /// A province or country code variable is unusable.
    #[error("{key}: {source}")]
    Region {
        /// Variable name.
        key: String,
        /// Why the code was rejected.
        #[source]
        source: GstError,
    },
    /// Some, but not all, variables of an all-or-none group are set.
    #[error("{group} is partially configured; missing {}", missing.join(", "))]
    Incomplete {
        /// Human-readable name of the group.
        group: &'static str,
        /// Variables of the group that are unset.
        missing: Vec<String>,
    },
}
