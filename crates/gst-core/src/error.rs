//! # Error Types
//!
//! Errors raised while constructing core values. The selector itself never
//! fails; these only surface when configuration supplies an unusable code.

use thiserror::Error;

/// Top-level error type for core value construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GstError {
    /// A region code was empty after trimming.
    #[error("{kind} code must not be empty")]
    EmptyRegionCode {
        /// Which kind of code was being parsed ("country" or "province").
        kind: &'static str,
    },
}
