//! Theme error types

use thiserror::Error;

/// Errors raised when parsing theme keys from strings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    /// The string does not name a known key of this kind
    #[error("unknown {kind} key '{key}' (expected one of: {expected})")]
    UnknownKey {
        kind: &'static str,
        key: String,
        expected: String,
    },
}
