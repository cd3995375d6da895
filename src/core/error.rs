//! Error types for lookup resolution.
//!
//! The core engine reports failures as [`LookupError`] values via `thiserror`.
//! The CLI layer wraps these with `anyhow` for user-facing diagnostics.

use thiserror::Error;

/// Errors that abort a lookup call or registry construction.
///
/// Document-load failures and unregistered delegation targets are deliberately
/// NOT errors: they are recovered locally (empty document / literal
/// pass-through) and only logged.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The lookup key could not be parsed into path segments.
    #[error("syntax error in key '{key}'")]
    Syntax { key: String },

    /// A data source produced a value whose type disagrees with the
    /// requested resolution strategy.
    #[error("type mismatch: expected {expected} and got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Tail-path descent hit a segment the merged answer does not contain.
    #[error("subkey '{segment}' not found")]
    SubkeyNotFound { segment: String },

    /// A configured backend names an implementation class the factory does
    /// not know. Fatal to router construction.
    #[error("'{name}' is not a known backend class")]
    UnknownBackendClass { name: String },

    /// Malformed backend or router configuration. Fatal to construction.
    #[error("invalid settings: {message}")]
    InvalidSettings { message: String },
}

impl LookupError {
    /// Create a syntax error for the given raw key.
    pub fn syntax(key: impl Into<String>) -> Self {
        Self::Syntax { key: key.into() }
    }

    /// Create an invalid-settings error from any displayable message.
    pub fn invalid_settings(message: impl Into<String>) -> Self {
        Self::InvalidSettings {
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout the core.
pub type Result<T> = std::result::Result<T, LookupError>;
