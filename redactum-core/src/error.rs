//! Core error types

use thiserror::Error;

/// Errors raised by the domain layer
#[derive(Error, Debug)]
pub enum CoreError {
    /// A caller-supplied pattern failed to compile
    #[error("invalid pattern for category '{category}': {reason}")]
    InvalidPattern {
        /// The category label the pattern was registered under
        category: String,
        /// The compile error reported by the regex engine
        reason: String,
    },

    /// A custom category label is unusable
    #[error("invalid category label: {0}")]
    InvalidCategoryLabel(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
