use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Unified error type for verselect operations.
#[derive(Debug, Error, Diagnostic)]
pub enum VerselectError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or unreadable engine configuration (e.g. verselect.toml).
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check your verselect.toml for syntax errors"))]
    Config { message: String },

    /// Repository metadata could not be read or parsed.
    #[error("Metadata error: {message}")]
    Metadata { message: String },

    /// A version selector that could not be parsed.
    #[error("invalid version selector '{selector}': {reason}")]
    #[diagnostic(code(verselect::selector_syntax))]
    Selector {
        #[source_code]
        selector: String,
        #[label("here")]
        span: SourceSpan,
        reason: String,
        #[help]
        hint: String,
    },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type VerselectResult<T> = miette::Result<T>;
