//! Typed errors for dispatch.

use thiserror::Error;

/// Errors returned by [`crate::ActionProcessor::process`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProcessError {
    /// No handler is registered for the tag and no fallback was configured.
    /// This is a caller contract violation, not a recoverable condition.
    #[error("no handler registered for action {tag:?} and no fallback configured")]
    Unhandled { tag: String },
}

/// Result type alias for processor dispatch.
pub type ProcessResult<T> = std::result::Result<T, ProcessError>;
