//! Typed errors for reading action contents.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    /// The action was created without a payload
    #[error("action {tag:?} has no payload")]
    MissingPayload { tag: String },

    /// The action was created without metadata
    #[error("action {tag:?} has no metadata")]
    MissingMeta { tag: String },

    /// The field exists but does not match the requested shape
    #[error("failed to decode {field} of action {tag:?}: {source}")]
    Decode {
        tag: String,
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
