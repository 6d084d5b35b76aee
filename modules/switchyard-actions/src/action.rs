//! The concrete tagged message type.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ActionError;
use crate::traits::ActionLike;

/// A tagged message. `payload` and `meta` are only present when the creator
/// that built the action was given a function deriving them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl Action {
    /// Create a bare action carrying only its tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            payload: None,
            meta: None,
        }
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_meta(mut self, meta: serde_json::Value) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Decode the payload into a concrete type.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, ActionError> {
        let payload = self.payload.as_ref().ok_or_else(|| ActionError::MissingPayload {
            tag: self.tag.clone(),
        })?;
        T::deserialize(payload).map_err(|source| ActionError::Decode {
            tag: self.tag.clone(),
            field: "payload",
            source,
        })
    }

    /// Decode the metadata into a concrete type.
    pub fn meta_as<T: DeserializeOwned>(&self) -> Result<T, ActionError> {
        let meta = self.meta.as_ref().ok_or_else(|| ActionError::MissingMeta {
            tag: self.tag.clone(),
        })?;
        T::deserialize(meta).map_err(|source| ActionError::Decode {
            tag: self.tag.clone(),
            field: "meta",
            source,
        })
    }
}

impl ActionLike for Action {
    fn tag(&self) -> &str {
        &self.tag
    }
}
