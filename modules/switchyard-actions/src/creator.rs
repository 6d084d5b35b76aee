//! Action creators: factories that stamp a fixed tag onto every action they build.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::action::Action;
use crate::traits::TagSource;

type Derive<Args> = Arc<dyn Fn(&Args) -> serde_json::Value + Send + Sync>;

/// Builds [`Action`]s with a fixed tag.
///
/// `Args` is whatever the caller passes to [`ActionCreator::create`]; use a
/// tuple for several arguments. `payload` / `meta` appear on the produced
/// action if and only if the matching deriving function was configured.
pub struct ActionCreator<Args = ()> {
    tag: String,
    to_payload: Option<Derive<Args>>,
    to_meta: Option<Derive<Args>>,
    _args: PhantomData<fn(Args)>,
}

/// Creator for actions that carry nothing but their tag.
pub fn create_action(tag: impl Into<String>) -> ActionCreator<()> {
    ActionCreator::new(tag)
}

impl<Args> ActionCreator<Args> {
    /// Creator with no deriving functions. `Args` is usually inferred from a
    /// later [`with_payload`](Self::with_payload) / [`with_meta`](Self::with_meta).
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            to_payload: None,
            to_meta: None,
            _args: PhantomData,
        }
    }

    pub fn with_payload<F>(mut self, f: F) -> Self
    where
        F: Fn(&Args) -> serde_json::Value + Send + Sync + 'static,
    {
        self.to_payload = Some(Arc::new(f));
        self
    }

    pub fn with_meta<F>(mut self, f: F) -> Self
    where
        F: Fn(&Args) -> serde_json::Value + Send + Sync + 'static,
    {
        self.to_meta = Some(Arc::new(f));
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn create(&self, args: Args) -> Action {
        Action {
            tag: self.tag.clone(),
            payload: self.to_payload.as_ref().map(|f| f(&args)),
            meta: self.to_meta.as_ref().map(|f| f(&args)),
        }
    }
}

impl<Args> TagSource for ActionCreator<Args> {
    fn tag(&self) -> &str {
        &self.tag
    }
}

impl<Args> Clone for ActionCreator<Args> {
    fn clone(&self) -> Self {
        Self {
            tag: self.tag.clone(),
            to_payload: self.to_payload.clone(),
            to_meta: self.to_meta.clone(),
            _args: PhantomData,
        }
    }
}

impl<Args> fmt::Debug for ActionCreator<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionCreator")
            .field("tag", &self.tag)
            .field("payload", &self.to_payload.is_some())
            .field("meta", &self.to_meta.is_some())
            .finish()
    }
}
