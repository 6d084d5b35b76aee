//! Action processors: generic dispatchers with an optional fallback.

use std::fmt;
use std::sync::Arc;

use switchyard_actions::{ActionLike, TagSource};
use tracing::trace;

use crate::error::{ProcessError, ProcessResult};
use crate::registry::Registry;
use crate::tags::TagSet;

type HandlerFn<A, R> = Arc<dyn Fn(&A) -> R + Send + Sync>;

/// Routes an action to the handler registered for its tag, or to the
/// fallback when there is none.
///
/// Every result comes from exactly one handler. Handlers may perform side
/// effects; their failures (panics, or an `Err` when `R` is a `Result`) reach
/// the caller untouched.
pub struct ActionProcessor<A, R> {
    registry: Registry<HandlerFn<A, R>>,
    fallback: Option<HandlerFn<A, R>>,
}

/// Entry points mirroring the chaining methods on [`ActionProcessor`].
pub mod handle {
    use super::*;

    /// Processor that handles actions tagged like `source`.
    pub fn when<A, R, T, F>(source: T, f: F) -> ActionProcessor<A, R>
    where
        A: ActionLike + 'static,
        R: 'static,
        T: TagSource,
        F: Fn(&A) -> R + Send + Sync + 'static,
    {
        ActionProcessor::empty().when(source, f)
    }

    /// Processor that hands every action to `f`.
    pub fn otherwise<A, R, F>(f: F) -> ActionProcessor<A, R>
    where
        A: ActionLike + 'static,
        R: 'static,
        F: Fn(&A) -> R + Send + Sync + 'static,
    {
        ActionProcessor::empty().otherwise(f)
    }
}

impl<A, R> ActionProcessor<A, R>
where
    A: ActionLike + 'static,
    R: 'static,
{
    fn empty() -> Self {
        Self {
            registry: Registry::empty(),
            fallback: None,
        }
    }

    /// New processor that also handles `source`'s tag. The fallback carries over.
    pub fn when<T, F>(&self, source: T, f: F) -> Self
    where
        T: TagSource,
        F: Fn(&A) -> R + Send + Sync + 'static,
    {
        Self {
            registry: self.registry.extend(source.tag(), Arc::new(f)),
            fallback: self.fallback.clone(),
        }
    }

    /// New processor with the same handlers and `f` as the fallback.
    pub fn otherwise<F>(&self, f: F) -> Self
    where
        F: Fn(&A) -> R + Send + Sync + 'static,
    {
        Self {
            registry: self.registry.clone(),
            fallback: Some(Arc::new(f)),
        }
    }

    pub fn process(&self, action: &A) -> ProcessResult<R> {
        if let Some(handler) = self.registry.get(action.tag()) {
            return Ok(handler(action));
        }
        match &self.fallback {
            Some(fallback) => {
                trace!(tag = action.tag(), "no handler, using fallback");
                Ok(fallback(action))
            }
            None => Err(ProcessError::Unhandled {
                tag: action.tag().to_string(),
            }),
        }
    }
}

impl<A, R> ActionProcessor<A, R> {
    pub fn handles(&self, tag: &str) -> bool {
        self.registry.contains(tag)
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    pub fn handled_tags(&self) -> TagSet {
        self.registry.tags()
    }
}

impl<A, R> Clone for ActionProcessor<A, R> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            fallback: self.fallback.clone(),
        }
    }
}

impl<A, R> fmt::Debug for ActionProcessor<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionProcessor")
            .field("tags", &self.registry.tags())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}
