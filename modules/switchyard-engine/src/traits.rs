//! Core traits for the dispatch engine.

use std::sync::Arc;

use switchyard_actions::ActionLike;

use crate::tags::TagSet;

/// Pure state transitions. No I/O, no side effects.
///
/// States travel as `Arc<State>`. Returning the input `Arc` means "nothing
/// changed"; callers detect change with `Arc::ptr_eq`, never by comparing
/// contents. `None` asks the reducer for its own initial state.
pub trait Reducer<A: ActionLike>: Send + Sync {
    type State: Send + Sync + 'static;

    fn reduce(&self, state: Option<Arc<Self::State>>, action: &A) -> Arc<Self::State>;

    /// Tags this reducer can respond to, if it can say.
    ///
    /// `Some` is a promise that every other tag returns the input state
    /// unchanged. Composites use it to skip dispatch entirely. The default
    /// `None` marks the reducer as opaque.
    fn handled_tags(&self) -> Option<TagSet> {
        None
    }
}

impl<A: ActionLike, R: Reducer<A> + ?Sized> Reducer<A> for Arc<R> {
    type State = R::State;

    fn reduce(&self, state: Option<Arc<Self::State>>, action: &A) -> Arc<Self::State> {
        (**self).reduce(state, action)
    }

    fn handled_tags(&self) -> Option<TagSet> {
        (**self).handled_tags()
    }
}
