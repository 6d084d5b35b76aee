//! Reducer composer: build a `(state, action) -> state` function one tag at a time.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use switchyard_actions::{ActionLike, TagSource};

use crate::registry::Registry;
use crate::tags::TagSet;
use crate::traits::Reducer;

type TransitionFn<S, A> = Arc<dyn Fn(Arc<S>, &A) -> Arc<S> + Send + Sync>;

/// A reducer seeded with an initial state and extended with [`when`](Self::when).
///
/// Tags without a registered transition return the input state unchanged.
pub struct ReducerCreator<S, A> {
    initial: Arc<S>,
    registry: Registry<TransitionFn<S, A>>,
}

/// Starting point for a reducer: initial state, no accepted actions.
pub fn create_reducer<S, A>(initial_state: S) -> ReducerCreator<S, A>
where
    S: Send + Sync + 'static,
    A: ActionLike + 'static,
{
    ReducerCreator {
        initial: Arc::new(initial_state),
        registry: Registry::empty(),
    }
}

impl<S, A> ReducerCreator<S, A>
where
    S: Send + Sync + 'static,
    A: ActionLike + 'static,
{
    /// New reducer that also handles actions tagged like `source`.
    ///
    /// Re-registering a tag replaces its transition in the returned reducer
    /// only; `self` keeps its own table.
    pub fn when<T, F>(&self, source: T, transition: F) -> Self
    where
        T: TagSource,
        F: Fn(Arc<S>, &A) -> Arc<S> + Send + Sync + 'static,
    {
        Self {
            initial: Arc::clone(&self.initial),
            registry: self.registry.extend(source.tag(), Arc::new(transition)),
        }
    }

    pub fn initial_state(&self) -> &Arc<S> {
        &self.initial
    }
}

impl<S, A> Reducer<A> for ReducerCreator<S, A>
where
    S: Send + Sync + 'static,
    A: ActionLike + 'static,
{
    type State = S;

    fn reduce(&self, state: Option<Arc<S>>, action: &A) -> Arc<S> {
        let state = state.unwrap_or_else(|| Arc::clone(&self.initial));
        match self.registry.get(action.tag()) {
            Some(transition) => transition(state, action),
            None => state,
        }
    }

    fn handled_tags(&self) -> Option<TagSet> {
        Some(self.registry.tags())
    }
}

impl<S, A> Clone for ReducerCreator<S, A> {
    fn clone(&self) -> Self {
        Self {
            initial: Arc::clone(&self.initial),
            registry: self.registry.clone(),
        }
    }
}

impl<S, A> fmt::Debug for ReducerCreator<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducerCreator")
            .field("tags", &self.registry.tags())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Opaque closure reducers
// ---------------------------------------------------------------------------

/// A reducer backed by an arbitrary closure.
///
/// It cannot say which tags it handles, so any composite containing one
/// always dispatches to every child.
pub struct FnReducer<S, A, F> {
    initial: Arc<S>,
    f: F,
    _action: PhantomData<fn(&A)>,
}

pub fn reducer_fn<S, A, F>(initial_state: S, f: F) -> FnReducer<S, A, F>
where
    S: Send + Sync + 'static,
    A: ActionLike,
    F: Fn(Arc<S>, &A) -> Arc<S> + Send + Sync,
{
    FnReducer {
        initial: Arc::new(initial_state),
        f,
        _action: PhantomData,
    }
}

impl<S, A, F> Reducer<A> for FnReducer<S, A, F>
where
    S: Send + Sync + 'static,
    A: ActionLike,
    F: Fn(Arc<S>, &A) -> Arc<S> + Send + Sync,
{
    type State = S;

    fn reduce(&self, state: Option<Arc<S>>, action: &A) -> Arc<S> {
        (self.f)(state.unwrap_or_else(|| Arc::clone(&self.initial)), action)
    }
}
