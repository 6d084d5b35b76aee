//! Composite reducers over a keyed aggregate state.
//!
//! Each key of a [`CombinedState`] belongs to exactly one child reducer. A
//! dispatch that changes no child returns the previous state `Arc` itself, so
//! "did anything change" stays a pointer comparison at every nesting level.
//! When every child declares its handled tags, unknown tags skip the children
//! altogether.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use switchyard_actions::ActionLike;
use tracing::{debug, trace, warn};

use crate::tags::TagSet;
use crate::traits::Reducer;

/// A child state with its concrete type erased.
pub type AnyState = Arc<dyn Any + Send + Sync>;

fn same_state(a: &AnyState, b: &AnyState) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

// ---------------------------------------------------------------------------
// CombinedState
// ---------------------------------------------------------------------------

/// Keyed aggregate produced by a [`CombinedReducer`].
#[derive(Clone, Default)]
pub struct CombinedState {
    entries: Vec<(Arc<str>, AnyState)>,
}

impl CombinedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any previous value.
    pub fn with<T>(mut self, key: &str, value: Arc<T>) -> Self
    where
        T: Send + Sync + 'static,
    {
        let value: AnyState = value;
        match self.entries.iter_mut().find(|(k, _)| &**k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((Arc::from(key), value)),
        }
        self
    }

    /// Typed read of one child's state. `None` if the key is absent or holds
    /// a different type.
    pub fn get<T>(&self, key: &str) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        self.get_any(key)
            .and_then(|value| Arc::clone(value).downcast::<T>().ok())
    }

    pub fn get_any(&self, key: &str) -> Option<&AnyState> {
        self.entries
            .iter()
            .find(|(k, _)| &**k == key)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| &**k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Previous value for the child at `index`. States built by the same
    /// composite keep child order, so the positional hit is the common case.
    fn previous(&self, index: usize, key: &str) -> Option<&AnyState> {
        match self.entries.get(index) {
            Some((k, value)) if &**k == key => Some(value),
            _ => self.get_any(key),
        }
    }
}

impl fmt::Debug for CombinedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinedState")
            .field("keys", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Type-erased children
// ---------------------------------------------------------------------------

trait ErasedReducer<A>: Send + Sync {
    fn reduce_any(&self, key: &str, state: Option<&AnyState>, action: &A) -> AnyState;
    fn declared_tags(&self) -> Option<TagSet>;
    fn accepts(&self, state: &AnyState) -> bool;
}

impl<A, R> ErasedReducer<A> for R
where
    A: ActionLike,
    R: Reducer<A>,
{
    fn reduce_any(&self, key: &str, state: Option<&AnyState>, action: &A) -> AnyState {
        let previous = match state {
            Some(value) => match Arc::clone(value).downcast::<R::State>() {
                Ok(typed) => Some(typed),
                Err(_) => {
                    warn!(key, "child state has unexpected type, reducing from default");
                    None
                }
            },
            None => None,
        };
        self.reduce(previous, action)
    }

    fn declared_tags(&self) -> Option<TagSet> {
        <R as Reducer<A>>::handled_tags(self)
    }

    fn accepts(&self, state: &AnyState) -> bool {
        (**state).is::<R::State>()
    }
}

// ---------------------------------------------------------------------------
// ReducerMap
// ---------------------------------------------------------------------------

/// Named child reducers, in insertion order.
pub struct ReducerMap<A> {
    children: Vec<(Arc<str>, Arc<dyn ErasedReducer<A>>)>,
}

impl<A: ActionLike> ReducerMap<A> {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
        }
    }

    /// Add a child under `key`. An existing key is replaced in place.
    pub fn insert<R>(mut self, key: &str, reducer: R) -> Self
    where
        R: Reducer<A> + 'static,
    {
        let reducer: Arc<dyn ErasedReducer<A>> = Arc::new(reducer);
        match self.children.iter_mut().find(|(k, _)| &**k == key) {
            Some(entry) => entry.1 = reducer,
            None => self.children.push((Arc::from(key), reducer)),
        }
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<A: ActionLike> Default for ReducerMap<A> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// CombinedReducer
// ---------------------------------------------------------------------------

/// One reducer over a [`CombinedState`], built from named children.
pub struct CombinedReducer<A> {
    children: Arc<[(Arc<str>, Arc<dyn ErasedReducer<A>>)]>,
    handled: Option<TagSet>,
}

/// Combine named reducers into one.
///
/// The composite's handled-tag set is the union of its children's, or
/// unknown as soon as one child does not declare its tags.
pub fn combine_reducers<A: ActionLike>(map: ReducerMap<A>) -> CombinedReducer<A> {
    let mut handled = Some(TagSet::new());
    for (_, child) in &map.children {
        match (handled.as_mut(), child.declared_tags()) {
            (Some(acc), Some(tags)) => acc.extend_from(&tags),
            _ => {
                handled = None;
                break;
            }
        }
    }

    debug!(
        children = map.children.len(),
        tags = handled.as_ref().map(TagSet::len),
        "combined reducers"
    );

    CombinedReducer {
        children: map.children.into(),
        handled,
    }
}

impl<A: ActionLike> CombinedReducer<A> {
    /// Whether `state` holds a correctly typed value for every child. Only
    /// then is skipping the children indistinguishable from calling them.
    fn covers(&self, state: &CombinedState) -> bool {
        self.children
            .iter()
            .enumerate()
            .all(|(index, (key, child))| state.previous(index, key).is_some_and(|prev| child.accepts(prev)))
    }
}

impl<A: ActionLike> Reducer<A> for CombinedReducer<A> {
    type State = CombinedState;

    fn reduce(&self, state: Option<Arc<CombinedState>>, action: &A) -> Arc<CombinedState> {
        if let (Some(state), Some(handled)) = (&state, &self.handled) {
            if !handled.contains(action.tag()) && self.covers(state) {
                trace!(tag = action.tag(), "no child handles tag, skipping");
                return Arc::clone(state);
            }
        }

        let mut changed = false;
        let mut entries = Vec::with_capacity(self.children.len());
        for (index, (key, child)) in self.children.iter().enumerate() {
            let previous = state.as_deref().and_then(|s| s.previous(index, key));
            let next = child.reduce_any(key, previous, action);
            changed |= previous.map_or(true, |prev| !same_state(prev, &next));
            entries.push((Arc::clone(key), next));
        }

        match state {
            Some(state) if !changed => {
                trace!(tag = action.tag(), "no child changed, keeping state");
                state
            }
            _ => Arc::new(CombinedState { entries }),
        }
    }

    fn handled_tags(&self) -> Option<TagSet> {
        self.handled.clone()
    }
}

impl<A> Clone for CombinedReducer<A> {
    fn clone(&self) -> Self {
        Self {
            children: Arc::clone(&self.children),
            handled: self.handled.clone(),
        }
    }
}

impl<A> fmt::Debug for CombinedReducer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinedReducer")
            .field("keys", &self.children.iter().map(|(k, _)| &**k).collect::<Vec<_>>())
            .field("handled", &self.handled)
            .finish()
    }
}
