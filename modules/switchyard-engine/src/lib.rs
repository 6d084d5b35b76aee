//! Tag-dispatch tables over tagged messages.
//!
//! Two builders share the same copy-on-write [`Registry`]:
//!
//! - [`create_reducer`] builds a pure `(state, action) -> state` function one
//!   tag at a time. [`combine_reducers`] merges named reducers into one over a
//!   [`CombinedState`], keeping the previous state `Arc` whenever no child
//!   changed and skipping children entirely when none of them handle the tag.
//! - [`handle::when`] / [`handle::otherwise`] build an [`ActionProcessor`], a
//!   side-effecting dispatcher with an optional fallback.
//!
//! Every `.when(..)` / `.otherwise(..)` returns a new builder. The previous one
//! keeps working unchanged, so partially-built tables can be shared.

pub mod combine;
pub mod error;
pub mod processor;
pub mod reducer;
pub mod registry;
pub mod tags;
pub mod traits;

pub use combine::{combine_reducers, AnyState, CombinedReducer, CombinedState, ReducerMap};
pub use error::{ProcessError, ProcessResult};
pub use processor::{handle, ActionProcessor};
pub use reducer::{create_reducer, reducer_fn, FnReducer, ReducerCreator};
pub use registry::Registry;
pub use tags::TagSet;
pub use traits::Reducer;

pub use switchyard_actions::{ActionLike, TagSource};
