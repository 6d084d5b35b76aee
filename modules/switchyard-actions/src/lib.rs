//! Tagged messages ("actions") and the factories that stamp them.
//!
//! An action is a record with a mandatory tag and optional `payload` / `meta`
//! fields. Which optional fields are present is decided entirely by how the
//! [`ActionCreator`] that built it was configured.
//!
//! The dispatch engine only needs two capabilities from this crate:
//! [`ActionLike`] (read the tag off a message) and [`TagSource`] (read the tag
//! a handler should be registered under).

pub mod action;
pub mod creator;
pub mod error;
pub mod traits;

pub use action::Action;
pub use creator::{create_action, ActionCreator};
pub use error::ActionError;
pub use traits::{ActionLike, TagSource};
