//! Core traits shared by actions and the dispatch engine.

/// Messages carry a tag that routes them to a handler.
///
/// Implemented by [`crate::Action`]. Typed message enums can implement it
/// directly, the same way they would map variants to a stored event type.
pub trait ActionLike {
    /// The discriminator used for handler lookup.
    fn tag(&self) -> &str;
}

impl<A: ActionLike + ?Sized> ActionLike for &A {
    fn tag(&self) -> &str {
        (**self).tag()
    }
}

/// Anything a handler can be registered against.
///
/// Action creators are the usual source. Bare strings are accepted so typed
/// enums without a creator can still be routed.
pub trait TagSource {
    fn tag(&self) -> &str;
}

impl TagSource for str {
    fn tag(&self) -> &str {
        self
    }
}

impl TagSource for String {
    fn tag(&self) -> &str {
        self.as_str()
    }
}

impl<T: TagSource + ?Sized> TagSource for &T {
    fn tag(&self) -> &str {
        (**self).tag()
    }
}
