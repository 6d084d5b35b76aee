//! Handled-tag sets.

use std::collections::BTreeSet;

/// The set of tags a reducer can respond to.
///
/// A reducer reporting `Some(set)` promises to return its input state
/// unchanged for any tag outside the set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: BTreeSet<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        self.tags.insert(tag.into())
    }

    /// Merge another set into this one.
    pub fn extend_from(&mut self, other: &TagSet) {
        self.tags.extend(other.tags.iter().cloned());
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_keeps_each_tag_once() {
        let mut left: TagSet = ["x", "y"].into_iter().collect();
        let right: TagSet = ["y", "z"].into_iter().collect();
        left.extend_from(&right);

        assert_eq!(left.iter().collect::<Vec<_>>(), vec!["x", "y", "z"]);
        assert_eq!(left.len(), 3);
    }

    #[test]
    fn empty_set_contains_nothing() {
        let set = TagSet::new();
        assert!(set.is_empty());
        assert!(!set.contains(""));
    }
}
