//! Dotted-key resolution over message trees.

use crate::tree::MessageTree;

/// Non-empty segments of a dotted key.
pub fn split_key(key: &str) -> impl Iterator<Item = &str> {
    key.split('.').filter(|segment| !segment.is_empty())
}

/// Walk `key` through `tree` and return the terminal string it names.
///
/// Misses when a step lands on a leaf or an absent child, when the key ends on
/// a branch, and when the key has no segments at all.
#[must_use]
pub fn resolve<'a>(tree: &'a MessageTree, key: &str) -> Option<&'a str> {
    let mut segments = split_key(key).peekable();
    segments.peek()?;
    let mut node = tree;
    for segment in segments {
        node = node.child(segment)?;
    }
    node.as_str()
}
