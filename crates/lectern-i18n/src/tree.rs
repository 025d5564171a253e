//! Typed message trees.
//!
//! A tree node is either a terminal string or a mapping from segment names to
//! child nodes. Trees are built once per locale and never mutated afterwards.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// One node of a locale's message catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageTree {
    /// Terminal translated string.
    Leaf(String),
    /// Named children.
    Branch(BTreeMap<String, Self>),
}

impl MessageTree {
    /// An empty branch; every lookup against it misses.
    pub const EMPTY: Self = Self::Branch(BTreeMap::new());

    /// Child node for `segment`, if this node is a branch that has one.
    #[must_use]
    pub fn child(&self, segment: &str) -> Option<&Self> {
        match self {
            Self::Branch(children) => children.get(segment),
            Self::Leaf(_) => None,
        }
    }

    /// Terminal string, if this node is a leaf.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Leaf(text) => Some(text),
            Self::Branch(_) => None,
        }
    }

    /// Whether the node is a terminal string.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Every dotted path that ends in a leaf, sorted.
    #[must_use]
    pub fn leaf_paths(&self) -> BTreeSet<String> {
        let mut paths = BTreeSet::new();
        collect_paths(self, &mut String::new(), &mut paths);
        paths
    }

    /// Number of terminal strings below this node.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Branch(children) => children.values().map(Self::leaf_count).sum(),
        }
    }
}

impl Default for MessageTree {
    fn default() -> Self {
        Self::EMPTY
    }
}

fn collect_paths(node: &MessageTree, prefix: &mut String, out: &mut BTreeSet<String>) {
    match node {
        MessageTree::Leaf(_) => {
            if !prefix.is_empty() {
                out.insert(prefix.clone());
            }
        }
        MessageTree::Branch(children) => {
            for (segment, child) in children {
                let restore = prefix.len();
                if !prefix.is_empty() {
                    prefix.push('.');
                }
                prefix.push_str(segment);
                collect_paths(child, prefix, out);
                prefix.truncate(restore);
            }
        }
    }
}
