//! The base unit of the config tree.
//!
//! A [`Node`] is either a [`Tree`] (a composite holding named children) or a
//! [`Property`] (a leaf wrapping one wire value). Both kinds carry an
//! immutable string id and an ordered metadata map for annotations such as
//! display hints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tree::{Property, Tree};
use crate::wire::WireValue;

/// Ordered annotation map attached to every node.
pub type Metadata = BTreeMap<String, WireValue>;

/// A node in a config tree: either a sub-tree or a leaf property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Tree(Tree),
    Property(Property),
}

impl Node {
    /// The node's id, unique within its parent tree.
    pub fn id(&self) -> &str {
        match self {
            Node::Tree(t) => t.id(),
            Node::Property(p) => p.id(),
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, Node::Tree(_))
    }

    pub fn is_property(&self) -> bool {
        matches!(self, Node::Property(_))
    }

    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            Node::Tree(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_tree_mut(&mut self) -> Option<&mut Tree> {
        match self {
            Node::Tree(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_property(&self) -> Option<&Property> {
        match self {
            Node::Property(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_property_mut(&mut self) -> Option<&mut Property> {
        match self {
            Node::Property(p) => Some(p),
            _ => None,
        }
    }

    pub fn metadata(&self) -> &Metadata {
        match self {
            Node::Tree(t) => t.metadata(),
            Node::Property(p) => p.metadata(),
        }
    }

    /// Merges the given annotations into this node's metadata, overwriting
    /// colliding keys.
    pub fn add_metadata(&mut self, metadata: impl IntoIterator<Item = (String, WireValue)>) {
        match self {
            Node::Tree(t) => t.add_metadata(metadata),
            Node::Property(p) => p.add_metadata(metadata),
        }
    }

    /// Strict content equality. Tree/Property kind mismatch at any position
    /// is unequal.
    pub fn deep_equals(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Tree(a), Node::Tree(b)) => a.deep_equals(b),
            (Node::Property(a), Node::Property(b)) => a.deep_equals(b),
            _ => false,
        }
    }
}

impl From<Tree> for Node {
    fn from(value: Tree) -> Self {
        Node::Tree(value)
    }
}

impl From<Property> for Node {
    fn from(value: Property) -> Self {
        Node::Property(value)
    }
}
