//! The hierarchical configuration tree.
//!
//! A [`Tree`] is a composite [`Node`] holding a keyed collection of children,
//! each either a nested `Tree` or a leaf [`Property`]. Trees support
//! path-addressed lookup, a conflict-aware merge, strict deep equality, and a
//! deterministic textual dump.
//!
//! Lookup misses are absent results, never errors. Structural oddities found
//! during a merge (a tree colliding with a property) are logged and resolved
//! by a defined policy rather than aborting the caller.
//!
//! # Examples
//!
//! ```
//! use arbor::tree::{Property, Tree};
//!
//! let mut settings = Tree::new("settings");
//! let mut general = Tree::new("general");
//! general.put(Property::new("volume", 80i32));
//! settings.put(general);
//!
//! assert_eq!(settings.get_as::<i32>(["general", "volume"]), Some(80));
//! assert!(settings.get(["general", "missing"]).is_none());
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub mod node;
pub mod property;

pub use node::{Metadata, Node};
pub use property::Property;

use crate::wire::WireValue;

/// A composite node: a named collection of child nodes.
///
/// Child ids are unique by construction (the child map is keyed by id) and
/// children are owned, never aliased into an ancestor, so a tree is acyclic.
/// Child iteration order is the key order, which makes the textual dump
/// deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    id: String,
    metadata: Metadata,
    children: BTreeMap<String, Node>,
}

impl Tree {
    /// Creates an empty tree with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            metadata: Metadata::new(),
            children: BTreeMap::new(),
        }
    }

    /// Creates a tree with the given children. The nodes are moved in and
    /// keyed by their ids; a later node with a duplicate id replaces an
    /// earlier one.
    pub fn with_children(id: impl Into<String>, children: impl IntoIterator<Item = Node>) -> Self {
        let mut tree = Self::new(id);
        tree.put_all(children);
        tree
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Upserts a child by id, replacing any existing child with the same id.
    pub fn put(&mut self, node: impl Into<Node>) -> &mut Self {
        let node = node.into();
        self.children.insert(node.id().to_string(), node);
        self
    }

    /// Upserts every node in the iterator. See [`Tree::put`].
    pub fn put_all(&mut self, nodes: impl IntoIterator<Item = Node>) -> &mut Self {
        for node in nodes {
            self.put(node);
        }
        self
    }

    /// Looks up a direct child by id.
    pub fn child(&self, id: &str) -> Option<&Node> {
        self.children.get(id)
    }

    pub fn child_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.children.get_mut(id)
    }

    /// Walks the tree child-by-child along `path`.
    ///
    /// Descends through nested trees. A property reached before the path is
    /// exhausted ends the walk and is returned as-is — extra path segments
    /// are silently ignored. A missing key returns `None`; "not found" is an
    /// absent result, never an error.
    pub fn get<'a>(&self, path: impl IntoIterator<Item = &'a str>) -> Option<&Node> {
        let mut current = self;
        let mut found = None;
        for key in path {
            match current.children.get(key) {
                Some(node @ Node::Tree(t)) => {
                    current = t;
                    found = Some(node);
                }
                // A property ends the walk; a missing key ends the search.
                other => return other,
            }
        }
        found
    }

    /// Mutable variant of [`Tree::get`], with the same walk semantics.
    pub fn get_mut<'a>(&mut self, path: impl IntoIterator<Item = &'a str>) -> Option<&mut Node> {
        let mut path = path.into_iter();
        let first = path.next()?;
        let mut node = self.children.get_mut(first)?;
        for key in path {
            if let Node::Tree(t) = node {
                node = t.children.get_mut(key)?;
            } else {
                // A property ends the walk
                break;
            }
        }
        Some(node)
    }

    /// Resolves `path` to a nested tree. Returns `None` when the path does
    /// not resolve or resolves to a property — a kind mismatch is just "not
    /// found as that kind".
    pub fn get_child<'a>(&self, path: impl IntoIterator<Item = &'a str>) -> Option<&Tree> {
        self.get(path).and_then(Node::as_tree)
    }

    /// Resolves `path` to a property. Same miss semantics as
    /// [`Tree::get_child`].
    pub fn get_property<'a>(&self, path: impl IntoIterator<Item = &'a str>) -> Option<&Property> {
        self.get(path).and_then(Node::as_property)
    }

    /// Resolves `path` to a property value with typed extraction.
    pub fn get_as<'a, 's, T>(&'s self, path: impl IntoIterator<Item = &'a str>) -> Option<T>
    where
        T: TryFrom<&'s WireValue>,
    {
        self.get_property(path).and_then(|p| p.get_as())
    }

    /// Applies `f` to each direct child. Callers recurse manually when they
    /// need full-tree traversal.
    pub fn on_all(&self, mut f: impl FnMut(&str, &Node)) {
        for (key, node) in &self.children {
            f(key, node);
        }
    }

    /// Applies `f` to each direct child that is a property.
    pub fn on_all_properties(&self, mut f: impl FnMut(&str, &Property)) {
        for (key, node) in &self.children {
            if let Node::Property(p) = node {
                f(key, p);
            }
        }
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn meta(&self, key: &str) -> Option<&WireValue> {
        self.metadata.get(key)
    }

    pub fn set_meta(&mut self, key: impl Into<String>, value: impl Into<WireValue>) {
        self.metadata.insert(key.into(), value.into());
    }

    pub fn add_metadata(&mut self, metadata: impl IntoIterator<Item = (String, WireValue)>) {
        self.metadata.extend(metadata);
    }

    /// Merges another tree into this one. This method is powerful and should
    /// be used with care.
    ///
    /// Every entry of `other` lands in `self`:
    /// - absent in `self`: the incoming node is moved in as-is;
    /// - trees on both sides: merged recursively (with `copy_meta`, the
    ///   incoming tree's annotations are folded in as well);
    /// - properties on both sides: with `overwrite` the incoming property
    ///   replaces ours, otherwise with `copy_meta` only its annotations are
    ///   folded into ours;
    /// - a tree colliding with a property (either way): the incoming side
    ///   wins. This is logged as a likely-unintended condition but is not an
    ///   error.
    ///
    /// Afterwards every path reachable in `other` is reachable here, and
    /// content-equal subject to the `overwrite` flag.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor::tree::{Property, Tree};
    ///
    /// let mut ours = Tree::new("root");
    /// ours.put(Property::new("a", 1i32));
    ///
    /// let mut theirs = Tree::new("root");
    /// theirs.put(Property::new("a", 2i32));
    /// theirs.put(Property::new("b", 3i32));
    ///
    /// ours.merge(theirs, true, false);
    /// assert_eq!(ours.get_as::<i32>(["a"]), Some(2));
    /// assert_eq!(ours.get_as::<i32>(["b"]), Some(3));
    /// ```
    pub fn merge(&mut self, other: Tree, overwrite: bool, copy_meta: bool) {
        use std::collections::btree_map::Entry;

        for (key, incoming) in other.children {
            let existing = match self.children.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(incoming);
                    continue;
                }
                Entry::Occupied(slot) => slot.into_mut(),
            };
            match (existing, incoming) {
                (Node::Tree(ours), Node::Tree(mut theirs)) => {
                    let meta = std::mem::take(&mut theirs.metadata);
                    ours.merge(theirs, overwrite, copy_meta);
                    if copy_meta {
                        ours.add_metadata(meta);
                    }
                }
                (ours @ Node::Property(_), Node::Property(theirs)) => {
                    if overwrite {
                        *ours = Node::Property(theirs);
                    } else if copy_meta {
                        ours.add_metadata(theirs.into_metadata());
                    }
                }
                (ours, theirs) => {
                    tracing::warn!(
                        existing = %ours.id(),
                        incoming = %theirs.id(),
                        "overwriting {} with {} during merge, is this intended?",
                        if ours.is_tree() { "tree" } else { "property" },
                        if theirs.is_tree() { "tree" } else { "property" },
                    );
                    *ours = theirs;
                }
            }
        }
    }

    /// Strict content equality: shallow equality plus, for every child here,
    /// a deep-equal child with the same id on the other side.
    ///
    /// Contrast with `==`, which is a fast structural check only (same id,
    /// same child count).
    pub fn deep_equals(&self, other: &Tree) -> bool {
        if self != other {
            return false;
        }
        self.children
            .iter()
            .all(|(key, ours)| other.children.get(key).is_some_and(|theirs| ours.deep_equals(theirs)))
    }

    /// Serializes this tree to a JSON string via serde.
    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string(self).map_err(Into::into)
    }

    /// Rebuilds a tree from the output of [`Tree::to_json`].
    pub fn from_json(json: &str) -> crate::Result<Tree> {
        serde_json::from_str(json).map_err(Into::into)
    }

    fn dump(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            write!(f, "\t")?;
        }
        writeln!(f, "{}:", self.id)?;
        for node in self.children.values() {
            match node {
                Node::Property(p) => {
                    for _ in 0..=depth {
                        write!(f, "\t")?;
                    }
                    writeln!(f, "{p}")?;
                }
                Node::Tree(t) => t.dump(f, depth + 1)?,
            }
        }
        Ok(())
    }
}

/// Fast structural check: same id and same child count. Use
/// [`Tree::deep_equals`] for content equality.
impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.children.len() == other.children.len()
    }
}

/// Deterministic indented dump: one header line per tree, one line per
/// property, depth-first in child order.
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.dump(f, 0)
    }
}
