//! Leaf nodes wrapping a single wire value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tree::node::Metadata;
use crate::wire::WireValue;

/// A leaf node: one named, typed value plus annotations.
///
/// Equality and deep equality are id equality plus value equality; metadata
/// does not participate.
///
/// # Examples
///
/// ```
/// use arbor::tree::Property;
///
/// let p = Property::new("threshold", 5i32);
/// assert_eq!(p.id(), "threshold");
/// assert_eq!(p.get_as::<i32>(), Some(5));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    id: String,
    metadata: Metadata,
    value: WireValue,
}

impl Property {
    pub fn new(id: impl Into<String>, value: impl Into<WireValue>) -> Self {
        Self {
            id: id.into(),
            metadata: Metadata::new(),
            value: value.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> &WireValue {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut WireValue {
        &mut self.value
    }

    pub fn set_value(&mut self, value: impl Into<WireValue>) {
        self.value = value.into();
    }

    /// Typed read access; `None` when the value does not have the requested
    /// shape.
    pub fn get_as<'a, T>(&'a self) -> Option<T>
    where
        T: TryFrom<&'a WireValue>,
    {
        T::try_from(&self.value).ok()
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

    pub(crate) fn into_metadata(self) -> Metadata {
        self.metadata
    }

    /// Builder convenience writing the `title` and `description` display
    /// hints frontends read.
    pub fn describe(mut self, title: impl Into<String>, description: impl Into<String>) -> Self {
        self.set_meta("title", title.into());
        self.set_meta("description", description.into());
        self
    }

    /// Strict content equality: same id, same value.
    pub fn deep_equals(&self, other: &Property) -> bool {
        self == other
    }
}

impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.value == other.value
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.value)
    }
}
