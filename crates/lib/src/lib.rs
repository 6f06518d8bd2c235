//!
//! Arbor: a configuration-tree and object-serialization engine.
//!
//! ## Core Concepts
//!
//! Arbor is built around three pieces:
//!
//! * **Wire values (`wire::WireValue`)**: The portable, string-keyed
//!   representation every value is converted into — scalars, packed numeric
//!   arrays, sequences, mappings, and `classType`-tagged objects.
//! * **The config tree (`tree::Tree`)**: A hierarchical namespace of named
//!   [`Property`](tree::Property) leaves and nested sub-trees, with
//!   path-addressed lookup, a conflict-aware merge, and strict deep
//!   equality.
//! * **The object serializer (`serializer::ObjectSerializer`)**: Generic
//!   value ⇄ wire conversion driven by two explicit registries — adapters
//!   for types with a custom scalar form, and type profiles describing how
//!   to walk and rebuild everything else field by field.
//!
//! The tree and the serializer are orthogonal: the tree is the addressable
//! container that typically holds the serializer's output, but neither
//! depends on the other. Persistence backends plug in through serde — every
//! core type derives the serde traits — and are out of scope here.
//!
//! ```
//! use arbor::tree::{Property, Tree};
//!
//! let mut root = Tree::new("root");
//! root.put(Property::new("x", 5i32));
//!
//! assert_eq!(root.get_as::<i32>(["x"]), Some(5));
//! assert!(root.get_property(["missing"]).is_none());
//! ```

pub mod serializer;
pub mod tree;
pub mod wire;

/// Re-export the core types for easier access.
pub use serializer::ObjectSerializer;
pub use tree::{Node, Property, Tree};
pub use wire::{Number, WireValue};

/// Result type used throughout the Arbor library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Arbor library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured wire-extraction errors from the wire module
    #[error(transparent)]
    Wire(#[from] wire::WireError),

    /// Structured serializer errors from the serializer module
    #[error(transparent)]
    Serializer(#[from] serializer::SerializerError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Serialize(_) => "serialize",
            Error::Wire(_) => "wire",
            Error::Serializer(_) => "serializer",
        }
    }

    /// Check if this error is a type mismatch.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Wire(wire_err) => wire_err.is_type_error(),
            Error::Serializer(ser_err) => ser_err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error means a type was never registered with the
    /// serializer.
    pub fn is_unregistered(&self) -> bool {
        match self {
            Error::Serializer(ser_err) => ser_err.is_unregistered(),
            _ => false,
        }
    }

    /// Check if this error is serializer-related.
    pub fn is_serializer_error(&self) -> bool {
        matches!(self, Error::Serializer(_))
    }
}
