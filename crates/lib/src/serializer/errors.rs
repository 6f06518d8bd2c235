//! Error types for serialization and deserialization.
//!
//! Every failure here is synchronous and terminal for the call that raised
//! it: a value either fully materializes or the whole call fails. Wrapping
//! variants ([`SerializerError::Adapter`], [`SerializerError::FieldSet`])
//! carry the offending type and field so the caller can tell which part of a
//! value graph went wrong.

use thiserror::Error;

use crate::wire::WireError;

/// Structured error type for serializer operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SerializerError {
    /// A value's type has neither an adapter nor a type profile registered.
    #[error("no adapter or type profile registered for `{type_name}`")]
    Unregistered { type_name: String },

    /// The input to deserialize carried no `classType` discriminator, so the
    /// representation is not self-describing.
    #[error("cannot deserialize: missing classType discriminator (found {found})")]
    MissingClassType { found: String },

    /// The `classType` discriminator named a type nothing is registered for.
    #[error("cannot deserialize: unknown classType `{class_type}`")]
    UnknownClassType { class_type: String },

    /// The target type has no default factory, so no instance can be
    /// allocated.
    #[error("no usable allocation strategy for `{type_name}`: no default factory registered")]
    NoAllocationStrategy { type_name: String },

    /// An empty sequence targeted a packed numeric array field.
    #[error("cannot unbox an empty sequence into `{target}`")]
    EmptySequence { target: String },

    /// A stored enum name did not resolve to any variant.
    #[error("unknown variant `{variant}` for enum `{enum_name}`")]
    UnknownVariant { enum_name: String, variant: String },

    /// A stored value did not fit the shape a target expected.
    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// An adapter failed while converting its target type.
    #[error("adapter for `{type_name}` failed to {op}")]
    Adapter {
        type_name: String,
        op: &'static str,
        #[source]
        source: Box<SerializerError>,
    },

    /// A field could not be rebuilt from its stored value.
    #[error("failed to deserialize field `{field}` of `{class_type}`")]
    FieldSet {
        class_type: String,
        field: String,
        #[source]
        source: Box<SerializerError>,
    },

    /// Typed wire extraction failed.
    #[error(transparent)]
    Wire(#[from] WireError),
}

impl SerializerError {
    /// Check if this error is related to type mismatches.
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            SerializerError::TypeMismatch { .. } | SerializerError::Wire(WireError::TypeMismatch { .. })
        )
    }

    /// Check if this error means a type was never registered.
    pub fn is_unregistered(&self) -> bool {
        matches!(
            self,
            SerializerError::Unregistered { .. } | SerializerError::UnknownClassType { .. }
        )
    }

    /// Check if this error is the missing-discriminator failure.
    pub fn is_missing_class_type(&self) -> bool {
        matches!(self, SerializerError::MissingClassType { .. })
    }

    /// Check if this error came from allocation rather than field handling.
    pub fn is_allocation_error(&self) -> bool {
        matches!(self, SerializerError::NoAllocationStrategy { .. })
    }

    /// Check if this error was raised by a registered adapter.
    pub fn is_adapter_error(&self) -> bool {
        matches!(self, SerializerError::Adapter { .. })
    }
}
