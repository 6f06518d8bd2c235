//! Pluggable per-type converters.
//!
//! An [`Adapter`] claims exactly one concrete type and converts it to and
//! from a wire value directly, bypassing the generic object walk. Adapters
//! are consulted before type profiles; a type with an adapter never has its
//! fields walked.

use std::any::{Any, TypeId};

use crate::wire::WireValue;

use super::errors::SerializerError;

/// A stateless bidirectional converter bound to exactly one concrete type.
///
/// The adapter's [`type_name`](Adapter::type_name) becomes the wire
/// `classType` discriminator. A mapping-shaped serialize result is tagged in
/// place; any other result is wrapped as `{ classType, value }`.
pub trait Adapter: Send + Sync + 'static {
    /// The concrete type this adapter claims.
    type Target: 'static;

    /// The name written as the wire `classType` discriminator.
    fn type_name(&self) -> &'static str;

    fn serialize(&self, value: &Self::Target) -> Result<WireValue, SerializerError>;

    fn deserialize(&self, wire: &WireValue) -> Result<Self::Target, SerializerError>;
}

/// Object-safe face of [`Adapter`] held by the registry.
pub(crate) trait ErasedAdapter: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn target(&self) -> TypeId;

    fn serialize_erased(&self, value: &dyn Any) -> Result<WireValue, SerializerError>;

    fn deserialize_erased(&self, wire: &WireValue) -> Result<Box<dyn Any>, SerializerError>;
}

pub(crate) struct Erased<A>(pub(crate) A);

impl<A: Adapter> ErasedAdapter for Erased<A> {
    fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    fn target(&self) -> TypeId {
        TypeId::of::<A::Target>()
    }

    fn serialize_erased(&self, value: &dyn Any) -> Result<WireValue, SerializerError> {
        let value = value
            .downcast_ref::<A::Target>()
            .ok_or_else(|| SerializerError::TypeMismatch {
                expected: self.0.type_name().to_string(),
                actual: "value of another type".to_string(),
            })?;
        self.0.serialize(value).map_err(|source| SerializerError::Adapter {
            type_name: self.0.type_name().to_string(),
            op: "serialize",
            source: Box::new(source),
        })
    }

    fn deserialize_erased(&self, wire: &WireValue) -> Result<Box<dyn Any>, SerializerError> {
        self.0
            .deserialize(wire)
            .map(|value| Box::new(value) as Box<dyn Any>)
            .map_err(|source| SerializerError::Adapter {
                type_name: self.0.type_name().to_string(),
                op: "deserialize",
                source: Box::new(source),
            })
    }
}
