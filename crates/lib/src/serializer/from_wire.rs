//! Rebuilding typed values from stored wire values.
//!
//! [`FromWire`] is the target-side counterpart of
//! [`Wire`](super::shape::Wire): it adapts a stored value's shape to the
//! declared type of the field receiving it. This is where the unbox policy
//! lives — numeric narrowing/widening, sequence-to-packed-array copying, and
//! recursive deserialization for nested objects.

use std::any::type_name;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::wire::{Number, WireValue};

use super::ObjectSerializer;
use super::errors::SerializerError;
use super::shape::WireElement;

/// A type that can be rebuilt from a stored wire value.
pub trait FromWire: Sized {
    fn from_wire(wire: &WireValue, serializer: &ObjectSerializer) -> Result<Self, SerializerError>;
}

// Stored numbers are narrowed or widened to whatever width the field
// declares, via standard numeric conversion.
macro_rules! from_wire_number {
    ($($t:ty => $to:ident),+ $(,)?) => {$(
        impl FromWire for $t {
            fn from_wire(wire: &WireValue, _serializer: &ObjectSerializer) -> Result<Self, SerializerError> {
                match wire {
                    WireValue::Number(n) => Ok(n.$to() as $t),
                    other => Err(SerializerError::TypeMismatch {
                        expected: type_name::<$t>().to_string(),
                        actual: other.type_name().to_string(),
                    }),
                }
            }
        }
    )+};
}

from_wire_number!(
    i8 => to_i8,
    i16 => to_i16,
    i32 => to_i32,
    i64 => to_i64,
    f32 => to_f32,
    f64 => to_f64,
    u8 => to_i32,
    u16 => to_i32,
    u32 => to_i64,
    u64 => to_i64,
    usize => to_i64,
);

impl FromWire for bool {
    fn from_wire(wire: &WireValue, _serializer: &ObjectSerializer) -> Result<Self, SerializerError> {
        match wire {
            WireValue::Bool(b) => Ok(*b),
            other => Err(SerializerError::TypeMismatch {
                expected: "bool".to_string(),
                actual: other.type_name().to_string(),
            }),
        }
    }
}

impl FromWire for char {
    fn from_wire(wire: &WireValue, _serializer: &ObjectSerializer) -> Result<Self, SerializerError> {
        match wire {
            WireValue::Char(c) => Ok(*c),
            other => Err(SerializerError::TypeMismatch {
                expected: "char".to_string(),
                actual: other.type_name().to_string(),
            }),
        }
    }
}

impl FromWire for String {
    fn from_wire(wire: &WireValue, _serializer: &ObjectSerializer) -> Result<Self, SerializerError> {
        match wire {
            WireValue::Text(s) => Ok(s.clone()),
            other => Err(SerializerError::TypeMismatch {
                expected: "String".to_string(),
                actual: other.type_name().to_string(),
            }),
        }
    }
}

impl FromWire for Number {
    fn from_wire(wire: &WireValue, _serializer: &ObjectSerializer) -> Result<Self, SerializerError> {
        match wire {
            WireValue::Number(n) => Ok(*n),
            other => Err(SerializerError::TypeMismatch {
                expected: "number".to_string(),
                actual: other.type_name().to_string(),
            }),
        }
    }
}

/// Fields declared as raw wire values accept any stored value unchanged.
impl FromWire for WireValue {
    fn from_wire(wire: &WireValue, _serializer: &ObjectSerializer) -> Result<Self, SerializerError> {
        Ok(wire.clone())
    }
}

impl<T: WireElement + FromWire> FromWire for Vec<T> {
    fn from_wire(wire: &WireValue, serializer: &ObjectSerializer) -> Result<Self, SerializerError> {
        match wire {
            // A stored packed array copies straight through.
            WireValue::Array(nums) if T::PACKED.is_some() => {
                Ok(nums.iter().filter_map(T::from_packed).collect())
            }
            WireValue::Seq(items) => {
                // A sequence may be copied element-by-element into a packed
                // vector, but an empty one is fatal: there is no evidence the
                // shapes ever matched.
                if T::PACKED.is_some() && items.is_empty() {
                    return Err(SerializerError::EmptySequence {
                        target: type_name::<Vec<T>>().to_string(),
                    });
                }
                items.iter().map(|item| T::from_wire(item, serializer)).collect()
            }
            other => Err(SerializerError::TypeMismatch {
                expected: type_name::<Vec<T>>().to_string(),
                actual: other.type_name().to_string(),
            }),
        }
    }
}

impl<T: FromWire> FromWire for Option<T> {
    fn from_wire(wire: &WireValue, serializer: &ObjectSerializer) -> Result<Self, SerializerError> {
        match wire {
            WireValue::Null => Ok(None),
            other => T::from_wire(other, serializer).map(Some),
        }
    }
}

impl<T: FromWire> FromWire for Box<T> {
    fn from_wire(wire: &WireValue, serializer: &ObjectSerializer) -> Result<Self, SerializerError> {
        T::from_wire(wire, serializer).map(Box::new)
    }
}

impl<K: FromWire + Eq + Hash, V: FromWire> FromWire for HashMap<K, V> {
    fn from_wire(wire: &WireValue, serializer: &ObjectSerializer) -> Result<Self, SerializerError> {
        match wire {
            WireValue::Map(entries) => entries
                .iter()
                .map(|(k, v)| Ok((K::from_wire(k, serializer)?, V::from_wire(v, serializer)?)))
                .collect(),
            // An empty mapping was serialized as an empty sequence.
            WireValue::Seq(items) if items.is_empty() => Ok(HashMap::new()),
            other => Err(SerializerError::TypeMismatch {
                expected: type_name::<HashMap<K, V>>().to_string(),
                actual: other.type_name().to_string(),
            }),
        }
    }
}

impl<K: FromWire + Ord, V: FromWire> FromWire for BTreeMap<K, V> {
    fn from_wire(wire: &WireValue, serializer: &ObjectSerializer) -> Result<Self, SerializerError> {
        match wire {
            WireValue::Map(entries) => entries
                .iter()
                .map(|(k, v)| Ok((K::from_wire(k, serializer)?, V::from_wire(v, serializer)?)))
                .collect(),
            WireValue::Seq(items) if items.is_empty() => Ok(BTreeMap::new()),
            other => Err(SerializerError::TypeMismatch {
                expected: type_name::<BTreeMap<K, V>>().to_string(),
                actual: other.type_name().to_string(),
            }),
        }
    }
}
