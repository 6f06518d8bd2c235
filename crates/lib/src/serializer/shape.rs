//! Shape classification for serializable values.
//!
//! The serializer never inspects type metadata at runtime; instead every
//! serializable type implements [`Wire`] and answers with its [`Shape`]. The
//! five shapes correspond one-to-one with the serializer's classification
//! branches, and the serializer dispatches on them in a fixed priority order
//! (null, simple, sequence, mapping, object).
//!
//! Scalars, strings, enums and packed numeric vectors are *simple*: already
//! directly representable, passed through as-is. Collections and mappings
//! expose their elements for the passthrough check. Everything else is an
//! *object* and is resolved through the adapter and profile registries.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};

use crate::wire::{Number, NumberKind, WireValue};

/// Classification of a value into one of the representable shapes.
pub enum Shape<'a> {
    /// Absent value (an unset `Option`).
    Null,
    /// Directly representable: stored as-is, no recursion, no registry.
    Simple(WireValue),
    /// Ordered collection of elements.
    Seq(Vec<&'a dyn Wire>),
    /// Associative mapping.
    Map(Vec<(&'a dyn Wire, &'a dyn Wire)>),
    /// Anything else, resolved via adapter or type profile. Carries the
    /// value and its type name for diagnostics.
    Object(&'a dyn Any, &'static str),
}

/// A value the serializer can classify.
///
/// Implemented for all scalar types, strings, `Vec`, arrays, `Option`,
/// `Box` and the standard maps. User-defined structs opt in with
/// [`wire_object!`](crate::wire_object); fieldless enums with
/// [`wire_enum!`](crate::wire_enum).
pub trait Wire: Any {
    /// Classify this value.
    fn shape(&self) -> Shape<'_>;
}

/// Element-level capabilities used by the blanket collection impls.
///
/// `PACKED` marks numeric scalars whose vectors collapse into a single
/// packed-array wire value instead of an element-wise sequence.
pub trait WireElement: Wire {
    const PACKED: Option<NumberKind> = None;

    /// The packed form of this element, for packed-vector collection.
    fn packed(&self) -> Option<Number> {
        None
    }

    /// Rebuilds an element from its packed form.
    fn from_packed(_n: &Number) -> Option<Self>
    where
        Self: Sized,
    {
        None
    }
}

macro_rules! wire_number_scalar {
    ($($t:ty => $kind:ident, $to:ident);+ $(;)?) => {$(
        impl Wire for $t {
            fn shape(&self) -> Shape<'_> {
                Shape::Simple(WireValue::Number(Number::$kind(*self)))
            }
        }
        impl WireElement for $t {
            const PACKED: Option<NumberKind> = Some(NumberKind::$kind);

            fn packed(&self) -> Option<Number> {
                Some(Number::$kind(*self))
            }

            fn from_packed(n: &Number) -> Option<Self> {
                Some(n.$to())
            }
        }
    )+};
}

wire_number_scalar!(
    i8 => Byte, to_i8;
    i16 => Short, to_i16;
    i32 => Int, to_i32;
    i64 => Long, to_i64;
    f32 => Float, to_f32;
    f64 => Double, to_f64;
);

// Unsigned widths have no wire kind of their own; they ride on the signed
// kind wide enough to hold them.
macro_rules! wire_unsigned_scalar {
    ($($t:ty => $kind:ident, $to:ident);+ $(;)?) => {$(
        impl Wire for $t {
            fn shape(&self) -> Shape<'_> {
                Shape::Simple(WireValue::Number(Number::from(*self)))
            }
        }
        impl WireElement for $t {
            const PACKED: Option<NumberKind> = Some(NumberKind::$kind);

            fn packed(&self) -> Option<Number> {
                Some(Number::from(*self))
            }

            fn from_packed(n: &Number) -> Option<Self> {
                Some(n.$to() as $t)
            }
        }
    )+};
}

wire_unsigned_scalar!(
    u8 => Int, to_i32;
    u16 => Int, to_i32;
    u32 => Long, to_i64;
    u64 => Long, to_i64;
    usize => Long, to_i64;
);

impl Wire for bool {
    fn shape(&self) -> Shape<'_> {
        Shape::Simple(WireValue::Bool(*self))
    }
}

impl WireElement for bool {}

impl Wire for char {
    fn shape(&self) -> Shape<'_> {
        Shape::Simple(WireValue::Char(*self))
    }
}

impl WireElement for char {}

impl Wire for String {
    fn shape(&self) -> Shape<'_> {
        Shape::Simple(WireValue::Text(self.clone()))
    }
}

impl WireElement for String {}

impl Wire for &'static str {
    fn shape(&self) -> Shape<'_> {
        Shape::Simple(WireValue::Text((*self).to_string()))
    }
}

impl WireElement for &'static str {}

/// Wire values are their own representation.
impl Wire for WireValue {
    fn shape(&self) -> Shape<'_> {
        Shape::Simple(self.clone())
    }
}

impl WireElement for WireValue {}

impl<T: WireElement> Wire for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        if T::PACKED.is_some() {
            // Packed numeric vectors are primitive arrays: one wire unit.
            Shape::Simple(WireValue::Array(self.iter().filter_map(WireElement::packed).collect()))
        } else {
            Shape::Seq(self.iter().map(|v| v as &dyn Wire).collect())
        }
    }
}

impl<T: WireElement, const N: usize> Wire for [T; N] {
    fn shape(&self) -> Shape<'_> {
        if T::PACKED.is_some() {
            Shape::Simple(WireValue::Array(self.iter().filter_map(WireElement::packed).collect()))
        } else {
            Shape::Seq(self.iter().map(|v| v as &dyn Wire).collect())
        }
    }
}

impl<T: Wire> Wire for Option<T> {
    fn shape(&self) -> Shape<'_> {
        match self {
            Some(v) => v.shape(),
            None => Shape::Null,
        }
    }
}

impl<T: Wire + ?Sized> Wire for Box<T> {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl WireElement for Box<dyn Wire> {}

impl<K: WireElement, V: WireElement> Wire for HashMap<K, V> {
    fn shape(&self) -> Shape<'_> {
        Shape::Map(self.iter().map(|(k, v)| (k as &dyn Wire, v as &dyn Wire)).collect())
    }
}

impl<K: WireElement, V: WireElement> Wire for BTreeMap<K, V> {
    fn shape(&self) -> Shape<'_> {
        Shape::Map(self.iter().map(|(k, v)| (k as &dyn Wire, v as &dyn Wire)).collect())
    }
}

/// Makes a struct serializable through the adapter/profile registries.
///
/// Generates the [`Wire`](crate::serializer::Wire) impl classifying values
/// as objects, plus the [`FromWire`](crate::serializer::FromWire) impl that
/// rebuilds the type through a registered serializer.
///
/// # Examples
///
/// ```
/// use arbor::serializer::{ObjectSerializer, TypeProfile};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
/// arbor::wire_object!(Point);
///
/// let mut serializer = ObjectSerializer::new();
/// serializer.register_profile(
///     TypeProfile::builder::<Point>("Point")
///         .with_default()
///         .field("x", |p: &Point| Some(&p.x), |p, v| p.x = v)
///         .field("y", |p: &Point| Some(&p.y), |p, v| p.y = v)
///         .build(),
/// );
///
/// let wire = serializer.serialize(&Point { x: 1, y: 2 }).unwrap();
/// let back: Point = serializer.deserialize_as(&wire).unwrap();
/// assert_eq!(back, Point { x: 1, y: 2 });
/// ```
#[macro_export]
macro_rules! wire_object {
    ($t:ty) => {
        impl $crate::serializer::Wire for $t {
            fn shape(&self) -> $crate::serializer::Shape<'_> {
                $crate::serializer::Shape::Object(self, ::core::any::type_name::<$t>())
            }
        }

        impl $crate::serializer::WireElement for $t {}

        impl $crate::serializer::FromWire for $t {
            fn from_wire(
                wire: &$crate::wire::WireValue,
                serializer: &$crate::serializer::ObjectSerializer,
            ) -> ::core::result::Result<Self, $crate::serializer::SerializerError> {
                serializer.deserialize_as::<$t>(wire)
            }
        }
    };
}

/// Makes a fieldless enum serializable by variant name.
///
/// The enum is *simple*: it serializes to its variant name as text, and the
/// stored name is resolved back by exact-name lookup. An unknown name is a
/// fatal deserialization error.
///
/// # Examples
///
/// ```
/// use arbor::serializer::ObjectSerializer;
/// use arbor::wire::WireValue;
///
/// #[derive(Debug, PartialEq)]
/// enum Mode {
///     Compact,
///     Expanded,
/// }
/// arbor::wire_enum!(Mode { Compact, Expanded });
///
/// let serializer = ObjectSerializer::new();
/// let wire = serializer.serialize(&Mode::Compact).unwrap();
/// assert_eq!(wire, WireValue::Text("Compact".to_string()));
/// ```
#[macro_export]
macro_rules! wire_enum {
    ($t:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::serializer::Wire for $t {
            fn shape(&self) -> $crate::serializer::Shape<'_> {
                let name = match self {
                    $(Self::$variant => stringify!($variant),)+
                };
                $crate::serializer::Shape::Simple($crate::wire::WireValue::Text(name.to_string()))
            }
        }

        impl $crate::serializer::WireElement for $t {}

        impl $crate::serializer::FromWire for $t {
            fn from_wire(
                wire: &$crate::wire::WireValue,
                _serializer: &$crate::serializer::ObjectSerializer,
            ) -> ::core::result::Result<Self, $crate::serializer::SerializerError> {
                match wire {
                    $crate::wire::WireValue::Text(name) => match name.as_str() {
                        $(stringify!($variant) => Ok(Self::$variant),)+
                        other => Err($crate::serializer::SerializerError::UnknownVariant {
                            enum_name: stringify!($t).to_string(),
                            variant: other.to_string(),
                        }),
                    },
                    other => Err($crate::serializer::SerializerError::TypeMismatch {
                        expected: stringify!($t).to_string(),
                        actual: other.type_name().to_string(),
                    }),
                }
            }
        }
    };
}
