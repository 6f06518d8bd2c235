//! The portable wire-value representation.
//!
//! A [`WireValue`] is the serializer's external representation: the shape a
//! persisted configuration file, or a [`Property`](crate::tree::Property)
//! inside a config tree, ultimately holds. It is a closed sum over the
//! representable shapes: scalars, packed numeric arrays, ordered sequences,
//! associative mappings, and string-keyed objects tagged with a `classType`
//! discriminator.
//!
//! The engine guarantees only this intermediate shape; any concrete backend
//! (text, binary) built on top of it is a separate concern. All types here
//! derive serde traits so that such backends can be plugged in directly.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::WireError;
use super::number::Number;

/// Key carrying the fully-qualified type name in an object mapping.
pub const CLASS_TYPE_KEY: &str = "classType";

/// Key used when an adapter's scalar output is wrapped into an object.
pub const VALUE_KEY: &str = "value";

/// A portable, self-describing value.
///
/// # Examples
///
/// ```
/// use arbor::wire::{Number, WireValue};
///
/// let v = WireValue::from(42i32);
/// assert_eq!(v, WireValue::Number(Number::Int(42)));
/// assert_eq!(i32::try_from(&v).unwrap(), 42);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WireValue {
    /// Absent/empty value.
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Character scalar.
    Char(char),
    /// Numeric scalar with an explicit width.
    Number(Number),
    /// Text string.
    Text(String),
    /// Packed numeric array, carried as a single unit.
    Array(Vec<Number>),
    /// Ordered sequence of arbitrary wire values.
    Seq(Vec<WireValue>),
    /// Associative mapping with arbitrary wire keys, in insertion order.
    Map(Vec<(WireValue, WireValue)>),
    /// String-keyed mapping tagged with a `classType` discriminator.
    Object(WireObject),
}

impl WireValue {
    /// Returns the shape name as a string, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            WireValue::Null => "null",
            WireValue::Bool(_) => "bool",
            WireValue::Char(_) => "char",
            WireValue::Number(_) => "number",
            WireValue::Text(_) => "text",
            WireValue::Array(_) => "array",
            WireValue::Seq(_) => "seq",
            WireValue::Map(_) => "map",
            WireValue::Object(_) => "object",
        }
    }

    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, WireValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            WireValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            WireValue::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            WireValue::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            WireValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Number]> {
        match self {
            WireValue::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[WireValue]> {
        match self {
            WireValue::Seq(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(WireValue, WireValue)]> {
        match self {
            WireValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&WireObject> {
        match self {
            WireValue::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut WireObject> {
        match self {
            WireValue::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireValue::Null => write!(f, "null"),
            WireValue::Bool(b) => write!(f, "{b}"),
            WireValue::Char(c) => write!(f, "{c}"),
            WireValue::Number(n) => write!(f, "{n}"),
            WireValue::Text(s) => write!(f, "{s}"),
            WireValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            WireValue::Seq(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            WireValue::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            WireValue::Object(o) => write!(f, "{o}"),
        }
    }
}

/// A string-keyed wire mapping tagged with its originating type name.
///
/// The `classType` discriminator is the one mandatory convention of the wire
/// format: it selects an adapter or a registered type profile when the value
/// is rebuilt. The field map never contains the discriminator key itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireObject {
    #[serde(rename = "classType")]
    class_type: String,
    #[serde(flatten)]
    fields: BTreeMap<String, WireValue>,
}

impl WireObject {
    /// Creates an empty object tagged with the given type name.
    pub fn new(class_type: impl Into<String>) -> Self {
        Self {
            class_type: class_type.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Creates an object wrapping a single scalar under the `value` key.
    pub fn scalar(class_type: impl Into<String>, value: WireValue) -> Self {
        let mut obj = Self::new(class_type);
        obj.insert(VALUE_KEY, value);
        obj
    }

    pub fn class_type(&self) -> &str {
        &self.class_type
    }

    pub fn set_class_type(&mut self, class_type: impl Into<String>) {
        self.class_type = class_type.into();
    }

    /// Inserts a field, replacing and returning any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<WireValue>) -> Option<WireValue> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&WireValue> {
        self.fields.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<WireValue> {
        self.fields.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the fields in key order. The discriminator is not a
    /// field and is never yielded.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &WireValue)> {
        self.fields.iter()
    }
}

impl fmt::Display for WireObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.class_type)?;
        for (i, (k, v)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {k}: {v}")?;
        }
        write!(f, " }}")
    }
}

// Convenient From implementations for common types
impl From<bool> for WireValue {
    fn from(value: bool) -> Self {
        WireValue::Bool(value)
    }
}

impl From<char> for WireValue {
    fn from(value: char) -> Self {
        WireValue::Char(value)
    }
}

impl From<Number> for WireValue {
    fn from(value: Number) -> Self {
        WireValue::Number(value)
    }
}

impl From<String> for WireValue {
    fn from(value: String) -> Self {
        WireValue::Text(value)
    }
}

impl From<&str> for WireValue {
    fn from(value: &str) -> Self {
        WireValue::Text(value.to_string())
    }
}

impl From<Vec<Number>> for WireValue {
    fn from(value: Vec<Number>) -> Self {
        WireValue::Array(value)
    }
}

impl From<Vec<WireValue>> for WireValue {
    fn from(value: Vec<WireValue>) -> Self {
        WireValue::Seq(value)
    }
}

impl From<WireObject> for WireValue {
    fn from(value: WireObject) -> Self {
        WireValue::Object(value)
    }
}

impl<T: Into<WireValue>> From<Option<T>> for WireValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => WireValue::Null,
        }
    }
}

macro_rules! wire_value_from_numeric {
    ($($t:ty),+ $(,)?) => {$(
        impl From<$t> for WireValue {
            fn from(value: $t) -> Self {
                WireValue::Number(Number::from(value))
            }
        }
    )+};
}

wire_value_from_numeric!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

// Typed extraction. Numeric targets coerce across widths so that a value
// written as one width can be read back as another.
macro_rules! wire_value_try_numeric {
    ($($t:ty => $to:ident),+ $(,)?) => {$(
        impl TryFrom<&WireValue> for $t {
            type Error = WireError;

            fn try_from(value: &WireValue) -> Result<Self, Self::Error> {
                match value {
                    WireValue::Number(n) => Ok(n.$to()),
                    other => Err(WireError::mismatch(stringify!($t), other.type_name())),
                }
            }
        }
    )+};
}

wire_value_try_numeric!(
    i8 => to_i8,
    i16 => to_i16,
    i32 => to_i32,
    i64 => to_i64,
    f32 => to_f32,
    f64 => to_f64,
);

impl TryFrom<&WireValue> for bool {
    type Error = WireError;

    fn try_from(value: &WireValue) -> Result<Self, Self::Error> {
        match value {
            WireValue::Bool(b) => Ok(*b),
            other => Err(WireError::mismatch("bool", other.type_name())),
        }
    }
}

impl TryFrom<&WireValue> for char {
    type Error = WireError;

    fn try_from(value: &WireValue) -> Result<Self, Self::Error> {
        match value {
            WireValue::Char(c) => Ok(*c),
            other => Err(WireError::mismatch("char", other.type_name())),
        }
    }
}

impl TryFrom<&WireValue> for String {
    type Error = WireError;

    fn try_from(value: &WireValue) -> Result<Self, Self::Error> {
        match value {
            WireValue::Text(s) => Ok(s.clone()),
            other => Err(WireError::mismatch("String", other.type_name())),
        }
    }
}

impl<'a> TryFrom<&'a WireValue> for &'a str {
    type Error = WireError;

    fn try_from(value: &'a WireValue) -> Result<Self, Self::Error> {
        match value {
            WireValue::Text(s) => Ok(s),
            other => Err(WireError::mismatch("&str", other.type_name())),
        }
    }
}

// Direct comparisons with primitives, for ergonomic assertions
impl PartialEq<str> for WireValue {
    fn eq(&self, other: &str) -> bool {
        match self {
            WireValue::Text(s) => s == other,
            _ => false,
        }
    }
}

impl PartialEq<&str> for WireValue {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<i32> for WireValue {
    fn eq(&self, other: &i32) -> bool {
        matches!(self, WireValue::Number(Number::Int(n)) if n == other)
    }
}

impl PartialEq<i64> for WireValue {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, WireValue::Number(Number::Long(n)) if n == other)
    }
}

impl PartialEq<bool> for WireValue {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, WireValue::Bool(b) if b == other)
    }
}
