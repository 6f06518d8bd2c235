//! Numeric wire scalars.
//!
//! Configuration values written by different frontends arrive with different
//! numeric widths, and the width a value was written with is preserved on the
//! wire. [`Number`] carries the value together with its width so that the
//! deserializer can narrow or widen it to whatever a target field declares.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Width discriminant for [`Number`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumberKind {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
}

/// A numeric scalar with an explicit width.
///
/// Equality is width-strict: `Number::Int(5)` and `Number::Long(5)` are not
/// equal. Use [`Number::coerce`] to compare across widths.
///
/// # Examples
///
/// ```
/// use arbor::wire::{Number, NumberKind};
///
/// let n = Number::Long(300);
/// assert_eq!(n.coerce(NumberKind::Int), Number::Int(300));
/// assert_ne!(Number::Int(5), Number::Long(5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Number {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl Number {
    /// Returns the width of this number.
    pub fn kind(&self) -> NumberKind {
        match self {
            Number::Byte(_) => NumberKind::Byte,
            Number::Short(_) => NumberKind::Short,
            Number::Int(_) => NumberKind::Int,
            Number::Long(_) => NumberKind::Long,
            Number::Float(_) => NumberKind::Float,
            Number::Double(_) => NumberKind::Double,
        }
    }

    /// Widening view as `i64`. Fractional values are truncated.
    pub fn as_i64(&self) -> i64 {
        self.to_i64()
    }

    /// Widening view as `f64`.
    pub fn as_f64(&self) -> f64 {
        self.to_f64()
    }

    pub fn to_i8(&self) -> i8 {
        match self {
            Number::Byte(v) => *v,
            Number::Short(v) => *v as i8,
            Number::Int(v) => *v as i8,
            Number::Long(v) => *v as i8,
            Number::Float(v) => *v as i8,
            Number::Double(v) => *v as i8,
        }
    }

    pub fn to_i16(&self) -> i16 {
        match self {
            Number::Byte(v) => *v as i16,
            Number::Short(v) => *v,
            Number::Int(v) => *v as i16,
            Number::Long(v) => *v as i16,
            Number::Float(v) => *v as i16,
            Number::Double(v) => *v as i16,
        }
    }

    pub fn to_i32(&self) -> i32 {
        match self {
            Number::Byte(v) => *v as i32,
            Number::Short(v) => *v as i32,
            Number::Int(v) => *v,
            Number::Long(v) => *v as i32,
            Number::Float(v) => *v as i32,
            Number::Double(v) => *v as i32,
        }
    }

    pub fn to_i64(&self) -> i64 {
        match self {
            Number::Byte(v) => *v as i64,
            Number::Short(v) => *v as i64,
            Number::Int(v) => *v as i64,
            Number::Long(v) => *v,
            Number::Float(v) => *v as i64,
            Number::Double(v) => *v as i64,
        }
    }

    pub fn to_f32(&self) -> f32 {
        match self {
            Number::Byte(v) => *v as f32,
            Number::Short(v) => *v as f32,
            Number::Int(v) => *v as f32,
            Number::Long(v) => *v as f32,
            Number::Float(v) => *v,
            Number::Double(v) => *v as f32,
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Number::Byte(v) => *v as f64,
            Number::Short(v) => *v as f64,
            Number::Int(v) => *v as f64,
            Number::Long(v) => *v as f64,
            Number::Float(v) => *v as f64,
            Number::Double(v) => *v,
        }
    }

    /// Converts this number to the requested width using standard numeric
    /// conversion. This is the coercion step the deserializer applies when a
    /// stored number targets a field of a different numeric type.
    pub fn coerce(&self, kind: NumberKind) -> Number {
        match kind {
            NumberKind::Byte => Number::Byte(self.to_i8()),
            NumberKind::Short => Number::Short(self.to_i16()),
            NumberKind::Int => Number::Int(self.to_i32()),
            NumberKind::Long => Number::Long(self.to_i64()),
            NumberKind::Float => Number::Float(self.to_f32()),
            NumberKind::Double => Number::Double(self.to_f64()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Byte(v) => write!(f, "{v}"),
            Number::Short(v) => write!(f, "{v}"),
            Number::Int(v) => write!(f, "{v}"),
            Number::Long(v) => write!(f, "{v}"),
            Number::Float(v) => write!(f, "{v}"),
            Number::Double(v) => write!(f, "{v}"),
        }
    }
}

impl From<i8> for Number {
    fn from(value: i8) -> Self {
        Number::Byte(value)
    }
}

impl From<i16> for Number {
    fn from(value: i16) -> Self {
        Number::Short(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Int(value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Long(value)
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Double(value)
    }
}

impl From<u8> for Number {
    fn from(value: u8) -> Self {
        Number::Int(value as i32)
    }
}

impl From<u16> for Number {
    fn from(value: u16) -> Self {
        Number::Int(value as i32)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        // Convert to i64, clamping is the caller's concern
        Number::Long(value as i64)
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        // Convert to i64, clamping if necessary
        Number::Long(value as i64)
    }
}

impl From<usize> for Number {
    fn from(value: usize) -> Self {
        Number::Long(value as i64)
    }
}
