//! Packed ARGB colors and their wire adapter.
//!
//! Colors are the classic adapter case: a small value type whose natural
//! wire form is a single packed integer rather than a field-by-field walk.

use crate::wire::{Number, WireValue};

use super::adapter::Adapter;
use super::errors::SerializerError;

/// A color packed as `0xAARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

crate::wire_object!(Color);

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    pub const fn argb(&self) -> u32 {
        self.0
    }

    pub const fn alpha(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(&self) -> u8 {
        self.0 as u8
    }
}

/// Converts [`Color`] to and from its packed integer.
///
/// On the wire a color is `{ classType: "Color", value: <int> }`.
pub struct ColorAdapter;

impl Adapter for ColorAdapter {
    type Target = Color;

    fn type_name(&self) -> &'static str {
        "Color"
    }

    fn serialize(&self, value: &Color) -> Result<WireValue, SerializerError> {
        Ok(WireValue::Number(Number::Int(value.argb() as i32)))
    }

    fn deserialize(&self, wire: &WireValue) -> Result<Color, SerializerError> {
        match wire {
            WireValue::Number(n) => Ok(Color::from_argb(n.to_i32() as u32)),
            other => Err(SerializerError::TypeMismatch {
                expected: "Color (packed integer)".to_string(),
                actual: other.type_name().to_string(),
            }),
        }
    }
}
