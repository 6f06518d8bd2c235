//! The wire-value data model shared by the config tree and the serializer.
//!
//! This module defines the portable representation every other part of the
//! engine speaks: [`Number`] (width-tagged numeric scalars), [`WireValue`]
//! (the closed sum of representable shapes), and [`WireObject`] (string-keyed
//! mappings carrying the `classType` discriminator).
//!
//! The tree model stores wire values inside properties; the serializer
//! produces and consumes them. Neither side depends on the other — this
//! module is the shared floor.

pub mod errors;
pub mod number;
pub mod value;

pub use errors::WireError;
pub use number::{Number, NumberKind};
pub use value::{CLASS_TYPE_KEY, VALUE_KEY, WireObject, WireValue};
