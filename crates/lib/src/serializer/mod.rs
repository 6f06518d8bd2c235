//! Generic value ⇄ wire-format conversion.
//!
//! The [`ObjectSerializer`] turns arbitrary registered values into portable
//! [`WireValue`]s and rebuilds equivalent values from them. It owns two
//! registries: adapters ([`Adapter`]) for types with a custom scalar
//! representation, and type profiles ([`TypeProfile`]) for everything walked
//! field by field.
//!
//! Serialization classifies a value's [`Shape`] in a fixed priority order —
//! null, simple, sequence, mapping, object — and only object-shaped values
//! touch the registries. Collections and mappings are judged representable
//! from their *first* element alone; this cheap approximation is part of the
//! wire contract and deliberately kept.
//!
//! Registration happens during startup through `&mut self`; lookups take
//! `&self`, so a finished serializer can be shared freely (wrap it in an
//! `Arc` to use it from several threads).
//!
//! # Examples
//!
//! ```
//! use arbor::serializer::{ObjectSerializer, TypeProfile};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Keybind {
//!     key: String,
//!     uses: i32,
//! }
//! arbor::wire_object!(Keybind);
//!
//! let mut serializer = ObjectSerializer::new();
//! serializer.register_profile(
//!     TypeProfile::builder::<Keybind>("Keybind")
//!         .with_default()
//!         .field("key", |k: &Keybind| Some(&k.key), |k, v| k.key = v)
//!         .field("uses", |k: &Keybind| Some(&k.uses), |k, v| k.uses = v)
//!         .build(),
//! );
//!
//! let bind = Keybind { key: "F5".to_string(), uses: 3 };
//! let wire = serializer.serialize(&bind).unwrap();
//! assert_eq!(wire.as_object().unwrap().class_type(), "Keybind");
//!
//! let back: Keybind = serializer.deserialize_as(&wire).unwrap();
//! assert_eq!(back, bind);
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::wire::{VALUE_KEY, WireObject, WireValue};

pub mod adapter;
pub mod color;
pub mod errors;
pub mod from_wire;
pub mod profile;
pub mod shape;

pub use adapter::Adapter;
pub use color::{Color, ColorAdapter};
pub use errors::SerializerError;
pub use from_wire::FromWire;
pub use profile::{FieldProfile, ProfileBuilder, TypeProfile};
pub use shape::{Shape, Wire, WireElement};

use adapter::{Erased, ErasedAdapter};

/// The object serializer: adapter and profile registries plus the
/// classification and rebuild machinery.
///
/// Construct explicitly and register everything at startup; there is no
/// ambient global instance, so test suites can run independent registries
/// side by side.
#[derive(Default)]
pub struct ObjectSerializer {
    adapters: HashMap<TypeId, Arc<dyn ErasedAdapter>>,
    adapters_by_name: HashMap<String, Arc<dyn ErasedAdapter>>,
    profiles: HashMap<TypeId, Arc<TypeProfile>>,
    profiles_by_name: HashMap<String, Arc<TypeProfile>>,
}

impl ObjectSerializer {
    /// Creates a serializer with empty registries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an adapter for its target type.
    ///
    /// One adapter per concrete type: a duplicate registration (by target
    /// type or by name) is logged and ignored, keeping the original.
    pub fn register_adapter<A: Adapter>(&mut self, adapter: A) {
        let target = TypeId::of::<A::Target>();
        let name = adapter.type_name();
        if self.adapters.contains_key(&target) || self.adapters_by_name.contains_key(name) {
            tracing::warn!(
                type_name = name,
                "failed to register type adapter: an adapter for this type is already registered"
            );
            return;
        }
        let erased: Arc<dyn ErasedAdapter> = Arc::new(Erased(adapter));
        self.adapters.insert(target, erased.clone());
        self.adapters_by_name.insert(name.to_string(), erased);
    }

    /// Registers a type profile. Duplicates follow the same
    /// logged-and-ignored policy as adapters.
    pub fn register_profile(&mut self, profile: TypeProfile) {
        if self.profiles.contains_key(&profile.type_id)
            || self.profiles_by_name.contains_key(&profile.type_name)
        {
            tracing::warn!(
                type_name = %profile.type_name,
                "failed to register type profile: a profile for this type is already registered"
            );
            return;
        }
        let profile = Arc::new(profile);
        self.profiles.insert(profile.type_id, profile.clone());
        self.profiles_by_name.insert(profile.type_name.clone(), profile);
    }

    pub fn has_adapter<T: 'static>(&self) -> bool {
        self.adapters.contains_key(&TypeId::of::<T>())
    }

    pub fn has_profile<T: 'static>(&self) -> bool {
        self.profiles.contains_key(&TypeId::of::<T>())
    }

    /// Converts a value into its wire representation.
    ///
    /// Classification order, first match wins: null, simple (identity
    /// passthrough), collection, mapping, then adapter or field walk for
    /// object-shaped values. An object-shaped value with neither an adapter
    /// nor a profile is a fatal error.
    pub fn serialize<T: Wire>(&self, value: &T) -> Result<WireValue, SerializerError> {
        self.serialize_value(value)
    }

    fn serialize_value(&self, value: &dyn Wire) -> Result<WireValue, SerializerError> {
        match value.shape() {
            Shape::Null => Ok(WireValue::Null),
            Shape::Simple(wire) => Ok(wire),
            Shape::Seq(elements) => self.serialize_seq(elements),
            Shape::Map(entries) => self.serialize_map(entries),
            Shape::Object(value, type_name) => self.serialize_object(value, type_name),
        }
    }

    fn serialize_seq(&self, elements: Vec<&dyn Wire>) -> Result<WireValue, SerializerError> {
        if elements.is_empty() {
            return Ok(WireValue::Seq(Vec::new()));
        }
        // Whether the whole collection is representable as-is is judged on
        // the first element alone. Heterogeneous collections can therefore
        // produce inconsistent wire shapes; persisted data relies on the
        // current behavior.
        let passthrough = matches!(elements[0].shape(), Shape::Simple(_));
        let mut out = Vec::with_capacity(elements.len());
        for element in elements {
            match element.shape() {
                Shape::Simple(wire) if passthrough => out.push(wire),
                _ => out.push(self.serialize_value(element)?),
            }
        }
        Ok(WireValue::Seq(out))
    }

    fn serialize_map(&self, entries: Vec<(&dyn Wire, &dyn Wire)>) -> Result<WireValue, SerializerError> {
        if entries.is_empty() {
            // An empty mapping emits an empty sequence
            return Ok(WireValue::Seq(Vec::new()));
        }
        let passthrough = matches!(entries[0].0.shape(), Shape::Simple(_))
            && matches!(entries[0].1.shape(), Shape::Simple(_));
        let mut out = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let key = match key.shape() {
                Shape::Simple(wire) if passthrough => wire,
                _ => self.serialize_value(key)?,
            };
            let value = match value.shape() {
                Shape::Simple(wire) if passthrough => wire,
                _ => self.serialize_value(value)?,
            };
            out.push((key, value));
        }
        Ok(WireValue::Map(out))
    }

    fn serialize_object(&self, value: &dyn Any, type_name: &'static str) -> Result<WireValue, SerializerError> {
        if let Some(adapter) = self.adapters.get(&value.type_id()) {
            let out = adapter.serialize_erased(value)?;
            return Ok(WireValue::Object(match out {
                // A mapping-shaped result is tagged in place
                WireValue::Object(mut obj) => {
                    obj.set_class_type(adapter.type_name());
                    obj
                }
                scalar => WireObject::scalar(adapter.type_name(), scalar),
            }));
        }
        let Some(profile) = self.profiles.get(&value.type_id()) else {
            return Err(SerializerError::Unregistered {
                type_name: type_name.to_string(),
            });
        };
        let mut out = WireObject::new(profile.type_name());
        for field in &profile.fields {
            let Some(field_value) = (field.get)(value) else {
                // Unset fields are omitted
                continue;
            };
            if let Shape::Object(nested, _) = field_value.shape() {
                // One-level self-reference guard, not a general cycle
                // detector: a field aliasing the value being walked is
                // dropped from the output.
                if nested.type_id() == value.type_id()
                    && std::ptr::addr_eq(nested as *const dyn Any, value as *const dyn Any)
                {
                    continue;
                }
            }
            let wire = match field_value.shape() {
                Shape::Simple(wire) => wire,
                _ => self.serialize_value(field_value)?,
            };
            out.insert(field.name, wire);
        }
        Ok(WireValue::Object(out))
    }

    /// Rebuilds a value from its wire representation.
    ///
    /// The input must be an object mapping carrying a `classType`
    /// discriminator; anything else is a fatal error. The discriminator
    /// selects an adapter (fed the wrapped `value` field when present, the
    /// whole mapping otherwise) or a type profile. Wire entries naming no
    /// registered field are silently dropped, which keeps the format
    /// forward-compatible with added and removed fields.
    pub fn deserialize(&self, wire: &WireValue) -> Result<Box<dyn Any>, SerializerError> {
        let WireValue::Object(obj) = wire else {
            return Err(SerializerError::MissingClassType {
                found: wire.type_name().to_string(),
            });
        };
        if let Some(adapter) = self.adapters_by_name.get(obj.class_type()) {
            let input = obj.get(VALUE_KEY).unwrap_or(wire);
            return adapter.deserialize_erased(input);
        }
        let Some(profile) = self.profiles_by_name.get(obj.class_type()) else {
            return Err(SerializerError::UnknownClassType {
                class_type: obj.class_type().to_string(),
            });
        };
        self.rebuild(profile, obj)
    }

    /// Typed variant of [`ObjectSerializer::deserialize`].
    pub fn deserialize_as<T: 'static>(&self, wire: &WireValue) -> Result<T, SerializerError> {
        let value = self.deserialize(wire)?;
        value
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| SerializerError::TypeMismatch {
                expected: std::any::type_name::<T>().to_string(),
                actual: "deserialized value of another type".to_string(),
            })
    }

    fn rebuild(&self, profile: &TypeProfile, obj: &WireObject) -> Result<Box<dyn Any>, SerializerError> {
        let factory = profile
            .factory
            .as_ref()
            .ok_or_else(|| SerializerError::NoAllocationStrategy {
                type_name: profile.type_name.clone(),
            })?;
        let mut value = factory();
        for (name, wire) in obj.iter() {
            // Entries naming no registered field are dropped
            let Some(field) = profile.fields.iter().find(|f| f.name == name.as_str()) else {
                continue;
            };
            (field.set)(&mut *value, wire, self).map_err(|source| SerializerError::FieldSet {
                class_type: profile.type_name.clone(),
                field: name.clone(),
                source: Box::new(source),
            })?;
        }
        Ok(value)
    }
}
