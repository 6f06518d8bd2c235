//! Type profiles: the capability table behind the generic object walk.
//!
//! A [`TypeProfile`] describes one concrete type to the serializer: how to
//! allocate a blank instance and how to reach every serializable field
//! through typed get/set closures. Profiles are built once, at registration
//! time, and consulted on every serialize/deserialize call — there is no
//! per-call type introspection.

use std::any::{Any, TypeId, type_name};
use std::marker::PhantomData;

use crate::wire::WireValue;

use super::ObjectSerializer;
use super::errors::SerializerError;
use super::from_wire::FromWire;
use super::shape::Wire;

pub(crate) type GetFn = Box<dyn for<'a> Fn(&'a dyn Any) -> Option<&'a dyn Wire> + Send + Sync>;
pub(crate) type SetFn =
    Box<dyn Fn(&mut dyn Any, &WireValue, &ObjectSerializer) -> Result<(), SerializerError> + Send + Sync>;
pub(crate) type FactoryFn = Box<dyn Fn() -> Box<dyn Any> + Send + Sync>;

/// One field of a registered type: a name plus type-erased accessors.
pub struct FieldProfile {
    pub(crate) name: &'static str,
    pub(crate) get: GetFn,
    pub(crate) set: SetFn,
}

/// The registered description of one concrete type.
///
/// Build with [`TypeProfile::builder`]; register with
/// [`ObjectSerializer::register_profile`].
pub struct TypeProfile {
    pub(crate) type_name: String,
    pub(crate) type_id: TypeId,
    pub(crate) factory: Option<FactoryFn>,
    pub(crate) fields: Vec<FieldProfile>,
}

impl TypeProfile {
    /// Starts a profile for `T`, registered under `type_name` — the string
    /// written as the wire `classType` discriminator.
    pub fn builder<T: 'static>(type_name: impl Into<String>) -> ProfileBuilder<T> {
        ProfileBuilder {
            type_name: type_name.into(),
            factory: None,
            fields: Vec::new(),
            _marker: PhantomData,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The `TypeId` this profile describes.
    pub fn target(&self) -> TypeId {
        self.type_id
    }
}

/// Builder for [`TypeProfile`].
pub struct ProfileBuilder<T> {
    type_name: String,
    factory: Option<FactoryFn>,
    fields: Vec<FieldProfile>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> ProfileBuilder<T> {
    /// Allocates blank instances with `T::default()` during deserialization.
    pub fn with_default(mut self) -> Self
    where
        T: Default,
    {
        self.factory = Some(Box::new(|| Box::new(T::default())));
        self
    }

    /// Allocates blank instances with a custom factory, for types without a
    /// usable `Default`. A profile with no factory at all can still
    /// serialize, but deserialization fails with a no-allocation-strategy
    /// error.
    pub fn with_factory(mut self, factory: impl Fn() -> T + Send + Sync + 'static) -> Self {
        self.factory = Some(Box::new(move || Box::new(factory())));
        self
    }

    /// Declares a field with typed accessors. Declaration order is walk
    /// order; re-declaring a name makes the later declaration win on the
    /// wire while the earlier one receives stored values.
    ///
    /// The getter returns `None` for an unset field, which omits it from the
    /// wire output. The setter receives the stored value after unboxing to
    /// the field's declared type.
    pub fn field<F, G, S>(mut self, name: &'static str, get: G, set: S) -> Self
    where
        F: Wire + FromWire + 'static,
        G: for<'a> Fn(&'a T) -> Option<&'a F> + Send + Sync + 'static,
        S: Fn(&mut T, F) + Send + Sync + 'static,
    {
        let get: GetFn = Box::new(move |obj: &dyn Any| {
            let t = obj.downcast_ref::<T>()?;
            get(t).map(|f| f as &dyn Wire)
        });
        let set: SetFn = Box::new(
            move |obj: &mut dyn Any, wire: &WireValue, serializer: &ObjectSerializer| {
                let t = obj.downcast_mut::<T>().ok_or_else(|| SerializerError::TypeMismatch {
                    expected: type_name::<T>().to_string(),
                    actual: "foreign receiver".to_string(),
                })?;
                let value = F::from_wire(wire, serializer)?;
                set(t, value);
                Ok(())
            },
        );
        self.fields.push(FieldProfile { name, get, set });
        self
    }

    pub fn build(self) -> TypeProfile {
        TypeProfile {
            type_name: self.type_name,
            type_id: TypeId::of::<T>(),
            factory: self.factory,
            fields: self.fields,
        }
    }
}
