//! Adapter registry tests: registration policy, tagging, and the wrapped
//! scalar convention.

use arbor::serializer::{
    Adapter, Color, ColorAdapter, ObjectSerializer, SerializerError, TypeProfile,
};
use arbor::wire::{Number, WireObject, WireValue};

#[test]
fn test_color_round_trips_as_wrapped_integer() {
    let mut serializer = ObjectSerializer::new();
    serializer.register_adapter(ColorAdapter);

    let color = Color::rgba(0x10, 0x20, 0x30, 0x40);
    let wire = serializer.serialize(&color).unwrap();

    // Scalar adapter output is wrapped as { classType, value }
    let obj = wire.as_object().unwrap();
    assert_eq!(obj.class_type(), "Color");
    assert_eq!(obj.get("value"), Some(&WireValue::Number(Number::Int(color.argb() as i32))));

    let back: Color = serializer.deserialize_as(&wire).unwrap();
    assert_eq!(back, color);
}

struct InvertedColorAdapter;

impl Adapter for InvertedColorAdapter {
    type Target = Color;

    fn type_name(&self) -> &'static str {
        "InvertedColor"
    }

    fn serialize(&self, value: &Color) -> Result<WireValue, SerializerError> {
        Ok(WireValue::Number(Number::Int(!value.argb() as i32)))
    }

    fn deserialize(&self, wire: &WireValue) -> Result<Color, SerializerError> {
        match wire {
            WireValue::Number(n) => Ok(Color::from_argb(!(n.to_i32() as u32))),
            other => Err(SerializerError::TypeMismatch {
                expected: "InvertedColor (packed integer)".to_string(),
                actual: other.type_name().to_string(),
            }),
        }
    }
}

#[test]
fn test_duplicate_adapter_registration_keeps_the_original() {
    let mut serializer = ObjectSerializer::new();
    serializer.register_adapter(ColorAdapter);
    // Second adapter claiming the same target type: warned and ignored
    serializer.register_adapter(InvertedColorAdapter);

    let color = Color::from_argb(0x01020304);
    let wire = serializer.serialize(&color).unwrap();
    let obj = wire.as_object().unwrap();
    assert_eq!(obj.class_type(), "Color");
    assert_eq!(obj.get("value"), Some(&WireValue::Number(Number::Int(0x01020304))));
}

#[derive(Debug, PartialEq, Clone, Copy)]
struct Span {
    start: i32,
    end: i32,
}
arbor::wire_object!(Span);

struct SpanAdapter;

impl Adapter for SpanAdapter {
    type Target = Span;

    fn type_name(&self) -> &'static str {
        "Span"
    }

    fn serialize(&self, value: &Span) -> Result<WireValue, SerializerError> {
        // Deliberately mis-tagged: the serializer stamps the registered name
        let mut obj = WireObject::new("not-the-real-name");
        obj.insert("start", value.start);
        obj.insert("end", value.end);
        Ok(WireValue::Object(obj))
    }

    fn deserialize(&self, wire: &WireValue) -> Result<Span, SerializerError> {
        let obj = wire.as_object().ok_or_else(|| SerializerError::TypeMismatch {
            expected: "Span (mapping)".to_string(),
            actual: wire.type_name().to_string(),
        })?;
        let read = |key: &str| -> Result<i32, SerializerError> {
            match obj.get(key) {
                Some(WireValue::Number(n)) => Ok(n.to_i32()),
                other => Err(SerializerError::TypeMismatch {
                    expected: "number".to_string(),
                    actual: other.map_or("missing", WireValue::type_name).to_string(),
                }),
            }
        };
        Ok(Span { start: read("start")?, end: read("end")? })
    }
}

#[test]
fn test_mapping_shaped_adapter_output_is_tagged_in_place() {
    let mut serializer = ObjectSerializer::new();
    serializer.register_adapter(SpanAdapter);

    let span = Span { start: 3, end: 9 };
    let wire = serializer.serialize(&span).unwrap();
    let obj = wire.as_object().unwrap();

    // The adapter's own tag was overwritten with the registered name, and
    // there is no wrapped "value" key.
    assert_eq!(obj.class_type(), "Span");
    assert!(obj.get("value").is_none());
    assert_eq!(obj.get("start"), Some(&WireValue::from(3i32)));
}

#[test]
fn test_adapter_without_value_key_receives_the_whole_mapping() {
    let mut serializer = ObjectSerializer::new();
    serializer.register_adapter(SpanAdapter);

    let span = Span { start: 1, end: 2 };
    let wire = serializer.serialize(&span).unwrap();
    let back: Span = serializer.deserialize_as(&wire).unwrap();
    assert_eq!(back, span);
}

#[test]
fn test_adapter_failures_are_wrapped_with_the_target_type() {
    let mut serializer = ObjectSerializer::new();
    serializer.register_adapter(ColorAdapter);

    // A Color object whose "value" has the wrong shape
    let mut obj = WireObject::new("Color");
    obj.insert("value", "not-a-number");

    let err = serializer.deserialize(&WireValue::Object(obj)).unwrap_err();
    assert!(err.is_adapter_error());
    assert!(err.to_string().contains("Color"));
}

#[test]
fn test_adapter_takes_precedence_over_a_profile() {
    let mut serializer = ObjectSerializer::new();
    serializer.register_adapter(SpanAdapter);
    // A profile for the same type under a different name: never consulted
    // on serialize because the adapter claims the TypeId first.
    serializer.register_profile(
        TypeProfile::builder::<Span>("SpanProfile")
            .with_factory(|| Span { start: 0, end: 0 })
            .field("start", |s: &Span| Some(&s.start), |s, v| s.start = v)
            .field("end", |s: &Span| Some(&s.end), |s, v| s.end = v)
            .build(),
    );

    let wire = serializer.serialize(&Span { start: 5, end: 6 }).unwrap();
    assert_eq!(wire.as_object().unwrap().class_type(), "Span");
}
