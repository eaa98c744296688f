use std::{fmt, marker::PhantomData};

use indexmap::IndexMap;
use serde::{
    Deserialize, Serialize,
    de::{self, Deserializer, IntoDeserializer as _},
    ser::{SerializeMap as _, Serializer},
};

use crate::{DefaultScalarValue, FieldError, InputValue, Object, Value};

impl<T: Serialize> Serialize for FieldError<T> {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let has_extensions = !self.extensions().is_null();
        let mut map = ser.serialize_map(Some(1 + usize::from(has_extensions)))?;

        map.serialize_key("message")?;
        map.serialize_value(self.message())?;

        if has_extensions {
            map.serialize_key("extensions")?;
            map.serialize_value(self.extensions())?;
        }

        map.end()
    }
}

impl<'de, S: Deserialize<'de>> Deserialize<'de> for InputValue<S> {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        struct Visitor<S: ?Sized>(PhantomData<S>);

        impl<'de, S: Deserialize<'de>> de::Visitor<'de> for Visitor<S> {
            type Value = InputValue<S>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a valid input value")
            }

            fn visit_bool<E: de::Error>(self, b: bool) -> Result<Self::Value, E> {
                S::deserialize(b.into_deserializer()).map(InputValue::Scalar)
            }

            fn visit_i64<E: de::Error>(self, n: i64) -> Result<Self::Value, E> {
                S::deserialize(n.into_deserializer()).map(InputValue::Scalar)
            }

            fn visit_u64<E: de::Error>(self, n: u64) -> Result<Self::Value, E> {
                S::deserialize(n.into_deserializer()).map(InputValue::Scalar)
            }

            fn visit_f64<E: de::Error>(self, n: f64) -> Result<Self::Value, E> {
                S::deserialize(n.into_deserializer()).map(InputValue::Scalar)
            }

            fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
                S::deserialize(s.into_deserializer()).map(InputValue::Scalar)
            }

            fn visit_string<E: de::Error>(self, s: String) -> Result<Self::Value, E> {
                S::deserialize(s.into_deserializer()).map(InputValue::Scalar)
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(InputValue::Null)
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(InputValue::Null)
            }

            fn visit_seq<V>(self, mut visitor: V) -> Result<Self::Value, V::Error>
            where
                V: de::SeqAccess<'de>,
            {
                let mut vals = Vec::new();
                while let Some(v) = visitor.next_element()? {
                    vals.push(v);
                }
                Ok(InputValue::list(vals))
            }

            fn visit_map<V>(self, mut visitor: V) -> Result<Self::Value, V::Error>
            where
                V: de::MapAccess<'de>,
            {
                let mut obj = IndexMap::<String, InputValue<S>>::with_capacity(
                    visitor.size_hint().unwrap_or(0),
                );
                while let Some((key, val)) = visitor.next_entry()? {
                    obj.insert(key, val);
                }
                Ok(InputValue::object(obj))
            }
        }

        de.deserialize_any(Visitor(PhantomData))
    }
}

impl<T: Serialize> Serialize for InputValue<T> {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => ser.serialize_unit(),
            Self::Scalar(s) => s.serialize(ser),
            Self::Enum(e) => ser.serialize_str(e),
            Self::List(l) => l.serialize(ser),
            Self::Object(o) => o
                .iter()
                .map(|(k, v)| (k.as_str(), v))
                .collect::<IndexMap<_, _>>()
                .serialize(ser),
        }
    }
}

impl<T: Serialize> Serialize for Object<T> {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(self.field_count()))?;
        for (f, v) in self.iter() {
            map.serialize_key(f)?;
            map.serialize_value(v)?;
        }
        map.end()
    }
}

impl<T: Serialize> Serialize for Value<T> {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => ser.serialize_unit(),
            Self::Scalar(s) => s.serialize(ser),
            Self::List(l) => l.serialize(ser),
            Self::Object(o) => o.serialize(ser),
        }
    }
}

impl<'de> Deserialize<'de> for DefaultScalarValue {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        struct Visitor;

        impl de::Visitor<'_> for Visitor {
            type Value = DefaultScalarValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a valid input value")
            }

            fn visit_bool<E: de::Error>(self, b: bool) -> Result<Self::Value, E> {
                Ok(DefaultScalarValue::Boolean(b))
            }

            fn visit_i64<E: de::Error>(self, n: i64) -> Result<Self::Value, E> {
                // Integers out of `Int` range are transferred as floats by
                // `JSON.stringify()`.
                Ok(i32::try_from(n).map_or(
                    DefaultScalarValue::Float(n as f64),
                    DefaultScalarValue::Int,
                ))
            }

            fn visit_u64<E: de::Error>(self, n: u64) -> Result<Self::Value, E> {
                Ok(i32::try_from(n).map_or(
                    DefaultScalarValue::Float(n as f64),
                    DefaultScalarValue::Int,
                ))
            }

            fn visit_f64<E: de::Error>(self, f: f64) -> Result<Self::Value, E> {
                Ok(DefaultScalarValue::Float(f))
            }

            fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
                self.visit_string(s.into())
            }

            fn visit_string<E: de::Error>(self, s: String) -> Result<Self::Value, E> {
                Ok(DefaultScalarValue::String(s))
            }
        }

        de.deserialize_any(Visitor)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{from_str, json, to_string, to_value};

    use crate::{
        Arguments, ExecutionResult, FieldError, Type, Value, graphql_input_value, graphql_value,
        ast::InputValue,
        relay::{ArgumentDefinition, MutationBuilder},
        value::{DefaultScalarValue, Object},
    };

    #[test]
    fn int() {
        assert_eq!(
            from_str::<InputValue>("1235").unwrap(),
            graphql_input_value!(1235),
        );
    }

    #[test]
    fn float() {
        assert_eq!(
            from_str::<InputValue>("2.0").unwrap(),
            graphql_input_value!(2.0),
        );
        // large value without a decimal part is also float
        assert_eq!(
            from_str::<InputValue>("123567890123").unwrap(),
            graphql_input_value!(123_567_890_123.0),
        );
    }

    #[test]
    fn input_object_keeps_order() {
        assert_eq!(
            from_str::<InputValue>(r#"{"name": "A", "clientMutationId": null, "tags": ["x"]}"#)
                .unwrap(),
            graphql_input_value!({"name": "A", "clientMutationId": null, "tags": ["x"]}),
        );
    }

    #[test]
    fn payload() {
        let value: Value = graphql_value!({"widget": {"id": 1}, "clientMutationId": "abc123"});

        assert_eq!(
            to_value(&value).unwrap(),
            json!({"widget": {"id": 1}, "clientMutationId": "abc123"}),
        );
    }

    #[test]
    fn error_extensions() {
        let mut obj: Object<DefaultScalarValue> = Object::with_capacity(1);
        obj.add_field("field", Value::scalar("createWidget"));

        assert_eq!(
            to_string(&FieldError::new("Unauthorized", Value::Object(obj))).unwrap(),
            r#"{"message":"Unauthorized","extensions":{"field":"createWidget"}}"#,
        );
        assert_eq!(
            to_string(&FieldError::<DefaultScalarValue>::from("Widget not found")).unwrap(),
            r#"{"message":"Widget not found"}"#,
        );
    }

    #[tokio::test]
    async fn json_request_round_trip() {
        let mut builder: MutationBuilder = MutationBuilder::new("CreateWidget").unwrap();
        builder
            .argument(ArgumentDefinition::new("widget_name", Type::non_null("String")))
            .unwrap()
            .resolver(|args: Option<Arguments>| async move {
                let name = args.unwrap_or_default().get::<String>("widget_name")?;
                ExecutionResult::Ok(graphql_value!({"widget": {"name": (name)}}))
            });
        let field = builder.build().unwrap().field().unwrap();

        let input = from_str::<InputValue>(
            r#"{"widgetName": "Sprocket", "clientMutationId": "req-7"}"#,
        )
        .unwrap();
        let result = field
            .resolve(Arguments::new().with("input", input))
            .await
            .unwrap();

        assert_eq!(
            to_value(&result).unwrap(),
            json!({"widget": {"name": "Sprocket"}, "clientMutationId": "req-7"}),
        );
    }
}
