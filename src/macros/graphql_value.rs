//! [`graphql_value!`] and [`graphql_input_value!`] macros implementation.
//!
//! [`graphql_value!`]: crate::graphql_value
//! [`graphql_input_value!`]: crate::graphql_input_value

/// Constructs [`Value`]s via JSON-like syntax.
///
/// Object keys must be literals. Compound expressions should be wrapped into
/// parentheses.
///
/// ```rust
/// # use juniper_relay::{graphql_value, Value};
/// #
/// let id = 7;
///
/// let value: Value = graphql_value!({
///     "widget": {"id": (id), "name": "A", "tags": ["new", null]},
///     "clientMutationId": "abc123",
/// });
/// ```
///
/// [`Value`]: crate::Value
#[macro_export]
macro_rules! graphql_value {
    (null$(,)?) => ($crate::Value::null());

    (None$(,)?) => ($crate::Value::null());

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::list(vec![ $( $crate::graphql_value!($elem), )* ])
    };

    ({}$(,)?) => ($crate::Value::object($crate::Object::with_capacity(0)));

    ({ $($key:literal : $val:tt),+ $(,)? }) => {{
        let mut object = $crate::Object::with_capacity(0);
        $( let _ = object.add_field($key, $crate::graphql_value!($val)); )+
        $crate::Value::object(object)
    }};

    ($e:expr$(,)?) => ($crate::Value::from($e));
}

/// Constructs [`InputValue`]s via JSON-like syntax.
///
/// Bare identifiers become enum values.
///
/// ```rust
/// # use juniper_relay::{graphql_input_value, InputValue};
/// #
/// let input: InputValue = graphql_input_value!({
///     "name": "A",
///     "color": BLUE,
///     "clientMutationId": "abc123",
/// });
/// ```
///
/// [`InputValue`]: crate::InputValue
#[macro_export]
macro_rules! graphql_input_value {
    (null$(,)?) => ($crate::InputValue::null());

    (None$(,)?) => ($crate::InputValue::null());

    (true$(,)?) => ($crate::InputValue::from(true));

    (false$(,)?) => ($crate::InputValue::from(false));

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::InputValue::list(vec![ $( $crate::graphql_input_value!($elem), )* ])
    };

    ({ $($key:literal : $val:tt),* $(,)? }) => {
        $crate::InputValue::Object(vec![
            $( (::std::string::String::from($key), $crate::graphql_input_value!($val)), )*
        ])
    };

    ($enum:ident$(,)?) => ($crate::InputValue::enum_value(stringify!($enum)));

    ($e:expr$(,)?) => ($crate::InputValue::from($e));
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use crate::{InputValue, Object, Value};

    type V = Value;
    type IV = InputValue;

    #[test]
    fn builds_values() {
        let id = 7;

        assert_eq!(graphql_value!(null), V::Null);
        assert_eq!(graphql_value!("abc"), V::scalar("abc"));
        assert_eq!(graphql_value!([1, null, true]), V::list(vec![
            V::scalar(1),
            V::Null,
            V::scalar(true),
        ]));
        assert_eq!(
            graphql_value!({"widget": {"id": (id)}, "ok": true}),
            V::object(
                vec![
                    (
                        "widget",
                        V::object(vec![("id", V::scalar(7))].into_iter().collect::<Object<_>>()),
                    ),
                    ("ok", V::scalar(true)),
                ]
                .into_iter()
                .collect(),
            ),
        );
        assert_eq!(graphql_value!({}), V::object(Object::with_capacity(0)));
    }

    #[test]
    fn builds_input_values() {
        assert_eq!(graphql_input_value!(null), IV::Null);
        assert_eq!(graphql_input_value!(BLUE), IV::enum_value("BLUE"));
        assert_eq!(graphql_input_value!([1, false]), IV::list(vec![
            IV::scalar(1),
            IV::scalar(false),
        ]));
        assert_eq!(
            graphql_input_value!({"name": "A", "clientMutationId": null}),
            IV::object(IndexMap::from([
                ("name", IV::scalar("A")),
                ("clientMutationId", IV::Null),
            ])),
        );
    }
}
