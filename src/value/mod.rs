mod object;
mod scalar;

use std::fmt;

pub use self::{
    object::Object,
    scalar::{DefaultScalarValue, ScalarValue},
};

/// Serializable value returned from query and field execution.
///
/// Used by the execution engine and resolvers to build up the response
/// structure. Similar to the `Json` type found in the serialize crate.
///
/// It is also similar to the `InputValue` type, but can not contain enum
/// values or variables. Also, lists and objects do not contain any location
/// information since they are generated by resolving fields and values rather
/// than parsing a source query.
#[derive(Clone, Debug, PartialEq)]
#[expect(missing_docs, reason = "self-explanatory")]
pub enum Value<S = DefaultScalarValue> {
    Null,
    Scalar(S),
    List(Vec<Value<S>>),
    Object(Object<S>),
}

impl<S> Value<S> {
    /// Constructs a `null` value.
    pub fn null() -> Self {
        Self::Null
    }

    /// Constructs a scalar value.
    pub fn scalar<T>(s: T) -> Self
    where
        S: From<T>,
    {
        Self::Scalar(s.into())
    }

    /// Constructs a list value.
    pub fn list(l: Vec<Self>) -> Self {
        Self::List(l)
    }

    /// Constructs an object value.
    pub fn object(o: Object<S>) -> Self {
        Self::Object(o)
    }

    /// Indicates whether this value is `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Views the underlying scalar value, if present.
    pub fn as_scalar(&self) -> Option<&S> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Views the underlying object value, if present.
    pub fn as_object_value(&self) -> Option<&Object<S>> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl<S: ScalarValue> Value<S> {
    /// Views the underlying string value, if present.
    pub fn as_string_value(&self) -> Option<&str> {
        self.as_scalar().and_then(ScalarValue::as_str)
    }
}

impl<S: ScalarValue> fmt::Display for Value<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Scalar(s) => write!(f, "{s}"),
            Self::List(list) => {
                write!(f, "[")?;
                for (idx, item) in list.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Object(obj) => {
                write!(f, "{{")?;
                for (idx, (key, value)) in obj.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{key}\": {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl<S, T> From<Option<T>> for Value<S>
where
    Self: From<T>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

impl<S: ScalarValue> From<&str> for Value<S> {
    fn from(s: &str) -> Self {
        Self::scalar(s.to_owned())
    }
}

impl<S: ScalarValue> From<String> for Value<S> {
    fn from(s: String) -> Self {
        Self::scalar(s)
    }
}

impl<S: ScalarValue> From<i32> for Value<S> {
    fn from(i: i32) -> Self {
        Self::scalar(i)
    }
}

impl<S: ScalarValue> From<f64> for Value<S> {
    fn from(f: f64) -> Self {
        Self::scalar(f)
    }
}

impl<S: ScalarValue> From<bool> for Value<S> {
    fn from(b: bool) -> Self {
        Self::scalar(b)
    }
}

#[cfg(test)]
mod tests {
    use super::{Object, Value};

    type V = Value;

    #[test]
    fn display_null() {
        assert_eq!(V::null().to_string(), "null");
    }

    #[test]
    fn display_object() {
        let o: Object<_> = vec![("clientMutationId", V::from("abc")), ("ok", V::from(true))]
            .into_iter()
            .collect();

        assert_eq!(
            V::object(o).to_string(),
            r#"{"clientMutationId": "abc", "ok": true}"#,
        );
    }

    #[test]
    fn add_field_merges_objects() {
        let mut o = Object::with_capacity(1);
        o.add_field(
            "widget",
            V::object(vec![("id", V::scalar(1))].into_iter().collect()),
        );
        o.add_field(
            "widget",
            V::object(vec![("name", V::from("A"))].into_iter().collect()),
        );

        let widget = o.get_field_value("widget").and_then(V::as_object_value);
        assert_eq!(widget.map(Object::field_count), Some(2));
    }

    #[test]
    fn add_field_replaces_scalars() {
        let mut o = Object::with_capacity(1);
        o.add_field("clientMutationId", V::from("old"));
        let prev = o.add_field("clientMutationId", V::null());

        assert_eq!(prev, Some(V::from("old")));
        assert_eq!(o.get_field_value("clientMutationId"), Some(&V::Null));
    }
}
