use std::fmt;

use arcstr::ArcStr;
use indexmap::IndexMap;

use crate::{
    executor::{FieldError, IntoFieldError},
    value::{DefaultScalarValue, ScalarValue, Value},
};

/// A type literal in the schema.
///
/// This enum carries no semantic information and might refer to types that do
/// not exist.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Type {
    /// A nullable named type, e.g. `String`
    Named(ArcStr),
    /// A nullable list type, e.g. `[String]`
    ///
    /// The list itself is what's nullable, the containing type might be non-null.
    List(Box<Type>),
    /// A non-null named type, e.g. `String!`
    NonNullNamed(ArcStr),
    /// A non-null list type, e.g. `[String]!`.
    ///
    /// The list itself is what's non-null, the containing type might be null.
    NonNullList(Box<Type>),
}

impl Type {
    /// Creates a nullable named type.
    pub fn named(name: impl Into<ArcStr>) -> Self {
        Self::Named(name.into())
    }

    /// Creates a non-null named type.
    pub fn non_null(name: impl Into<ArcStr>) -> Self {
        Self::NonNullNamed(name.into())
    }

    /// Creates a nullable list of the given type.
    pub fn list(of: Self) -> Self {
        Self::List(Box::new(of))
    }

    /// Creates a non-null list of the given type.
    pub fn non_null_list(of: Self) -> Self {
        Self::NonNullList(Box::new(of))
    }

    /// Get the name of a named type.
    ///
    /// Only applies to named types; lists will return `None`.
    pub fn name(&self) -> Option<&ArcStr> {
        match self {
            Self::Named(n) | Self::NonNullNamed(n) => Some(n),
            Self::List(..) | Self::NonNullList(..) => None,
        }
    }

    /// Get the innermost name by unpacking lists
    ///
    /// All type literals contain exactly one named type.
    pub fn innermost_name(&self) -> &ArcStr {
        match self {
            Self::Named(n) | Self::NonNullNamed(n) => n,
            Self::List(l) | Self::NonNullList(l) => l.innermost_name(),
        }
    }

    /// Determines if a type only can represent non-null values.
    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNullNamed(_) | Self::NonNullList(_))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(n) => write!(f, "{n}"),
            Self::NonNullNamed(n) => write!(f, "{n}!"),
            Self::List(t) => write!(f, "[{t}]"),
            Self::NonNullList(t) => write!(f, "[{t}]!"),
        }
    }
}

/// A JSON-like value that can be passed into the field execution, either
/// out-of-band as variables, or in-band as literal arguments.
///
/// Variables are expected to be already substituted by the execution engine.
#[derive(Clone, Debug, PartialEq)]
#[expect(missing_docs, reason = "self-explanatory")]
pub enum InputValue<S = DefaultScalarValue> {
    Null,
    Scalar(S),
    Enum(String),
    List(Vec<InputValue<S>>),
    Object(Vec<(String, InputValue<S>)>),
}

/// Parsing of an unstructured input value into a Rust data type.
///
/// The conversion _can_ fail, and must in that case return [`Err`].
pub trait FromInputValue<S = DefaultScalarValue>: Sized {
    /// Type of this conversion error.
    type Error;

    /// Performs the conversion.
    fn from_input_value(v: &InputValue<S>) -> Result<Self, Self::Error>;

    /// Performs the conversion from an absent value (e.g. to distinguish
    /// between implicit and explicit `null`).
    ///
    /// The default implementation just calls [`from_input_value()`] as if an
    /// explicit `null` was provided.
    ///
    /// [`from_input_value()`]: FromInputValue::from_input_value
    fn from_implicit_null() -> Result<Self, Self::Error> {
        Self::from_input_value(&InputValue::<S>::Null)
    }
}

/// Losslessly clones a Rust data type into an [`InputValue`].
pub trait ToInputValue<S = DefaultScalarValue> {
    /// Performs the conversion.
    fn to_input_value(&self) -> InputValue<S>;
}

impl<S> InputValue<S> {
    /// Construct a `null` value.
    pub fn null() -> Self {
        Self::Null
    }

    /// Construct a scalar value
    pub fn scalar<T>(v: T) -> Self
    where
        S: From<T>,
    {
        Self::Scalar(v.into())
    }

    /// Construct an enum value.
    pub fn enum_value<T: AsRef<str>>(s: T) -> Self {
        Self::Enum(s.as_ref().into())
    }

    /// Construct a list value.
    pub fn list(l: Vec<Self>) -> Self {
        Self::List(l)
    }

    /// Construct an object value.
    pub fn object<K>(o: IndexMap<K, Self>) -> Self
    where
        K: Into<String>,
    {
        Self::Object(o.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Does the value represent a `null`?
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// View the underlying scalar value, if present.
    pub fn as_scalar(&self) -> Option<&S> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// View the underlying object value as a key-value map, if present.
    pub fn to_object_value(&self) -> Option<IndexMap<&str, &Self>> {
        match self {
            Self::Object(o) => Some(o.iter().map(|(k, v)| (k.as_str(), v)).collect()),
            _ => None,
        }
    }

    /// Converts this input value into an output [`Value`].
    ///
    /// Enum values are represented by their names.
    pub fn into_output(self) -> Value<S>
    where
        S: ScalarValue,
    {
        match self {
            Self::Null => Value::Null,
            Self::Scalar(s) => Value::Scalar(s),
            Self::Enum(e) => Value::scalar(e),
            Self::List(l) => Value::list(l.into_iter().map(Self::into_output).collect()),
            Self::Object(o) => Value::object(
                o.into_iter()
                    .map(|(k, v)| (k, v.into_output()))
                    .collect(),
            ),
        }
    }
}

impl<S: ScalarValue> InputValue<S> {
    /// Shorthand form of invoking [`FromInputValue::from_input_value()`].
    pub fn convert<T>(&self) -> Result<T, T::Error>
    where
        T: FromInputValue<S>,
    {
        T::from_input_value(self)
    }

    /// View the underlying string value, if present.
    pub fn as_string_value(&self) -> Option<&str> {
        self.as_scalar().and_then(ScalarValue::as_str)
    }
}

impl<S: ScalarValue> fmt::Display for InputValue<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Scalar(s) => write!(f, "{s}"),
            Self::Enum(v) => write!(f, "{v}"),
            Self::List(v) => {
                write!(f, "[")?;
                for (i, item) in v.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Object(o) => {
                write!(f, "{{")?;
                for (i, (k, v)) in o.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl<S, T> From<Option<T>> for InputValue<S>
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

impl<S: ScalarValue> From<&str> for InputValue<S> {
    fn from(s: &str) -> Self {
        Self::scalar(s.to_owned())
    }
}

impl<S: ScalarValue> From<String> for InputValue<S> {
    fn from(s: String) -> Self {
        Self::scalar(s)
    }
}

impl<S: ScalarValue> From<i32> for InputValue<S> {
    fn from(i: i32) -> Self {
        Self::scalar(i)
    }
}

impl<S: ScalarValue> From<f64> for InputValue<S> {
    fn from(f: f64) -> Self {
        Self::scalar(f)
    }
}

impl<S: ScalarValue> From<bool> for InputValue<S> {
    fn from(b: bool) -> Self {
        Self::scalar(b)
    }
}

impl<S: ScalarValue> FromInputValue<S> for InputValue<S> {
    type Error = FieldError<S>;

    fn from_input_value(v: &InputValue<S>) -> Result<Self, Self::Error> {
        Ok(v.clone())
    }
}

impl<S: ScalarValue> FromInputValue<S> for String {
    type Error = FieldError<S>;

    fn from_input_value(v: &InputValue<S>) -> Result<Self, Self::Error> {
        v.as_string_value()
            .map(str::to_owned)
            .ok_or_else(|| format!("Expected `String`, found: {v}").into())
    }
}

impl<S: ScalarValue> FromInputValue<S> for bool {
    type Error = FieldError<S>;

    fn from_input_value(v: &InputValue<S>) -> Result<Self, Self::Error> {
        v.as_scalar()
            .and_then(ScalarValue::as_bool)
            .ok_or_else(|| format!("Expected `Boolean`, found: {v}").into())
    }
}

impl<S: ScalarValue> FromInputValue<S> for i32 {
    type Error = FieldError<S>;

    fn from_input_value(v: &InputValue<S>) -> Result<Self, Self::Error> {
        v.as_scalar()
            .and_then(ScalarValue::as_int)
            .ok_or_else(|| format!("Expected `Int`, found: {v}").into())
    }
}

impl<S: ScalarValue> FromInputValue<S> for f64 {
    type Error = FieldError<S>;

    fn from_input_value(v: &InputValue<S>) -> Result<Self, Self::Error> {
        v.as_scalar()
            .and_then(ScalarValue::as_float)
            .ok_or_else(|| format!("Expected `Float`, found: {v}").into())
    }
}

impl<S, T> FromInputValue<S> for Option<T>
where
    T: FromInputValue<S>,
{
    type Error = T::Error;

    fn from_input_value(v: &InputValue<S>) -> Result<Self, Self::Error> {
        match v {
            InputValue::Null => Ok(None),
            v => T::from_input_value(v).map(Some),
        }
    }
}

impl<S, T> FromInputValue<S> for Vec<T>
where
    S: ScalarValue,
    T: FromInputValue<S>,
    T::Error: IntoFieldError<S>,
{
    type Error = FieldError<S>;

    fn from_input_value(v: &InputValue<S>) -> Result<Self, Self::Error> {
        match v {
            InputValue::List(l) => l
                .iter()
                .map(|i| T::from_input_value(i).map_err(IntoFieldError::into_field_error))
                .collect(),
            // Input coercion of a single item into a list.
            other => T::from_input_value(other)
                .map(|i| vec![i])
                .map_err(IntoFieldError::into_field_error),
        }
    }
}

impl<S: Clone> ToInputValue<S> for InputValue<S> {
    fn to_input_value(&self) -> InputValue<S> {
        self.clone()
    }
}

impl<S: ScalarValue> ToInputValue<S> for str {
    fn to_input_value(&self) -> InputValue<S> {
        InputValue::scalar(self.to_owned())
    }
}

impl<S: ScalarValue> ToInputValue<S> for String {
    fn to_input_value(&self) -> InputValue<S> {
        InputValue::scalar(self.clone())
    }
}

impl<S: ScalarValue> ToInputValue<S> for bool {
    fn to_input_value(&self) -> InputValue<S> {
        InputValue::scalar(*self)
    }
}

impl<S: ScalarValue> ToInputValue<S> for i32 {
    fn to_input_value(&self) -> InputValue<S> {
        InputValue::scalar(*self)
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::{InputValue, Type};

    type IV = InputValue;

    #[test]
    fn type_display() {
        assert_eq!(Type::non_null("String").to_string(), "String!");
        assert_eq!(
            Type::non_null_list(Type::named("Int")).to_string(),
            "[Int]!",
        );
    }

    #[test]
    fn innermost_name_unpacks_lists() {
        let t = Type::list(Type::non_null_list(Type::non_null("Widget")));

        assert_eq!(t.innermost_name().as_str(), "Widget");
        assert_eq!(t.name(), None);
        assert!(!t.is_non_null());
    }

    #[test]
    fn object_keeps_field_order() {
        let mut fields = IndexMap::new();
        fields.insert("name", IV::from("A"));
        fields.insert("clientMutationId", IV::from("abc123"));

        let value = IV::object(fields);
        let keys = value
            .to_object_value()
            .map(|o| o.keys().copied().collect::<Vec<_>>());

        assert_eq!(keys, Some(vec!["name", "clientMutationId"]));
    }

    #[test]
    fn converts_optional_values() {
        assert_eq!(IV::Null.convert::<Option<String>>(), Ok(None));
        assert_eq!(
            IV::from("A").convert::<Option<String>>(),
            Ok(Some("A".into())),
        );
        assert!(IV::from(1).convert::<String>().is_err());
    }

    #[test]
    fn converts_lists_with_single_item_coercion() {
        assert_eq!(IV::from(1).convert::<Vec<i32>>(), Ok(vec![1]));
        assert_eq!(
            IV::list(vec![IV::from(1), IV::from(2)]).convert::<Vec<i32>>(),
            Ok(vec![1, 2]),
        );
    }
}
