//! Resolver-facing execution types: field errors and argument containers.

use std::{any::Any, fmt, sync::Arc};

use arcstr::ArcStr;
use indexmap::IndexMap;

use crate::{
    ast::{FromInputValue, InputValue},
    value::{DefaultScalarValue, ScalarValue, Value},
};

/// Error type for errors that occur during field resolution.
///
/// Field errors are represented by a human-readable error message and an
/// optional `Value` structure containing additional information.
///
/// They can be converted to from any type that implements [`fmt::Display`],
/// which makes error chaining with the `?` operator a breeze:
///
/// ```rust
/// # use juniper_relay::FieldError;
/// fn get_string(data: Vec<u8>) -> Result<String, FieldError> {
///     let s = String::from_utf8(data)?;
///     Ok(s)
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FieldError<S = DefaultScalarValue> {
    message: String,
    extensions: Value<S>,
}

impl<T: fmt::Display, S> From<T> for FieldError<S> {
    fn from(e: T) -> Self {
        Self {
            message: e.to_string(),
            extensions: Value::null(),
        }
    }
}

impl<S> FieldError<S> {
    /// Construct a new [`FieldError`] with additional data.
    ///
    /// The `extensions` parameter will be added to the `"extensions"` field of
    /// the error object in the JSON response. If it's [`Value::Null`], no
    /// extra data will be included.
    #[must_use]
    pub fn new<T: fmt::Display>(e: T, extensions: Value<S>) -> Self {
        Self {
            message: e.to_string(),
            extensions,
        }
    }

    /// Returns the `"message"` field of this [`FieldError`].
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the `"extensions"` field of this [`FieldError`].
    ///
    /// If there is no `"extensions"`, then [`Value::Null`] will be returned.
    #[must_use]
    pub fn extensions(&self) -> &Value<S> {
        &self.extensions
    }
}

/// The result of resolving the value of a field of type `T`
pub type FieldResult<T, S = DefaultScalarValue> = Result<T, FieldError<S>>;

/// The result of resolving an unspecified field
pub type ExecutionResult<S = DefaultScalarValue> = Result<Value<S>, FieldError<S>>;

/// Custom error handling trait to enable error types other than [`FieldError`]
/// to be specified as return value.
///
/// Any custom error type should implement this trait to convert itself into a
/// [`FieldError`].
pub trait IntoFieldError<S = DefaultScalarValue> {
    /// Performs the custom conversion into a [`FieldError`].
    #[must_use]
    fn into_field_error(self) -> FieldError<S>;
}

impl<S> IntoFieldError<S> for FieldError<S> {
    fn into_field_error(self) -> FieldError<S> {
        self
    }
}

impl<S> IntoFieldError<S> for &str {
    fn into_field_error(self) -> FieldError<S> {
        FieldError::<S>::from(self)
    }
}

impl<S> IntoFieldError<S> for String {
    fn into_field_error(self) -> FieldError<S> {
        FieldError::<S>::from(self)
    }
}

/// Context-derived value handed to a resolver alongside its arguments.
///
/// Extras are never supplied by clients: the execution engine places them into
/// the raw field arguments (e.g. a look-ahead of the selection, or the request
/// context) and resolvers opt into receiving them by name.
#[derive(Clone)]
pub struct Extra(Arc<dyn Any + Send + Sync>);

impl Extra {
    /// Wraps the provided `value` into an [`Extra`].
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Wraps an already shared `value` into an [`Extra`].
    pub fn shared<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self(value)
    }

    /// Downcasts the wrapped value to `T`, if it's one.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

impl fmt::Debug for Extra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Extra").finish_non_exhaustive()
    }
}

/// Field argument container.
///
/// Used both for the raw arguments an execution engine passes to a single
/// field invocation, and for the unwrapped keyword arguments a mutation
/// resolver receives.
#[derive(Clone, Debug)]
pub struct Arguments<S = DefaultScalarValue> {
    values: IndexMap<ArcStr, InputValue<S>>,
    extras: IndexMap<ArcStr, Extra>,
}

impl<S> Default for Arguments<S> {
    fn default() -> Self {
        Self {
            values: IndexMap::new(),
            extras: IndexMap::new(),
        }
    }
}

impl<S> Arguments<S> {
    /// Creates an empty [`Arguments`] container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the given argument `value`, returning this container.
    #[must_use]
    pub fn with(mut self, name: impl Into<ArcStr>, value: impl Into<InputValue<S>>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds the given `extra` value, returning this container.
    #[must_use]
    pub fn with_extra(mut self, name: impl Into<ArcStr>, extra: Extra) -> Self {
        self.insert_extra(name, extra);
        self
    }

    /// Inserts an argument value, returning the replaced one, if any.
    pub fn insert(
        &mut self,
        name: impl Into<ArcStr>,
        value: impl Into<InputValue<S>>,
    ) -> Option<InputValue<S>> {
        self.values.insert(name.into(), value.into())
    }

    /// Inserts an extra value, returning the replaced one, if any.
    pub fn insert_extra(&mut self, name: impl Into<ArcStr>, extra: Extra) -> Option<Extra> {
        self.extras.insert(name.into(), extra)
    }

    /// Removes an argument value, returning it.
    pub fn remove(&mut self, name: &str) -> Option<InputValue<S>> {
        self.values.shift_remove(name)
    }

    /// Returns the raw [`InputValue`] of the given argument, if present.
    pub fn get_input_value(&self, name: &str) -> Option<&InputValue<S>> {
        self.values.get(name)
    }

    /// Returns the [`Extra`] of the given name, if present.
    pub fn get_extra(&self, name: &str) -> Option<&Extra> {
        self.extras.get(name)
    }

    /// Returns the extra value of the given name downcast to `T`.
    ///
    /// [`None`] if it's absent or of another type.
    pub fn extra<T: Any>(&self, name: &str) -> Option<&T> {
        self.get_extra(name).and_then(Extra::downcast_ref)
    }

    /// Indicates whether an argument value with the given name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Indicates whether an extra value with the given name is present.
    pub fn contains_extra(&self, name: &str) -> bool {
        self.extras.contains_key(name)
    }

    /// Indicates whether neither argument values nor extras are present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.extras.is_empty()
    }

    /// Returns an iterator over the argument values, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ArcStr, &InputValue<S>)> {
        self.values.iter()
    }

    /// Returns the names of the present argument values, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &ArcStr> {
        self.values.keys()
    }

    /// Returns the names of the present extras, in insertion order.
    pub fn extra_names(&self) -> impl Iterator<Item = &ArcStr> {
        self.extras.keys()
    }
}

impl<S: ScalarValue> Arguments<S> {
    /// Gets and converts an argument into the desired type.
    ///
    /// If the argument is found it will be converted into the type `T`.
    /// Absent arguments are converted as an implicit `null`, so they succeed
    /// only for nullable `T`.
    ///
    /// # Errors
    ///
    /// If the [`FromInputValue`] conversion fails.
    pub fn get<T>(&self, name: &str) -> FieldResult<T, S>
    where
        T: FromInputValue<S>,
        T::Error: IntoFieldError<S>,
    {
        self.values
            .get(name)
            .map(T::from_input_value)
            .unwrap_or_else(T::from_implicit_null)
            .map_err(IntoFieldError::into_field_error)
    }
}

impl<S, K, V> FromIterator<(K, V)> for Arguments<S>
where
    K: Into<ArcStr>,
    V: Into<InputValue<S>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Self::new();
        for (k, v) in iter {
            args.insert(k, v);
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{Arguments, Extra, FieldError};
    use crate::{ast::InputValue, value::Value};

    struct Lookahead(&'static str);

    #[test]
    fn field_error_from_display() {
        let err = FieldError::<crate::DefaultScalarValue>::from("Widget not found");

        assert_eq!(err.message(), "Widget not found");
        assert_eq!(err.extensions(), &Value::Null);
    }

    #[test]
    fn gets_typed_values() {
        let args: Arguments = Arguments::new().with("name", "A").with("count", 2);

        assert_eq!(args.get::<String>("name"), Ok("A".into()));
        assert_eq!(args.get::<i32>("count"), Ok(2));
        assert_eq!(args.get::<Option<String>>("missing"), Ok(None));
        assert!(args.get::<String>("missing").is_err());
    }

    #[test]
    fn downcasts_extras() {
        let args = Arguments::<crate::DefaultScalarValue>::new()
            .with_extra("lookahead", Extra::new(Lookahead("widget")))
            .with_extra("viewer", Extra::shared(Arc::new(7_u32)));

        assert_eq!(args.extra::<Lookahead>("lookahead").map(|l| l.0), Some("widget"));
        assert_eq!(args.extra::<u32>("viewer"), Some(&7));
        assert!(args.extra::<String>("viewer").is_none());
        assert!(!args.is_empty());
    }

    #[test]
    fn removal_keeps_order() {
        let mut args: Arguments = Arguments::new()
            .with("a", 1)
            .with("client_mutation_id", "x")
            .with("b", 2);

        assert_eq!(
            args.remove("client_mutation_id"),
            Some(InputValue::scalar("x")),
        );
        assert_eq!(
            args.names().map(|n| n.as_str()).collect::<Vec<_>>(),
            vec!["a", "b"],
        );
    }
}
