//! Root mutation type dispatching to registered mutation fields.

use arcstr::ArcStr;
use fnv::FnvHashSet;
use futures::future::{self, BoxFuture, FutureExt as _};
use indexmap::IndexMap;

use crate::{
    executor::{Arguments, ExecutionResult, FieldError},
    graphql_value,
    relay::{ConfigError, field::MutationField},
    schema::meta::{MetaType, ObjectMeta},
    util::is_valid_name,
    value::{DefaultScalarValue, ScalarValue},
};

/// Root mutation type collecting [`MutationField`]s.
pub struct MutationRoot<S = DefaultScalarValue> {
    name: ArcStr,
    fields: IndexMap<ArcStr, MutationField<S>>,
}

impl<S> Default for MutationRoot<S> {
    fn default() -> Self {
        Self {
            name: ArcStr::from("Mutation"),
            fields: IndexMap::new(),
        }
    }
}

impl<S: ScalarValue> MutationRoot<S> {
    /// Creates an empty root type named `Mutation`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty root type with the given `name`.
    ///
    /// # Errors
    ///
    /// If the `name` isn't a valid GraphQL name.
    pub fn with_name(name: impl Into<ArcStr>) -> Result<Self, ConfigError> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(ConfigError::InvalidName(name));
        }
        Ok(Self {
            name,
            fields: IndexMap::new(),
        })
    }

    /// Registers a mutation field.
    ///
    /// # Errors
    ///
    /// If a field with the same name is already registered, or a type
    /// generated for the field clashes with an already known type.
    pub fn register(&mut self, field: MutationField<S>) -> Result<&mut Self, ConfigError> {
        if self.fields.contains_key(field.name()) {
            return Err(ConfigError::DuplicateField {
                name: field.name().clone(),
                definition: self.name.clone(),
            });
        }

        let mut known = self
            .types()
            .iter()
            .map(|t| t.name().clone())
            .collect::<FnvHashSet<_>>();
        for t in field.mutation().types() {
            if !known.insert(t.name().clone()) {
                return Err(ConfigError::DuplicateTypeName(t.name().clone()));
            }
        }

        crate::__relay_trace_debug!("registered mutation field `{}`", field.name());
        self.fields.insert(field.name().clone(), field);
        Ok(self)
    }

    /// Name of this root type.
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// Registered field with the given `name`.
    pub fn field(&self, name: &str) -> Option<&MutationField<S>> {
        self.fields.get(name)
    }

    /// Registered fields, in registration order.
    pub fn fields(&self) -> impl Iterator<Item = &MutationField<S>> {
        self.fields.values()
    }

    /// Schema metadata of this root type.
    pub fn meta(&self) -> MetaType<S> {
        let fields = self.fields.values().map(|f| f.meta().clone()).collect::<Vec<_>>();
        ObjectMeta::new(self.name.clone(), &fields).into_meta()
    }

    /// This root type followed by every input and payload type of the
    /// registered fields.
    pub fn types(&self) -> Vec<MetaType<S>> {
        let mut seen = FnvHashSet::default();
        let mut types = vec![self.meta()];
        seen.insert(self.name.clone());
        for t in self.fields.values().flat_map(|f| f.mutation().types()) {
            if seen.insert(t.name().clone()) {
                types.push(t);
            }
        }
        types
    }

    /// Resolves the field with the given `name`.
    ///
    /// The unwrapped arguments are authorized first, and the resolver is
    /// only invoked when every argument guard allows its value.
    pub fn resolve_field(&self, name: &str, raw: Arguments<S>) -> BoxFuture<'static, ExecutionResult<S>> {
        let Some(field) = self.fields.get(name).cloned() else {
            return future::ready(Err(FieldError::from(format!(
                "Field `{name}` is not defined by type `{}`",
                self.name,
            ))))
            .boxed();
        };

        async move {
            let invocation = field.prepare(raw)?;
            let empty = Arguments::new();
            let values = invocation.arguments().unwrap_or(&empty);
            let arguments = field.arguments();
            if !field.authorize_arguments(&arguments, values).await? {
                crate::__relay_trace_debug!("unauthorized arguments for `{}`", field.name());
                return Err(FieldError::new(
                    "Unauthorized",
                    graphql_value!({"field": (field.name().as_str())}),
                ));
            }
            field.invoke(invocation).await
        }
        .boxed()
    }
}
