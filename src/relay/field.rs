//! Exposed mutation fields: unwrapping of the `input` argument and
//! reinsertion of the correlation id.

use std::{fmt, sync::Arc};

use arcstr::ArcStr;
use futures::future::{BoxFuture, FutureExt as _};
use indexmap::IndexMap;
use itertools::Itertools as _;

use crate::{
    ast::InputValue,
    executor::{Arguments, ExecutionResult, FieldError, FieldResult},
    relay::{
        CLIENT_MUTATION_ID, CLIENT_MUTATION_ID_KEYWORD, INPUT_ARGUMENT,
        argument::ArgumentDefinition,
        guard,
        mutation::Mutation,
        resolver::Resolve,
    },
    schema::meta::Field,
    value::{DefaultScalarValue, ScalarValue, Value},
};

/// Arguments prepared for a single resolver invocation.
#[derive(Clone, Debug)]
pub struct Invocation<S = DefaultScalarValue> {
    arguments: Option<Arguments<S>>,
    client_mutation_id: Option<InputValue<S>>,
}

impl<S> Invocation<S> {
    /// Keyword arguments the resolver receives.
    ///
    /// [`None`] when there are neither input values nor extras.
    pub fn arguments(&self) -> Option<&Arguments<S>> {
        self.arguments.as_ref()
    }

    /// Correlation id extracted from the input, if provided.
    pub fn client_mutation_id(&self) -> Option<&InputValue<S>> {
        self.client_mutation_id.as_ref()
    }
}

/// Mutation exposed as a field taking the single `input` argument.
pub struct MutationField<S = DefaultScalarValue> {
    mutation: Arc<Mutation<S>>,
    meta: Field<S>,
    input: ArgumentDefinition<S>,
    extras: Vec<ArcStr>,
    resolver: Arc<dyn Resolve<S>>,
}

impl<S: Clone> Clone for MutationField<S> {
    fn clone(&self) -> Self {
        Self {
            mutation: Arc::clone(&self.mutation),
            meta: self.meta.clone(),
            input: self.input.clone(),
            extras: self.extras.clone(),
            resolver: Arc::clone(&self.resolver),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for MutationField<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutationField")
            .field("mutation", self.mutation.name())
            .field("meta", &self.meta)
            .field("extras", &self.extras)
            .finish_non_exhaustive()
    }
}

impl<S: ScalarValue> MutationField<S> {
    pub(crate) fn new(mutation: Arc<Mutation<S>>, resolver: Arc<dyn Resolve<S>>) -> Self {
        Self {
            meta: mutation.field_meta(),
            input: mutation.input_argument(),
            extras: Vec::new(),
            mutation,
            resolver,
        }
    }

    /// Requests additional extras for this field only, on top of the ones of
    /// the mutation.
    #[must_use]
    pub fn extras<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ArcStr>,
    {
        self.extras.extend(names.into_iter().map(Into::into));
        self
    }

    /// Definition behind this field.
    pub fn mutation(&self) -> &Arc<Mutation<S>> {
        &self.mutation
    }

    /// Name of this field.
    pub fn name(&self) -> &ArcStr {
        &self.meta.name
    }

    /// Schema metadata of this field.
    pub fn meta(&self) -> &Field<S> {
        &self.meta
    }

    /// Top-level arguments of this field: only the synthetic `input`.
    pub fn arguments(&self) -> IndexMap<ArcStr, ArgumentDefinition<S>> {
        IndexMap::from([(self.input.name().clone(), self.input.clone())])
    }

    /// Extras passed to the resolver: the mutation's ones followed by the
    /// ones requested by this field, without duplicates.
    pub fn requested_extras(&self) -> impl Iterator<Item = &ArcStr> {
        self.mutation.extras().iter().chain(&self.extras).unique()
    }

    /// Unwraps the `input` value of the `raw` arguments into keyword
    /// arguments, transfers the requested extras and extracts the correlation
    /// id.
    ///
    /// # Errors
    ///
    /// If the `input` value isn't an object, or has a field not declared on
    /// the input type.
    pub fn prepare(&self, mut raw: Arguments<S>) -> FieldResult<Invocation<S>, S> {
        let input_type = self.mutation.input_type();
        let mut arguments = Arguments::new();

        match raw.remove(INPUT_ARGUMENT) {
            None | Some(InputValue::Null) => {}
            Some(InputValue::Object(fields)) => {
                for (name, value) in fields {
                    let argument = input_type.get_argument(&name).ok_or_else(|| {
                        FieldError::from(format!(
                            "Field `{name}` is not defined by type `{}`",
                            input_type.name(),
                        ))
                    })?;
                    arguments.insert(argument.keyword().clone(), value);
                }
                for argument in input_type.arguments() {
                    if let Some(default) = argument.default() {
                        if !arguments.contains(argument.keyword()) {
                            arguments.insert(argument.keyword().clone(), default.clone());
                        }
                    }
                }
            }
            Some(other) => {
                return Err(FieldError::from(format!(
                    "Expected `{}`, found: {other}",
                    input_type.name(),
                )));
            }
        }

        for name in self.requested_extras() {
            if let Some(extra) = raw.get_extra(name) {
                arguments.insert_extra(name.clone(), extra.clone());
            } else if let Some(value) = raw.remove(name) {
                arguments.insert(name.clone(), value);
            }
        }

        let client_mutation_id = arguments.remove(CLIENT_MUTATION_ID_KEYWORD);

        Ok(Invocation {
            arguments: (!arguments.is_empty()).then_some(arguments),
            client_mutation_id,
        })
    }

    /// Invokes the resolver with the prepared arguments and, once its result
    /// settles, sets `clientMutationId` on it if it's an object.
    ///
    /// Resolver errors and non-object results are returned untouched.
    pub fn invoke(&self, invocation: Invocation<S>) -> BoxFuture<'static, ExecutionResult<S>> {
        let Invocation {
            arguments,
            client_mutation_id,
        } = invocation;
        let pending = self.resolver.resolve(arguments);
        let name = self.name().clone();

        let fut = async move {
            crate::__relay_trace!("resolving mutation field `{}`", name);
            let value = pending.await?;
            Ok(match value {
                Value::Object(mut object) => {
                    let _ = object.remove_field(CLIENT_MUTATION_ID);
                    let _ = object.add_field(
                        CLIENT_MUTATION_ID,
                        client_mutation_id.map_or_else(Value::null, InputValue::into_output),
                    );
                    Value::Object(object)
                }
                other => other,
            })
        };

        crate::__relay_instrument_trace!(fut, "mutation").boxed()
    }

    /// Prepares the `raw` arguments and invokes the resolver.
    ///
    /// Preparation errors are returned from the future.
    pub fn resolve(&self, raw: Arguments<S>) -> BoxFuture<'static, ExecutionResult<S>> {
        match self.prepare(raw) {
            Ok(invocation) => self.invoke(invocation),
            Err(e) => futures::future::ready(Err(e)).boxed(),
        }
    }

    /// Runs the standard per-argument authorization check against the
    /// arguments nested in the input type rather than against the given
    /// top-level `arguments`.
    ///
    /// `values` are keyword arguments, as produced by [`prepare()`].
    ///
    /// [`prepare()`]: MutationField::prepare
    pub fn authorize_arguments<'a>(
        &'a self,
        arguments: &'a IndexMap<ArcStr, ArgumentDefinition<S>>,
        values: &'a Arguments<S>,
    ) -> BoxFuture<'a, FieldResult<bool, S>> {
        match arguments.get(INPUT_ARGUMENT).and_then(ArgumentDefinition::input_object) {
            Some(input_type) => guard::authorize_arguments(input_type.arguments(), values),
            None => guard::authorize_arguments(arguments.values(), values),
        }
    }
}
