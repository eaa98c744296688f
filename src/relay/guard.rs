//! Per-argument authorization.

use futures::future::{self, BoxFuture, FutureExt as _};

use crate::{
    ast::InputValue,
    executor::{Arguments, FieldResult},
    relay::argument::ArgumentDefinition,
    value::{DefaultScalarValue, ScalarValue},
};

/// Authorization rule attached to a declared argument.
///
/// Evaluated only when a value for the argument is actually provided.
pub trait ArgumentGuard<S = DefaultScalarValue>: Send + Sync {
    /// Decides whether the provided `value` is allowed.
    ///
    /// `arguments` holds every unwrapped argument of the invocation, extras
    /// included, so guards can consult the request context.
    fn authorize<'a>(
        &'a self,
        value: &'a InputValue<S>,
        arguments: &'a Arguments<S>,
    ) -> BoxFuture<'a, FieldResult<bool, S>>;
}

/// [`ArgumentGuard`] backed by a synchronous predicate.
pub struct FnGuard<F>(F);

impl<F> FnGuard<F> {
    /// Wraps the given `predicate`.
    pub fn new(predicate: F) -> Self {
        Self(predicate)
    }
}

impl<S, F> ArgumentGuard<S> for FnGuard<F>
where
    S: ScalarValue,
    F: Fn(&InputValue<S>) -> bool + Send + Sync,
{
    fn authorize<'a>(
        &'a self,
        value: &'a InputValue<S>,
        _: &'a Arguments<S>,
    ) -> BoxFuture<'a, FieldResult<bool, S>> {
        future::ready(Ok((self.0)(value))).boxed()
    }
}

/// Standard per-argument authorization check.
///
/// Evaluates the guard of every declared argument whose keyword is present in
/// `values`, resolving to `false` on the first denial.
pub fn authorize_arguments<'a, S, I>(
    arguments: I,
    values: &'a Arguments<S>,
) -> BoxFuture<'a, FieldResult<bool, S>>
where
    S: ScalarValue,
    I: IntoIterator<Item = &'a ArgumentDefinition<S>>,
{
    let guarded = arguments
        .into_iter()
        .filter_map(|arg| {
            let guard = arg.authorization_guard()?;
            let value = values.get_input_value(arg.keyword())?;
            Some((arg, guard, value))
        })
        .collect::<Vec<_>>();

    async move {
        for (arg, guard, value) in guarded {
            if !guard.authorize(value, values).await? {
                crate::__relay_trace_debug!(
                    "argument `{}` denied by its guard",
                    arg.name()
                );
                return Ok(false);
            }
        }
        Ok(true)
    }
    .boxed()
}
