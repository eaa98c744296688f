use std::future::Future;

use futures::future::{BoxFuture, FutureExt as _};

use crate::{
    executor::{Arguments, ExecutionResult},
    value::{DefaultScalarValue, ScalarValue},
};

/// Resolver of a mutation.
///
/// Receives [`None`] when the invocation carries no arguments at all, and the
/// unwrapped keyword arguments otherwise.
///
/// Implemented for every `Fn(Option<Arguments<S>>) -> impl Future` closure:
/// ```rust
/// # use juniper_relay::{Arguments, ExecutionResult, Value, graphql_value, relay::Resolve};
/// #
/// fn assert_resolver(_: impl Resolve) {}
///
/// assert_resolver(|args: Option<Arguments>| async move {
///     let name = args.unwrap_or_default().get::<String>("name")?;
///     ExecutionResult::Ok(graphql_value!({"widget": {"name": (name)}}))
/// });
/// ```
pub trait Resolve<S = DefaultScalarValue>: Send + Sync {
    /// Invokes this resolver, returning its deferred result.
    fn resolve(&self, arguments: Option<Arguments<S>>) -> BoxFuture<'static, ExecutionResult<S>>;
}

impl<S, F, Fut> Resolve<S> for F
where
    S: ScalarValue,
    F: Fn(Option<Arguments<S>>) -> Fut + Send + Sync,
    Fut: Future<Output = ExecutionResult<S>> + Send + 'static,
{
    fn resolve(&self, arguments: Option<Arguments<S>>) -> BoxFuture<'static, ExecutionResult<S>> {
        self(arguments).boxed()
    }
}
