#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

// Required by the `__relay_trace*` macros.
#[cfg(feature = "tracing")]
#[doc(hidden)]
pub use tracing;

#[doc(inline)]
pub use futures::future::BoxFuture;

#[doc(hidden)]
#[macro_use]
pub mod macros;
mod ast;
pub mod executor;
pub mod integrations;
pub mod relay;
pub mod schema;
mod util;
mod value;

#[cfg(test)]
mod tests;

pub use crate::util::to_camel_case;

pub use crate::{
    ast::{FromInputValue, InputValue, ToInputValue, Type},
    executor::{Arguments, ExecutionResult, Extra, FieldError, FieldResult, IntoFieldError},
    schema::meta,
    value::{DefaultScalarValue, Object, ScalarValue, Value},
};
