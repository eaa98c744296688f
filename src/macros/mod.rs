//! Declarative macros.

mod graphql_value;

#[macro_use]
mod tracing;
