//! Provides GraphQLType implementations for some external types

pub mod serde;
