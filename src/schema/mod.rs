//! Schema metadata the mutation convention produces.

pub mod meta;
