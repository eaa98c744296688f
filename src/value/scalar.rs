use std::fmt;

use derive_more::with_trait::From;
use serde::Serialize;

/// Primitive value of a GraphQL scalar.
///
/// The convention layer never inspects scalars beyond the conversions below,
/// so custom scalar representations only need to provide these.
pub trait ScalarValue:
    fmt::Debug
    + fmt::Display
    + Clone
    + PartialEq
    + Send
    + Sync
    + From<String>
    + From<bool>
    + From<i32>
    + From<f64>
    + 'static
{
    /// Represents this scalar as an integer, if it's one.
    fn as_int(&self) -> Option<i32>;

    /// Represents this scalar as a float, if it's a number.
    ///
    /// Integers are coerced, as GraphQL `Float` input accepts them.
    fn as_float(&self) -> Option<f64>;

    /// Represents this scalar as a string slice, if it's a string.
    fn as_str(&self) -> Option<&str>;

    /// Represents this scalar as a boolean, if it's one.
    fn as_bool(&self) -> Option<bool>;

    /// Clones this scalar into an owned [`String`], if it's a string.
    fn as_string(&self) -> Option<String> {
        self.as_str().map(str::to_owned)
    }
}

/// The default scalar value representation.
///
/// Covers the built-in `Int`, `Float`, `String`, `Boolean` and `ID` scalars.
#[derive(Clone, Debug, From, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DefaultScalarValue {
    /// `Int` scalar.
    Int(i32),

    /// `Float` scalar.
    Float(f64),

    /// `String` (and `ID`) scalar.
    String(String),

    /// `Boolean` scalar.
    Boolean(bool),
}

impl From<&str> for DefaultScalarValue {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl fmt::Display for DefaultScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl ScalarValue for DefaultScalarValue {
    fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(f64::from(*i)),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}
