//! Types used to describe a `GraphQL` schema

use arcstr::ArcStr;

use crate::{
    ast::{InputValue, Type},
    value::DefaultScalarValue,
};

/// Whether an item is deprecated, with context.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum DeprecationStatus {
    /// The field/argument is not deprecated.
    #[default]
    Current,
    /// The field/argument is deprecated, with an optional reason
    Deprecated(Option<ArcStr>),
}

impl DeprecationStatus {
    /// If this deprecation status indicates the item is deprecated.
    pub fn is_deprecated(&self) -> bool {
        match self {
            Self::Current => false,
            Self::Deprecated(_) => true,
        }
    }

    /// An optional reason for the deprecation, or none if `Current`.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Current => None,
            Self::Deprecated(rsn) => rsn.as_deref(),
        }
    }
}

/// Object type metadata
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectMeta<S = DefaultScalarValue> {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub fields: Vec<Field<S>>,
}

/// Input object metadata
#[derive(Clone, Debug, PartialEq)]
pub struct InputObjectMeta<S = DefaultScalarValue> {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub input_fields: Vec<Argument<S>>,
}

/// Generic type metadata
#[derive(Clone, Debug, PartialEq)]
pub enum MetaType<S = DefaultScalarValue> {
    #[doc(hidden)]
    Object(ObjectMeta<S>),
    #[doc(hidden)]
    InputObject(InputObjectMeta<S>),
}

/// Metadata for a field
#[derive(Clone, Debug, PartialEq)]
pub struct Field<S = DefaultScalarValue> {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub arguments: Option<Vec<Argument<S>>>,
    #[doc(hidden)]
    pub field_type: Type,
    #[doc(hidden)]
    pub deprecation_status: DeprecationStatus,
}

/// Metadata for an argument to a field
#[derive(Clone, Debug, PartialEq)]
pub struct Argument<S = DefaultScalarValue> {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub arg_type: Type,
    #[doc(hidden)]
    pub default_value: Option<InputValue<S>>,
    #[doc(hidden)]
    pub deprecation_status: DeprecationStatus,
}

impl<S> MetaType<S> {
    /// Access the name of the type.
    pub fn name(&self) -> &ArcStr {
        match self {
            Self::Object(ObjectMeta { name, .. }) | Self::InputObject(InputObjectMeta { name, .. }) => {
                name
            }
        }
    }

    /// Access the description of the type, if any.
    pub fn description(&self) -> Option<&ArcStr> {
        match self {
            Self::Object(ObjectMeta { description, .. })
            | Self::InputObject(InputObjectMeta { description, .. }) => description.as_ref(),
        }
    }

    /// Access a field's meta data given its name
    ///
    /// Only objects have fields. This method always returns `None` for other
    /// types.
    pub fn field_by_name(&self, name: &str) -> Option<&Field<S>> {
        match self {
            Self::Object(ObjectMeta { fields, .. }) => fields.iter().find(|f| f.name == name),
            Self::InputObject(_) => None,
        }
    }

    /// Returns true if the type can be used in input positions, e.g.
    /// arguments or variables
    pub fn is_input(&self) -> bool {
        matches!(self, Self::InputObject(_))
    }
}

impl<S> ObjectMeta<S> {
    /// Build a new [`ObjectMeta`] type with the specified `name` and `fields`.
    pub fn new(name: impl Into<ArcStr>, fields: &[Field<S>]) -> Self
    where
        S: Clone,
    {
        Self {
            name: name.into(),
            description: None,
            fields: fields.to_vec(),
        }
    }

    /// Sets the `description` of this [`ObjectMeta`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Wraps this [`ObjectMeta`] type into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType<S> {
        MetaType::Object(self)
    }
}

impl<S> InputObjectMeta<S> {
    /// Builds a new [`InputObjectMeta`] type with the specified `name` and
    /// `input_fields`.
    pub fn new(name: impl Into<ArcStr>, input_fields: &[Argument<S>]) -> Self
    where
        S: Clone,
    {
        Self {
            name: name.into(),
            description: None,
            input_fields: input_fields.to_vec(),
        }
    }

    /// Set the `description` of this [`InputObjectMeta`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Wraps this [`InputObjectMeta`] type into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType<S> {
        MetaType::InputObject(self)
    }
}

impl<S> Field<S> {
    /// Builds a new [`Field`] of the given [`Type`] with the given `name`.
    pub fn new(name: impl Into<ArcStr>, field_type: Type) -> Self {
        Self {
            name: name.into(),
            description: None,
            arguments: None,
            field_type,
            deprecation_status: DeprecationStatus::Current,
        }
    }

    /// Set the `description` of this [`Field`].
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an `argument` to this [`Field`].
    ///
    /// Arguments are unordered and can't contain duplicates by name.
    #[must_use]
    pub fn argument(mut self, argument: Argument<S>) -> Self {
        self.arguments.get_or_insert_with(Vec::new).push(argument);
        self
    }

    /// Sets this [`Field`] as deprecated with an optional `reason`.
    ///
    /// Overwrites any previously set deprecation reason.
    #[must_use]
    pub fn deprecated(mut self, reason: Option<ArcStr>) -> Self {
        self.deprecation_status = DeprecationStatus::Deprecated(reason);
        self
    }
}

impl<S> Argument<S> {
    /// Builds a new [`Argument`] of the given [`Type`] with the given `name`.
    pub fn new(name: impl Into<ArcStr>, arg_type: Type) -> Self {
        Self {
            name: name.into(),
            description: None,
            arg_type,
            default_value: None,
            deprecation_status: DeprecationStatus::Current,
        }
    }

    /// Sets the `description` of this [`Argument`].
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the default value of this [`Argument`].
    ///
    /// Overwrites any previously set default value.
    #[must_use]
    pub fn default_value(mut self, val: InputValue<S>) -> Self {
        self.default_value = Some(val);
        self
    }

    /// Sets this [`Argument`] as deprecated with an optional `reason`.
    ///
    /// Overwrites any previously set deprecation reason.
    #[must_use]
    pub fn deprecated(mut self, reason: Option<ArcStr>) -> Self {
        self.deprecation_status = DeprecationStatus::Deprecated(reason);
        self
    }

    /// Indicates whether a value must be provided for this [`Argument`].
    ///
    /// That's the case for non-null arguments without a default value.
    pub fn is_required(&self) -> bool {
        self.arg_type.is_non_null() && self.default_value.is_none()
    }
}
