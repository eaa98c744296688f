//! Input types nesting a mutation's arguments under a single `input`
//! argument.

use std::{fmt, sync::Arc};

use arcstr::ArcStr;
use indexmap::IndexMap;

use crate::{
    ast::Type,
    relay::{
        CLIENT_MUTATION_ID_KEYWORD, ConfigError,
        argument::{ArgumentDefinition, ArgumentTable, Owner},
    },
    schema::meta::{Argument, InputObjectMeta, MetaType},
    util::is_valid_name,
    value::DefaultScalarValue,
};

/// Description of the generated correlation id field and argument.
pub const CLIENT_MUTATION_ID_DESCRIPTION: &str =
    "A unique identifier for the client performing the mutation.";

/// Record type holding the arguments of exactly one mutation definition.
pub struct InputType<S = DefaultScalarValue> {
    name: ArcStr,
    description: Option<ArcStr>,
    base: Option<ArcStr>,
    mutation: Option<Owner>,
    arguments: ArgumentTable<S>,
}

impl<S: Clone> Clone for InputType<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            base: self.base.clone(),
            mutation: self.mutation.clone(),
            arguments: self.arguments.clone(),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for InputType<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputType")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("base", &self.base)
            .field("mutation", &self.mutation.as_ref().map(Owner::name))
            .field("arguments", &self.arguments)
            .finish()
    }
}

impl<S> InputType<S> {
    /// Creates an empty input type with the given `name`.
    ///
    /// # Errors
    ///
    /// If the `name` isn't a valid GraphQL name.
    pub fn new(name: impl Into<ArcStr>) -> Result<Self, ConfigError> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(ConfigError::InvalidName(name));
        }
        Ok(Self {
            name,
            description: None,
            base: None,
            mutation: None,
            arguments: ArgumentTable::default(),
        })
    }

    /// Sets the `description` of this input type.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an `argument` owned by this input type itself.
    ///
    /// # Errors
    ///
    /// If the argument is invalid, or this input type already declares one
    /// with the same name.
    pub fn argument(mut self, argument: ArgumentDefinition<S>) -> Result<Self, ConfigError> {
        argument.validate(&self.name)?;
        self.add_argument(argument)?;
        Ok(self)
    }

    pub(crate) fn add_argument(&mut self, argument: ArgumentDefinition<S>) -> Result<(), ConfigError> {
        self.arguments.add(argument, &self.name)
    }

    pub(crate) fn prune_inherited(&mut self, name: &str, owner: &Owner) -> usize {
        self.arguments.prune(name, Some(owner.id()))
    }

    pub(crate) fn claim(&mut self, owner: &Owner) -> Result<(), ConfigError> {
        match &self.mutation {
            Some(current) if current.id() != owner.id() => Err(ConfigError::InputTypeOwnedElsewhere {
                input_type: self.name.clone(),
                owner: current.name().clone(),
                definition: owner.name().clone(),
            }),
            _ => {
                self.mutation = Some(owner.clone());
                Ok(())
            }
        }
    }

    /// GraphQL name of this input type.
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// Description of this input type, if any.
    pub fn description_text(&self) -> Option<&ArcStr> {
        self.description.as_ref()
    }

    /// Name of the [`InputObjectBase`] this input type was generated from.
    pub fn base_name(&self) -> Option<&ArcStr> {
        self.base.as_ref()
    }

    /// Mutation definition owning this input type.
    pub fn mutation(&self) -> Option<&Owner> {
        self.mutation.as_ref()
    }

    /// Effective argument with the given GraphQL `name`.
    pub fn get_argument(&self, name: &str) -> Option<&ArgumentDefinition<S>> {
        self.arguments.get(name)
    }

    /// Effective arguments of this input type, in declaration order.
    pub fn arguments(&self) -> impl Iterator<Item = &ArgumentDefinition<S>> {
        self.arguments.iter()
    }

    /// Underlying argument table, including every declaration of every slot.
    pub fn argument_table(&self) -> &ArgumentTable<S> {
        &self.arguments
    }

    /// Non-null [`Type`] literal referring to this input type.
    pub fn as_type(&self) -> Type {
        Type::non_null(self.name.clone())
    }

    /// Schema metadata of this input type.
    pub fn to_meta(&self) -> MetaType<S>
    where
        S: Clone,
    {
        let fields = self
            .arguments()
            .map(|a| a.meta().clone())
            .collect::<Vec<Argument<S>>>();
        let meta = InputObjectMeta::new(self.name.clone(), &fields);
        match &self.description {
            Some(d) => meta.description(d.clone()),
            None => meta,
        }
        .into_meta()
    }
}

/// Template of generated input types.
///
/// Its arguments are placed on every generated input type before the
/// mutation's own arguments. They aren't owned by the mutation, so a
/// mutation argument of the same name replaces them.
pub struct InputObjectBase<S = DefaultScalarValue> {
    owner: Owner,
    arguments: Vec<ArgumentDefinition<S>>,
}

impl<S: fmt::Debug> fmt::Debug for InputObjectBase<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputObjectBase")
            .field("name", self.owner.name())
            .field("arguments", &self.arguments)
            .finish()
    }
}

impl<S> InputObjectBase<S> {
    /// Name of the default base.
    pub const STANDARD: &'static str = "standard";

    /// Creates the default base, having no arguments.
    pub fn standard() -> Self {
        Self {
            owner: Owner::new(ArcStr::from(Self::STANDARD)),
            arguments: Vec::new(),
        }
    }

    /// Creates an empty base with the given `name`.
    ///
    /// # Errors
    ///
    /// If the `name` isn't a valid GraphQL name.
    pub fn new(name: impl Into<ArcStr>) -> Result<Self, ConfigError> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(ConfigError::InvalidName(name));
        }
        Ok(Self {
            owner: Owner::new(name),
            arguments: Vec::new(),
        })
    }

    /// Adds an `argument` placed on every input type generated from this
    /// base.
    ///
    /// # Errors
    ///
    /// If the argument is invalid or reserved, or this base already declares
    /// one with the same name.
    pub fn argument(mut self, argument: ArgumentDefinition<S>) -> Result<Self, ConfigError> {
        argument.validate(self.owner.name())?;
        if argument.keyword() == CLIENT_MUTATION_ID_KEYWORD {
            return Err(ConfigError::ReservedName {
                name: argument.name().clone(),
                definition: self.owner.name().clone(),
            });
        }
        if self.arguments.iter().any(|a| a.name() == argument.name()) {
            return Err(ConfigError::DuplicateArgument {
                name: argument.name().clone(),
                definition: self.owner.name().clone(),
            });
        }
        let argument = argument.owned_by(&self.owner);
        self.arguments.push(argument);
        Ok(self)
    }

    /// Name of this base.
    pub fn name(&self) -> &ArcStr {
        self.owner.name()
    }

    /// Arguments of this base.
    pub fn arguments(&self) -> &[ArgumentDefinition<S>] {
        &self.arguments
    }
}

/// Hook generating the input type of a mutation definition.
pub type GenerateInputType<S = DefaultScalarValue> =
    Arc<dyn Fn(&InputTypeSource<'_, S>) -> Result<InputType<S>, ConfigError> + Send + Sync>;

/// Everything an input type is generated from.
pub struct InputTypeSource<'a, S = DefaultScalarValue> {
    pub(crate) mutation: &'a Owner,
    pub(crate) arguments: &'a IndexMap<ArcStr, ArgumentDefinition<S>>,
    pub(crate) base: &'a InputObjectBase<S>,
}

impl<S: Clone> InputTypeSource<'_, S> {
    /// Mutation definition the input type is generated for.
    pub fn mutation(&self) -> &Owner {
        self.mutation
    }

    /// Effective (inherited and own) arguments of the mutation definition at
    /// generation time.
    pub fn arguments(&self) -> impl Iterator<Item = &ArgumentDefinition<S>> {
        self.arguments.values()
    }

    /// Configured input object base.
    pub fn base(&self) -> &InputObjectBase<S> {
        self.base
    }

    /// Generates the default input type: named `<Mutation>Input`, holding
    /// the base arguments, then the mutation arguments, then the optional
    /// `clientMutationId`.
    ///
    /// # Errors
    ///
    /// If the arguments can't be combined.
    pub fn generate(&self) -> Result<InputType<S>, ConfigError> {
        let mutation = self.mutation.name();
        let mut input_type = InputType::new(arcstr::format!("{mutation}Input"))?
            .description(arcstr::format!("Autogenerated input type of {mutation}"));
        input_type.base = Some(self.base.name().clone());
        input_type.claim(self.mutation)?;

        for argument in self.base.arguments.iter().chain(self.arguments.values()) {
            input_type.arguments.prune(argument.name(), argument.owner_id());
            input_type.add_argument(argument.clone())?;
        }

        let client_mutation_id = client_mutation_id_argument();
        input_type.arguments.prune(client_mutation_id.name(), None);
        input_type.add_argument(client_mutation_id)?;

        crate::__relay_trace_debug!(
            "generated input type `{}` with {} arguments",
            input_type.name,
            input_type.arguments.len()
        );

        Ok(input_type)
    }
}

/// Optional `clientMutationId: String` argument closing every generated input
/// type.
pub fn client_mutation_id_argument<S>() -> ArgumentDefinition<S> {
    ArgumentDefinition::new(CLIENT_MUTATION_ID_KEYWORD, Type::named("String"))
        .description(CLIENT_MUTATION_ID_DESCRIPTION)
}

#[cfg(test)]
mod tests {
    use arcstr::ArcStr;
    use indexmap::IndexMap;

    use super::{InputObjectBase, InputType, InputTypeSource};
    use crate::{
        ast::Type,
        relay::{
            ConfigError,
            argument::{ArgumentDefinition, Owner},
        },
        schema::meta::MetaType,
    };

    type Arg = ArgumentDefinition;

    fn names(input_type: &InputType) -> Vec<&str> {
        input_type.arguments().map(|a| a.name().as_str()).collect()
    }

    #[test]
    fn generates_named_input_type() {
        let mutation = Owner::new("CreateWidget".into());
        let arguments = IndexMap::from([(
            ArcStr::from("name"),
            Arg::new("name", Type::non_null("String")).owned_by(&mutation),
        )]);
        let base = InputObjectBase::standard();

        let input_type = InputTypeSource {
            mutation: &mutation,
            arguments: &arguments,
            base: &base,
        }
        .generate()
        .unwrap();

        assert_eq!(input_type.name(), "CreateWidgetInput");
        assert_eq!(
            input_type.description_text().map(ArcStr::as_str),
            Some("Autogenerated input type of CreateWidget"),
        );
        assert_eq!(input_type.base_name().map(ArcStr::as_str), Some("standard"));
        assert_eq!(input_type.mutation(), Some(&mutation));
        assert_eq!(names(&input_type), vec!["name", "clientMutationId"]);

        let cmid = input_type.get_argument("clientMutationId").unwrap();
        assert_eq!(cmid.keyword(), "client_mutation_id");
        assert_eq!(cmid.arg_type(), &Type::named("String"));
        assert!(!cmid.required());
    }

    #[test]
    fn mutation_arguments_replace_base_arguments() {
        let mutation = Owner::new("CreateWidget".into());
        let base = InputObjectBase::new("Audited")
            .unwrap()
            .argument(Arg::new("reason", Type::named("String")))
            .unwrap()
            .argument(Arg::new("name", Type::named("String")))
            .unwrap();
        let arguments = IndexMap::from([(
            ArcStr::from("name"),
            Arg::new("name", Type::non_null("String")).owned_by(&mutation),
        )]);

        let input_type = InputTypeSource {
            mutation: &mutation,
            arguments: &arguments,
            base: &base,
        }
        .generate()
        .unwrap();

        assert_eq!(names(&input_type), vec!["reason", "name", "clientMutationId"]);
        assert_eq!(input_type.argument_table().slot("name").map(<[_]>::len), Some(1));
        assert_eq!(
            input_type.get_argument("name").map(Arg::arg_type),
            Some(&Type::non_null("String")),
        );
    }

    #[test]
    fn base_rejects_reserved_argument() {
        let err = InputObjectBase::<crate::DefaultScalarValue>::standard()
            .argument(Arg::new("client_mutation_id", Type::named("String")))
            .unwrap_err();

        assert_eq!(
            err,
            ConfigError::ReservedName {
                name: "clientMutationId".into(),
                definition: "standard".into(),
            },
        );
    }

    #[test]
    fn refuses_foreign_claims() {
        let mut input_type = InputType::<crate::DefaultScalarValue>::new("SharedInput").unwrap();
        let first = Owner::new("CreateWidget".into());
        let second = Owner::new("DeleteWidget".into());

        assert_eq!(input_type.claim(&first), Ok(()));
        assert_eq!(input_type.claim(&first), Ok(()));
        assert_eq!(
            input_type.claim(&second),
            Err(ConfigError::InputTypeOwnedElsewhere {
                input_type: "SharedInput".into(),
                owner: "CreateWidget".into(),
                definition: "DeleteWidget".into(),
            }),
        );
    }

    #[test]
    fn exposes_input_object_meta() {
        let input_type = InputType::new("RenameWidgetInput")
            .unwrap()
            .description("Renames a widget")
            .argument(Arg::new("new_name", Type::non_null("String")))
            .unwrap();

        let MetaType::InputObject(meta) = input_type.to_meta() else {
            panic!("expected input object meta");
        };
        assert_eq!(meta.name, "RenameWidgetInput");
        assert_eq!(meta.description.as_deref(), Some("Renames a widget"));
        assert_eq!(meta.input_fields.len(), 1);
        assert_eq!(meta.input_fields[0].name, "newName");
        assert_eq!(input_type.as_type(), Type::non_null("RenameWidgetInput"));
    }
}
