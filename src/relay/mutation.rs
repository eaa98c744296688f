//! Mutation definitions and their builder.

use std::{fmt, iter, sync::Arc};

use arcstr::ArcStr;
use indexmap::IndexMap;
use itertools::Itertools as _;

use crate::{
    ast::Type,
    relay::{
        CLIENT_MUTATION_ID, CLIENT_MUTATION_ID_KEYWORD, ConfigError, INPUT_ARGUMENT,
        argument::{ArgumentDefinition, Owner, fold_arguments},
        field::MutationField,
        input_type::{
            CLIENT_MUTATION_ID_DESCRIPTION, GenerateInputType, InputObjectBase, InputType,
            InputTypeSource,
        },
        resolver::Resolve,
    },
    schema::meta::{DeprecationStatus, Field, MetaType, ObjectMeta},
    util::{is_valid_name, to_field_name},
    value::{DefaultScalarValue, ScalarValue},
};

/// Builder of a [`Mutation`] definition.
///
/// Every declaration is validated as it's made. The input type is generated
/// lazily, on the first argument declaration or on [`input_type()`] access,
/// and keeps mirroring the arguments declared afterwards.
///
/// ```rust
/// # use juniper_relay::{Arguments, ExecutionResult, Type, graphql_value};
/// # use juniper_relay::relay::{ArgumentDefinition, MutationBuilder};
/// # use juniper_relay::schema::meta::Field;
/// #
/// # fn main() -> Result<(), juniper_relay::relay::ConfigError> {
/// let mut builder = MutationBuilder::new("CreateWidget")?;
/// builder
///     .argument(ArgumentDefinition::new("name", Type::non_null("String")))?
///     .field(Field::new("widget", Type::named("Widget")))?
///     .resolver(|args: Option<Arguments>| async move {
///         let name = args.unwrap_or_default().get::<String>("name")?;
///         ExecutionResult::Ok(graphql_value!({"widget": {"name": (name)}}))
///     });
/// let create_widget = builder.build()?;
///
/// assert_eq!(create_widget.input_type().name(), "CreateWidgetInput");
/// # Ok(())
/// # }
/// ```
///
/// [`input_type()`]: MutationBuilder::input_type
pub struct MutationBuilder<S = DefaultScalarValue> {
    owner: Owner,
    parent: Option<Arc<Mutation<S>>>,
    description: Option<ArcStr>,
    deprecation_status: DeprecationStatus,
    own_arguments: Vec<ArgumentDefinition<S>>,
    own_fields: Vec<Field<S>>,
    own_extras: Vec<ArcStr>,
    null: Option<bool>,
    input_object_base: Option<Arc<InputObjectBase<S>>>,
    generator: Option<GenerateInputType<S>>,
    resolver: Option<Arc<dyn Resolve<S>>>,
    input_type: Option<InputType<S>>,
}

impl<S: ScalarValue> MutationBuilder<S> {
    /// Starts a new root mutation definition with the given `name`.
    ///
    /// # Errors
    ///
    /// If the `name` isn't a valid GraphQL name.
    pub fn new(name: impl Into<ArcStr>) -> Result<Self, ConfigError> {
        Self::with_parent(name, None)
    }

    fn with_parent(
        name: impl Into<ArcStr>,
        parent: Option<Arc<Mutation<S>>>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(ConfigError::InvalidName(name));
        }
        Ok(Self {
            owner: Owner::new(name),
            parent,
            description: None,
            deprecation_status: DeprecationStatus::Current,
            own_arguments: Vec::new(),
            own_fields: Vec::new(),
            own_extras: Vec::new(),
            null: None,
            input_object_base: None,
            generator: None,
            resolver: None,
            input_type: None,
        })
    }

    /// Name of the mutation being defined.
    pub fn name(&self) -> &ArcStr {
        self.owner.name()
    }

    /// Sets the `description` of the mutation.
    pub fn description(&mut self, description: impl Into<ArcStr>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the mutation as deprecated with an optional `reason`.
    pub fn deprecated(&mut self, reason: Option<ArcStr>) -> &mut Self {
        self.deprecation_status = DeprecationStatus::Deprecated(reason);
        self
    }

    /// Declares an argument and mirrors it onto the input type.
    ///
    /// The input type is built first (if it isn't yet), so it already holds
    /// every inherited argument. An inherited argument of the same name is
    /// then replaced by the new one.
    ///
    /// # Errors
    ///
    /// If the argument is invalid, reserved, or already declared by this
    /// mutation.
    pub fn argument(&mut self, argument: ArgumentDefinition<S>) -> Result<&mut Self, ConfigError> {
        argument.validate(self.owner.name())?;
        if argument.name() == CLIENT_MUTATION_ID || argument.keyword() == CLIENT_MUTATION_ID_KEYWORD {
            return Err(ConfigError::ReservedName {
                name: argument.name().clone(),
                definition: self.owner.name().clone(),
            });
        }
        if self
            .own_arguments
            .iter()
            .any(|a| a.name() == argument.name() || a.keyword() == argument.keyword())
        {
            return Err(ConfigError::DuplicateArgument {
                name: argument.name().clone(),
                definition: self.owner.name().clone(),
            });
        }

        let owner = self.owner.clone();
        let argument = argument.owned_by(&owner);
        let input_type = self.ensure_input_type()?;
        let pruned = input_type.prune_inherited(argument.name(), &owner);
        if pruned > 0 {
            crate::__relay_trace_debug!(
                "`{}` overrides {} inherited declaration(s) of argument `{}`",
                owner.name(),
                pruned,
                argument.name()
            );
        }
        input_type.add_argument(argument.clone())?;
        crate::__relay_trace_debug!(
            "declared argument `{}` on `{}`",
            argument.name(),
            owner.name()
        );
        self.own_arguments.push(argument);

        Ok(self)
    }

    /// Declares a field of the payload type.
    ///
    /// # Errors
    ///
    /// If the field name is invalid, reserved, or already declared by this
    /// mutation.
    pub fn field(&mut self, field: Field<S>) -> Result<&mut Self, ConfigError> {
        if !is_valid_name(&field.name) {
            return Err(ConfigError::InvalidName(field.name));
        }
        if field.name.as_str() == CLIENT_MUTATION_ID {
            return Err(ConfigError::ReservedName {
                name: field.name,
                definition: self.owner.name().clone(),
            });
        }
        if self.own_fields.iter().any(|f| f.name == field.name) {
            return Err(ConfigError::DuplicateField {
                name: field.name,
                definition: self.owner.name().clone(),
            });
        }
        self.own_fields.push(field);
        Ok(self)
    }

    /// Requests the named extras to be passed to the resolver, in addition to
    /// the inherited ones.
    pub fn extras<I>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<ArcStr>,
    {
        self.own_extras.extend(names.into_iter().map(Into::into));
        self
    }

    /// Sets whether the payload may be `null`. Inherited when not set.
    pub fn null(&mut self, nullable: bool) -> &mut Self {
        self.null = Some(nullable);
        self
    }

    /// Sets the resolver. Inherited when not set.
    pub fn resolver(&mut self, resolver: impl Resolve<S> + 'static) -> &mut Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /// Sets the base the input type is generated from. Inherited when not
    /// set.
    ///
    /// # Errors
    ///
    /// If the input type is already built.
    pub fn input_object_class(
        &mut self,
        base: impl Into<Arc<InputObjectBase<S>>>,
    ) -> Result<&mut Self, ConfigError> {
        self.ensure_unbuilt()?;
        self.input_object_base = Some(base.into());
        Ok(self)
    }

    /// Sets the hook generating the input type. Inherited when not set.
    ///
    /// The hook may call [`InputTypeSource::generate()`] and adjust its
    /// result.
    ///
    /// # Errors
    ///
    /// If the input type is already built.
    pub fn generate_input_type<F>(&mut self, generator: F) -> Result<&mut Self, ConfigError>
    where
        F: Fn(&InputTypeSource<'_, S>) -> Result<InputType<S>, ConfigError> + Send + Sync + 'static,
    {
        self.ensure_unbuilt()?;
        self.generator = Some(Arc::new(generator));
        Ok(self)
    }

    /// Uses the given `input_type` verbatim instead of generating one.
    ///
    /// Arguments declared afterwards are still mirrored onto it.
    ///
    /// # Errors
    ///
    /// If the input type is already built, or the given one belongs to
    /// another mutation.
    pub fn with_input_type(&mut self, mut input_type: InputType<S>) -> Result<&mut Self, ConfigError> {
        self.ensure_unbuilt()?;
        input_type.claim(&self.owner)?;
        self.input_type = Some(input_type);
        Ok(self)
    }

    /// Returns the input type, building it on first access.
    ///
    /// # Errors
    ///
    /// If the input type can't be generated.
    pub fn input_type(&mut self) -> Result<&InputType<S>, ConfigError> {
        self.ensure_input_type().map(|input_type| &*input_type)
    }

    /// Freezes this definition.
    ///
    /// # Errors
    ///
    /// If the input type can't be generated.
    pub fn build(mut self) -> Result<Arc<Mutation<S>>, ConfigError> {
        let input_type = match self.input_type.take() {
            Some(input_type) => input_type,
            None => self.generate()?,
        };

        let parent = self.parent.as_deref();
        let extras = parent
            .map(|p| p.extras.as_slice())
            .unwrap_or_default()
            .iter()
            .chain(&self.own_extras)
            .unique()
            .cloned()
            .collect();
        let fields = parent
            .map(|p| p.fields.as_slice())
            .unwrap_or_default()
            .iter()
            .chain(&self.own_fields)
            .fold(IndexMap::new(), |mut fields, f| {
                fields.shift_remove(&f.name);
                fields.insert(f.name.clone(), f.clone());
                fields
            })
            .into_values()
            .collect::<Vec<_>>();

        let name = self.owner.name();
        let payload_fields = fields
            .iter()
            .cloned()
            .chain(iter::once(
                Field::new(CLIENT_MUTATION_ID, Type::named("String"))
                    .description(CLIENT_MUTATION_ID_DESCRIPTION),
            ))
            .collect::<Vec<_>>();
        let payload_type = ObjectMeta::new(arcstr::format!("{name}Payload"), &payload_fields)
            .description(arcstr::format!("Autogenerated return type of {name}."));

        let mutation = Mutation {
            null: self.null.or(parent.map(|p| p.null)).unwrap_or(true),
            input_object_base: self.inherited_base(),
            generator: self.generator.or_else(|| parent.and_then(|p| p.generator.clone())),
            resolver: self.resolver.or_else(|| parent.and_then(|p| p.resolver.clone())),
            owner: self.owner,
            parent: self.parent,
            description: self.description,
            deprecation_status: self.deprecation_status,
            own_arguments: self.own_arguments,
            fields,
            extras,
            input_type: Arc::new(input_type),
            payload_type,
        };

        crate::__relay_trace_debug!("built mutation `{}`", mutation.name());

        Ok(Arc::new(mutation))
    }

    fn ensure_unbuilt(&self) -> Result<(), ConfigError> {
        if self.input_type.is_some() {
            return Err(ConfigError::InputTypeAlreadyBuilt(self.owner.name().clone()));
        }
        Ok(())
    }

    fn inherited_base(&self) -> Arc<InputObjectBase<S>> {
        self.input_object_base
            .clone()
            .or_else(|| self.parent.as_ref().map(|p| Arc::clone(&p.input_object_base)))
            .unwrap_or_else(|| Arc::new(InputObjectBase::standard()))
    }

    fn ensure_input_type(&mut self) -> Result<&mut InputType<S>, ConfigError> {
        let input_type = match self.input_type.take() {
            Some(input_type) => input_type,
            None => self.generate()?,
        };
        Ok(self.input_type.insert(input_type))
    }

    fn generate(&mut self) -> Result<InputType<S>, ConfigError> {
        let base = self.inherited_base();
        self.input_object_base = Some(Arc::clone(&base));

        let arguments = self.effective_arguments();
        let source = InputTypeSource {
            mutation: &self.owner,
            arguments: &arguments,
            base: &base,
        };
        let generator = self
            .generator
            .clone()
            .or_else(|| self.parent.as_ref().and_then(|p| p.generator.clone()));
        let mut input_type = match generator {
            Some(generate) => (*generate)(&source)?,
            None => source.generate()?,
        };
        input_type.claim(&self.owner)?;
        Ok(input_type)
    }

    fn effective_arguments(&self) -> IndexMap<ArcStr, ArgumentDefinition<S>> {
        let inherited = self.parent.as_deref().map(Mutation::ancestry_arguments);
        fold_arguments(
            inherited
                .iter()
                .flatten()
                .copied()
                .chain(&self.own_arguments),
        )
    }
}

/// Frozen mutation definition.
///
/// Holds its input type and payload type, both built exactly once.
pub struct Mutation<S = DefaultScalarValue> {
    owner: Owner,
    parent: Option<Arc<Mutation<S>>>,
    description: Option<ArcStr>,
    deprecation_status: DeprecationStatus,
    own_arguments: Vec<ArgumentDefinition<S>>,
    fields: Vec<Field<S>>,
    extras: Vec<ArcStr>,
    null: bool,
    input_object_base: Arc<InputObjectBase<S>>,
    generator: Option<GenerateInputType<S>>,
    resolver: Option<Arc<dyn Resolve<S>>>,
    input_type: Arc<InputType<S>>,
    payload_type: ObjectMeta<S>,
}

impl<S: fmt::Debug> fmt::Debug for Mutation<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mutation")
            .field("name", self.owner.name())
            .field("parent", &self.parent.as_ref().map(|p| p.name()))
            .field("own_arguments", &self.own_arguments)
            .field("extras", &self.extras)
            .field("null", &self.null)
            .field("input_type", &self.input_type)
            .field("has_resolver", &self.resolver.is_some())
            .finish_non_exhaustive()
    }
}

impl<S: ScalarValue> Mutation<S> {
    /// Starts a definition inheriting from this one.
    ///
    /// # Errors
    ///
    /// If the `name` isn't a valid GraphQL name.
    pub fn subclass(self: &Arc<Self>, name: impl Into<ArcStr>) -> Result<MutationBuilder<S>, ConfigError> {
        MutationBuilder::with_parent(name, Some(Arc::clone(self)))
    }

    /// Effective arguments: inherited and own, a redeclared name replacing
    /// the inherited declaration.
    pub fn arguments(&self) -> IndexMap<ArcStr, ArgumentDefinition<S>> {
        fold_arguments(self.ancestry_arguments())
    }

    /// Effective argument with the given GraphQL `name`.
    pub fn argument(&self, name: &str) -> Option<ArgumentDefinition<S>> {
        self.arguments().shift_remove(name)
    }

    fn ancestry_arguments(&self) -> Vec<&ArgumentDefinition<S>> {
        let mut chain = self.ancestry().collect::<Vec<_>>();
        chain.reverse();
        chain.into_iter().flat_map(|m| &m.own_arguments).collect()
    }

    /// Schema metadata of the exposed mutation field: a single required
    /// `input` argument and the payload type.
    pub fn field_meta(&self) -> Field<S> {
        let payload = self.payload_type.name.clone();
        let field_type = if self.null {
            Type::named(payload)
        } else {
            Type::non_null(payload)
        };
        let mut field = Field::new(self.field_name(), field_type).argument(self.input_argument().meta().clone());
        field.description = self.description.clone();
        field.deprecation_status = self.deprecation_status.clone();
        field
    }

    /// Synthetic `input` argument of the exposed field.
    pub fn input_argument(&self) -> ArgumentDefinition<S> {
        ArgumentDefinition::new(INPUT_ARGUMENT, self.input_type.as_type())
            .description(arcstr::format!("Parameters for {}", self.name()))
            .owned_by(&self.owner)
            .with_input_object(Arc::clone(&self.input_type))
    }

    /// Wraps this definition into an exposable field.
    ///
    /// # Errors
    ///
    /// If neither this definition nor any ancestor has a resolver.
    pub fn field(self: &Arc<Self>) -> Result<MutationField<S>, ConfigError> {
        let resolver = self
            .resolver
            .clone()
            .ok_or_else(|| ConfigError::MissingResolver(self.name().clone()))?;
        Ok(MutationField::new(Arc::clone(self), resolver))
    }

    /// Generated input type and payload type metadata.
    pub fn types(&self) -> [MetaType<S>; 2] {
        [
            self.input_type.to_meta(),
            self.payload_type.clone().into_meta(),
        ]
    }
}

impl<S> Mutation<S> {
    /// GraphQL name of this mutation.
    pub fn name(&self) -> &ArcStr {
        self.owner.name()
    }

    /// Name of the exposed field: the mutation name with its first letter
    /// lower-cased.
    pub fn field_name(&self) -> ArcStr {
        to_field_name(self.name()).into()
    }

    /// Identity of this definition.
    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    /// Definition this one inherits from.
    pub fn parent(&self) -> Option<&Arc<Self>> {
        self.parent.as_ref()
    }

    /// This definition followed by its ancestors, the root one last.
    pub fn ancestry(&self) -> impl Iterator<Item = &Self> {
        iter::successors(Some(self), |m| m.parent.as_deref())
    }

    /// Description of this mutation, if any.
    pub fn description(&self) -> Option<&ArcStr> {
        self.description.as_ref()
    }

    /// Deprecation status of this mutation.
    pub fn deprecation_status(&self) -> &DeprecationStatus {
        &self.deprecation_status
    }

    /// Arguments declared by this definition itself.
    pub fn own_arguments(&self) -> &[ArgumentDefinition<S>] {
        &self.own_arguments
    }

    /// Effective payload fields, without `clientMutationId`.
    pub fn fields(&self) -> &[Field<S>] {
        &self.fields
    }

    /// Extras passed to the resolver, inherited ones first.
    pub fn extras(&self) -> &[ArcStr] {
        &self.extras
    }

    /// Indicates whether the payload may be `null`.
    pub fn null(&self) -> bool {
        self.null
    }

    /// Base the input type was generated from.
    pub fn input_object_base(&self) -> &Arc<InputObjectBase<S>> {
        &self.input_object_base
    }

    /// Resolver of this mutation, if any.
    pub fn resolver(&self) -> Option<&Arc<dyn Resolve<S>>> {
        self.resolver.as_ref()
    }

    /// Input type of this mutation.
    ///
    /// Always returns the same instance.
    pub fn input_type(&self) -> &Arc<InputType<S>> {
        &self.input_type
    }

    /// Payload type of this mutation: the declared fields followed by
    /// `clientMutationId`.
    pub fn payload_type(&self) -> &ObjectMeta<S> {
        &self.payload_type
    }
}
