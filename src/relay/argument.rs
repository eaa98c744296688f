//! Argument declarations tagged with the definition that made them.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use arcstr::ArcStr;
use indexmap::IndexMap;

use crate::{
    ast::{InputValue, Type},
    relay::{
        ConfigError,
        guard::{ArgumentGuard, FnGuard},
        input_type::InputType,
    },
    schema::meta::{Argument, DeprecationStatus},
    util::{is_valid_name, to_camel_case},
    value::{DefaultScalarValue, ScalarValue},
};

static NEXT_DEFINITION_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a mutation definition or an input object base.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DefinitionId(u64);

impl DefinitionId {
    pub(crate) fn next() -> Self {
        Self(NEXT_DEFINITION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Definition that declared an argument.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Owner {
    id: DefinitionId,
    name: ArcStr,
}

impl Owner {
    pub(crate) fn new(name: ArcStr) -> Self {
        Self {
            id: DefinitionId::next(),
            name,
        }
    }

    /// Identity of the owning definition.
    pub fn id(&self) -> DefinitionId {
        self.id
    }

    /// Name of the owning definition.
    pub fn name(&self) -> &ArcStr {
        &self.name
    }
}

/// Argument declared on a mutation definition, an input object base or an
/// input type.
///
/// Resolvers see the argument under its [`keyword`], while the schema
/// exposes it under its GraphQL [`name`].
///
/// [`keyword`]: ArgumentDefinition::keyword
/// [`name`]: ArgumentDefinition::name
pub struct ArgumentDefinition<S = DefaultScalarValue> {
    meta: Argument<S>,
    keyword: ArcStr,
    owner: Option<Owner>,
    guard: Option<Arc<dyn ArgumentGuard<S>>>,
    input_object: Option<Arc<InputType<S>>>,
}

impl<S: Clone> Clone for ArgumentDefinition<S> {
    fn clone(&self) -> Self {
        Self {
            meta: self.meta.clone(),
            keyword: self.keyword.clone(),
            owner: self.owner.clone(),
            guard: self.guard.clone(),
            input_object: self.input_object.clone(),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for ArgumentDefinition<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentDefinition")
            .field("meta", &self.meta)
            .field("keyword", &self.keyword)
            .field("owner", &self.owner)
            .field("guarded", &self.guard.is_some())
            .field(
                "input_object",
                &self.input_object.as_ref().map(|io| io.name()),
            )
            .finish()
    }
}

impl<S> ArgumentDefinition<S> {
    /// Declares a new argument of the given [`Type`] under the given
    /// snake_case `keyword`.
    ///
    /// The GraphQL name is the camelCase form of the `keyword`.
    pub fn new(keyword: impl Into<ArcStr>, arg_type: Type) -> Self {
        let keyword = keyword.into();
        let name = ArcStr::from(to_camel_case(&keyword).as_ref());
        Self {
            meta: Argument::new(name, arg_type),
            keyword,
            owner: None,
            guard: None,
            input_object: None,
        }
    }

    /// Overrides the GraphQL name derived from the keyword.
    #[must_use]
    pub fn graphql_name(mut self, name: impl Into<ArcStr>) -> Self {
        self.meta.name = name.into();
        self
    }

    /// Sets the `description` of this argument.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.meta = self.meta.description(description);
        self
    }

    /// Sets the value used when an input omits this argument.
    #[must_use]
    pub fn default_value(mut self, value: InputValue<S>) -> Self {
        self.meta = self.meta.default_value(value);
        self
    }

    /// Marks this argument as deprecated with an optional `reason`.
    #[must_use]
    pub fn deprecated(mut self, reason: Option<ArcStr>) -> Self {
        self.meta = self.meta.deprecated(reason);
        self
    }

    /// Attaches an authorization `guard` to this argument.
    #[must_use]
    pub fn guard(mut self, guard: impl ArgumentGuard<S> + 'static) -> Self {
        self.guard = Some(Arc::new(guard));
        self
    }

    /// Attaches a synchronous authorization predicate to this argument.
    #[must_use]
    pub fn guard_fn<F>(self, predicate: F) -> Self
    where
        F: Fn(&InputValue<S>) -> bool + Send + Sync + 'static,
        S: ScalarValue,
    {
        self.guard(FnGuard::new(predicate))
    }

    pub(crate) fn owned_by(mut self, owner: &Owner) -> Self {
        self.owner = Some(owner.clone());
        self
    }

    pub(crate) fn with_input_object(mut self, input_object: Arc<InputType<S>>) -> Self {
        self.input_object = Some(input_object);
        self
    }

    /// Keyword the resolver receives this argument under.
    pub fn keyword(&self) -> &ArcStr {
        &self.keyword
    }

    /// GraphQL name of this argument.
    pub fn name(&self) -> &ArcStr {
        &self.meta.name
    }

    /// Declared [`Type`] of this argument.
    pub fn arg_type(&self) -> &Type {
        &self.meta.arg_type
    }

    /// Default value of this argument, if any.
    pub fn default(&self) -> Option<&InputValue<S>> {
        self.meta.default_value.as_ref()
    }

    /// Indicates whether a value must be provided for this argument.
    pub fn required(&self) -> bool {
        self.meta.is_required()
    }

    /// Deprecation status of this argument.
    pub fn deprecation_status(&self) -> &DeprecationStatus {
        &self.meta.deprecation_status
    }

    /// Definition that declared this argument.
    ///
    /// [`None`] for arguments declared directly on an input type.
    pub fn owner(&self) -> Option<&Owner> {
        self.owner.as_ref()
    }

    pub(crate) fn owner_id(&self) -> Option<DefinitionId> {
        self.owner.as_ref().map(Owner::id)
    }

    /// Authorization guard of this argument, if any.
    pub fn authorization_guard(&self) -> Option<&Arc<dyn ArgumentGuard<S>>> {
        self.guard.as_ref()
    }

    /// Input type nested under this argument, if it's the synthetic `input`
    /// argument of a mutation field.
    pub fn input_object(&self) -> Option<&Arc<InputType<S>>> {
        self.input_object.as_ref()
    }

    /// Schema metadata of this argument.
    pub fn meta(&self) -> &Argument<S> {
        &self.meta
    }

    pub(crate) fn validate(&self, definition: &ArcStr) -> Result<(), ConfigError> {
        if !is_valid_name(self.name()) {
            return Err(ConfigError::InvalidName(self.name().clone()));
        }
        if !is_valid_name(&self.keyword) {
            return Err(ConfigError::InvalidName(self.keyword.clone()));
        }
        if self.required() && self.deprecation_status().is_deprecated() {
            return Err(ConfigError::RequiredArgumentDeprecated {
                name: self.name().clone(),
                definition: definition.clone(),
            });
        }
        Ok(())
    }
}

/// Arguments keyed by GraphQL name, each name slot holding every declaration
/// currently occupying it.
///
/// The last declaration of a slot is the effective one.
pub struct ArgumentTable<S = DefaultScalarValue> {
    slots: IndexMap<ArcStr, Vec<ArgumentDefinition<S>>>,
}

impl<S> Default for ArgumentTable<S> {
    fn default() -> Self {
        Self {
            slots: IndexMap::new(),
        }
    }
}

impl<S: Clone> Clone for ArgumentTable<S> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for ArgumentTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.slots.iter()).finish()
    }
}

impl<S> ArgumentTable<S> {
    /// Adds an argument to its name slot.
    ///
    /// Declarations of different owners may share a slot, while a second
    /// declaration by the same owner is rejected.
    pub(crate) fn add(
        &mut self,
        argument: ArgumentDefinition<S>,
        holder: &ArcStr,
    ) -> Result<(), ConfigError> {
        let slot = self.slots.entry(argument.name().clone()).or_default();
        if slot.iter().any(|a| a.owner_id() == argument.owner_id()) {
            return Err(ConfigError::DuplicateArgument {
                name: argument.name().clone(),
                definition: holder.clone(),
            });
        }
        slot.push(argument);
        Ok(())
    }

    /// Drops every declaration of the `name` slot not owned by `keep`,
    /// removing the slot once it's empty.
    ///
    /// Returns the number of dropped declarations.
    pub(crate) fn prune(&mut self, name: &str, keep: Option<DefinitionId>) -> usize {
        let Some(slot) = self.slots.get_mut(name) else {
            return 0;
        };
        let before = slot.len();
        slot.retain(|a| a.owner_id() == keep);
        let removed = before - slot.len();
        if slot.is_empty() {
            self.slots.shift_remove(name);
        }
        removed
    }

    /// Effective argument of the `name` slot.
    pub fn get(&self, name: &str) -> Option<&ArgumentDefinition<S>> {
        self.slots.get(name).and_then(|slot| slot.last())
    }

    /// All the declarations occupying the `name` slot.
    pub fn slot(&self, name: &str) -> Option<&[ArgumentDefinition<S>]> {
        self.slots.get(name).map(Vec::as_slice)
    }

    /// Effective arguments, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &ArgumentDefinition<S>> {
        self.slots.values().filter_map(|slot| slot.last())
    }

    /// Names of the occupied slots, in order.
    pub fn names(&self) -> impl Iterator<Item = &ArcStr> {
        self.slots.keys()
    }

    /// Indicates whether the `name` slot is occupied.
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Indicates whether no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Folds argument declarations, ordered from the base-most definition to the
/// most derived one, into the effective argument set.
///
/// A redeclared name replaces the earlier declaration and moves to the end.
pub(crate) fn fold_arguments<'a, S, I>(declarations: I) -> IndexMap<ArcStr, ArgumentDefinition<S>>
where
    S: Clone + 'a,
    I: IntoIterator<Item = &'a ArgumentDefinition<S>>,
{
    declarations
        .into_iter()
        .fold(IndexMap::new(), |mut effective, argument| {
            effective.shift_remove(argument.name());
            effective.insert(argument.name().clone(), argument.clone());
            effective
        })
}
