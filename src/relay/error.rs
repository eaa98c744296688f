use arcstr::ArcStr;
use derive_more::with_trait::{Display, Error};

/// Error raised while assembling mutation definitions.
///
/// These are schema-construction errors: they're returned as soon as the
/// offending declaration is made and are never recovered from internally.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
pub enum ConfigError {
    /// A name doesn't match `/[_A-Za-z][_0-9A-Za-z]*/` or starts with `__`.
    #[display("`{_0}` is not a valid GraphQL name")]
    InvalidName(#[error(not(source))] ArcStr),

    /// A name reserved by the mutation convention was declared explicitly.
    #[display("`{name}` is reserved and can't be declared on `{definition}`")]
    ReservedName {
        /// Reserved name that was declared.
        name: ArcStr,
        /// Definition the declaration was made on.
        definition: ArcStr,
    },

    /// An argument with the same name was already declared by the same
    /// definition.
    #[display("Argument `{name}` is already declared on `{definition}`")]
    DuplicateArgument {
        /// Name of the argument.
        name: ArcStr,
        /// Definition or input type holding the argument.
        definition: ArcStr,
    },

    /// A field with the same name was already declared by the same
    /// definition.
    #[display("Field `{name}` is already declared on `{definition}`")]
    DuplicateField {
        /// Name of the field.
        name: ArcStr,
        /// Definition or object type holding the field.
        definition: ArcStr,
    },

    /// A required argument was marked as deprecated.
    #[display("Required argument `{name}` on `{definition}` can't be deprecated")]
    RequiredArgumentDeprecated {
        /// Name of the argument.
        name: ArcStr,
        /// Definition the argument was declared on.
        definition: ArcStr,
    },

    /// The input type of a definition was configured after it had been built.
    #[display("Input type of `{_0}` is already built")]
    InputTypeAlreadyBuilt(#[error(not(source))] ArcStr),

    /// An explicit input type belongs to another mutation definition.
    #[display("Input type `{input_type}` belongs to `{owner}`, not to `{definition}`")]
    InputTypeOwnedElsewhere {
        /// Name of the input type.
        input_type: ArcStr,
        /// Definition owning the input type.
        owner: ArcStr,
        /// Definition the input type was configured on.
        definition: ArcStr,
    },

    /// A field was requested from a definition having no resolver.
    #[display("Mutation `{_0}` has no resolver")]
    MissingResolver(#[error(not(source))] ArcStr),

    /// Two different types with the same name were registered.
    #[display("Type `{_0}` is defined more than once")]
    DuplicateTypeName(#[error(not(source))] ArcStr),
}

#[cfg(test)]
mod tests {
    use super::ConfigError;

    #[test]
    fn displays_context() {
        assert_eq!(
            ConfigError::InvalidName("__input".into()).to_string(),
            "`__input` is not a valid GraphQL name",
        );
        assert_eq!(
            ConfigError::DuplicateArgument {
                name: "name".into(),
                definition: "CreateWidget".into(),
            }
            .to_string(),
            "Argument `name` is already declared on `CreateWidget`",
        );
    }
}
