//! Relay "classic mutation" convention.
//!
//! A mutation declares any number of arguments, but is exposed as a field
//! taking a single required `input` argument of a generated input type
//! (`<Name>Input`). Clients may add an opaque `clientMutationId` to the
//! input, which is echoed back on the generated payload type
//! (`<Name>Payload`).
//!
//! ```rust
//! # use juniper_relay::{Arguments, ExecutionResult, Type, graphql_input_value, graphql_value};
//! # use juniper_relay::relay::{ArgumentDefinition, MutationBuilder, MutationRoot};
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut create_widget = MutationBuilder::new("CreateWidget")?;
//! create_widget
//!     .argument(ArgumentDefinition::new("name", Type::non_null("String")))?
//!     .resolver(|args: Option<Arguments>| async move {
//!         let name = args.unwrap_or_default().get::<String>("name")?;
//!         ExecutionResult::Ok(graphql_value!({"widget": {"name": (name)}}))
//!     });
//!
//! let mut root = MutationRoot::new();
//! root.register(create_widget.build()?.field()?)?;
//!
//! let raw = Arguments::new().with(
//!     "input",
//!     graphql_input_value!({"name": "A", "clientMutationId": "abc123"}),
//! );
//! let result = root.resolve_field("createWidget", raw).await;
//!
//! assert_eq!(
//!     result,
//!     Ok(graphql_value!({"widget": {"name": "A"}, "clientMutationId": "abc123"})),
//! );
//! # Ok(())
//! # }
//! ```

mod argument;
mod error;
mod field;
mod guard;
mod input_type;
mod mutation;
mod resolver;
mod root;

pub use self::{
    argument::{ArgumentDefinition, ArgumentTable, DefinitionId, Owner},
    error::ConfigError,
    field::{Invocation, MutationField},
    guard::{ArgumentGuard, FnGuard, authorize_arguments},
    input_type::{
        CLIENT_MUTATION_ID_DESCRIPTION, GenerateInputType, InputObjectBase, InputType,
        InputTypeSource, client_mutation_id_argument,
    },
    mutation::{Mutation, MutationBuilder},
    resolver::Resolve,
    root::MutationRoot,
};

/// GraphQL name of the correlation id.
pub const CLIENT_MUTATION_ID: &str = "clientMutationId";

/// Keyword the correlation id is unwrapped under.
pub const CLIENT_MUTATION_ID_KEYWORD: &str = "client_mutation_id";

/// Name of the single argument of an exposed mutation field.
pub const INPUT_ARGUMENT: &str = "input";
