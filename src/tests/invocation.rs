use std::time::Duration;

use tokio::join;
use pretty_assertions::assert_eq;

use super::fixtures::{Calls, calls, create_widget, keys, recorded, recording};
use crate::{
    Arguments, ExecutionResult, Extra, FieldError, InputValue, Type, Value, graphql_input_value,
    graphql_value,
    relay::{ArgumentDefinition, MutationBuilder, MutationField},
};

type Arg = ArgumentDefinition;

fn input(value: InputValue) -> Arguments {
    Arguments::new().with("input", value)
}

fn mutation_field(builder: MutationBuilder) -> MutationField {
    builder.build().unwrap().field().unwrap()
}

fn with_result(name: &str, calls: &Calls, result: ExecutionResult) -> MutationBuilder {
    let mut builder = MutationBuilder::new(name).unwrap();
    builder.resolver(recording(calls, result));
    builder
}

#[tokio::test]
async fn echoes_client_mutation_id() {
    let calls = calls();
    let field = create_widget(&calls).field().unwrap();

    let result = field
        .resolve(input(graphql_input_value!({"name": "A", "clientMutationId": "abc123"})))
        .await;

    assert_eq!(
        result,
        Ok(graphql_value!({
            "widget": {"id": 1, "name": "A"},
            "clientMutationId": "abc123",
        })),
    );

    let received = recorded(&calls);
    assert_eq!(received.len(), 1);
    let args = received[0].as_ref().unwrap();
    assert_eq!(keys(args.names()), vec!["name"]);
    assert_eq!(args.get::<String>("name"), Ok("A".into()));
    assert!(!args.contains("client_mutation_id"));
}

#[tokio::test]
async fn omitted_client_mutation_id_is_null() {
    let field = create_widget(&calls()).field().unwrap();

    let result = field.resolve(input(graphql_input_value!({"name": "A"}))).await;

    assert_eq!(
        result,
        Ok(graphql_value!({"widget": {"id": 1, "name": "A"}, "clientMutationId": null})),
    );
}

#[tokio::test]
async fn client_mutation_id_is_always_overwritten() {
    let mut builder = with_result(
        "CreateWidget",
        &calls(),
        Ok(graphql_value!({"clientMutationId": "from resolver", "ok": true})),
    );
    builder.argument(Arg::new("name", Type::named("String"))).unwrap();
    let field = mutation_field(builder);

    assert_eq!(
        field.resolve(input(graphql_input_value!({"clientMutationId": "x1"}))).await,
        Ok(graphql_value!({"ok": true, "clientMutationId": "x1"})),
    );
    assert_eq!(
        field.resolve(input(graphql_input_value!({"name": "A"}))).await,
        Ok(graphql_value!({"ok": true, "clientMutationId": null})),
    );
}

#[tokio::test]
async fn zero_argument_mutation_gets_no_arguments() {
    let calls = calls();
    let field = mutation_field(with_result("Ping", &calls, Ok(graphql_value!({"pong": true}))));

    assert_eq!(
        field.resolve(Arguments::new()).await,
        Ok(graphql_value!({"pong": true, "clientMutationId": null})),
    );
    assert_eq!(
        field.resolve(input(graphql_input_value!({"clientMutationId": "p1"}))).await,
        Ok(graphql_value!({"pong": true, "clientMutationId": "p1"})),
    );

    let received = recorded(&calls);
    assert_eq!(received.len(), 2);
    assert!(received.iter().all(Option::is_none));
}

#[tokio::test]
async fn passes_requested_extras_through() {
    struct Lookahead(&'static str);

    let calls = calls();
    let mut builder = with_result("CreateWidget", &calls, Ok(graphql_value!({})));
    builder
        .argument(Arg::new("name", Type::named("String")))
        .unwrap()
        .extras(["lookahead"]);
    let field = mutation_field(builder).extras(["viewer", "lookahead"]);

    let raw = input(graphql_input_value!({"name": "A"}))
        .with_extra("lookahead", Extra::new(Lookahead("widget { id }")))
        .with_extra("unrequested", Extra::new(42_i32))
        .with("viewer", "admin");
    field.resolve(raw).await.unwrap();

    // Missing extras are not fabricated.
    field.resolve(input(graphql_input_value!({"name": "B"}))).await.unwrap();

    let received = recorded(&calls);
    let first = received[0].as_ref().unwrap();
    assert_eq!(
        first.extra::<Lookahead>("lookahead").map(|l| l.0),
        Some("widget { id }"),
    );
    assert!(!first.contains_extra("unrequested"));
    assert_eq!(first.get::<String>("viewer"), Ok("admin".into()));
    assert_eq!(keys(first.names()), vec!["name", "viewer"]);

    let second = received[1].as_ref().unwrap();
    assert!(!second.contains_extra("lookahead"));
    assert!(!second.contains("viewer"));
    assert_eq!(keys(second.names()), vec!["name"]);
}

#[tokio::test]
async fn extras_alone_are_passed_as_arguments() {
    let calls = calls();
    let mut builder = with_result("Logout", &calls, Ok(graphql_value!({})));
    builder.extras(["session"]);
    let field = mutation_field(builder);

    field
        .resolve(Arguments::new().with_extra("session", Extra::new("s-1")))
        .await
        .unwrap();

    let received = recorded(&calls);
    let args = received[0].as_ref().unwrap();
    assert_eq!(args.extra::<&'static str>("session"), Some(&"s-1"));
}

#[tokio::test]
async fn resolver_errors_pass_through() {
    let error = FieldError::new("Widget limit reached", graphql_value!({"limit": 3}));
    let mut builder = with_result("CreateWidget", &calls(), Err(error.clone()));
    builder.argument(Arg::new("name", Type::named("String"))).unwrap();
    let field = mutation_field(builder);

    assert_eq!(
        field
            .resolve(input(graphql_input_value!({"name": "A", "clientMutationId": "abc"})))
            .await,
        Err(error),
    );
}

#[tokio::test]
async fn non_object_results_are_untouched() {
    for value in [
        Value::Null,
        Value::scalar("done"),
        graphql_value!([{"id": 1}]),
    ] {
        let field = mutation_field(with_result("Touch", &calls(), Ok(value.clone())));

        assert_eq!(
            field.resolve(input(graphql_input_value!({"clientMutationId": "t"}))).await,
            Ok(value),
        );
    }
}

#[tokio::test]
async fn unwraps_into_keywords_with_defaults() {
    let calls = calls();
    let mut builder = with_result("CreateWidget", &calls, Ok(graphql_value!({})));
    builder
        .argument(Arg::new("widget_name", Type::non_null("String")))
        .unwrap()
        .argument(
            Arg::new("color", Type::named("Color"))
                .default_value(graphql_input_value!(BLUE)),
        )
        .unwrap()
        .argument(Arg::new("size", Type::named("Int")))
        .unwrap();
    let field = mutation_field(builder);

    field
        .resolve(input(graphql_input_value!({"widgetName": "A"})))
        .await
        .unwrap();
    field
        .resolve(input(graphql_input_value!({"widgetName": "B", "color": RED, "size": 3})))
        .await
        .unwrap();

    let received = recorded(&calls);
    let first = received[0].as_ref().unwrap();
    assert_eq!(keys(first.names()), vec!["widget_name", "color"]);
    assert_eq!(first.get_input_value("color"), Some(&InputValue::enum_value("BLUE")));
    assert_eq!(first.get::<Option<i32>>("size"), Ok(None));

    let second = received[1].as_ref().unwrap();
    assert_eq!(second.get_input_value("color"), Some(&InputValue::enum_value("RED")));
    assert_eq!(second.get::<i32>("size"), Ok(3));
}

#[tokio::test]
async fn rejects_malformed_input() {
    let calls = calls();
    let field = create_widget(&calls).field().unwrap();

    assert_eq!(
        field.resolve(input(graphql_input_value!("A"))).await,
        Err(FieldError::from(r#"Expected `CreateWidgetInput`, found: "A""#)),
    );
    assert_eq!(
        field
            .resolve(input(graphql_input_value!({"name": "A", "color": "red"})))
            .await,
        Err(FieldError::from(
            "Field `color` is not defined by type `CreateWidgetInput`",
        )),
    );
    assert!(recorded(&calls).is_empty());
}

#[tokio::test]
async fn awaits_deferred_results() {
    let mut builder = MutationBuilder::new("SlowWidget").unwrap();
    builder
        .argument(Arg::new("delay_ms", Type::non_null("Int")))
        .unwrap()
        .resolver(|args: Option<Arguments>| async move {
            let delay = args.unwrap_or_default().get::<i32>("delay_ms")?;
            tokio::time::sleep(Duration::from_millis(delay.unsigned_abs().into())).await;
            ExecutionResult::Ok(graphql_value!({"delay": (delay)}))
        });
    let field = mutation_field(builder);

    let (slow, fast) = join!(
        field.resolve(input(graphql_input_value!({"delayMs": 30, "clientMutationId": "slow"}))),
        field.resolve(input(graphql_input_value!({"delayMs": 1, "clientMutationId": "fast"}))),
    );

    assert_eq!(slow, Ok(graphql_value!({"delay": 30, "clientMutationId": "slow"})));
    assert_eq!(fast, Ok(graphql_value!({"delay": 1, "clientMutationId": "fast"})));
}

#[tokio::test]
async fn prepares_invocation() {
    let field = create_widget(&calls()).field().unwrap();

    let invocation = field
        .prepare(input(graphql_input_value!({"name": "A", "clientMutationId": "abc123"})))
        .unwrap();

    assert_eq!(
        invocation.client_mutation_id(),
        Some(&InputValue::scalar("abc123")),
    );
    assert_eq!(
        invocation.arguments().map(|a| keys(a.names())),
        Some(vec!["name"]),
    );
}
