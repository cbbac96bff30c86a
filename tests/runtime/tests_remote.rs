//! Commands sent to a remote application.

use std::sync::Arc;

use bushel::base::FourCharCode;
use bushel::runtime::{
    Arguments, CommandInfo, Context, ErrorKind, Function, RemoteApplication, RemoteError,
    Signature, UnencodableKind, Value,
};
use bushel::specifier::{Expr, SpecifierKind};
use bushel::terms::{Role, SemanticUri, Term};
use rstest::rstest;

use crate::helpers::objects::documents;
use crate::helpers::remote::ScriptedChannel;
use crate::helpers::terms::{context, folder_type, spec, uri};

fn code(bytes: &[u8; 4]) -> FourCharCode {
    FourCharCode::from_bytes(*bytes)
}

fn open(context: &Context) -> Arc<CommandInfo> {
    context
        .reflection()
        .commands
        .add(&Term::named(Role::Command, uri("ae8:aevtodoc"), "open"))
}

/// A context inside `tell application "Finder"`.
fn telling_finder(replies: Vec<Result<Value, RemoteError>>) -> (Context, Arc<ScriptedChannel>, Value) {
    let channel = Arc::new(ScriptedChannel::new(replies));
    let finder = Value::object(RemoteApplication::new("Finder", channel.clone()));
    let mut context = context();
    context.enter_tell(finder.clone());
    (context, channel, finder)
}

#[test]
fn test_command_is_encoded_and_sent() {
    let (mut context, channel, _) = telling_finder(vec![Ok(Value::Boolean(true))]);
    let open = open(&context);

    let result = context
        .run(&open, Arguments::new().with_direct("/Users/me/notes.txt"))
        .unwrap();
    assert_eq!(result, Value::Boolean(true));

    let requests = channel.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.event_class, code(b"aevt"));
    assert_eq!(request.event_id, code(b"odoc"));
    assert!(request.subject.is_none());
    // The implicit target is not sent as a parameter.
    assert_eq!(request.parameters.len(), 1);
    assert_eq!(
        request.parameters.get(&FourCharCode::DIRECT_OBJECT),
        Some(&Value::string("/Users/me/notes.txt"))
    );
}

#[test]
fn test_tell_pushes_and_pops_remote_level() {
    let (mut context, _, _) = telling_finder(Vec::new());
    assert_eq!(context.modules().depth(), 2);
    context.exit_tell();
    assert_eq!(context.modules().depth(), 1);
}

#[test]
fn test_script_command_falls_through_remote_level() {
    let channel = Arc::new(ScriptedChannel::new(Vec::new()));
    let mut context = context();
    let greet = SemanticUri::path("script/greet");
    context.add_function(Function::new(Signature::new(greet.clone()), |_, _| {
        Ok(Value::string("hello"))
    }));
    context.enter_tell(Value::object(RemoteApplication::new(
        "Finder",
        channel.clone(),
    )));

    let greet = context
        .reflection()
        .commands
        .add(&Term::named(Role::Command, greet, "greet"));
    let result = context.run(&greet, Arguments::new()).unwrap();
    assert_eq!(result, Value::string("hello"));
    assert!(channel.requests().is_empty());
}

#[test]
fn test_not_understood_falls_through_to_core() {
    let (mut context, channel, finder) =
        telling_finder(vec![Err(RemoteError::NotUnderstood)]);
    let result = context
        .run_builtin(bushel::terms::predefined::Commands::Get, Arguments::new())
        .unwrap();
    assert_eq!(result, finder);
    assert_eq!(channel.requests().len(), 1);
}

#[rstest]
#[case(RemoteError::NotPermitted, |kind: &ErrorKind| matches!(kind, ErrorKind::RemoteCommandsDisallowed { .. }))]
#[case(RemoteError::Unreachable("gone".into()), |kind: &ErrorKind| matches!(kind, ErrorKind::RemoteTargetUnreachable { .. }))]
#[case(RemoteError::Decode("bad descriptor".into()), |kind: &ErrorKind| matches!(kind, ErrorKind::Undecodable { message, .. } if message == "bad descriptor"))]
#[case(
    RemoteError::Failed { code: -1728, message: "Can’t get folder 9.".into() },
    |kind: &ErrorKind| matches!(kind, ErrorKind::RemoteCommandFailed { command, .. } if command == "open")
)]
fn test_channel_failures_are_reported(
    #[case] failure: RemoteError,
    #[case] expected: fn(&ErrorKind) -> bool,
) {
    let (mut context, _, _) = telling_finder(vec![Err(failure)]);
    let open = open(&context);
    let error = context
        .run(&open, Arguments::new().with_direct("x"))
        .unwrap_err();
    assert!(expected(error.kind()), "unexpected error: {error}");
}

#[test]
fn test_local_object_cannot_be_sent() {
    let (mut context, channel, _) = telling_finder(Vec::new());
    let open = open(&context);
    let error = context
        .run(&open, Arguments::new().with_direct(documents()))
        .unwrap_err();
    assert!(matches!(
        error.kind(),
        ErrorKind::Unencodable {
            kind: UnencodableKind::Value,
            ..
        }
    ));
    assert!(channel.requests().is_empty());
}

#[test]
fn test_ambient_specifier_argument_is_qualified() {
    let (mut context, channel, _) = telling_finder(vec![Ok(Value::Null)]);
    let open = open(&context);
    let projects = spec(folder_type(), SpecifierKind::Name(Expr::string("Projects")));

    context
        .run(
            &open,
            Arguments::new().with_direct(Value::specifier(projects.clone())),
        )
        .unwrap();
    assert!(projects.is_ambient());

    let requests = channel.requests();
    let Some(Value::Specifier(sent)) = requests[0].parameters.get(&FourCharCode::DIRECT_OBJECT)
    else {
        panic!("expected a specifier argument");
    };
    assert!(matches!(sent.root(), Some(Expr::Value(Value::Object(_)))));
}

#[test]
fn test_command_addressed_to_remote_element() {
    let (mut context, channel, finder) = telling_finder(vec![Ok(Value::Null)]);
    let open = open(&context);
    let first_folder = spec(folder_type(), SpecifierKind::First).with_parent(Expr::Value(finder));

    context
        .run(
            &open,
            Arguments::new().with_target(Value::specifier(first_folder)),
        )
        .unwrap();

    let requests = channel.requests();
    let subject = requests[0].subject.as_ref().unwrap();
    assert_eq!(subject.to_string(), "first folder of application \"Finder\"");
    assert!(requests[0].parameters.is_empty());
}

#[test]
fn test_remote_rooted_specifier_is_fetched_whole() {
    let (mut context, channel, finder) =
        telling_finder(vec![Ok(Value::string("Macintosh HD"))]);
    let disk = spec(folder_type(), SpecifierKind::Index(Expr::integer(1))).with_parent(Expr::Value(finder));

    let result = context.evaluate_specifier(&disk).unwrap();
    assert_eq!(result, Value::string("Macintosh HD"));

    let requests = channel.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].event_class, code(b"core"));
    assert_eq!(requests[0].event_id, code(b"getd"));
    assert!(requests[0].subject.is_some());
}
