//! Command propagation through the module stack.

use std::sync::Arc;

use bushel::base::{SourceId, SourceLocation, Span};
use bushel::runtime::{
    Arguments, CommandInfo, Context, ErrorCategory, ErrorKind, Function, LocalModule, Module,
    Reflection, RuntimeConfig, RuntimeError, Signature, Value,
};
use bushel::specifier::{Expr, SpecifierKind};
use bushel::terms::predefined::{Commands, Parameters, Types};
use bushel::terms::{Role, SemanticUri, Term};
use parking_lot::Mutex;

use crate::helpers::objects::documents;
use crate::helpers::terms::{builtin, context, file_type, spec, uri};

fn command(context: &Context, uri: SemanticUri, name: &str) -> Arc<CommandInfo> {
    context
        .reflection()
        .commands
        .add(&Term::named(Role::Command, uri, name))
}

fn ping() -> SemanticUri {
    SemanticUri::path("script/ping")
}

fn answering(command: SemanticUri, answer: &'static str) -> Function {
    Function::new(Signature::new(command), move |_, _| Ok(Value::string(answer)))
}

// ============================================================================
// PROPAGATION
// ============================================================================

#[test]
fn test_first_accepting_level_handles_command() {
    let mut context = context();
    let calls: Arc<Mutex<Vec<&'static str>>> = Arc::default();

    for (level, handles) in [("outer", true), ("middle", true), ("inner", false)] {
        let module = LocalModule::new(level);
        if handles {
            let calls = calls.clone();
            module.add_function(Function::new(Signature::new(ping()), move |_, _| {
                calls.lock().push(level);
                Ok(Value::string(level))
            }));
        } else {
            module.add_function(answering(SemanticUri::path("script/pong"), level));
        }
        context.modules_mut().push_level(Arc::new(module));
    }

    let ping = command(&context, ping(), "ping");
    let result = context.run(&ping, Arguments::new()).unwrap();
    assert_eq!(result, Value::string("middle"));
    assert_eq!(*calls.lock(), ["middle"]);
}

/// A handler that logs every command offered to it and answers only
/// the ones it accepts.
#[derive(Debug)]
struct Recording {
    name: &'static str,
    accepts: bool,
    consulted: Arc<Mutex<Vec<&'static str>>>,
}

impl Module for Recording {
    fn handle(
        &self,
        _context: &mut Context,
        _command: &CommandInfo,
        _arguments: &Arguments,
    ) -> bushel::runtime::Result<Option<Value>> {
        self.consulted.lock().push(self.name);
        Ok(self.accepts.then(|| Value::string(self.name)))
    }
}

#[test]
fn test_command_falls_through_declining_levels() {
    let mut context = context();
    let consulted: Arc<Mutex<Vec<&'static str>>> = Arc::default();

    for (name, accepts) in [("lowest", true), ("middle", false), ("top", false)] {
        context.modules_mut().push_level(Arc::new(Recording {
            name,
            accepts,
            consulted: consulted.clone(),
        }));
    }

    let ping = command(&context, ping(), "ping");
    let result = context.run(&ping, Arguments::new()).unwrap();
    assert_eq!(result, Value::string("lowest"));
    assert_eq!(*consulted.lock(), ["top", "middle", "lowest"]);
}

#[test]
fn test_handlers_within_a_level_are_tried_top_down() {
    let mut context = context();
    let consulted: Arc<Mutex<Vec<&'static str>>> = Arc::default();
    let handler = |name, accepts| {
        Arc::new(Recording {
            name,
            accepts,
            consulted: consulted.clone(),
        })
    };

    context.modules_mut().push_level(handler("first pushed", true));
    context.modules_mut().push(handler("second pushed", false));

    let ping = command(&context, ping(), "ping");
    let result = context.run(&ping, Arguments::new()).unwrap();
    assert_eq!(result, Value::string("first pushed"));
    assert_eq!(*consulted.lock(), ["second pushed", "first pushed"]);
}

#[test]
fn test_unhandled_command_names_the_command() {
    let mut context = context();
    let frobnicate = command(&context, uri("ae8:abcdfrob"), "frobnicate");
    let error = context.run(&frobnicate, Arguments::new()).unwrap_err();
    assert!(matches!(
        error.kind(),
        ErrorKind::CommandNotHandled { command } if command == "frobnicate"
    ));
    assert_eq!(error.category(), ErrorCategory::Dispatch);
    assert!(error.to_string().contains("frobnicate"));
}

#[test]
fn test_popped_level_no_longer_handles() {
    let mut context = context();
    let module = LocalModule::new("handler");
    module.add_function(answering(ping(), "handled"));
    context.modules_mut().push_level(Arc::new(module));
    let ping = command(&context, ping(), "ping");
    assert!(context.run(&ping, Arguments::new()).is_ok());

    context.modules_mut().pop_level();
    assert!(context.run(&ping, Arguments::new()).is_err());
}

// ============================================================================
// OVERLOADS
// ============================================================================

fn show() -> SemanticUri {
    SemanticUri::path("script/show")
}

fn show_taking(ty: Types, answer: &'static str) -> Function {
    Function::new(
        Signature::new(show()).parameter(SemanticUri::direct_parameter(), ty.uri()),
        move |_, _| Ok(Value::string(answer)),
    )
}

#[test]
fn test_best_match_by_argument_type() {
    let mut context = context();
    context.add_function(show_taking(Types::Number, "number"));
    context.add_function(show_taking(Types::Integer, "integer"));
    context.add_function(show_taking(Types::String, "string"));
    let show = command(&context, show(), "show");

    let cases = [
        (Value::Integer(3), "integer"),
        (Value::Real(2.5), "number"),
        (Value::string("x"), "string"),
    ];
    for (argument, expected) in cases {
        let result = context
            .run(&show, Arguments::new().with_direct(argument))
            .unwrap();
        assert_eq!(result, Value::string(expected));
    }

    let error = context
        .run(&show, Arguments::new().with_direct(Value::Boolean(true)))
        .unwrap_err();
    assert!(matches!(error.kind(), ErrorKind::CommandNotHandled { .. }));
}

#[test]
fn test_later_definition_wins_a_tie() {
    let mut context = context();
    context.add_function(show_taking(Types::Integer, "first"));
    context.add_function(show_taking(Types::Integer, "second"));
    let show = command(&context, show(), "show");
    let result = context
        .run(&show, Arguments::new().with_direct(Value::Integer(1)))
        .unwrap();
    assert_eq!(result, Value::string("second"));
}

#[test]
fn test_target_becomes_direct_argument() {
    let mut context = context();
    context.add_function(Function::new(
        Signature::new(show()).parameter(SemanticUri::direct_parameter(), Types::Item.uri()),
        |_, arguments| Ok(arguments.direct().cloned().unwrap_or(Value::Missing)),
    ));
    let show = command(&context, show(), "show");

    context.enter_tell(Value::Integer(5));
    let result = context.run(&show, Arguments::new()).unwrap();
    context.exit_tell();
    assert_eq!(result, Value::Integer(5));
}

// ============================================================================
// BUILT-IN COMMANDS
// ============================================================================

#[test]
fn test_core_get_resolves_specifier() {
    let mut context = context();
    let last_file = spec(file_type(), SpecifierKind::Last).with_parent(Expr::Value(documents()));
    let result = context
        .run_builtin(
            Commands::Get,
            Arguments::new().with_direct(Value::specifier(last_file)),
        )
        .unwrap();
    assert_eq!(result.name().as_deref(), Some("report.pdf"));
}

#[test]
fn test_core_count() {
    let mut context = context();
    let everything = context
        .run_builtin(Commands::Count, Arguments::new().with_direct(documents()))
        .unwrap();
    assert_eq!(everything, Value::Integer(5));

    let file = context.reflection().types.get(file_type().uri());
    let files = context
        .run_builtin(
            Commands::Count,
            Arguments::new()
                .with_direct(documents())
                .with(Parameters::CountEach.uri(), Value::Type(file)),
        )
        .unwrap();
    assert_eq!(files, Value::Integer(4));

    let characters = context
        .run_builtin(Commands::Count, Arguments::new().with_direct("hello"))
        .unwrap();
    assert_eq!(characters, Value::Integer(5));
}

#[test]
fn test_script_function_overrides_core_get() {
    let mut context = context();
    context.add_function(Function::new(
        Signature::new(Commands::Get.uri()),
        |_, _| Ok(Value::string("intercepted")),
    ));
    let result = context
        .run_builtin(Commands::Get, Arguments::new())
        .unwrap();
    assert_eq!(result, Value::string("intercepted"));
}

// ============================================================================
// TARGETS AND VARIABLES
// ============================================================================

#[test]
fn test_tell_blocks_nest() {
    let mut context = context();
    assert_eq!(context.target(), &Value::Null);

    context.enter_tell(documents());
    context.enter_tell(Value::string("inner"));
    assert_eq!(context.target(), &Value::string("inner"));
    context.exit_tell();
    assert_eq!(context.target().name().as_deref(), Some("Documents"));
    context.exit_tell();

    assert_eq!(context.target(), &Value::Null);
    assert!(context.exit_tell().is_none());
}

#[test]
fn test_handler_frames_hide_caller_variables() {
    let mut context = context();
    let x = Term::named(Role::Variable, SemanticUri::path("script/x"), "x");
    context.set_variable(&x, Value::Integer(1));

    let inner = x.clone();
    context.add_function(Function::new(Signature::new(ping()), move |context, _| {
        context.push_frame();
        let seen = context.variable(&inner);
        context.set_variable(&inner, Value::Integer(99));
        context.pop_frame();
        Ok(seen)
    }));
    let ping = command(&context, ping(), "ping");

    let seen = context.run(&ping, Arguments::new()).unwrap();
    assert!(matches!(seen, Value::Unspecified));
    assert_eq!(context.variable(&x), Value::Integer(1));
}

#[test]
fn test_bound_slot_is_shared() {
    let mut context = context();
    let x = SemanticUri::path("script/x");
    let y = SemanticUri::path("script/handler/y");
    context.frames_mut().set(&x, Value::Integer(1));
    let slot = context.frames().slot(&x).unwrap();

    context.push_frame();
    context.frames_mut().bind(y.clone(), slot);
    context.frames_mut().set(&y, Value::Integer(2));
    context.pop_frame();

    assert_eq!(context.frames().get(&x), Value::Integer(2));
}

// ============================================================================
// LOCATIONS
// ============================================================================

fn here() -> SourceLocation {
    SourceLocation::new(SourceId(0), Span::from_coords(3, 4, 3, 12))
}

fn elsewhere() -> SourceLocation {
    SourceLocation::new(SourceId(9), Span::from_coords(0, 0, 0, 6))
}

fn failing_context(config: RuntimeConfig, raised_at: Option<SourceLocation>) -> Context {
    let mut context = Context::new(Arc::new(Reflection::default()), config);
    context.add_function(Function::new(Signature::new(ping()), move |_, _| {
        Err(RuntimeError::new(ErrorKind::MissingParameter {
            command: "ping".to_owned(),
            parameter: "count".to_owned(),
        })
        .at(raised_at))
    }));
    context.set_location(here());
    context
}

fn run_ping(context: &mut Context) -> RuntimeError {
    let ping = command(context, ping(), "ping");
    context.run(&ping, Arguments::new()).unwrap_err()
}

#[test]
fn test_error_without_location_gets_current() {
    let mut context = failing_context(RuntimeConfig::default(), None);
    assert_eq!(run_ping(&mut context).location(), Some(&here()));
}

#[test]
fn test_foreign_location_is_rewritten() {
    let mut context = failing_context(RuntimeConfig::default(), Some(elsewhere()));
    assert_eq!(run_ping(&mut context).location(), Some(&here()));
}

#[test]
fn test_foreign_location_kept_when_rewriting_disabled() {
    let config = RuntimeConfig::default().with_rewrite_foreign_locations(false);
    let mut context = failing_context(config, Some(elsewhere()));
    assert_eq!(run_ping(&mut context).location(), Some(&elsewhere()));
}

#[test]
fn test_location_in_same_source_is_kept() {
    let earlier = SourceLocation::new(SourceId(0), Span::from_coords(1, 0, 1, 3));
    let mut context = failing_context(RuntimeConfig::default(), Some(earlier));
    assert_eq!(run_ping(&mut context).location(), Some(&earlier));
}

#[test]
fn test_unhandled_command_is_located() {
    let mut context = Context::new(Arc::new(Reflection::default()), RuntimeConfig::default());
    context.set_location(here());
    let missing = command(&context, SemanticUri::path("script/missing"), "missing");
    let error = context.run(&missing, Arguments::new()).unwrap_err();
    assert_eq!(error.location(), Some(&here()));
    assert_eq!(
        error.to_string(),
        "No module handled ‘missing’ with the given arguments (source 0, line 4, column 5)"
    );
}

#[test]
fn test_builtin_item_type_accepts_anything() {
    let context = context();
    let reflection = context.reflection();
    assert!(reflection.is_a(&uri("ae4:file"), builtin(Types::Item).uri()));
    assert!(!reflection.is_a(&Types::Item.uri(), &uri("ae4:file")));
}
