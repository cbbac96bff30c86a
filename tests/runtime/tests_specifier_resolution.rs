//! Resolving specifier chains against the in-memory file system.

use bushel::runtime::{ErrorKind, Value};
use bushel::specifier::{Expr, InsertionKind, InsertionSpecifier, Specifier, SpecifierKind};
use bushel::terms::predefined::{Properties, Types};
use bushel::terms::{Role, SemanticUri, Term};
use rstest::rstest;

use crate::helpers::objects::documents;
use crate::helpers::terms::{builtin, context, file_type, folder_type, size_property, spec};

fn in_documents(specifier: Specifier) -> Specifier {
    specifier.with_parent(Expr::Value(documents()))
}

fn numbers() -> Value {
    Value::List((1..=5).map(Value::Integer).collect())
}

fn name_of(value: &Value) -> String {
    value.name().unwrap()
}

fn kind_of(error: bushel::RuntimeError) -> ErrorKind {
    error.kind().clone()
}

// ============================================================================
// ELEMENT FORMS
// ============================================================================

#[rstest]
#[case(SpecifierKind::Index(Expr::integer(2)), "photo.jpg")]
#[case(SpecifierKind::Simple(Expr::integer(4)), "report.pdf")]
#[case(SpecifierKind::Name(Expr::string("todo.txt")), "todo.txt")]
#[case(SpecifierKind::Simple(Expr::string("notes.txt")), "notes.txt")]
#[case(SpecifierKind::Id(Expr::integer(50)), "report.pdf")]
#[case(SpecifierKind::First, "notes.txt")]
#[case(SpecifierKind::Middle, "todo.txt")]
#[case(SpecifierKind::Last, "report.pdf")]
fn test_file_selection(#[case] kind: SpecifierKind, #[case] expected: &str) {
    let mut context = context();
    let found = context
        .evaluate_specifier(&in_documents(spec(file_type(), kind)))
        .unwrap();
    assert_eq!(name_of(&found), expected);
}

#[test]
fn test_elements_are_filtered_by_type() {
    let mut context = context();
    let every_file = context
        .evaluate_specifier(&in_documents(spec(file_type(), SpecifierKind::All)))
        .unwrap();
    let Value::List(files) = every_file else {
        panic!("expected a list");
    };
    assert_eq!(files.len(), 4);

    let second_item = context
        .evaluate_specifier(&in_documents(spec(
            builtin(Types::Item),
            SpecifierKind::Index(Expr::integer(2)),
        )))
        .unwrap();
    assert_eq!(name_of(&second_item), "Projects");
}

#[test]
fn test_random_element_is_of_requested_type() {
    let mut context = context();
    for _ in 0..8 {
        let some_file = context
            .evaluate_specifier(&in_documents(spec(file_type(), SpecifierKind::Random)))
            .unwrap();
        assert_eq!(some_file.type_name(), "file");
    }
}

#[test]
fn test_chain_resolves_from_root_outward() {
    let mut context = context();
    let first_file_of_projects = spec(file_type(), SpecifierKind::First).with_parent(in_documents(
        spec(folder_type(), SpecifierKind::Name(Expr::string("Projects"))),
    ));
    let found = context.evaluate_specifier(&first_file_of_projects).unwrap();
    assert_eq!(name_of(&found), "plan.md");
}

#[test]
fn test_ambient_chain_uses_current_target() {
    let mut context = context();
    context.enter_tell(documents());
    let found = context
        .evaluate_specifier(&spec(file_type(), SpecifierKind::Last))
        .unwrap();
    assert_eq!(name_of(&found), "report.pdf");
    context.exit_tell();
}

#[test]
fn test_nested_tell_anchors_specifier_target() {
    let mut context = context();
    context.enter_tell(documents());
    context.enter_tell(Value::specifier(spec(
        folder_type(),
        SpecifierKind::Name(Expr::string("Projects")),
    )));

    let found = context
        .evaluate_specifier(&spec(file_type(), SpecifierKind::First))
        .unwrap();
    assert_eq!(name_of(&found), "plan.md");

    context.exit_tell();
    let found = context
        .evaluate_specifier(&spec(file_type(), SpecifierKind::First))
        .unwrap();
    assert_eq!(name_of(&found), "notes.txt");
    context.exit_tell();
}

#[test]
fn test_variable_holding_specifier_continues_chain() {
    let mut context = context();
    let projects = Term::named(Role::Variable, SemanticUri::path("script/projects"), "projects");
    context.set_variable(
        &projects,
        Value::specifier(in_documents(spec(
            folder_type(),
            SpecifierKind::Name(Expr::string("Projects")),
        ))),
    );
    let first_file = spec(file_type(), SpecifierKind::First).with_parent(Expr::Variable(projects));
    let found = context.evaluate_specifier(&first_file).unwrap();
    assert_eq!(name_of(&found), "plan.md");
}

// ============================================================================
// ADDRESSING ERRORS
// ============================================================================

#[rstest]
#[case(0)]
#[case(-1)]
#[case(5)]
fn test_index_out_of_bounds(#[case] index: i64) {
    let mut context = context();
    let error = context
        .evaluate_specifier(&in_documents(spec(
            file_type(),
            SpecifierKind::Index(Expr::integer(index)),
        )))
        .unwrap_err();
    assert!(matches!(kind_of(error), ErrorKind::IndexOutOfBounds { index: i, .. } if i == index));
}

#[test]
fn test_empty_selection_has_no_element() {
    let mut context = context();
    let first_folder_of_projects = spec(folder_type(), SpecifierKind::First).with_parent(
        in_documents(spec(folder_type(), SpecifierKind::Name(Expr::string("Projects")))),
    );
    let error = context
        .evaluate_specifier(&first_folder_of_projects)
        .unwrap_err();
    assert!(matches!(kind_of(error), ErrorKind::NoElementExists { .. }));

    let missing = in_documents(spec(file_type(), SpecifierKind::Name(Expr::string("nope"))));
    let error = context.evaluate_specifier(&missing).unwrap_err();
    assert!(matches!(kind_of(error), ErrorKind::NoElementExists { .. }));
}

#[test]
fn test_wrong_selector_type_is_rejected() {
    let mut context = context();
    let error = context
        .evaluate_specifier(&in_documents(spec(
            file_type(),
            SpecifierKind::Simple(Expr::Value(Value::Boolean(true))),
        )))
        .unwrap_err();
    assert!(matches!(
        kind_of(error),
        ErrorKind::InvalidSpecifierDataType { .. }
    ));
}

#[test]
fn test_value_without_elements_rejects_element_forms() {
    let mut context = context();
    let item_of_number = spec(builtin(Types::Item), SpecifierKind::First)
        .with_parent(Expr::Value(Value::Integer(42)));
    let error = context.evaluate_specifier(&item_of_number).unwrap_err();
    assert_eq!(
        error.to_string(),
        "The indexing form ‘absolute-position’ is unsupported by items of type integer"
    );
}

// ============================================================================
// RANGES
// ============================================================================

#[test]
fn test_range_of_list() {
    let mut context = context();
    let middle_three = spec(
        builtin(Types::Item),
        SpecifierKind::Range {
            from: Expr::integer(2),
            to: Expr::integer(4),
        },
    )
    .with_parent(Expr::Value(numbers()));
    let found = context.evaluate_specifier(&middle_three).unwrap();
    assert_eq!(found, Value::List(vec![2.into(), 3.into(), 4.into()]));
}

#[test]
fn test_range_bounds_may_be_elements() {
    let mut context = context();
    let between = in_documents(spec(
        file_type(),
        SpecifierKind::Range {
            from: Expr::from(spec(
                file_type(),
                SpecifierKind::Name(Expr::string("photo.jpg")),
            )),
            to: Expr::from(spec(file_type(), SpecifierKind::Last)),
        },
    ));
    let Value::List(files) = context.evaluate_specifier(&between).unwrap() else {
        panic!("expected a list");
    };
    let names: Vec<String> = files.iter().map(name_of).collect();
    assert_eq!(names, ["photo.jpg", "todo.txt", "report.pdf"]);
}

#[rstest]
#[case(1, 3, Some("Mac"))]
#[case(4, 2, Some(""))]
#[case(0, 2, None)]
#[case(3, 20, None)]
fn test_range_of_string(#[case] from: i64, #[case] to: i64, #[case] expected: Option<&str>) {
    let mut context = context();
    let characters = spec(
        builtin(Types::Character),
        SpecifierKind::Range {
            from: Expr::integer(from),
            to: Expr::integer(to),
        },
    )
    .with_parent(Expr::string("Macintosh"));
    let result = context.evaluate_specifier(&characters);
    match expected {
        Some(text) => assert_eq!(result.unwrap(), Value::string(text)),
        None => assert!(matches!(
            kind_of(result.unwrap_err()),
            ErrorKind::RangeOutOfBounds { .. }
        )),
    }
}

#[test]
fn test_reversed_list_range_is_out_of_bounds() {
    let mut context = context();
    let reversed = spec(
        builtin(Types::Item),
        SpecifierKind::Range {
            from: Expr::integer(4),
            to: Expr::integer(2),
        },
    )
    .with_parent(Expr::Value(numbers()));
    let error = context.evaluate_specifier(&reversed).unwrap_err();
    assert!(matches!(
        kind_of(error),
        ErrorKind::RangeOutOfBounds { from: 4, to: 2, .. }
    ));
}

// ============================================================================
// PROPERTIES
// ============================================================================

fn builtin_property(property: Properties) -> bushel::terms::TermRef {
    Term::named(Role::Property, property.uri(), property.name())
}

#[test]
fn test_object_property() {
    let mut context = context();
    let size_of_first_file = spec(size_property(), SpecifierKind::Property)
        .with_parent(in_documents(spec(file_type(), SpecifierKind::First)));
    assert_eq!(
        context.evaluate_specifier(&size_of_first_file).unwrap(),
        Value::Integer(120)
    );
}

#[test]
fn test_builtin_properties() {
    let mut context = context();
    let projects = in_documents(spec(folder_type(), SpecifierKind::Index(Expr::integer(1))));

    let name = spec(builtin_property(Properties::Name), SpecifierKind::Property)
        .with_parent(projects.clone());
    assert_eq!(
        context.evaluate_specifier(&name).unwrap(),
        Value::string("Projects")
    );

    let class = spec(builtin_property(Properties::Class), SpecifierKind::Property)
        .with_parent(projects);
    assert_eq!(
        context.evaluate_specifier(&class).unwrap().to_string(),
        "folder"
    );

    let length = spec(builtin_property(Properties::Length), SpecifierKind::Property)
        .with_parent(Expr::Value(numbers()));
    assert_eq!(
        context.evaluate_specifier(&length).unwrap(),
        Value::Integer(5)
    );
}

#[test]
fn test_missing_property() {
    let mut context = context();
    let size_of_folder = spec(size_property(), SpecifierKind::Property).with_parent(
        in_documents(spec(folder_type(), SpecifierKind::First)),
    );
    let error = context.evaluate_specifier(&size_of_folder).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Objects of type folder do not have a property named size"
    );
}

// ============================================================================
// INSERTION POINTS
// ============================================================================

#[test]
fn test_relative_specifier_yields_insertion_point() {
    let mut context = context();
    let after_first_file = in_documents(spec(
        file_type(),
        SpecifierKind::After(Expr::from(spec(file_type(), SpecifierKind::First))),
    ));
    let Value::InsertionPoint(point) = context.evaluate_specifier(&after_first_file).unwrap()
    else {
        panic!("expected an insertion point");
    };
    assert_eq!(point.kind, InsertionKind::After);
    assert_eq!(name_of(&point.reference), "notes.txt");
}

#[test]
fn test_selecting_from_insertion_point_fails() {
    let mut context = context();
    let end = InsertionSpecifier::new(InsertionKind::End).with_parent(Expr::Value(documents()));
    let file_of_end = spec(file_type(), SpecifierKind::First)
        .with_parent(Expr::Insertion(Box::new(end)));
    let error = context.evaluate_specifier(&file_of_end).unwrap_err();
    assert!(matches!(
        kind_of(error),
        ErrorKind::InsertionPointEvaluated { .. }
    ));
}
