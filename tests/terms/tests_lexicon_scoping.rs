//! Name lookup through nested scopes.

use std::sync::Arc;

use bushel::terms::{Lexicon, Role, Term, TermName};

use crate::helpers::terms::{property_term, type_term, uri};

fn name(text: &str) -> TermName {
    TermName::new(text)
}

/// A resource term whose dictionary holds `folder` and `name`.
fn finder() -> Arc<Term> {
    let finder = Term::named(Role::Resource, uri("res:app:Finder"), "Finder");
    finder.dictionary_mut().add(type_term("cfol", "folder"));
    finder.dictionary_mut().add(property_term("pnam", "name"));
    finder
}

#[test]
fn test_exported_terms_visible_in_inner_scopes() {
    let mut lexicon = Lexicon::new();
    lexicon.add(finder());
    lexicon.push_unnamed_dictionary(false);
    lexicon.push_unnamed_dictionary(false);

    let folder = lexicon.term_named(&name("folder")).unwrap();
    assert_eq!(folder.role(), Role::Type);
}

#[test]
fn test_local_definition_shadows_exported_term() {
    let mut lexicon = Lexicon::new();
    lexicon.add(finder());
    lexicon.push_unnamed_dictionary(false);
    let local = lexicon.look_up_or_define(Role::Variable, &name("folder"));
    // Variables are looked up by role, so the exported type does not satisfy it.
    assert_eq!(local.role(), Role::Variable);

    let found = lexicon.term_named(&name("folder")).unwrap();
    assert!(Arc::ptr_eq(&found, &local));

    lexicon.pop();
    let outer = lexicon.term_named(&name("folder")).unwrap();
    assert_eq!(outer.role(), Role::Type);
}

#[test]
fn test_non_exporting_term_hides_its_dictionary() {
    let hidden = Term::new(Role::Resource, uri("res:lib:Private"))
        .with_name(name("Private"))
        .with_exports(false)
        .into_ref();
    hidden.dictionary_mut().add(type_term("ssss", "secret"));

    let mut lexicon = Lexicon::new();
    lexicon.add(hidden.clone());
    assert!(lexicon.term_named(&name("secret")).is_none());

    lexicon.push(hidden);
    assert!(lexicon.term_named(&name("secret")).is_some());
}

#[test]
fn test_root_scope_is_never_popped() {
    let mut lexicon = Lexicon::new();
    lexicon.push_unnamed_dictionary(false);
    assert!(lexicon.pop().is_some());
    assert!(lexicon.pop().is_none());
    assert_eq!(lexicon.depth(), 1);
}
