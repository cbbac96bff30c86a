//! Dictionary merging across imports.

use bushel::terms::{Role, Term, TermDictionary, TermId, TermName, TermPool};

use crate::helpers::terms::{property_term, type_term, uri};

fn name(text: &str) -> TermName {
    TermName::new(text)
}

#[test]
fn test_merge_is_additive() {
    let mut base = TermDictionary::new();
    base.add(type_term("cfol", "folder"));
    base.add(property_term("pnam", "name"));

    let mut incoming = TermDictionary::new();
    incoming.add(type_term("file", "file"));
    incoming.add(property_term("ptsz", "size"));

    let merged = TermDictionary::merging(&base, &incoming);
    assert_eq!(merged.len(), 4);
    for word in ["folder", "name", "file", "size"] {
        assert!(merged.term_named(&name(word)).is_some(), "{word} lost in merge");
    }
    // The inputs are untouched.
    assert_eq!(base.len(), 2);
    assert_eq!(incoming.len(), 2);
}

#[test]
fn test_type_wins_over_property_in_either_order() {
    let ty = type_term("cwin", "window");
    let property = property_term("pwnd", "window");

    let mut types_first = TermDictionary::new();
    types_first.add(ty.clone());
    types_first.add(property.clone());

    let mut properties_first = TermDictionary::new();
    properties_first.add(property);
    properties_first.add(ty);

    for dictionary in [types_first, properties_first] {
        let found = dictionary.term_named(&name("window")).unwrap();
        assert_eq!(found.role(), Role::Type);
    }
}

#[test]
fn test_merge_keeps_every_id_when_names_collide() {
    let mut windows = TermDictionary::new();
    windows.add(type_term("cwin", "window"));
    let mut properties = TermDictionary::new();
    properties.add(property_term("pwin", "window"));

    let merged = TermDictionary::merging(&windows, &properties);
    assert_eq!(merged.len(), 2);
    assert!(merged.term(&TermId::new(Role::Type, uri("ae4:cwin"))).is_some());
    assert!(merged.term(&TermId::new(Role::Property, uri("ae4:pwin"))).is_some());
    assert_eq!(merged.term_named(&name("window")).unwrap().role(), Role::Type);
}

#[test]
fn test_merging_same_command_unions_parameters() {
    let close_a = Term::named(Role::Command, uri("ae8:coreclos"), "close");
    close_a.dictionary_mut().add(Term::named(
        Role::Parameter,
        uri("ae12:coreclossavo"),
        "saving",
    ));
    let close_b = Term::named(Role::Command, uri("ae8:coreclos"), "close");
    close_b.dictionary_mut().add(Term::named(
        Role::Parameter,
        uri("ae12:coreclos----"),
        "direct",
    ));

    let mut base = TermDictionary::new();
    base.add(close_a);
    let mut incoming = TermDictionary::new();
    incoming.add(close_b);
    base.merge(&incoming);

    let close = base.term_named(&name("close")).unwrap();
    assert_eq!(close.dictionary().len(), 2);
    assert!(close.dictionary().term_named(&name("saving")).is_some());
}

#[test]
fn test_pool_collects_nested_terms() {
    let app = Term::named(Role::Dictionary, uri("res:Finder"), "Finder");
    let folder = type_term("cfol", "folder");
    folder.dictionary_mut().add(property_term("pexp", "expanded"));
    app.dictionary_mut().add(folder);

    let mut pool = TermPool::new();
    pool.add_recursive(&app);
    assert!(pool.term_named(&name("expanded")).is_some());
    assert!(pool.term_named(&name("Finder")).is_some());
    assert_eq!(pool.len(), 3);
}
