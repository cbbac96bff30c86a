//! Resource terminology imported for `use` declarations.

use std::collections::HashMap;
use std::sync::Arc;

use bushel::loading::DictionaryCache;
use bushel::loading::sdef::SdefBytes;
use bushel::runtime::{Reflection, ResolvedResource, ResourceResolver, import_resource_terms};
use bushel::terms::predefined::builtin_type_tree;
use bushel::terms::{Lexicon, ResourceKind, ResourceRef, Role, Term, TermName};

use super::tests_dictionary_cache::MAIL;
use crate::helpers::terms::uri;

struct Applications {
    installed: HashMap<String, &'static str>,
}

impl ResourceResolver for Applications {
    fn resolve(&self, resource: &ResourceRef) -> Option<ResolvedResource> {
        let sdef = self.installed.get(resource.descriptor.as_str())?;
        Some(ResolvedResource {
            dictionary: Some(Arc::new(SdefBytes::new(
                format!("app:{}", resource.descriptor),
                sdef.as_bytes(),
            ))),
            target: None,
        })
    }
}

fn mail_term() -> Arc<Term> {
    Term::new(Role::Resource, uri("res:app:Mail"))
        .with_name(TermName::new("Mail"))
        .with_resource(ResourceRef::new(ResourceKind::ApplicationByName, "Mail"))
        .into_ref()
}

#[test]
fn test_imported_terms_are_visible_through_scope() {
    let resolver = Applications {
        installed: HashMap::from([("Mail".to_owned(), MAIL)]),
    };
    let cache = DictionaryCache::new();
    let mut tree = builtin_type_tree();
    let mail = mail_term();

    assert!(import_resource_terms(&resolver, &cache, &mail, &mut tree).unwrap());
    assert!(tree.is_a(&uri("ae4:smbx"), &uri("ae4:mbxp")));

    let mut lexicon = Lexicon::new();
    lexicon.add(mail.clone());
    lexicon.push_unnamed_dictionary(false);
    let message = lexicon
        .term_named_with_role(&TermName::new("message"), Role::Type)
        .unwrap();
    assert_eq!(message.uri(), &uri("ae4:mssg"));

    let reflection = Reflection::from_root(lexicon.root(), tree);
    let smart = reflection.types.get(&uri("ae4:smbx"));
    let supertype = reflection.supertype(&smart).unwrap();
    assert_eq!(supertype.to_string(), "mailbox");
}

#[test]
fn test_unknown_resource_imports_nothing() {
    let resolver = Applications {
        installed: HashMap::new(),
    };
    let mut tree = builtin_type_tree();
    let mail = mail_term();
    let imported = import_resource_terms(&resolver, &DictionaryCache::new(), &mail, &mut tree);
    assert!(!imported.unwrap());
    assert!(mail.dictionary().is_empty());
}
