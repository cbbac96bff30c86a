//! Term and context builders.

use std::sync::Arc;

use bushel::runtime::{Context, Reflection, RuntimeConfig};
use bushel::specifier::{Specifier, SpecifierKind};
use bushel::terms::predefined::Types;
use bushel::terms::{Role, SemanticUri, Term, TermRef};

pub fn uri(text: &str) -> SemanticUri {
    text.parse().unwrap()
}

pub fn type_term(code: &str, name: &str) -> TermRef {
    Term::named(Role::Type, uri(&format!("ae4:{code}")), name)
}

pub fn property_term(code: &str, name: &str) -> TermRef {
    Term::named(Role::Property, uri(&format!("ae4:{code}")), name)
}

pub fn builtin(ty: Types) -> TermRef {
    Term::named(Role::Type, ty.uri(), ty.name())
}

pub fn folder_type() -> TermRef {
    type_term("cfol", "folder")
}

pub fn file_type() -> TermRef {
    type_term("file", "file")
}

pub fn size_property() -> TermRef {
    property_term("ptsz", "size")
}

/// An ambient specifier: selects from the current target.
pub fn spec(id_term: TermRef, kind: SpecifierKind) -> Specifier {
    Specifier::new(id_term, kind)
}

/// A context with a fixed random seed and the file types registered.
pub fn context() -> Context {
    let reflection = Reflection::default();
    reflection.types.add(&folder_type());
    reflection.types.add(&file_type());
    reflection.properties.add(&size_property());
    Context::new(Arc::new(reflection), RuntimeConfig::default().with_rng_seed(7))
}
