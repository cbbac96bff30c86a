//! Resource resolution for `use` declarations.

use std::sync::Arc;

use super::value::Value;
use crate::loading::{DictionaryCache, DictionarySource, LoadError};
use crate::terms::{ResourceRef, Term, TypeTree};

/// What a resource descriptor resolved to.
#[derive(Clone, Default)]
pub struct ResolvedResource {
    /// Where the resource's terminology can be read from.
    pub dictionary: Option<Arc<dyn DictionarySource>>,
    /// The object commands addressed to the resource are sent to.
    pub target: Option<Value>,
}

/// Host hook that finds applications, libraries and scripts.
pub trait ResourceResolver: Send + Sync {
    fn resolve(&self, resource: &ResourceRef) -> Option<ResolvedResource>;
}

/// Import the terminology of the resource `term` names into `term`'s own
/// dictionary, so that its terms become visible wherever `term` exports.
/// Returns `false` if the resource has no dictionary.
pub fn import_resource_terms(
    resolver: &dyn ResourceResolver,
    cache: &DictionaryCache,
    term: &Term,
    type_tree: &mut TypeTree,
) -> Result<bool, LoadError> {
    let Some(resource) = term.resource() else {
        return Ok(false);
    };
    let Some(source) = resolver
        .resolve(resource)
        .and_then(|resolved| resolved.dictionary)
    else {
        return Ok(false);
    };
    let imported = cache.load(source.as_ref())?;
    imported.load_into(&mut term.dictionary_mut(), type_tree);
    tracing::debug!(resource = %resource.descriptor, terms = imported.terms.len(), "imported resource terms");
    Ok(true)
}
