//! Dictionary sources.

use crate::terms::{OrphanEdge, SemanticUri, TermDictionary, TypeTree};

use super::error::LoadError;

/// Terms imported from one source, plus the type edges it declares.
#[derive(Clone, Debug, Default)]
pub struct ImportedDictionary {
    pub terms: TermDictionary,
    /// `(subtype, supertype)` pairs.
    pub edges: Vec<(SemanticUri, SemanticUri)>,
    /// Edges whose supertype lives in some other dictionary.
    pub orphans: Vec<OrphanEdge>,
}

impl ImportedDictionary {
    /// Add this source's edges and orphans to `tree`.
    pub fn apply_to(&self, tree: &mut TypeTree) {
        for (subtype, supertype) in &self.edges {
            tree.add(subtype.clone(), supertype.clone());
        }
        for orphan in &self.orphans {
            tree.add_orphan(orphan.subtype.clone(), orphan.supertype_name.clone());
        }
    }

    /// Merge the terms into `dictionary` and the edges into `tree`.
    pub fn load_into(&self, dictionary: &mut TermDictionary, tree: &mut TypeTree) {
        dictionary.merge(&self.terms);
        self.apply_to(tree);
    }
}

/// Something a terminology dictionary can be read from.
pub trait DictionarySource: Send + Sync {
    /// Cache key. Two sources with the same key load the same terms.
    fn key(&self) -> String;

    fn load(&self) -> Result<ImportedDictionary, LoadError>;
}
