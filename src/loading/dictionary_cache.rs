//! Process-wide cache of imported dictionaries.
//!
//! Reading a scripting definition is expensive relative to compiling a
//! script that uses it, and many scripts target the same applications.
//! Imports are cached by source key and shared as [`Arc`]s; every script
//! that imports the same source sees the same terms.
//!
//! # Usage
//!
//! ```ignore
//! use bushel::loading::DictionaryCache;
//!
//! let imported = DictionaryCache::global().load(&source)?;
//! imported.load_into(&mut dictionary, &mut type_tree);
//! ```

use std::sync::{Arc, LazyLock};

use rayon::prelude::*;

use super::cache::MemoCache;
use super::error::LoadError;
use super::source::{DictionarySource, ImportedDictionary};
use crate::terms::{TermDictionary, TypeTree};

static GLOBAL: LazyLock<DictionaryCache> = LazyLock::new(DictionaryCache::new);

#[derive(Default)]
pub struct DictionaryCache {
    entries: MemoCache<String, Arc<ImportedDictionary>>,
}

impl DictionaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared process-wide cache.
    pub fn global() -> &'static DictionaryCache {
        &GLOBAL
    }

    /// Load `source`, or return the cached import for its key.
    pub fn load(&self, source: &dyn DictionarySource) -> Result<Arc<ImportedDictionary>, LoadError> {
        let key = source.key();
        self.entries.get_or_try_insert_with(&key, || {
            tracing::debug!(%key, "loading dictionary");
            let imported = source.load()?;
            tracing::debug!(%key, terms = imported.terms.len(), "loaded dictionary");
            Ok(Arc::new(imported))
        })
    }

    /// Load `source` and merge it into `dictionary` and `tree`.
    pub fn load_into(
        &self,
        source: &dyn DictionarySource,
        dictionary: &mut TermDictionary,
        tree: &mut TypeTree,
    ) -> Result<(), LoadError> {
        let imported = self.load(source)?;
        imported.load_into(dictionary, tree);
        Ok(())
    }

    /// Load several sources in parallel. Results are in source order.
    pub fn preload(
        &self,
        sources: &[&dyn DictionarySource],
    ) -> Vec<Result<Arc<ImportedDictionary>, LoadError>> {
        sources.par_iter().map(|source| self.load(*source)).collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains(&key.to_owned())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}
