//! The global term pool.
//!
//! Every term the compiler creates or imports is registered here, whatever
//! scope it was defined in, so that later passes can find a term by id
//! without knowing where it lives.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use super::dictionary::TermDictionary;
use super::name::TermName;
use super::term::{TermId, TermRef};

#[derive(Clone, Debug, Default)]
pub struct TermPool {
    by_id: FxHashMap<TermId, TermRef>,
    by_name: FxHashMap<TermName, TermRef>,
}

impl TermPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn term(&self, id: &TermId) -> Option<TermRef> {
        self.by_id.get(id).cloned()
    }

    pub fn term_named(&self, name: &TermName) -> Option<TermRef> {
        self.by_name.get(name).cloned()
    }

    /// Register one term. A later term replaces an earlier one with the
    /// same id or name.
    pub fn add(&mut self, term: TermRef) {
        if let Some(name) = term.name() {
            self.by_name.insert(name.clone(), term.clone());
        }
        self.by_id.insert(term.id().clone(), term);
    }

    pub fn add_all<I>(&mut self, terms: I)
    where
        I: IntoIterator<Item = TermRef>,
    {
        for term in terms {
            self.add(term);
        }
    }

    /// Register `term` and every term reachable through nested
    /// dictionaries.
    pub fn add_recursive(&mut self, term: &TermRef) {
        let mut visited: FxHashSet<*const ()> = FxHashSet::default();
        let mut pending = vec![term.clone()];
        while let Some(next) = pending.pop() {
            if !visited.insert(Arc::as_ptr(&next).cast()) {
                continue;
            }
            pending.extend(next.dictionary().contents().cloned());
            self.add(next);
        }
    }

    /// Register every term of `dictionary`, recursively.
    pub fn add_dictionary(&mut self, dictionary: &TermDictionary) {
        for term in dictionary.contents() {
            self.add_recursive(term);
        }
    }

    pub fn merge(&mut self, other: &TermPool) {
        self.add_all(other.by_id.values().cloned());
    }
}
