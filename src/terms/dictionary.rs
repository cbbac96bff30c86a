//! Term dictionaries.
//!
//! A dictionary indexes terms by id and by name and keeps the set of its
//! members that export their own dictionaries. Adding a term whose id or
//! name is already present resolves the collision instead of failing:
//!
//! ```text
//! existing \ incoming   type       property   constant   other
//! type                  incoming   existing   existing   incoming
//! property              incoming   incoming   existing   incoming
//! constant              incoming   incoming   incoming   incoming
//! other                 incoming   incoming   incoming   incoming
//! ```
//!
//! The ladder decides which term a name refers to. Every term stays
//! reachable by its own id. Whichever term survives also receives the
//! other term's nested dictionary, so no member of either is lost.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use super::name::TermName;
use super::role::Role;
use super::term::{TermId, TermRef};

/// A mutable index of terms by id and by name.
#[derive(Clone, Debug, Default)]
pub struct TermDictionary {
    by_id: IndexMap<TermId, TermRef>,
    by_name: FxHashMap<TermName, TermRef>,
    exporting: IndexMap<TermId, TermRef>,
}

impl TermDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_contents<I>(contents: I) -> Self
    where
        I: IntoIterator<Item = TermRef>,
    {
        let mut dictionary = Self::new();
        dictionary.add_all(contents);
        dictionary
    }

    /// A dictionary holding `base`'s terms with `incoming` merged on top.
    pub fn merging(base: &TermDictionary, incoming: &TermDictionary) -> Self {
        let mut merged = base.clone();
        merged.merge(incoming);
        merged
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Every term, in insertion order.
    pub fn contents(&self) -> impl Iterator<Item = &TermRef> {
        self.by_id.values()
    }

    pub fn term(&self, id: &TermId) -> Option<TermRef> {
        self.by_id.get(id).cloned()
    }

    pub fn term_named(&self, name: &TermName) -> Option<TermRef> {
        self.by_name.get(name).cloned()
    }

    /// The term with `name`, only if it also has `role`.
    pub fn term_named_with_role(&self, name: &TermName, role: Role) -> Option<TermRef> {
        self.by_name
            .get(name)
            .filter(|term| term.role() == role)
            .cloned()
    }

    /// Members whose own dictionaries are visible through this one.
    pub fn exporting_terms(&self) -> impl Iterator<Item = &TermRef> {
        self.exporting.values()
    }

    /// Add a term and return the term that is now stored under its id.
    ///
    /// The id and name indexes resolve their collisions independently, so
    /// a term that loses its name to another term stays reachable by id.
    pub fn add(&mut self, term: TermRef) -> TermRef {
        let mut stored = term;

        if let Some(existing) = self.by_id.get(stored.id()).cloned() {
            stored = resolve_collision(existing.clone(), stored);
            if let Some(old_name) = existing.name() {
                let renamed = stored.name() != Some(old_name);
                let indexed = self
                    .by_name
                    .get(old_name)
                    .is_some_and(|named| Arc::ptr_eq(named, &existing));
                if renamed && indexed {
                    self.by_name.remove(old_name);
                }
            }
        }

        if let Some(name) = stored.name().cloned() {
            let named = match self.by_name.get(&name).cloned() {
                Some(existing) => resolve_collision(existing, stored.clone()),
                None => stored.clone(),
            };
            self.by_name.insert(name, named);
        }

        self.by_id.insert(stored.id().clone(), stored.clone());
        if stored.exports() {
            self.exporting.insert(stored.id().clone(), stored.clone());
        } else {
            self.exporting.shift_remove(stored.id());
        }
        stored
    }

    pub fn add_all<I>(&mut self, terms: I)
    where
        I: IntoIterator<Item = TermRef>,
    {
        for term in terms {
            self.add(term);
        }
    }

    /// Add every term of `other`, resolving collisions as [`add`](Self::add) does.
    pub fn merge(&mut self, other: &TermDictionary) {
        self.add_all(other.contents().cloned());
    }
}

/// Decide which of two colliding terms survives and fold the loser's
/// nested dictionary into the survivor.
fn resolve_collision(existing: TermRef, incoming: TermRef) -> TermRef {
    if Arc::ptr_eq(&existing, &incoming) {
        return existing;
    }
    let (winner, loser) = if keeps_existing(existing.role(), incoming.role()) {
        (existing, incoming)
    } else {
        (incoming, existing)
    };
    winner.merge_dictionary_from(&loser);
    tracing::trace!(winner = %winner.id(), loser = %loser.id(), "resolved term collision");
    winner
}

fn keeps_existing(existing: Role, incoming: Role) -> bool {
    existing.is_ranked()
        && incoming.is_ranked()
        && existing.collision_rank() > incoming.collision_rank()
}
