//! Lexical scoping for term lookup.
//!
//! A [`Lexicon`] is a stack of dictionary-bearing terms. The bottom term is
//! the script's root scope and can never be popped. Lookup searches the
//! stack from the top down, and only if nothing matches does it search the
//! dictionaries exported by terms on the stack, again from the most
//! recently pushed down. Locally defined names therefore always shadow
//! imported ones.

use std::fmt;

use uuid::Uuid;

use super::name::TermName;
use super::role::Role;
use super::term::{Term, TermId, TermRef};
use super::uri::{Pathname, SemanticUri};
use crate::base::Stack;

#[derive(Clone)]
pub struct Lexicon {
    stack: Stack<TermRef>,
}

impl Default for Lexicon {
    fn default() -> Self {
        let root = Term::new(Role::Dictionary, SemanticUri::Pathname(Pathname::default()))
            .with_exports(false)
            .into_ref();
        Self::with_root(root)
    }
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: TermRef) -> Self {
        Self {
            stack: Stack::new(root),
        }
    }

    pub fn root(&self) -> &TermRef {
        self.stack.bottom()
    }

    pub fn top(&self) -> &TermRef {
        self.stack.top()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    // ========================================================================
    // LOOKUP
    // ========================================================================

    pub fn term(&self, id: &TermId) -> Option<TermRef> {
        self.find(|term| term.dictionary().term(id))
    }

    pub fn term_named(&self, name: &TermName) -> Option<TermRef> {
        self.find(|term| term.dictionary().term_named(name))
    }

    pub fn term_named_with_role(&self, name: &TermName, role: Role) -> Option<TermRef> {
        self.find(|term| term.dictionary().term_named_with_role(name, role))
    }

    /// Search the stack top-down, then the exported dictionaries of every
    /// stack term, most recently pushed first.
    fn find<F>(&self, lookup: F) -> Option<TermRef>
    where
        F: Fn(&TermRef) -> Option<TermRef>,
    {
        if let Some(found) = self.stack.iter_top_down().find_map(&lookup) {
            return Some(found);
        }
        self.exporting_terms().iter().rev().find_map(&lookup)
    }

    /// Exporting members of each stack term's dictionary, bottom to top.
    fn exporting_terms(&self) -> Vec<TermRef> {
        self.stack
            .iter()
            .flat_map(|term| {
                term.dictionary()
                    .exporting_terms()
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    // ========================================================================
    // SCOPES
    // ========================================================================

    /// Push a term so that its dictionary becomes the innermost scope.
    pub fn push(&mut self, term: TermRef) {
        tracing::trace!(term = %term.id(), depth = self.depth() + 1, "push scope");
        self.stack.push(term);
    }

    /// Pop the innermost scope. The root scope is never popped.
    pub fn pop(&mut self) -> Option<TermRef> {
        self.stack.pop()
    }

    /// Define `term` in the innermost scope and return the term stored
    /// under its id.
    pub fn add(&mut self, term: TermRef) -> TermRef {
        let top = self.top().clone();
        if std::sync::Arc::ptr_eq(&top, &term) {
            return term;
        }
        top.dictionary_mut().add(term)
    }

    /// Define `term` in the innermost scope, then push it.
    pub fn add_push(&mut self, term: TermRef) -> TermRef {
        let stored = self.add(term);
        self.push(stored.clone());
        stored
    }

    /// Push a fresh anonymous scope under a unique URI.
    pub fn push_unnamed_dictionary(&mut self, exports: bool) -> TermRef {
        let uri = self.make_unique_uri();
        let term = Term::new(Role::Dictionary, uri)
            .with_exports(exports)
            .into_ref();
        self.add_push(term)
    }

    /// Push the dictionary term at `uri`, creating it in the innermost
    /// scope if no visible term has that id.
    pub fn push_dictionary_term(&mut self, uri: SemanticUri, exports: bool) -> TermRef {
        let id = TermId::new(Role::Dictionary, uri.clone());
        match self.term(&id) {
            Some(existing) => {
                self.push(existing.clone());
                existing
            }
            None => {
                let term = Term::new(Role::Dictionary, uri)
                    .with_exports(exports)
                    .into_ref();
                self.add_push(term)
            }
        }
    }

    /// Return the visible term named `name` with `role`, or define a new
    /// one in the innermost scope.
    pub fn look_up_or_define(&mut self, role: Role, name: &TermName) -> TermRef {
        if let Some(existing) = self.term_named_with_role(name, role) {
            return existing;
        }
        let term = Term::new(role, self.make_uri(name))
            .with_name(name.clone())
            .into_ref();
        self.add(term)
    }

    // ========================================================================
    // URIS
    // ========================================================================

    /// The URI a term named `name` defined in the innermost scope gets: the
    /// scope's path followed by the name.
    pub fn make_uri(&self, name: &TermName) -> SemanticUri {
        let base = match self.top().uri() {
            SemanticUri::Pathname(pathname) => pathname.clone(),
            other => Pathname::new([other.normalized()]),
        };
        SemanticUri::Pathname(base.appending(name.normalized()))
    }

    /// A URI no other term will have.
    pub fn make_unique_uri(&self) -> SemanticUri {
        SemanticUri::UserId(Uuid::new_v4().to_string().into())
    }
}

impl fmt::Debug for Lexicon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.stack.iter().map(|term| term.id().to_string()))
            .finish()
    }
}
