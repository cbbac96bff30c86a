//! Term identity and lexical scoping.
//!
//! This module provides the compile-time vocabulary of a script:
//! - [`SemanticUri`], [`Role`], [`TermId`] - How a term is identified
//! - [`TermName`] - Word-normalized user-facing names
//! - [`Term`], [`TermDictionary`] - Terms and their nested dictionaries
//! - [`TypeTree`] - The single-inheritance type hierarchy
//! - [`Lexicon`] - Scoped name lookup during compilation
//! - [`TermPool`] - Every known term, by id and by name
//!
//! Depends only on [`crate::base`].

mod dictionary;
mod error;
mod lexicon;
mod name;
mod pool;
pub mod predefined;
mod role;
mod term;
mod type_tree;
mod uri;

pub use dictionary::TermDictionary;
pub use error::ParseUriError;
pub use lexicon::Lexicon;
pub use name::TermName;
pub use pool::TermPool;
pub use role::Role;
pub use term::{ResourceKind, ResourceRef, Term, TermId, TermRef};
pub use type_tree::{OrphanEdge, TypeTree};
pub use uri::{Pathname, SemanticUri};
