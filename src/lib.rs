//! # bushel-base
//!
//! Core library for the Bushel scripting language: terminology, object
//! specifiers and the runtime dispatch core.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! runtime   → Dispatch core: module, frame and target stacks; reflection
//!   ↕
//! specifier → Object specifiers and filter predicates
//!   ↓
//! loading   → Dictionary import (SDEF) and the process-wide cache
//!   ↓
//! terms     → Terms, URIs, dictionaries, type tree, lexicon
//!   ↓
//! base      → Primitives (FourCharCode, Stack, SourceLocation)
//! ```

// ============================================================================
// MODULES (dependency order: base → terms → loading → specifier → runtime)
// ============================================================================

/// Foundation types: FourCharCode, Stack, source positions
pub mod base;

/// Terms: identity, naming, dictionaries and lexical scope
pub mod terms;

/// Terminology loading: SDEF import, dictionary cache
pub mod loading;

/// Object specifiers: unevaluated references into object graphs
pub mod specifier;

/// Runtime: command dispatch, specifier resolution, reflection
pub mod runtime;

// Re-export foundation types
pub use base::{FourCharCode, SourceId, SourceLocation, Stack};

// Re-export the types most embedders touch
pub use runtime::{Context, RuntimeConfig, RuntimeError, Value};
pub use specifier::{Expr, Specifier, SpecifierKind};
pub use terms::{Lexicon, Role, SemanticUri, Term, TermDictionary, TermName, TypeTree};
