//! Terminology import and caching.
//!
//! This module turns external terminology into terms:
//! - [`DictionarySource`] - Anything a dictionary can be read from
//! - [`ImportedDictionary`] - Terms plus the type edges they declare
//! - [`DictionaryCache`] - Process-wide, single-flight import cache
//! - [`MemoCache`] - The generic cache underneath it
//! - `sdef` - Scripting definition (SDEF) XML import
//!
//! Depends on [`crate::terms`].

mod cache;
mod dictionary_cache;
mod error;
#[cfg(feature = "sdef")]
pub mod sdef;
mod source;

pub use cache::MemoCache;
pub use dictionary_cache::DictionaryCache;
pub use error::LoadError;
pub use source::{DictionarySource, ImportedDictionary};
