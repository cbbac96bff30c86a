//! Runtime layer tests
//!
//! - Specifier resolution against host objects
//! - Filter clauses
//! - Command dispatch through the module stack
//! - Remote targets

pub mod tests_dispatch;
pub mod tests_remote;
pub mod tests_specifier_resolution;
