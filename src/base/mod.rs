//! Foundation types for the Bushel toolchain.
//!
//! This module provides primitive types used throughout the engine:
//! - [`FourCharCode`] - Four-byte event and class codes
//! - [`Stack`] - A stack whose bottom element can never be popped
//! - [`Position`], [`Span`], [`SourceLocation`] - Source positions for diagnostics
//! - Domain constants (scheme names, reserved pathnames)
//!
//! This module has NO dependencies on other bushel modules.

pub mod constants;
mod four_cc;
mod position;
mod stack;

pub use four_cc::{FourCharCode, FourCharCodeError};
pub use position::{Position, SourceId, SourceLocation, Span};
pub use stack::Stack;

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
