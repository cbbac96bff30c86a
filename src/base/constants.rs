//! Domain constants shared across the engine.

// ============================================================================
// URI SCHEMES
// ============================================================================

/// Four-character code (types, properties, constants, legacy parameters).
pub const SCHEME_AE4: &str = "ae4";
/// Eight-character code (commands: event class + event id).
pub const SCHEME_AE8: &str = "ae8";
/// Twelve-character code (parameters: event class + event id + key).
pub const SCHEME_AE12: &str = "ae12";
/// Slash-separated pathname.
pub const SCHEME_ID: &str = "id";
/// Resource descriptor.
pub const SCHEME_RES: &str = "res";
/// Opaque user identifier.
pub const SCHEME_ASID: &str = "asid";

/// All schemes in the order they are tried when parsing.
pub const SCHEMES: &[&str] = &[
    SCHEME_AE4,
    SCHEME_AE8,
    SCHEME_AE12,
    SCHEME_ID,
    SCHEME_RES,
    SCHEME_ASID,
];

/// Separator between pathname components.
pub const PATHNAME_SEPARATOR: char = '/';

// ============================================================================
// RESERVED PARAMETERS
// ============================================================================

/// Pathname component that marks the direct-object parameter.
pub const DIRECT_PARAMETER: &str = ".direct";
/// Pathname component that marks the target parameter.
pub const TARGET_PARAMETER: &str = ".target";
/// Key code of the direct-object parameter in code-based schemes.
pub const DIRECT_PARAMETER_CODE: &str = "----";

// ============================================================================
// TERM NAMES
// ============================================================================

/// Punctuation that does not break a term name into separate words.
pub const NON_BREAKING_PUNCTUATION: &[char] = &['_', '.', '-', '/', '\'', '\u{2019}', '?'];

/// Command names an imported scripting definition may not shadow.
pub const RESERVED_COMMAND_NAMES: &[&str] = &["get", "set"];
