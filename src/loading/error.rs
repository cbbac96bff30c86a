//! Error types for dictionary loading.

use thiserror::Error;

use crate::terms::ParseUriError;

/// Errors that can occur while importing a terminology dictionary.
#[derive(Debug, Error)]
pub enum LoadError {
    /// XML parsing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// IO error while reading a dictionary file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing required element or attribute.
    #[error("Missing required {kind}: {name}")]
    Missing { kind: &'static str, name: String },

    /// A code or URI that does not fit its scheme.
    #[error("Invalid term identifier: {0}")]
    Uri(#[from] ParseUriError),

    /// No dictionary is available for the requested resource.
    #[error("No dictionary available for {0}")]
    Unavailable(String),
}

impl LoadError {
    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    /// Create a missing-attribute error.
    pub fn missing_attribute(element: &str, attribute: &str) -> Self {
        Self::Missing {
            kind: "attribute",
            name: format!("{element}/@{attribute}"),
        }
    }
}
