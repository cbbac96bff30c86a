//! Errors raised while parsing term identifiers.

use thiserror::Error;

use crate::base::FourCharCodeError;

/// A term identifier or URI string could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseUriError {
    #[error("missing ':' between scheme and name in '{0}'")]
    MissingScheme(String),

    #[error("unknown URI scheme '{0}'")]
    UnknownScheme(String),

    #[error("unknown term role '{0}'")]
    UnknownRole(String),

    #[error("missing ' ' between role and URI in '{0}'")]
    MissingRole(String),

    #[error("invalid {scheme} code: {source}")]
    InvalidCode {
        scheme: &'static str,
        #[source]
        source: FourCharCodeError,
    },
}

impl ParseUriError {
    pub(crate) fn code(scheme: &'static str, source: FourCharCodeError) -> Self {
        Self::InvalidCode { scheme, source }
    }
}
