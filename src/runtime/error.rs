//! Runtime error types.

use std::fmt;

use thiserror::Error;

use crate::base::SourceLocation;
use crate::specifier::IndexForm;

pub type Result<T, E = RuntimeError> = std::result::Result<T, E>;

/// Broad classes of runtime failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A name, term or coercion could not be resolved.
    Resolution,
    /// A specifier addressed something that does not exist.
    Addressing,
    /// No module could carry out a command.
    Dispatch,
    /// External terminology could not be loaded.
    Load,
}

/// What kind of thing could not be sent to a remote target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnencodableKind {
    Command,
    Parameter,
    Value,
}

impl fmt::Display for UnencodableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnencodableKind::Command => "command",
            UnencodableKind::Parameter => "parameter",
            UnencodableKind::Value => "value",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErrorKind {
    // ========================================================================
    // RESOLUTION
    // ========================================================================
    #[error("No term named ‘{name}’ is defined")]
    TermNotFound { name: String },

    #[error("‘{name}’ could refer to {candidates} different terms")]
    Ambiguous { name: String, candidates: usize },

    #[error("Can’t make {value} into type {expected}")]
    Uncoercible { value: String, expected: String },

    // ========================================================================
    // ADDRESSING
    // ========================================================================
    #[error("Index {index} is out of bounds for {container}")]
    IndexOutOfBounds { index: i64, container: String },

    #[error("Range {from} thru {to} is out of bounds for {container}")]
    RangeOutOfBounds {
        from: i64,
        to: i64,
        container: String,
    },

    #[error("{data} is of incorrect type for a {form} specifier")]
    InvalidSpecifierDataType { form: IndexForm, data: String },

    #[error("The indexing form ‘{form}’ is unsupported by items of type {type_name}")]
    UnsupportedIndexForm { form: IndexForm, type_name: String },

    #[error("No element exists for {specifier}")]
    NoElementExists { specifier: String },

    #[error("Objects of type {type_name} do not have a property named {property}")]
    NoPropertyExists { type_name: String, property: String },

    #[error("{description} is an insertion point, not an object")]
    InsertionPointEvaluated { description: String },

    #[error("The ‘{operator}’ operator is not supported in filter clauses")]
    UnsupportedPredicate { operator: &'static str },

    // ========================================================================
    // DISPATCH
    // ========================================================================
    #[error("No module handled ‘{command}’ with the given arguments")]
    CommandNotHandled { command: String },

    #[error("Missing required parameter ‘{parameter}’ for ‘{command}’")]
    MissingParameter { command: String, parameter: String },

    #[error("Can’t send {kind} ‘{description}’ to a remote target")]
    Unencodable {
        kind: UnencodableKind,
        description: String,
    },

    #[error("Sending commands to {target} is not permitted")]
    RemoteCommandsDisallowed { target: String },

    #[error("{target} could not be reached")]
    RemoteTargetUnreachable { target: String },

    #[error("{target} failed to handle ‘{command}’: {message}")]
    RemoteCommandFailed {
        target: String,
        command: String,
        message: String,
    },

    #[error("Can’t decode the reply from {target}: {message}")]
    Undecodable { target: String, message: String },

    // ========================================================================
    // LOAD
    // ========================================================================
    #[error("Couldn’t load {resource}: {message}")]
    ResourceUnavailable { resource: String, message: String },
}

impl ErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorKind::TermNotFound { .. }
            | ErrorKind::Ambiguous { .. }
            | ErrorKind::Uncoercible { .. } => ErrorCategory::Resolution,
            ErrorKind::IndexOutOfBounds { .. }
            | ErrorKind::RangeOutOfBounds { .. }
            | ErrorKind::InvalidSpecifierDataType { .. }
            | ErrorKind::UnsupportedIndexForm { .. }
            | ErrorKind::NoElementExists { .. }
            | ErrorKind::NoPropertyExists { .. }
            | ErrorKind::InsertionPointEvaluated { .. }
            | ErrorKind::UnsupportedPredicate { .. } => ErrorCategory::Addressing,
            ErrorKind::CommandNotHandled { .. }
            | ErrorKind::MissingParameter { .. }
            | ErrorKind::Unencodable { .. }
            | ErrorKind::RemoteCommandsDisallowed { .. }
            | ErrorKind::RemoteTargetUnreachable { .. }
            | ErrorKind::RemoteCommandFailed { .. }
            | ErrorKind::Undecodable { .. } => ErrorCategory::Dispatch,
            ErrorKind::ResourceUnavailable { .. } => ErrorCategory::Load,
        }
    }

    /// True if a filter clause should drop the element instead of failing.
    /// An unsupported predicate is a defect in the clause itself and always
    /// fails.
    pub fn excludes_element(&self) -> bool {
        match self {
            ErrorKind::UnsupportedPredicate { .. } => false,
            other => matches!(
                other.category(),
                ErrorCategory::Resolution | ErrorCategory::Addressing
            ),
        }
    }

    /// True if a remote target declined the command because it or one of
    /// its parameters has no remote encoding. Dispatch moves on to the
    /// next handler.
    pub fn is_declined_by_remote(&self) -> bool {
        matches!(
            self,
            ErrorKind::Unencodable {
                kind: UnencodableKind::Command | UnencodableKind::Parameter,
                ..
            }
        )
    }
}

/// An error raised while running a script, with the location it was
/// raised at when one is known.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeError {
    kind: ErrorKind,
    location: Option<SourceLocation>,
}

impl RuntimeError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            location: None,
        }
    }

    pub fn at(mut self, location: Option<SourceLocation>) -> Self {
        self.location = location;
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    pub(crate) fn set_location(&mut self, location: SourceLocation) {
        self.location = Some(location);
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    // Convenience constructors for the common cases.

    pub fn command_not_handled(command: impl fmt::Display) -> Self {
        Self::new(ErrorKind::CommandNotHandled {
            command: command.to_string(),
        })
    }

    pub fn no_property(type_name: impl fmt::Display, property: impl fmt::Display) -> Self {
        Self::new(ErrorKind::NoPropertyExists {
            type_name: type_name.to_string(),
            property: property.to_string(),
        })
    }

    pub fn unsupported_form(form: IndexForm, type_name: impl fmt::Display) -> Self {
        Self::new(ErrorKind::UnsupportedIndexForm {
            form,
            type_name: type_name.to_string(),
        })
    }

    pub fn invalid_data(form: IndexForm, data: impl fmt::Display) -> Self {
        Self::new(ErrorKind::InvalidSpecifierDataType {
            form,
            data: data.to_string(),
        })
    }

    pub fn uncoercible(value: impl fmt::Display, expected: impl fmt::Display) -> Self {
        Self::new(ErrorKind::Uncoercible {
            value: value.to_string(),
            expected: expected.to_string(),
        })
    }
}

impl From<ErrorKind> for RuntimeError {
    fn from(kind: ErrorKind) -> Self {
        RuntimeError::new(kind)
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{} ({location})", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}
