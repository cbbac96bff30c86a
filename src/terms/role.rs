//! Term roles.

use std::fmt;
use std::str::FromStr;

use super::error::ParseUriError;

/// The syntactic and semantic category of a term.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Role {
    /// A named scope with no value of its own.
    Dictionary,
    /// A class of values or objects.
    Type,
    /// An enumerated or symbolic value.
    Constant,
    /// A named attribute of an object or record.
    Property,
    /// A verb that can be dispatched.
    Command,
    /// A labelled argument of a command.
    Parameter,
    /// A script variable.
    Variable,
    /// A loadable resource (application, library, script).
    Resource,
}

impl Role {
    pub const ALL: [Role; 8] = [
        Role::Dictionary,
        Role::Type,
        Role::Constant,
        Role::Property,
        Role::Command,
        Role::Parameter,
        Role::Variable,
        Role::Resource,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Dictionary => "dictionary",
            Role::Type => "type",
            Role::Constant => "constant",
            Role::Property => "property",
            Role::Command => "command",
            Role::Parameter => "parameter",
            Role::Variable => "variable",
            Role::Resource => "resource",
        }
    }

    /// Rank used when two terms with the same name collide in one
    /// dictionary. A higher rank survives a collision with a lower one.
    pub(crate) fn collision_rank(self) -> u8 {
        match self {
            Role::Type => 2,
            Role::Property => 1,
            _ => 0,
        }
    }

    /// True for the roles that take part in the collision ladder.
    pub(crate) fn is_ranked(self) -> bool {
        matches!(self, Role::Type | Role::Property | Role::Constant)
    }
}

impl FromStr for Role {
    type Err = ParseUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ParseUriError::UnknownRole(s.to_owned()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
