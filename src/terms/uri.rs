//! Semantic URIs.
//!
//! Every term is identified by a URI in one of six schemes:
//!
//! | scheme | payload                         | used for                      |
//! |--------|---------------------------------|-------------------------------|
//! | `ae4`  | four-character code             | types, properties, constants  |
//! | `ae8`  | event class + event id          | commands                      |
//! | `ae12` | event class + event id + key    | parameters                    |
//! | `id`   | `/`-separated pathname          | anything defined by a script  |
//! | `res`  | resource descriptor             | applications, libraries       |
//! | `asid` | opaque user identifier          | user-defined identifiers      |
//!
//! The normalized string form is `scheme:payload`, and parsing that form
//! gives back an equal URI.

use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;

use super::error::ParseUriError;
use crate::base::FourCharCode;
use crate::base::constants::{
    DIRECT_PARAMETER, PATHNAME_SEPARATOR, SCHEME_AE4, SCHEME_AE8, SCHEME_AE12, SCHEME_ASID,
    SCHEME_ID, SCHEME_RES, TARGET_PARAMETER,
};

// ============================================================================
// PATHNAME
// ============================================================================

/// A `/`-separated path of components.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pathname {
    components: Vec<SmolStr>,
}

impl Pathname {
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self {
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a string on `/`. The empty string is the empty path.
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        Self::new(text.split(PATHNAME_SEPARATOR))
    }

    pub fn components(&self) -> &[SmolStr] {
        &self.components
    }

    pub fn last(&self) -> Option<&str> {
        self.components.last().map(SmolStr::as_str)
    }

    /// A copy with `component` appended.
    pub fn appending(&self, component: impl Into<SmolStr>) -> Self {
        let mut components = self.components.clone();
        components.push(component.into());
        Self { components }
    }

    /// A copy without the last component, if there is more than one.
    pub fn parent(&self) -> Option<Self> {
        if self.components.len() < 2 {
            return None;
        }
        Some(Self {
            components: self.components[..self.components.len() - 1].to_vec(),
        })
    }
}

impl fmt::Display for Pathname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, component) in self.components.iter().enumerate() {
            if index > 0 {
                write!(f, "{PATHNAME_SEPARATOR}")?;
            }
            f.write_str(component)?;
        }
        Ok(())
    }
}

// ============================================================================
// SEMANTIC URI
// ============================================================================

/// A scheme-tagged identifier for a term.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SemanticUri {
    Code4(FourCharCode),
    Code8 {
        class: FourCharCode,
        id: FourCharCode,
    },
    Code12 {
        class: FourCharCode,
        id: FourCharCode,
        key: FourCharCode,
    },
    Pathname(Pathname),
    Resource(SmolStr),
    UserId(SmolStr),
}

impl SemanticUri {
    /// Build a URI from a scheme name and its payload.
    pub fn from_scheme(scheme: &str, name: &str) -> Result<Self, ParseUriError> {
        match scheme {
            SCHEME_AE4 => name
                .parse()
                .map(SemanticUri::Code4)
                .map_err(|e| ParseUriError::code(SCHEME_AE4, e)),
            SCHEME_AE8 => {
                let [class, id] = FourCharCode::parse_many::<2>(name)
                    .map_err(|e| ParseUriError::code(SCHEME_AE8, e))?;
                Ok(SemanticUri::Code8 { class, id })
            }
            SCHEME_AE12 => {
                let [class, id, key] = FourCharCode::parse_many::<3>(name)
                    .map_err(|e| ParseUriError::code(SCHEME_AE12, e))?;
                Ok(SemanticUri::Code12 { class, id, key })
            }
            SCHEME_ID => Ok(SemanticUri::Pathname(Pathname::parse(name))),
            SCHEME_RES => Ok(SemanticUri::Resource(name.into())),
            SCHEME_ASID => Ok(SemanticUri::UserId(name.into())),
            other => Err(ParseUriError::UnknownScheme(other.to_owned())),
        }
    }

    pub fn ae4(code: FourCharCode) -> Self {
        SemanticUri::Code4(code)
    }

    pub fn ae8(class: FourCharCode, id: FourCharCode) -> Self {
        SemanticUri::Code8 { class, id }
    }

    pub fn ae12(class: FourCharCode, id: FourCharCode, key: FourCharCode) -> Self {
        SemanticUri::Code12 { class, id, key }
    }

    /// An `id:` URI from a `/`-separated path.
    pub fn path(path: &str) -> Self {
        SemanticUri::Pathname(Pathname::parse(path))
    }

    pub fn direct_parameter() -> Self {
        SemanticUri::Pathname(Pathname::new([DIRECT_PARAMETER]))
    }

    pub fn target_parameter() -> Self {
        SemanticUri::Pathname(Pathname::new([TARGET_PARAMETER]))
    }

    pub fn scheme(&self) -> &'static str {
        match self {
            SemanticUri::Code4(_) => SCHEME_AE4,
            SemanticUri::Code8 { .. } => SCHEME_AE8,
            SemanticUri::Code12 { .. } => SCHEME_AE12,
            SemanticUri::Pathname(_) => SCHEME_ID,
            SemanticUri::Resource(_) => SCHEME_RES,
            SemanticUri::UserId(_) => SCHEME_ASID,
        }
    }

    /// The scheme-specific payload.
    pub fn name(&self) -> String {
        match self {
            SemanticUri::Code4(code) => code.to_string(),
            SemanticUri::Code8 { class, id } => format!("{class}{id}"),
            SemanticUri::Code12 { class, id, key } => format!("{class}{id}{key}"),
            SemanticUri::Pathname(pathname) => pathname.to_string(),
            SemanticUri::Resource(name) | SemanticUri::UserId(name) => name.to_string(),
        }
    }

    /// `scheme:payload`.
    pub fn normalized(&self) -> String {
        format!("{}:{}", self.scheme(), self.name())
    }

    /// The four-character code, if this URI carries one.
    ///
    /// For parameters this is the key; the canonical direct parameter
    /// reports `'----'`.
    pub fn code4(&self) -> Option<FourCharCode> {
        match self {
            SemanticUri::Code4(code) => Some(*code),
            SemanticUri::Code12 { key, .. } => Some(*key),
            SemanticUri::Pathname(_) if self.is_direct_parameter() => {
                Some(FourCharCode::DIRECT_OBJECT)
            }
            _ => None,
        }
    }

    /// The event class and event id, if this URI carries them.
    pub fn code8(&self) -> Option<(FourCharCode, FourCharCode)> {
        match self {
            SemanticUri::Code8 { class, id } | SemanticUri::Code12 { class, id, .. } => {
                Some((*class, *id))
            }
            _ => None,
        }
    }

    pub fn pathname(&self) -> Option<&Pathname> {
        match self {
            SemanticUri::Pathname(pathname) => Some(pathname),
            _ => None,
        }
    }

    /// The URI of the command a parameter URI belongs to.
    ///
    /// A twelve-character code drops its key. A pathname with at least two
    /// components drops its last one. Anything else has no command.
    pub fn command_uri(&self) -> Option<SemanticUri> {
        match self {
            SemanticUri::Code12 { class, id, .. } => Some(SemanticUri::ae8(*class, *id)),
            SemanticUri::Pathname(pathname) => pathname.parent().map(SemanticUri::Pathname),
            _ => None,
        }
    }

    pub fn is_direct_parameter(&self) -> bool {
        match self {
            SemanticUri::Code4(code) | SemanticUri::Code12 { key: code, .. } => {
                *code == FourCharCode::DIRECT_OBJECT
            }
            SemanticUri::Pathname(pathname) => pathname.last() == Some(DIRECT_PARAMETER),
            _ => false,
        }
    }

    pub fn is_target_parameter(&self) -> bool {
        match self {
            SemanticUri::Pathname(pathname) => pathname.last() == Some(TARGET_PARAMETER),
            _ => false,
        }
    }

    /// Map any spelling of the direct or target parameter onto its
    /// canonical URI. Other URIs are returned unchanged.
    pub fn normalize_parameter(self) -> Self {
        if self.is_direct_parameter() {
            SemanticUri::direct_parameter()
        } else if self.is_target_parameter() {
            SemanticUri::target_parameter()
        } else {
            self
        }
    }
}

impl FromStr for SemanticUri {
    type Err = ParseUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scheme, name) = s
            .split_once(':')
            .ok_or_else(|| ParseUriError::MissingScheme(s.to_owned()))?;
        SemanticUri::from_scheme(scheme, name)
    }
}

impl fmt::Display for SemanticUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scheme(), self.name())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SemanticUri {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.normalized())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SemanticUri {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
