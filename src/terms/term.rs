//! Terms and term identifiers.
//!
//! A [`Term`] is shared as an [`Arc`] ([`TermRef`]) because the same term
//! is reachable from many dictionaries at once: the scope that defined it,
//! the global pool, and any dictionary it was merged into. Its nested
//! dictionary is behind a lock so that a merge updates every holder.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use smol_str::SmolStr;

use super::dictionary::TermDictionary;
use super::error::ParseUriError;
use super::name::TermName;
use super::role::Role;
use super::uri::SemanticUri;

/// Shared handle to a term.
pub type TermRef = Arc<Term>;

// ============================================================================
// TERM ID
// ============================================================================

/// A role paired with a URI. Two terms with equal ids are the same term.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TermId {
    role: Role,
    uri: SemanticUri,
}

impl TermId {
    /// Parameter ids are normalized so that every spelling of the direct
    /// and target parameters is the same id.
    pub fn new(role: Role, uri: SemanticUri) -> Self {
        let uri = if role == Role::Parameter {
            uri.normalize_parameter()
        } else {
            uri
        };
        Self { role, uri }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn uri(&self) -> &SemanticUri {
        &self.uri
    }

    /// `role scheme:payload`.
    pub fn normalized(&self) -> String {
        format!("{} {}", self.role, self.uri.normalized())
    }
}

impl PartialOrd for TermId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TermId {
    /// Ids order by their normalized string.
    fn cmp(&self, other: &Self) -> Ordering {
        self.normalized().cmp(&other.normalized())
    }
}

impl FromStr for TermId {
    type Err = ParseUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (role, uri) = s
            .split_once(' ')
            .ok_or_else(|| ParseUriError::MissingRole(s.to_owned()))?;
        Ok(TermId::new(role.parse()?, uri.parse()?))
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.role, self.uri)
    }
}

// ============================================================================
// RESOURCES
// ============================================================================

/// How a resource term locates the thing it names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// The engine's own built-in library.
    Core,
    /// The host system.
    System,
    /// An application found by its display name.
    ApplicationByName,
    /// An application found by its bundle identifier.
    ApplicationById,
    /// A script library found by name.
    Library,
    /// A script at a file path.
    ScriptAtPath,
}

/// A loadable resource named by a resource term.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    pub kind: ResourceKind,
    pub descriptor: SmolStr,
}

impl ResourceRef {
    pub fn new(kind: ResourceKind, descriptor: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            descriptor: descriptor.into(),
        }
    }
}

// ============================================================================
// TERM
// ============================================================================

/// A named, role-tagged entity with an optional nested dictionary.
pub struct Term {
    id: TermId,
    name: Option<TermName>,
    exports: bool,
    dictionary: RwLock<TermDictionary>,
    resource: Option<ResourceRef>,
}

impl Term {
    /// A term with no name and an empty, exporting dictionary.
    pub fn new(role: Role, uri: SemanticUri) -> Self {
        Self {
            id: TermId::new(role, uri),
            name: None,
            exports: true,
            dictionary: RwLock::new(TermDictionary::new()),
            resource: None,
        }
    }

    /// Shorthand for a named term with an empty dictionary.
    pub fn named(role: Role, uri: SemanticUri, name: &str) -> TermRef {
        Arc::new(Term::new(role, uri).with_name(TermName::new(name)))
    }

    pub fn with_name(mut self, name: TermName) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_exports(mut self, exports: bool) -> Self {
        self.exports = exports;
        self
    }

    pub fn with_dictionary(self, dictionary: TermDictionary) -> Self {
        *self.dictionary.write() = dictionary;
        self
    }

    pub fn with_resource(mut self, resource: ResourceRef) -> Self {
        self.resource = Some(resource);
        self
    }

    pub fn into_ref(self) -> TermRef {
        Arc::new(self)
    }

    pub fn id(&self) -> &TermId {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.id.role
    }

    pub fn uri(&self) -> &SemanticUri {
        &self.id.uri
    }

    pub fn name(&self) -> Option<&TermName> {
        self.name.as_ref()
    }

    /// Whether the members of this term's dictionary are visible in a
    /// scope that holds this term.
    pub fn exports(&self) -> bool {
        self.exports
    }

    pub fn resource(&self) -> Option<&ResourceRef> {
        self.resource.as_ref()
    }

    pub fn dictionary(&self) -> RwLockReadGuard<'_, TermDictionary> {
        self.dictionary.read()
    }

    pub fn dictionary_mut(&self) -> RwLockWriteGuard<'_, TermDictionary> {
        self.dictionary.write()
    }

    /// Merge `other`'s dictionary into this term's dictionary.
    pub fn merge_dictionary_from(&self, other: &Term) {
        if std::ptr::eq(self, other) {
            return;
        }
        // Snapshot first so the two locks are never held together.
        let incoming = other.dictionary.read().clone();
        self.dictionary.write().merge(&incoming);
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Nested dictionaries are summarized; a full dump can recurse.
        f.debug_struct("Term")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("exports", &self.exports)
            .field("members", &self.dictionary.read().len())
            .field("resource", &self.resource)
            .finish()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "«{}»", self.id),
        }
    }
}
