//! Reflection tables.
//!
//! Runtime lookups go through one table per role, keyed by URI. Tables
//! are filled once by walking a root dictionary ([`Reflection::inject`]).
//! Asking for a URI that was never injected materializes a name-less
//! entry, so a specifier can always name a type or property even when no
//! dictionary described it.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};
use rustc_hash::{FxHashMap, FxHashSet};

use super::error::{ErrorKind, Result, RuntimeError};
use crate::terms::predefined::{self, Commands, Parameters, Properties, Types};
use crate::terms::{Role, SemanticUri, Term, TermName, TermRef, TypeTree};

// ============================================================================
// REFLECTED ENTRIES
// ============================================================================

/// An entry type stored in a [`ReflectionTable`].
pub trait Reflected: Send + Sync + Sized {
    const ROLE: Role;

    fn from_parts(uri: SemanticUri, name: Option<TermName>) -> Self;

    fn from_term(term: &Term) -> Self {
        Self::from_parts(term.uri().clone(), term.name().cloned())
    }

    fn uri(&self) -> &SemanticUri;

    fn name(&self) -> Option<&TermName>;
}

macro_rules! reflected {
    ($(#[$meta:meta])* $ty:ident, $role:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $ty {
            uri: SemanticUri,
            name: Option<TermName>,
        }

        impl Reflected for $ty {
            const ROLE: Role = $role;

            fn from_parts(uri: SemanticUri, name: Option<TermName>) -> Self {
                Self { uri, name }
            }

            fn uri(&self) -> &SemanticUri {
                &self.uri
            }

            fn name(&self) -> Option<&TermName> {
                self.name.as_ref()
            }
        }

        impl $ty {
            pub fn uri(&self) -> &SemanticUri {
                &self.uri
            }

            pub fn name(&self) -> Option<&TermName> {
                self.name.as_ref()
            }
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.uri == other.uri
            }
        }

        impl Eq for $ty {}

        impl Hash for $ty {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.uri.hash(state);
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                display_reflected(f, <$ty as Reflected>::ROLE, &self.uri, self.name.as_ref())
            }
        }
    };
}

fn display_reflected(
    f: &mut fmt::Formatter<'_>,
    role: Role,
    uri: &SemanticUri,
    name: Option<&TermName>,
) -> fmt::Result {
    match name {
        Some(name) => write!(f, "{name}"),
        None => write!(f, "«{role} {uri}»"),
    }
}

reflected!(
    /// A type, as seen at run time.
    TypeInfo,
    Role::Type
);
reflected!(PropertyInfo, Role::Property);
reflected!(
    /// A symbolic constant. Types and properties can be used as constants.
    ConstantInfo,
    Role::Constant
);

impl From<&TypeInfo> for ConstantInfo {
    fn from(info: &TypeInfo) -> Self {
        ConstantInfo::from_parts(info.uri.clone(), info.name.clone())
    }
}

impl From<&PropertyInfo> for ConstantInfo {
    fn from(info: &PropertyInfo) -> Self {
        ConstantInfo::from_parts(info.uri.clone(), info.name.clone())
    }
}

/// A command parameter. The URI is always normalized, so every spelling
/// of the direct or target parameter is the same parameter.
#[derive(Clone, Debug)]
pub struct ParameterInfo {
    uri: SemanticUri,
    name: Option<TermName>,
}

impl Reflected for ParameterInfo {
    const ROLE: Role = Role::Parameter;

    fn from_parts(uri: SemanticUri, name: Option<TermName>) -> Self {
        Self {
            uri: uri.normalize_parameter(),
            name,
        }
    }

    fn uri(&self) -> &SemanticUri {
        &self.uri
    }

    fn name(&self) -> Option<&TermName> {
        self.name.as_ref()
    }
}

impl ParameterInfo {
    pub fn uri(&self) -> &SemanticUri {
        &self.uri
    }

    pub fn name(&self) -> Option<&TermName> {
        self.name.as_ref()
    }

    pub fn is_direct(&self) -> bool {
        self.uri.is_direct_parameter()
    }

    pub fn is_target(&self) -> bool {
        self.uri.is_target_parameter()
    }
}

impl PartialEq for ParameterInfo {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri
    }
}

impl Eq for ParameterInfo {}

impl fmt::Display for ParameterInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_reflected(f, Role::Parameter, &self.uri, self.name.as_ref())
    }
}

/// A command together with the parameters its dictionary declares.
#[derive(Debug)]
pub struct CommandInfo {
    uri: SemanticUri,
    name: Option<TermName>,
    parameters: ReflectionTable<ParameterInfo>,
}

impl Reflected for CommandInfo {
    const ROLE: Role = Role::Command;

    fn from_parts(uri: SemanticUri, name: Option<TermName>) -> Self {
        Self {
            uri,
            name,
            parameters: ReflectionTable::default(),
        }
    }

    fn from_term(term: &Term) -> Self {
        let info = Self::from_parts(term.uri().clone(), term.name().cloned());
        for member in term.dictionary().contents() {
            if member.role() == Role::Parameter {
                info.parameters.add(member);
            }
        }
        info
    }

    fn uri(&self) -> &SemanticUri {
        &self.uri
    }

    fn name(&self) -> Option<&TermName> {
        self.name.as_ref()
    }
}

impl CommandInfo {
    pub fn uri(&self) -> &SemanticUri {
        &self.uri
    }

    pub fn name(&self) -> Option<&TermName> {
        self.name.as_ref()
    }

    pub fn parameters(&self) -> &ReflectionTable<ParameterInfo> {
        &self.parameters
    }
}

impl PartialEq for CommandInfo {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri
    }
}

impl fmt::Display for CommandInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_reflected(f, Role::Command, &self.uri, self.name.as_ref())
    }
}

// ============================================================================
// TABLE
// ============================================================================

/// URI-keyed reflections of one role.
pub struct ReflectionTable<R> {
    entries: RwLock<FxHashMap<SemanticUri, Arc<R>>>,
}

impl<R> Default for ReflectionTable<R> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(FxHashMap::default()),
        }
    }
}

impl<R> fmt::Debug for ReflectionTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReflectionTable")
            .field("len", &self.entries.read().len())
            .finish()
    }
}

impl<R: Reflected> ReflectionTable<R> {
    /// Reflect `term`. An existing named entry is kept; a materialized
    /// name-less entry is replaced.
    pub fn add(&self, term: &Term) -> Arc<R> {
        let reflected = R::from_term(term);
        let mut entries = self.entries.write();
        match entries.get(reflected.uri()) {
            Some(existing) if existing.name().is_some() || reflected.name().is_none() => {
                existing.clone()
            }
            _ => {
                let reflected = Arc::new(reflected);
                entries.insert(reflected.uri().clone(), reflected.clone());
                reflected
            }
        }
    }

    /// The entry for `uri`, materializing a name-less one if needed.
    pub fn get(&self, uri: &SemanticUri) -> Arc<R> {
        let key = if R::ROLE == Role::Parameter {
            uri.clone().normalize_parameter()
        } else {
            uri.clone()
        };
        if let Some(found) = self.entries.read().get(&key) {
            return found.clone();
        }
        self.entries
            .write()
            .entry(key.clone())
            .or_insert_with(|| Arc::new(R::from_parts(key, None)))
            .clone()
    }

    /// The entry for `uri` without materializing.
    pub fn lookup(&self, uri: &SemanticUri) -> Option<Arc<R>> {
        self.entries.read().get(uri).cloned()
    }

    /// Every entry whose name is `name`.
    pub fn named(&self, name: &TermName) -> Vec<Arc<R>> {
        self.entries
            .read()
            .values()
            .filter(|entry| entry.name() == Some(name))
            .cloned()
            .collect()
    }

    pub fn contains(&self, uri: &SemanticUri) -> bool {
        self.entries.read().contains_key(uri)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

// ============================================================================
// REFLECTION
// ============================================================================

/// The run-time view of every term a script can name.
#[derive(Debug)]
pub struct Reflection {
    type_tree: RwLock<TypeTree>,
    pub types: ReflectionTable<TypeInfo>,
    pub properties: ReflectionTable<PropertyInfo>,
    pub constants: ReflectionTable<ConstantInfo>,
    pub commands: ReflectionTable<CommandInfo>,
    pub parameters: ReflectionTable<ParameterInfo>,
}

impl Default for Reflection {
    fn default() -> Self {
        Self::new(predefined::builtin_type_tree())
    }
}

impl Reflection {
    /// Tables holding the built-in terms, over `type_tree` plus the
    /// built-in type edges.
    pub fn new(mut type_tree: TypeTree) -> Self {
        type_tree.merge(&predefined::builtin_type_tree());
        let reflection = Self {
            type_tree: RwLock::new(type_tree),
            types: ReflectionTable::default(),
            properties: ReflectionTable::default(),
            constants: ReflectionTable::default(),
            commands: ReflectionTable::default(),
            parameters: ReflectionTable::default(),
        };
        for ty in Types::ALL {
            reflection.types.add(&Term::new(Role::Type, ty.uri()).with_name(TermName::new(ty.name())));
        }
        for property in Properties::ALL {
            reflection.properties.add(
                &Term::new(Role::Property, property.uri()).with_name(TermName::new(property.name())),
            );
        }
        for command in Commands::ALL {
            reflection.commands.add(
                &Term::new(Role::Command, command.uri()).with_name(TermName::new(command.name())),
            );
        }
        reflection
    }

    /// Tables for every term reachable from `root`.
    pub fn from_root(root: &Term, type_tree: TypeTree) -> Self {
        let reflection = Self::new(type_tree);
        reflection.inject(root);
        reflection
    }

    /// Reflect every term reachable from `root`'s dictionary.
    pub fn inject(&self, root: &Term) {
        let mut visited: FxHashSet<*const Term> = FxHashSet::default();
        let mut pending: Vec<TermRef> = root.dictionary().contents().cloned().collect();
        let mut injected = 0usize;
        while let Some(term) = pending.pop() {
            if !visited.insert(Arc::as_ptr(&term)) {
                continue;
            }
            match term.role() {
                Role::Type => {
                    self.types.add(&term);
                }
                Role::Property => {
                    self.properties.add(&term);
                }
                Role::Constant => {
                    self.constants.add(&term);
                }
                Role::Command => {
                    self.commands.add(&term);
                }
                Role::Parameter => {
                    self.parameters.add(&term);
                }
                Role::Dictionary | Role::Variable | Role::Resource => {}
            }
            injected += 1;
            pending.extend(term.dictionary().contents().cloned());
        }
        tracing::debug!(terms = injected, "reflection tables built");
    }

    pub fn type_tree(&self) -> RwLockReadGuard<'_, TypeTree> {
        self.type_tree.read()
    }

    pub fn add_type_edge(&self, ty: SemanticUri, supertype: SemanticUri) {
        self.type_tree.write().add(ty, supertype);
    }

    pub fn supertype(&self, ty: &TypeInfo) -> Option<Arc<TypeInfo>> {
        let supertype = self.type_tree.read().supertype(ty.uri()).cloned()?;
        Some(self.types.get(&supertype))
    }

    /// Reflexive, transitive subtype test. Every type is an `item`.
    pub fn is_a(&self, ty: &SemanticUri, other: &SemanticUri) -> bool {
        ty == other || *other == Types::Item.uri() || self.type_tree.read().is_a(ty, other)
    }

    pub fn builtin_type(&self, ty: Types) -> Arc<TypeInfo> {
        self.types.get(&ty.uri())
    }

    pub fn builtin_property(&self, property: Properties) -> Arc<PropertyInfo> {
        self.properties.get(&property.uri())
    }

    pub fn builtin_command(&self, command: Commands) -> Arc<CommandInfo> {
        self.commands.get(&command.uri())
    }

    pub fn builtin_parameter(&self, parameter: Parameters) -> Arc<ParameterInfo> {
        self.parameters.get(&parameter.uri())
    }

    /// The one type named `name`.
    pub fn type_named(&self, name: &TermName) -> Result<Arc<TypeInfo>> {
        let mut found = self.types.named(name);
        match found.len() {
            0 => Err(RuntimeError::new(ErrorKind::TermNotFound {
                name: name.to_string(),
            })),
            1 => Ok(found.remove(0)),
            candidates => Err(RuntimeError::new(ErrorKind::Ambiguous {
                name: name.to_string(),
                candidates,
            })),
        }
    }
}
