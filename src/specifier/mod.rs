//! Object specifiers.
//!
//! A specifier is an unevaluated description of how to reach a value:
//! "the second word of paragraph 3 of document 1". It is a chain of links,
//! each naming a type or property (its id term) and how to select from
//! the container its parent resolves to (its [`SpecifierKind`]). The chain
//! ends in a root: the ambient target, an explicit value, or one of the
//! contextual roots used inside range and filter clauses.
//!
//! Resolution lives in [`crate::runtime`]; this module only describes.

mod insertion;
mod kind;
mod predicate;

use std::fmt;

use crate::runtime::Value;
use crate::terms::TermRef;

pub use insertion::{InsertionKind, InsertionSpecifier};
pub use kind::{IndexForm, SpecifierKind};
pub use predicate::{ComparisonOp, LogicalOp, TestPredicate};

// ============================================================================
// EXPRESSIONS
// ============================================================================

/// Where a specifier chain without an explicit root is anchored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RootKind {
    /// The ambient target: the innermost `tell` block's object.
    Application,
    /// The container a range clause is selecting from.
    Container,
    /// The element currently being tested by a filter clause.
    Specimen,
}

/// Data that feeds a specifier: a selector, a range bound, an operand.
#[derive(Clone, Debug)]
pub enum Expr {
    Value(Value),
    /// Read a script variable.
    Variable(TermRef),
    Specifier(Box<Specifier>),
    Insertion(Box<InsertionSpecifier>),
    Root(RootKind),
    List(Vec<Expr>),
}

impl Expr {
    pub fn integer(value: i64) -> Self {
        Expr::Value(Value::Integer(value))
    }

    pub fn string(value: &str) -> Self {
        Expr::Value(Value::string(value))
    }

    pub fn specimen() -> Self {
        Expr::Root(RootKind::Specimen)
    }

    pub fn container() -> Self {
        Expr::Root(RootKind::Container)
    }

    pub fn as_specifier(&self) -> Option<&Specifier> {
        match self {
            Expr::Specifier(specifier) => Some(specifier),
            _ => None,
        }
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Value(value)
    }
}

impl From<Specifier> for Expr {
    fn from(specifier: Specifier) -> Self {
        Expr::Specifier(Box::new(specifier))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Value(value) => write!(f, "{value}"),
            Expr::Variable(term) => write!(f, "{term}"),
            Expr::Specifier(specifier) => write!(f, "{specifier}"),
            Expr::Insertion(insertion) => write!(f, "{insertion}"),
            Expr::Root(RootKind::Application) => f.write_str("application"),
            Expr::Root(RootKind::Container | RootKind::Specimen) => f.write_str("it"),
            Expr::List(items) => {
                f.write_str("{")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("}")
            }
        }
    }
}

// ============================================================================
// SPECIFIER
// ============================================================================

/// One link of a specifier chain.
#[derive(Clone, Debug)]
pub struct Specifier {
    /// The type (for element forms) or property (for [`SpecifierKind::Property`]).
    id_term: TermRef,
    kind: SpecifierKind,
    /// `None` means the chain is anchored at the ambient target.
    parent: Option<Box<Expr>>,
}

impl Specifier {
    pub fn new(id_term: TermRef, kind: SpecifierKind) -> Self {
        Self {
            id_term,
            kind,
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<Expr>) -> Self {
        self.parent = Some(Box::new(parent.into()));
        self
    }

    pub fn id_term(&self) -> &TermRef {
        &self.id_term
    }

    pub fn kind(&self) -> &SpecifierKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<&Expr> {
        self.parent.as_deref()
    }

    /// The first non-specifier expression up the chain, or `None` if the
    /// chain is anchored at the ambient target.
    pub fn root(&self) -> Option<&Expr> {
        let mut current = self;
        loop {
            match current.parent.as_deref() {
                Some(Expr::Specifier(parent)) => current = parent,
                other => return other,
            }
        }
    }

    /// True if the chain resolves against whatever the current target is.
    pub fn is_ambient(&self) -> bool {
        matches!(self.root(), None | Some(Expr::Root(RootKind::Application)))
    }

    /// Replace the chain's root with `root`.
    pub fn set_root(&mut self, root: Expr) {
        if let Some(Expr::Specifier(parent)) = self.parent.as_deref_mut() {
            parent.set_root(root);
            return;
        }
        self.parent = Some(Box::new(root));
    }

    /// A copy of this chain re-rooted at `root`.
    pub fn rooted_at(&self, root: Expr) -> Specifier {
        let mut copy = self.clone();
        copy.set_root(root);
        copy
    }

    /// A copy of this chain anchored at `target` if it is ambient. Chains
    /// with an explicit root are copied unchanged; either way the original
    /// is never modified.
    pub fn qualified(&self, target: Expr) -> Specifier {
        if self.is_ambient() {
            self.rooted_at(target)
        } else {
            self.clone()
        }
    }

    /// A copy whose ambient root is the filter specimen. Used for the
    /// operands of a test clause.
    pub fn relative_to_specimen(&self) -> Specifier {
        self.qualified(Expr::specimen())
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = self.id_term.to_string();
        match &self.kind {
            SpecifierKind::Property => write!(f, "{noun}")?,
            SpecifierKind::Simple(data) => write!(f, "{noun} {data}")?,
            SpecifierKind::Index(data) => write!(f, "{noun} {data}")?,
            SpecifierKind::Name(data) => write!(f, "{noun} named {data}")?,
            SpecifierKind::Id(data) => write!(f, "{noun} id {data}")?,
            SpecifierKind::All => write!(f, "every {noun}")?,
            SpecifierKind::First => write!(f, "first {noun}")?,
            SpecifierKind::Middle => write!(f, "middle {noun}")?,
            SpecifierKind::Last => write!(f, "last {noun}")?,
            SpecifierKind::Random => write!(f, "some {noun}")?,
            SpecifierKind::Before(data) => write!(f, "{noun} before {data}")?,
            SpecifierKind::After(data) => write!(f, "{noun} after {data}")?,
            SpecifierKind::Range { from, to } => write!(f, "{noun} {from} thru {to}")?,
            SpecifierKind::Test(predicate) => write!(f, "{noun} where {predicate}")?,
        }
        match self.parent.as_deref() {
            None | Some(Expr::Root(_)) => Ok(()),
            Some(parent) => write!(f, " of {parent}"),
        }
    }
}
