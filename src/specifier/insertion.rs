//! Insertion specifiers.

use std::fmt;

use super::Expr;

/// Where an insertion point sits relative to its reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InsertionKind {
    /// Before the first element of the container.
    Beginning,
    /// After the last element of the container.
    End,
    /// Immediately before the reference element.
    Before,
    /// Immediately after the reference element.
    After,
}

impl fmt::Display for InsertionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InsertionKind::Beginning => "beginning",
            InsertionKind::End => "end",
            InsertionKind::Before => "before",
            InsertionKind::After => "after",
        })
    }
}

/// A position between elements rather than an element.
#[derive(Clone, Debug)]
pub struct InsertionSpecifier {
    kind: InsertionKind,
    parent: Option<Box<Expr>>,
}

impl InsertionSpecifier {
    pub fn new(kind: InsertionKind) -> Self {
        Self { kind, parent: None }
    }

    pub fn with_parent(mut self, parent: impl Into<Expr>) -> Self {
        self.parent = Some(Box::new(parent.into()));
        self
    }

    pub fn kind(&self) -> InsertionKind {
        self.kind
    }

    pub fn parent(&self) -> Option<&Expr> {
        self.parent.as_deref()
    }
}

impl fmt::Display for InsertionSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.parent.as_deref()) {
            (InsertionKind::Before | InsertionKind::After, Some(parent)) => {
                write!(f, "{} {parent}", self.kind)
            }
            (kind, Some(parent)) => write!(f, "{kind} of {parent}"),
            (kind, None) => write!(f, "{kind}"),
        }
    }
}
