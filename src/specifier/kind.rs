//! Selection forms.

use std::fmt;

use super::Expr;
use super::predicate::TestPredicate;

/// How one link of a specifier chain selects from its container.
#[derive(Clone, Debug)]
pub enum SpecifierKind {
    /// A property of the container.
    Property,
    /// By index if the data is an integer, by name if it is a string.
    Simple(Expr),
    /// 1-based position among elements of the id type.
    Index(Expr),
    Name(Expr),
    /// Unique id, compared for equality.
    Id(Expr),
    All,
    First,
    Middle,
    Last,
    Random,
    /// The insertion point before the element the data resolves to.
    Before(Expr),
    /// The insertion point after the element the data resolves to.
    After(Expr),
    /// Elements `from` through `to`, inclusive.
    Range { from: Expr, to: Expr },
    /// Elements for which the predicate holds.
    Test(TestPredicate),
}

impl SpecifierKind {
    pub fn form(&self) -> IndexForm {
        match self {
            SpecifierKind::Property => IndexForm::Property,
            SpecifierKind::Simple(_) => IndexForm::Simple,
            SpecifierKind::Index(_) => IndexForm::Index,
            SpecifierKind::Name(_) => IndexForm::Name,
            SpecifierKind::Id(_) => IndexForm::Id,
            SpecifierKind::All => IndexForm::All,
            SpecifierKind::First
            | SpecifierKind::Middle
            | SpecifierKind::Last
            | SpecifierKind::Random => IndexForm::Absolute,
            SpecifierKind::Before(_) | SpecifierKind::After(_) => IndexForm::Relative,
            SpecifierKind::Range { .. } => IndexForm::Range,
            SpecifierKind::Test(_) => IndexForm::Test,
        }
    }
}

/// The selection form a specifier uses, for error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexForm {
    Property,
    Simple,
    Index,
    Name,
    Id,
    All,
    Absolute,
    Relative,
    Range,
    Test,
}

impl fmt::Display for IndexForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IndexForm::Property => "property",
            IndexForm::Simple => "simple",
            IndexForm::Index => "by-index",
            IndexForm::Name => "by-name",
            IndexForm::Id => "by-id",
            IndexForm::All => "all-elements",
            IndexForm::Absolute => "absolute-position",
            IndexForm::Relative => "relative-position",
            IndexForm::Range => "by-range",
            IndexForm::Test => "by-test",
        })
    }
}
