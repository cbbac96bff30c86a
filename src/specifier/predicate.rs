//! Filter predicates for `whose`/`where` clauses.

use std::fmt;

use super::Expr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    IsIn,
    IsNotIn,
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ComparisonOp::Equal => "=",
            ComparisonOp::NotEqual => "≠",
            ComparisonOp::Less => "<",
            ComparisonOp::LessOrEqual => "≤",
            ComparisonOp::Greater => ">",
            ComparisonOp::GreaterOrEqual => "≥",
            ComparisonOp::Contains => "contains",
            ComparisonOp::NotContains => "does not contain",
            ComparisonOp::StartsWith => "starts with",
            ComparisonOp::EndsWith => "ends with",
            ComparisonOp::IsIn => "is in",
            ComparisonOp::IsNotIn => "is not in",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
}

/// A boolean condition evaluated once per candidate element.
///
/// Specifier operands without an explicit root are re-rooted at the
/// specimen by the constructors, so `name starts with "A"` reads the name
/// of each candidate.
#[derive(Clone, Debug)]
pub enum TestPredicate {
    Comparison {
        op: ComparisonOp,
        lhs: Expr,
        rhs: Expr,
    },
    Logical {
        op: LogicalOp,
        lhs: Box<TestPredicate>,
        rhs: Box<TestPredicate>,
    },
    /// Negation. Filtering with a negated clause is not supported and
    /// fails rather than matching everything or nothing.
    Not(Box<TestPredicate>),
}

impl TestPredicate {
    pub fn comparison(op: ComparisonOp, lhs: Expr, rhs: Expr) -> Self {
        TestPredicate::Comparison {
            op,
            lhs: specimen_relative(lhs),
            rhs: specimen_relative(rhs),
        }
    }

    pub fn and(lhs: TestPredicate, rhs: TestPredicate) -> Self {
        TestPredicate::Logical {
            op: LogicalOp::And,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn or(lhs: TestPredicate, rhs: TestPredicate) -> Self {
        TestPredicate::Logical {
            op: LogicalOp::Or,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn negate(inner: TestPredicate) -> Self {
        TestPredicate::Not(Box::new(inner))
    }

    /// The first unsupported operator in this predicate, if any.
    pub fn unsupported_operator(&self) -> Option<&'static str> {
        match self {
            TestPredicate::Comparison { .. } => None,
            TestPredicate::Logical { lhs, rhs, .. } => lhs
                .unsupported_operator()
                .or_else(|| rhs.unsupported_operator()),
            TestPredicate::Not(_) => Some("not"),
        }
    }
}

fn specimen_relative(expr: Expr) -> Expr {
    match expr {
        Expr::Specifier(specifier) => Expr::Specifier(Box::new(specifier.relative_to_specimen())),
        other => other,
    }
}

impl fmt::Display for TestPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestPredicate::Comparison { op, lhs, rhs } => write!(f, "{lhs} {op} {rhs}"),
            TestPredicate::Logical { op, lhs, rhs } => {
                let word = match op {
                    LogicalOp::And => "and",
                    LogicalOp::Or => "or",
                };
                write!(f, "({lhs}) {word} ({rhs})")
            }
            TestPredicate::Not(inner) => write!(f, "not ({inner})"),
        }
    }
}
