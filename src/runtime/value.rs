//! Runtime values.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::object::Object;
use super::reflection::{ConstantInfo, TypeInfo};
use crate::specifier::{InsertionKind, Specifier};
use crate::terms::SemanticUri;
use crate::terms::predefined::Types;

/// A position between elements, produced by `before`/`after`/`beginning`/`end`.
#[derive(Clone, Debug)]
pub struct InsertionPoint {
    pub kind: InsertionKind,
    /// The element or container the position is relative to.
    pub reference: Value,
}

impl fmt::Display for InsertionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            InsertionKind::Before | InsertionKind::After => {
                write!(f, "{} {}", self.kind, self.reference)
            }
            kind => write!(f, "{kind} of {}", self.reference),
        }
    }
}

#[derive(Clone, Debug)]
pub enum Value {
    /// An unbound variable or an omitted argument.
    Unspecified,
    Missing,
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Character(char),
    String(Arc<str>),
    List(Vec<Value>),
    Record(IndexMap<SemanticUri, Value>),
    Type(Arc<TypeInfo>),
    Constant(Arc<ConstantInfo>),
    Object(Arc<dyn Object>),
    /// An unevaluated specifier.
    Specifier(Arc<Specifier>),
    InsertionPoint(Arc<InsertionPoint>),
}

impl Value {
    pub fn string(text: &str) -> Self {
        Value::String(text.into())
    }

    pub fn specifier(specifier: Specifier) -> Self {
        Value::Specifier(Arc::new(specifier))
    }

    pub fn object(object: impl Object + 'static) -> Self {
        Value::Object(Arc::new(object))
    }

    /// The built-in type of a non-object value.
    pub fn builtin_type(&self) -> Option<Types> {
        Some(match self {
            Value::Unspecified => Types::Unspecified,
            Value::Missing => Types::Missing,
            Value::Null => Types::Null,
            Value::Boolean(_) => Types::Boolean,
            Value::Integer(_) => Types::Integer,
            Value::Real(_) => Types::Real,
            Value::Character(_) => Types::Character,
            Value::String(_) => Types::String,
            Value::List(_) => Types::List,
            Value::Record(_) => Types::Record,
            Value::Type(_) => Types::Type,
            Value::Constant(_) => Types::Constant,
            Value::Specifier(_) => Types::Specifier,
            Value::InsertionPoint(_) => Types::InsertionPoint,
            Value::Object(_) => return None,
        })
    }

    pub fn type_uri(&self) -> SemanticUri {
        match self {
            Value::Object(object) => object.type_uri(),
            other => other.builtin_type().unwrap_or(Types::Item).uri(),
        }
    }

    pub fn type_name(&self) -> String {
        match self {
            Value::Object(object) => object.type_name(),
            other => other.builtin_type().unwrap_or(Types::Item).name().to_owned(),
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(value) => Some(*value),
            Value::Real(value) if value.fract() == 0.0 => Some(*value as i64),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Integer(value) => Some(*value as f64),
            Value::Real(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(text) => Some(text),
            _ => None,
        }
    }

    /// Display name, for elements addressed by name.
    pub fn name(&self) -> Option<String> {
        match self {
            Value::Object(object) => object.name(),
            Value::Type(info) => info.name().map(ToString::to_string),
            Value::Constant(info) => info.name().map(ToString::to_string),
            _ => None,
        }
    }

    pub fn unique_id(&self) -> Option<Value> {
        match self {
            Value::Object(object) => object.unique_id(),
            _ => None,
        }
    }

    /// Number of elements, for values that are sequences.
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::List(items) => Some(items.len()),
            Value::String(text) => Some(text.chars().count()),
            Value::Record(fields) => Some(fields.len()),
            _ => None,
        }
    }

    // ========================================================================
    // COMPARISON
    // ========================================================================

    /// Equality as scripts see it: numbers compare by value across integer
    /// and real, a character equals the one-character string, and objects
    /// are equal if they are the same object or share a unique id.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Unspecified, Value::Unspecified)
            | (Value::Missing, Value::Missing)
            | (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Character(a), Value::Character(b)) => a == b,
            (Value::Character(c), Value::String(s)) | (Value::String(s), Value::Character(c)) => {
                let mut chars = s.chars();
                chars.next() == Some(*c) && chars.next().is_none()
            }
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.equals(y))
            }
            (Value::Record(a), Value::Record(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, x)| b.get(key).is_some_and(|y| x.equals(y)))
            }
            (Value::Type(a), Value::Type(b)) => a.uri() == b.uri(),
            (Value::Constant(a), Value::Constant(b)) => a.uri() == b.uri(),
            (Value::Object(a), Value::Object(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
                    || (a.type_uri() == b.type_uri()
                        && matches!((a.unique_id(), b.unique_id()), (Some(x), Some(y)) if x.equals(&y)))
            }
            (Value::Specifier(a), Value::Specifier(b)) => Arc::ptr_eq(a, b),
            _ => match (self.as_real(), other.as_real()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }

    /// Ordering for `<`, `≤`, `>` and `≥`. `None` if the values are not
    /// comparable.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Character(a), Value::Character(b)) => Some(a.cmp(b)),
            _ => self.as_real()?.partial_cmp(&other.as_real()?),
        }
    }

    /// `contains` for strings and lists. `None` if not applicable.
    pub fn contains(&self, other: &Value) -> Option<bool> {
        match (self, other) {
            (Value::String(text), Value::String(part)) => Some(text.contains(&**part)),
            (Value::String(text), Value::Character(c)) => Some(text.contains(*c)),
            (Value::List(items), Value::List(part)) => Some(contains_run(items, part)),
            (Value::List(items), item) => Some(items.iter().any(|x| x.equals(item))),
            _ => None,
        }
    }

    pub fn starts_with(&self, other: &Value) -> Option<bool> {
        match (self, other) {
            (Value::String(text), Value::String(part)) => Some(text.starts_with(&**part)),
            (Value::String(text), Value::Character(c)) => Some(text.starts_with(*c)),
            (Value::List(items), Value::List(part)) => Some(
                part.len() <= items.len() && items.iter().zip(part).all(|(x, y)| x.equals(y)),
            ),
            (Value::List(items), item) => Some(items.first().is_some_and(|x| x.equals(item))),
            _ => None,
        }
    }

    pub fn ends_with(&self, other: &Value) -> Option<bool> {
        match (self, other) {
            (Value::String(text), Value::String(part)) => Some(text.ends_with(&**part)),
            (Value::String(text), Value::Character(c)) => Some(text.ends_with(*c)),
            (Value::List(items), Value::List(part)) => Some(
                part.len() <= items.len()
                    && items.iter().rev().zip(part.iter().rev()).all(|(x, y)| x.equals(y)),
            ),
            (Value::List(items), item) => Some(items.last().is_some_and(|x| x.equals(item))),
            _ => None,
        }
    }
}

fn contains_run(items: &[Value], part: &[Value]) -> bool {
    if part.is_empty() {
        return true;
    }
    items
        .windows(part.len())
        .any(|window| window.iter().zip(part).all(|(x, y)| x.equals(y)))
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::string(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unspecified => f.write_str("unspecified"),
            Value::Missing => f.write_str("missing value"),
            Value::Null => f.write_str("null"),
            Value::Boolean(value) => write!(f, "{value}"),
            Value::Integer(value) => write!(f, "{value}"),
            Value::Real(value) => write!(f, "{value}"),
            Value::Character(value) => write!(f, "\"{value}\""),
            Value::String(value) => write!(f, "\"{value}\""),
            Value::List(items) => {
                f.write_str("{")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("}")
            }
            Value::Record(fields) => {
                f.write_str("{")?;
                for (index, (key, value)) in fields.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}:{value}")?;
                }
                f.write_str("}")
            }
            Value::Type(info) => write!(f, "{info}"),
            Value::Constant(info) => write!(f, "{info}"),
            Value::Object(object) => f.write_str(&object.describe()),
            Value::Specifier(specifier) => write!(f, "{specifier}"),
            Value::InsertionPoint(point) => write!(f, "{point}"),
        }
    }
}
