//! Specifier resolution.
//!
//! A chain is resolved from its root outward: the root expression is
//! evaluated (the current target when there is none), then each link
//! selects from whatever its parent produced. A chain rooted at a remote
//! application is not walked locally; it is sent whole as a `get`.

use std::sync::Arc;

use rand::Rng;

use super::context::Context;
use super::error::{ErrorKind, Result, RuntimeError};
use super::remote::{self, RemoteChannel, RemoteRequest};
use super::value::{InsertionPoint, Value};
use crate::specifier::{
    ComparisonOp, Expr, IndexForm, InsertionKind, InsertionSpecifier, LogicalOp, RootKind,
    Specifier, SpecifierKind, TestPredicate,
};
use crate::terms::predefined::{Commands, Properties};
use crate::terms::SemanticUri;

impl Context {
    /// Evaluate a specifier data expression.
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Value(value) => Ok(value.clone()),
            Expr::Variable(term) => Ok(self.variable(term)),
            Expr::Specifier(specifier) => self.evaluate_specifier(specifier),
            Expr::Insertion(insertion) => self.evaluate_insertion(insertion),
            Expr::Root(kind) => Ok(self.root_value(*kind)),
            Expr::List(items) => items
                .iter()
                .map(|item| self.evaluate(item))
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
        }
    }

    fn root_value(&self, kind: RootKind) -> Value {
        let contextual = match kind {
            RootKind::Application => None,
            RootKind::Container => self.containers.last(),
            RootKind::Specimen => self.specimens.last(),
        };
        contextual.unwrap_or_else(|| self.target()).clone()
    }

    /// The value a specifier chain is rooted at.
    pub fn root_of(&mut self, specifier: &Specifier) -> Result<Value> {
        match specifier.root() {
            None => Ok(self.target().clone()),
            Some(root) => self.evaluate(root),
        }
    }

    /// Resolve `specifier` to the value it describes.
    pub fn evaluate_specifier(&mut self, specifier: &Specifier) -> Result<Value> {
        let root = self.root_of(specifier)?;
        match &root {
            // A specifier stored in a variable: continue the chain from it.
            Value::Specifier(inner) => {
                let grafted = specifier.rooted_at(Expr::Specifier(Box::new((**inner).clone())));
                return self.evaluate_specifier(&grafted);
            }
            Value::InsertionPoint(point) => {
                return Err(RuntimeError::new(ErrorKind::InsertionPointEvaluated {
                    description: point.to_string(),
                }));
            }
            Value::Object(object) => {
                if let Some(channel) = object.remote() {
                    let anchored = specifier.rooted_at(Expr::Value(root.clone()));
                    return self.evaluate_remotely(&channel, &object.describe(), anchored);
                }
            }
            _ => {}
        }
        self.resolve_chain(specifier, &root)
    }

    pub fn evaluate_insertion(&mut self, insertion: &InsertionSpecifier) -> Result<Value> {
        let reference = match insertion.parent() {
            None => self.target().clone(),
            Some(parent) => self.evaluate(parent)?,
        };
        Ok(Value::InsertionPoint(Arc::new(InsertionPoint {
            kind: insertion.kind(),
            reference,
        })))
    }

    fn evaluate_remotely(
        &mut self,
        channel: &Arc<dyn RemoteChannel>,
        target: &str,
        specifier: Specifier,
    ) -> Result<Value> {
        let get = Commands::Get.uri();
        let Some((event_class, event_id)) = get.code8() else {
            return Err(RuntimeError::command_not_handled(Commands::Get.name()));
        };
        let request = RemoteRequest {
            event_class,
            event_id,
            subject: Some(specifier),
            parameters: Default::default(),
        };
        remote::send(channel, &request, target, Commands::Get.name())?
            .ok_or_else(|| RuntimeError::command_not_handled(Commands::Get.name()))
    }

    fn resolve_chain(&mut self, specifier: &Specifier, root: &Value) -> Result<Value> {
        let base = match specifier.parent() {
            Some(Expr::Specifier(parent)) => self.resolve_chain(parent, root)?,
            _ => root.clone(),
        };
        if let Value::InsertionPoint(point) = &base {
            return Err(RuntimeError::new(ErrorKind::InsertionPointEvaluated {
                description: point.to_string(),
            }));
        }
        self.select(specifier, &base)
    }

    /// Apply one link of a chain to the value its parent resolved to.
    fn select(&mut self, specifier: &Specifier, base: &Value) -> Result<Value> {
        let form = specifier.kind().form();
        match specifier.kind() {
            SpecifierKind::Property => self.property_of(specifier, base),
            SpecifierKind::Simple(data) => match self.evaluate(data)? {
                Value::Integer(index) => self.element_at(specifier, base, index),
                Value::String(name) => self.element_named(specifier, base, &name),
                other => Err(RuntimeError::invalid_data(form, other)),
            },
            SpecifierKind::Index(data) => {
                let data = self.evaluate(data)?;
                let index = data
                    .as_integer()
                    .ok_or_else(|| RuntimeError::invalid_data(form, &data))?;
                self.element_at(specifier, base, index)
            }
            SpecifierKind::Name(data) => match self.evaluate(data)? {
                Value::String(name) => self.element_named(specifier, base, &name),
                other => Err(RuntimeError::invalid_data(form, other)),
            },
            SpecifierKind::Id(data) => {
                let id = self.evaluate(data)?;
                self.elements_of(specifier, base)?
                    .into_iter()
                    .find(|element| element.unique_id().is_some_and(|other| other.equals(&id)))
                    .ok_or_else(|| no_element(specifier))
            }
            SpecifierKind::All => Ok(Value::List(self.elements_of(specifier, base)?)),
            SpecifierKind::First
            | SpecifierKind::Middle
            | SpecifierKind::Last
            | SpecifierKind::Random => {
                let mut elements = self.elements_of(specifier, base)?;
                if elements.is_empty() {
                    return Err(no_element(specifier));
                }
                let position = match specifier.kind() {
                    SpecifierKind::First => 0,
                    SpecifierKind::Middle => elements.len() / 2,
                    SpecifierKind::Last => elements.len() - 1,
                    _ => self.rng.gen_range(0..elements.len()),
                };
                Ok(elements.swap_remove(position))
            }
            SpecifierKind::Before(data) | SpecifierKind::After(data) => {
                let kind = match specifier.kind() {
                    SpecifierKind::Before(_) => InsertionKind::Before,
                    _ => InsertionKind::After,
                };
                let reference = self.evaluate_in(base, data)?;
                Ok(Value::InsertionPoint(Arc::new(InsertionPoint { kind, reference })))
            }
            SpecifierKind::Range { from, to } => self.range(specifier, base, from, to),
            SpecifierKind::Test(predicate) => self.filter(specifier, base, predicate),
        }
    }

    /// Evaluate `data` with `container` as the container root. A bare
    /// specifier is taken to name an element of `container`.
    fn evaluate_in(&mut self, container: &Value, data: &Expr) -> Result<Value> {
        if let Expr::Specifier(specifier) = data {
            if specifier.is_ambient() {
                let anchored = specifier.rooted_at(Expr::Value(container.clone()));
                return self.evaluate_specifier(&anchored);
            }
        }
        self.containers.push(container.clone());
        let result = self.evaluate(data);
        self.containers.pop();
        result
    }

    // ========================================================================
    // ELEMENTS
    // ========================================================================

    /// The elements of `base` whose type is-a the specifier's id type.
    fn elements_of(&self, specifier: &Specifier, base: &Value) -> Result<Vec<Value>> {
        let candidates = match base {
            Value::List(items) => items.clone(),
            Value::String(text) => text.chars().map(Value::Character).collect(),
            Value::Object(object) => object.elements().ok_or_else(|| {
                RuntimeError::unsupported_form(specifier.kind().form(), object.type_name())
            })?,
            other => {
                return Err(RuntimeError::unsupported_form(
                    specifier.kind().form(),
                    other.type_name(),
                ));
            }
        };
        let wanted = specifier.id_term().uri();
        Ok(candidates
            .into_iter()
            .filter(|element| self.reflection.is_a(&element.type_uri(), wanted))
            .collect())
    }

    fn element_at(&self, specifier: &Specifier, base: &Value, index: i64) -> Result<Value> {
        let mut elements = self.elements_of(specifier, base)?;
        if index < 1 || index as usize > elements.len() {
            return Err(RuntimeError::new(ErrorKind::IndexOutOfBounds {
                index,
                container: base.to_string(),
            }));
        }
        Ok(elements.swap_remove(index as usize - 1))
    }

    fn element_named(&self, specifier: &Specifier, base: &Value, name: &str) -> Result<Value> {
        self.elements_of(specifier, base)?
            .into_iter()
            .find(|element| element.name().as_deref() == Some(name))
            .ok_or_else(|| no_element(specifier))
    }

    fn property_of(&self, specifier: &Specifier, base: &Value) -> Result<Value> {
        let property = self.reflection.properties.get(specifier.id_term().uri());
        let found = match base {
            Value::Object(object) => object.property(&property),
            Value::Record(fields) => fields.get(property.uri()).cloned(),
            _ => None,
        };
        if let Some(value) = found {
            return Ok(value);
        }

        let uri = property.uri();
        let builtin = if *uri == Properties::Class.uri() {
            Some(Value::Type(self.reflection.types.get(&base.type_uri())))
        } else if *uri == Properties::Length.uri() {
            base.length().map(|length| Value::Integer(length as i64))
        } else if *uri == Properties::Name.uri() {
            base.name().map(|name| Value::string(&name))
        } else if *uri == Properties::Id.uri() {
            base.unique_id()
        } else {
            None
        };
        builtin.ok_or_else(|| RuntimeError::no_property(base.type_name(), &property))
    }

    // ========================================================================
    // RANGES
    // ========================================================================

    fn range(&mut self, specifier: &Specifier, base: &Value, from: &Expr, to: &Expr) -> Result<Value> {
        let elements = self.elements_of(specifier, base)?;
        let from = self.evaluate_in(base, from)?;
        let to = self.evaluate_in(base, to)?;
        let from = range_bound(&from, &elements)?;
        let to = range_bound(&to, &elements)?;
        let count = elements.len() as i64;
        let out_of_bounds = || {
            RuntimeError::new(ErrorKind::RangeOutOfBounds {
                from,
                to,
                container: base.to_string(),
            })
        };

        if let Value::String(text) = base {
            if from < 1 || to > count {
                return Err(out_of_bounds());
            }
            if from > to {
                return Ok(Value::string(""));
            }
            let slice: String = text
                .chars()
                .skip(from as usize - 1)
                .take((to - from + 1) as usize)
                .collect();
            return Ok(Value::string(&slice));
        }

        if from < 1 || to > count || from > to {
            return Err(out_of_bounds());
        }
        Ok(Value::List(
            elements[from as usize - 1..to as usize].to_vec(),
        ))
    }

    // ========================================================================
    // FILTERS
    // ========================================================================

    fn filter(&mut self, specifier: &Specifier, base: &Value, predicate: &TestPredicate) -> Result<Value> {
        if let Some(operator) = predicate.unsupported_operator() {
            return Err(RuntimeError::new(ErrorKind::UnsupportedPredicate { operator }));
        }
        let mut kept = Vec::new();
        for element in self.elements_of(specifier, base)? {
            self.specimens.push(element.clone());
            let outcome = self.test(predicate);
            self.specimens.pop();
            match outcome {
                Ok(true) => kept.push(element),
                Ok(false) => {}
                Err(error) if error.kind().excludes_element() => {
                    tracing::trace!(%element, %error, "excluding element from filter");
                }
                Err(error) => return Err(error),
            }
        }
        Ok(Value::List(kept))
    }

    fn test(&mut self, predicate: &TestPredicate) -> Result<bool> {
        match predicate {
            TestPredicate::Logical { op, lhs, rhs } => match op {
                LogicalOp::And => Ok(self.test(lhs)? && self.test(rhs)?),
                LogicalOp::Or => Ok(self.test(lhs)? || self.test(rhs)?),
            },
            TestPredicate::Comparison { op, lhs, rhs } => {
                let lhs = self.evaluate(lhs)?;
                let rhs = self.evaluate(rhs)?;
                compare(*op, &lhs, &rhs)
            }
            TestPredicate::Not(_) => Err(RuntimeError::new(ErrorKind::UnsupportedPredicate {
                operator: "not",
            })),
        }
    }

    // ========================================================================
    // COUNTING
    // ========================================================================

    /// Number of elements of `subject`, optionally only those of
    /// `element_type`.
    pub fn count(&mut self, subject: &Value, element_type: Option<&SemanticUri>) -> Result<usize> {
        let value = self.get(subject)?;
        let elements: Vec<Value> = match &value {
            Value::List(items) => items.clone(),
            Value::String(text) => text.chars().map(Value::Character).collect(),
            Value::Object(object) => object.elements().ok_or_else(|| {
                RuntimeError::unsupported_form(IndexForm::All, object.type_name())
            })?,
            Value::Record(fields) => fields.values().cloned().collect(),
            _ => vec![value.clone()],
        };
        Ok(match element_type {
            Some(ty) => elements
                .iter()
                .filter(|element| self.reflection.is_a(&element.type_uri(), ty))
                .count(),
            None => elements.len(),
        })
    }
}

fn no_element(specifier: &Specifier) -> RuntimeError {
    RuntimeError::new(ErrorKind::NoElementExists {
        specifier: specifier.to_string(),
    })
}

/// A range bound is an integer position or one of the elements.
fn range_bound(bound: &Value, elements: &[Value]) -> Result<i64> {
    if let Some(index) = bound.as_integer() {
        return Ok(index);
    }
    elements
        .iter()
        .position(|element| element.equals(bound))
        .map(|position| position as i64 + 1)
        .ok_or_else(|| RuntimeError::invalid_data(IndexForm::Range, bound))
}

fn compare(op: ComparisonOp, lhs: &Value, rhs: &Value) -> Result<bool> {
    let incomparable = || RuntimeError::uncoercible(rhs, lhs.type_name());
    Ok(match op {
        ComparisonOp::Equal => lhs.equals(rhs),
        ComparisonOp::NotEqual => !lhs.equals(rhs),
        ComparisonOp::Less => lhs.compare(rhs).ok_or_else(incomparable)?.is_lt(),
        ComparisonOp::LessOrEqual => lhs.compare(rhs).ok_or_else(incomparable)?.is_le(),
        ComparisonOp::Greater => lhs.compare(rhs).ok_or_else(incomparable)?.is_gt(),
        ComparisonOp::GreaterOrEqual => lhs.compare(rhs).ok_or_else(incomparable)?.is_ge(),
        ComparisonOp::Contains => lhs.contains(rhs).ok_or_else(incomparable)?,
        ComparisonOp::NotContains => !lhs.contains(rhs).ok_or_else(incomparable)?,
        ComparisonOp::StartsWith => lhs.starts_with(rhs).ok_or_else(incomparable)?,
        ComparisonOp::EndsWith => lhs.ends_with(rhs).ok_or_else(incomparable)?,
        ComparisonOp::IsIn => rhs.contains(lhs).ok_or_else(incomparable)?,
        ComparisonOp::IsNotIn => !rhs.contains(lhs).ok_or_else(incomparable)?,
    })
}
