//! Command arguments.

use indexmap::IndexMap;

use super::value::Value;
use crate::terms::SemanticUri;

/// Argument values keyed by normalized parameter URI, in the order they
/// were supplied.
#[derive(Clone, Debug, Default)]
pub struct Arguments {
    contents: IndexMap<SemanticUri, Value>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, parameter: SemanticUri, value: impl Into<Value>) -> Self {
        self.insert(parameter, value.into());
        self
    }

    pub fn with_direct(self, value: impl Into<Value>) -> Self {
        self.with(SemanticUri::direct_parameter(), value)
    }

    pub fn with_target(self, value: impl Into<Value>) -> Self {
        self.with(SemanticUri::target_parameter(), value)
    }

    pub fn insert(&mut self, parameter: SemanticUri, value: Value) -> Option<Value> {
        self.contents.insert(parameter.normalize_parameter(), value)
    }

    pub fn get(&self, parameter: &SemanticUri) -> Option<&Value> {
        self.contents.get(&parameter.clone().normalize_parameter())
    }

    pub fn contains(&self, parameter: &SemanticUri) -> bool {
        self.get(parameter).is_some()
    }

    pub fn direct(&self) -> Option<&Value> {
        self.contents.get(&SemanticUri::direct_parameter())
    }

    pub fn target(&self) -> Option<&Value> {
        self.contents.get(&SemanticUri::target_parameter())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SemanticUri, &Value)> {
        self.contents.iter()
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}
