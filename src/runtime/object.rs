//! Host objects.

use std::fmt;
use std::sync::Arc;

use super::module::Module;
use super::reflection::PropertyInfo;
use super::remote::RemoteChannel;
use super::value::Value;
use crate::terms::SemanticUri;

/// An object supplied by the embedding host or a remote application.
///
/// Only [`type_uri`](Object::type_uri) is required. An object that does
/// not report elements rejects every element specifier with an
/// unsupported-form error.
pub trait Object: fmt::Debug + Send + Sync {
    fn type_uri(&self) -> SemanticUri;

    /// Type name for messages.
    fn type_name(&self) -> String {
        self.type_uri().normalized()
    }

    fn name(&self) -> Option<String> {
        None
    }

    fn unique_id(&self) -> Option<Value> {
        None
    }

    fn property(&self, _property: &PropertyInfo) -> Option<Value> {
        None
    }

    /// All elements, or `None` if this object has no element relationship.
    fn elements(&self) -> Option<Vec<Value>> {
        None
    }

    /// The channel commands addressed to this object travel over, if it
    /// lives in another process.
    fn remote(&self) -> Option<Arc<dyn RemoteChannel>> {
        None
    }

    /// A module to push while this object is the target of a `tell`.
    fn module(&self) -> Option<Arc<dyn Module>> {
        None
    }

    fn describe(&self) -> String {
        match self.name() {
            Some(name) => format!("{} \"{name}\"", self.type_name()),
            None => self.type_name(),
        }
    }
}
