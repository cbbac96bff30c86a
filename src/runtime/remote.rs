//! Commands sent to other processes.
//!
//! A [`RemoteApplication`] is an object whose commands travel over a
//! [`RemoteChannel`]. While it is the target of a `tell`, its
//! [`RemoteModule`] sits on the module stack and forwards every command
//! addressed to it. A command that has no remote encoding falls through
//! to the modules beneath.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use smol_str::SmolStr;
use thiserror::Error;

use super::arguments::Arguments;
use super::context::Context;
use super::error::{ErrorKind, Result, RuntimeError, UnencodableKind};
use super::module::Module;
use super::object::Object;
use super::reflection::CommandInfo;
use super::value::Value;
use crate::base::FourCharCode;
use crate::specifier::Specifier;
use crate::terms::SemanticUri;
use crate::terms::predefined::Types;

/// Failures reported by a remote channel.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("target unreachable: {0}")]
    Unreachable(String),

    #[error("command not permitted")]
    NotPermitted,

    /// The target does not handle this command.
    #[error("command not understood")]
    NotUnderstood,

    #[error("reply could not be decoded: {0}")]
    Decode(String),

    #[error("command failed ({code}): {message}")]
    Failed { code: i32, message: String },
}

/// One encoded command.
#[derive(Clone, Debug)]
pub struct RemoteRequest {
    pub event_class: FourCharCode,
    pub event_id: FourCharCode,
    /// The element the command addresses; `None` for the application.
    pub subject: Option<Specifier>,
    /// Argument values keyed by parameter code. The direct object is `'----'`.
    pub parameters: IndexMap<FourCharCode, Value>,
}

/// Transport to another process.
pub trait RemoteChannel: fmt::Debug + Send + Sync {
    fn send(&self, request: &RemoteRequest) -> std::result::Result<Value, RemoteError>;
}

// ============================================================================
// APPLICATION OBJECT
// ============================================================================

#[derive(Debug)]
pub struct RemoteApplication {
    name: SmolStr,
    channel: Arc<dyn RemoteChannel>,
}

impl RemoteApplication {
    pub fn new(name: impl Into<SmolStr>, channel: Arc<dyn RemoteChannel>) -> Self {
        Self {
            name: name.into(),
            channel,
        }
    }
}

impl Object for RemoteApplication {
    fn type_uri(&self) -> SemanticUri {
        Types::Application.uri()
    }

    fn type_name(&self) -> String {
        Types::Application.name().to_owned()
    }

    fn name(&self) -> Option<String> {
        Some(self.name.to_string())
    }

    fn remote(&self) -> Option<Arc<dyn RemoteChannel>> {
        Some(self.channel.clone())
    }

    fn module(&self) -> Option<Arc<dyn Module>> {
        Some(Arc::new(RemoteModule::new(
            self.describe(),
            self.channel.clone(),
        )))
    }
}

// ============================================================================
// MODULE
// ============================================================================

/// Forwards commands addressed to one remote application.
#[derive(Debug)]
pub struct RemoteModule {
    description: String,
    channel: Arc<dyn RemoteChannel>,
}

enum Addressed {
    Application,
    Element(Specifier),
    Elsewhere,
}

impl RemoteModule {
    pub fn new(description: impl Into<String>, channel: Arc<dyn RemoteChannel>) -> Self {
        Self {
            description: description.into(),
            channel,
        }
    }

    fn is_ours(&self, value: &Value) -> bool {
        match value {
            Value::Object(object) => object
                .remote()
                .is_some_and(|channel| same_channel(&channel, &self.channel)),
            _ => false,
        }
    }

    fn addressed(&self, context: &mut Context, target: &Value) -> Result<Addressed> {
        if self.is_ours(target) {
            return Ok(Addressed::Application);
        }
        if let Value::Specifier(specifier) = target {
            let root = context.root_of(specifier)?;
            if self.is_ours(&root) {
                let anchored = specifier.rooted_at(root.into());
                return Ok(Addressed::Element(anchored));
            }
        }
        Ok(Addressed::Elsewhere)
    }

    fn encode(
        &self,
        context: &Context,
        command: &CommandInfo,
        subject: Option<Specifier>,
        arguments: &Arguments,
    ) -> Result<RemoteRequest> {
        let (event_class, event_id) = command.uri().code8().ok_or_else(|| {
            RuntimeError::new(ErrorKind::Unencodable {
                kind: UnencodableKind::Command,
                description: command.to_string(),
            })
        })?;

        let mut parameters = IndexMap::new();
        for (parameter, value) in arguments.iter() {
            if parameter.is_target_parameter() {
                continue;
            }
            let key = parameter.code4().ok_or_else(|| {
                RuntimeError::new(ErrorKind::Unencodable {
                    kind: UnencodableKind::Parameter,
                    description: parameter.to_string(),
                })
            })?;
            parameters.insert(key, self.encode_value(context, value)?);
        }

        Ok(RemoteRequest {
            event_class,
            event_id,
            subject,
            parameters,
        })
    }

    fn encode_value(&self, context: &Context, value: &Value) -> Result<Value> {
        match value {
            Value::Object(object) if object.remote().is_none() => {
                Err(RuntimeError::new(ErrorKind::Unencodable {
                    kind: UnencodableKind::Value,
                    description: object.describe(),
                }))
            }
            Value::Specifier(specifier) if specifier.is_ambient() => {
                Ok(Value::specifier(context.qualify(specifier)))
            }
            Value::List(items) => items
                .iter()
                .map(|item| self.encode_value(context, item))
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            other => Ok(other.clone()),
        }
    }
}

impl Module for RemoteModule {
    fn handle(
        &self,
        context: &mut Context,
        command: &CommandInfo,
        arguments: &Arguments,
    ) -> Result<Option<Value>> {
        let target = arguments.target().cloned().unwrap_or(Value::Null);
        let subject = match self.addressed(context, &target)? {
            Addressed::Application => None,
            Addressed::Element(specifier) => Some(specifier),
            Addressed::Elsewhere => return Ok(None),
        };
        let request = self.encode(context, command, subject, arguments)?;
        send(&self.channel, &request, &self.description, &command.to_string())
    }
}

/// Send `request` and translate channel failures. `Ok(None)` means the
/// target did not understand the command.
pub(crate) fn send(
    channel: &Arc<dyn RemoteChannel>,
    request: &RemoteRequest,
    target: &str,
    command: &str,
) -> Result<Option<Value>> {
    tracing::debug!(%target, %command, "sending remote command");
    match channel.send(request) {
        Ok(value) => Ok(Some(value)),
        Err(RemoteError::NotUnderstood) => {
            tracing::debug!(%target, %command, "remote target did not understand command");
            Ok(None)
        }
        Err(RemoteError::NotPermitted) => Err(RuntimeError::new(
            ErrorKind::RemoteCommandsDisallowed {
                target: target.to_owned(),
            },
        )),
        Err(RemoteError::Unreachable(_)) => Err(RuntimeError::new(
            ErrorKind::RemoteTargetUnreachable {
                target: target.to_owned(),
            },
        )),
        Err(RemoteError::Decode(message)) => Err(RuntimeError::new(ErrorKind::Undecodable {
            target: target.to_owned(),
            message,
        })),
        Err(RemoteError::Failed { message, .. }) => {
            Err(RuntimeError::new(ErrorKind::RemoteCommandFailed {
                target: target.to_owned(),
                command: command.to_owned(),
                message,
            }))
        }
    }
}

fn same_channel(a: &Arc<dyn RemoteChannel>, b: &Arc<dyn RemoteChannel>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
