//! The execution context of one running script.
//!
//! A context owns three independent stacks:
//!
//! ```text
//! modules   → levels of handlers commands propagate through
//! frames    → variable bindings
//! targets   → the objects of enclosing `tell` blocks
//! ```
//!
//! A context is single-threaded and belongs to exactly one script run.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::arguments::Arguments;
use super::config::RuntimeConfig;
use super::core_module::CoreModule;
use super::error::{ErrorKind, Result, RuntimeError};
use super::frame_stack::FrameStack;
use super::module::Function;
use super::module_stack::ModuleStack;
use super::reflection::{CommandInfo, Reflection};
use super::resource::ResourceResolver;
use super::value::Value;
use crate::base::{SourceLocation, Stack};
use crate::specifier::{Expr, Specifier};
use crate::terms::Term;
use crate::terms::predefined::Commands;

pub struct Context {
    config: RuntimeConfig,
    pub(super) reflection: Arc<Reflection>,
    modules: ModuleStack,
    frames: FrameStack,
    targets: Stack<Value>,
    /// Whether each `enter_tell` also pushed a module level.
    tell_levels: Vec<bool>,
    pub(super) specimens: Vec<Value>,
    pub(super) containers: Vec<Value>,
    location: Option<SourceLocation>,
    pub(super) rng: StdRng,
    resources: Option<Arc<dyn ResourceResolver>>,
}

impl Context {
    pub fn new(reflection: Arc<Reflection>, config: RuntimeConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        tracing::debug!(script = %config.script_name, source = ?config.source, "creating runtime context");
        Self {
            config,
            reflection,
            modules: ModuleStack::new(Arc::new(CoreModule)),
            frames: FrameStack::new(),
            targets: Stack::new(Value::Null),
            tell_levels: Vec::new(),
            specimens: Vec::new(),
            containers: Vec::new(),
            location: None,
            rng,
            resources: None,
        }
    }

    pub fn with_resource_resolver(mut self, resolver: Arc<dyn ResourceResolver>) -> Self {
        self.resources = Some(resolver);
        self
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn reflection(&self) -> Arc<Reflection> {
        self.reflection.clone()
    }

    pub fn modules(&self) -> &ModuleStack {
        &self.modules
    }

    pub fn modules_mut(&mut self) -> &mut ModuleStack {
        &mut self.modules
    }

    pub fn frames(&self) -> &FrameStack {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut FrameStack {
        &mut self.frames
    }

    pub fn add_function(&mut self, function: Function) {
        self.modules.add_function(function);
    }

    // ========================================================================
    // LOCATION
    // ========================================================================

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    /// Record the location of the expression about to be evaluated.
    pub fn set_location(&mut self, location: SourceLocation) {
        self.location = Some(location);
    }

    /// Attach the current location to an escaping error. An error raised
    /// in another source is moved to the current location.
    fn locate(&self, error: &mut RuntimeError) {
        let Some(current) = self.location else {
            return;
        };
        match error.location() {
            None => error.set_location(current),
            Some(raised) if !raised.same_source(&current) && self.config.rewrite_foreign_locations => {
                tracing::debug!(from = %raised, to = %current, "relocating foreign error");
                error.set_location(current);
            }
            Some(_) => {}
        }
    }

    // ========================================================================
    // TARGETS
    // ========================================================================

    /// The object of the innermost `tell` block.
    pub fn target(&self) -> &Value {
        self.targets.top()
    }

    /// Begin a `tell` block. If the target brings its own module, that
    /// module becomes a new level on the module stack. An ambient specifier
    /// target is anchored at the enclosing target first, so the target
    /// stack never holds a chain that refers back to itself.
    pub fn enter_tell(&mut self, target: Value) {
        let target = match target {
            Value::Specifier(specifier) if specifier.is_ambient() => {
                Value::specifier(self.qualify(&specifier))
            }
            other => other,
        };
        let module = match &target {
            Value::Object(object) => object.module(),
            _ => None,
        };
        self.tell_levels.push(module.is_some());
        if let Some(module) = module {
            self.modules.push_level(module);
        }
        self.targets.push(target);
    }

    /// End the innermost `tell` block.
    pub fn exit_tell(&mut self) -> Option<Value> {
        let target = self.targets.pop()?;
        if self.tell_levels.pop() == Some(true) {
            self.modules.pop_level();
        }
        Some(target)
    }

    // ========================================================================
    // DISPATCH
    // ========================================================================

    /// Offer `command` to every module from the top of the module stack
    /// down and return the first result. The current target is supplied as
    /// the target argument unless one was given.
    pub fn run(&mut self, command: &CommandInfo, arguments: Arguments) -> Result<Value> {
        let mut arguments = arguments;
        if arguments.target().is_none() {
            arguments.insert(
                crate::terms::SemanticUri::target_parameter(),
                self.target().clone(),
            );
        }

        // Snapshot: handlers may push and pop modules while running.
        for module in self.modules.handlers() {
            match module.handle(self, command, &arguments) {
                Ok(Some(value)) => {
                    tracing::trace!(%command, ?module, "command handled");
                    return Ok(value);
                }
                Ok(None) => {
                    tracing::trace!(%command, ?module, "module declined command");
                }
                Err(error) if error.kind().is_declined_by_remote() => {
                    tracing::debug!(%command, %error, "remote target declined command");
                }
                Err(mut error) => {
                    self.locate(&mut error);
                    return Err(error);
                }
            }
        }

        let mut error = RuntimeError::command_not_handled(command);
        self.locate(&mut error);
        Err(error)
    }

    /// [`run`](Self::run) for a built-in command.
    pub fn run_builtin(&mut self, command: Commands, arguments: Arguments) -> Result<Value> {
        let info = self.reflection.builtin_command(command);
        self.run(&info, arguments)
    }

    // ========================================================================
    // VARIABLES
    // ========================================================================

    pub fn variable(&self, term: &Term) -> Value {
        self.frames.get(term.uri())
    }

    pub fn set_variable(&mut self, term: &Term, value: Value) {
        self.frames.set(term.uri(), value);
    }

    pub fn push_frame(&mut self) {
        self.frames.push();
    }

    pub fn pop_frame(&mut self) -> bool {
        self.frames.pop()
    }

    // ========================================================================
    // SPECIFIERS
    // ========================================================================

    /// A copy of `specifier` anchored at the current target if it has no
    /// root of its own. Chains with an explicit root, such as a value or a
    /// variable, are copied without re-rooting, so a `tell` block does not
    /// redirect them.
    pub fn qualify(&self, specifier: &Specifier) -> Specifier {
        specifier.qualified(Expr::Value(self.target().clone()))
    }

    /// Resolve a value that may be a specifier.
    pub fn get(&mut self, value: &Value) -> Result<Value> {
        match value {
            Value::Specifier(specifier) => self.evaluate_specifier(specifier),
            other => Ok(other.clone()),
        }
    }

    // ========================================================================
    // RESOURCES
    // ========================================================================

    /// The object a resource term refers to.
    pub fn resource_target(&self, term: &Term) -> Result<Value> {
        let unavailable = |message: &str| {
            RuntimeError::new(ErrorKind::ResourceUnavailable {
                resource: term.to_string(),
                message: message.to_owned(),
            })
        };
        let resource = term.resource().ok_or_else(|| unavailable("not a resource"))?;
        let resolver = self
            .resources
            .as_ref()
            .ok_or_else(|| unavailable("no resource resolver installed"))?;
        resolver
            .resolve(resource)
            .and_then(|resolved| resolved.target)
            .ok_or_else(|| unavailable("not found"))
    }
}
