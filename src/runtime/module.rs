//! Modules: the handlers commands propagate through.
//!
//! A [`Module`] is asked to handle a command and answers with a value,
//! with `None` to let the next module try, or with an error. Scripts
//! define handlers as [`Function`]s collected into a [`LocalModule`].

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::arguments::Arguments;
use super::context::Context;
use super::error::Result;
use super::reflection::{CommandInfo, Reflection};
use super::value::Value;
use crate::terms::SemanticUri;
use crate::terms::predefined::Types;

pub trait Module: fmt::Debug + Send + Sync {
    /// Handle `command`, or return `Ok(None)` to decline it.
    fn handle(
        &self,
        context: &mut Context,
        command: &CommandInfo,
        arguments: &Arguments,
    ) -> Result<Option<Value>>;

    fn as_local(&self) -> Option<&LocalModule> {
        None
    }
}

// ============================================================================
// FUNCTIONS
// ============================================================================

/// The command a function implements and the type of each parameter it
/// accepts.
#[derive(Clone, Debug)]
pub struct Signature {
    command: SemanticUri,
    parameters: IndexMap<SemanticUri, SemanticUri>,
}

impl Signature {
    pub fn new(command: SemanticUri) -> Self {
        Self {
            command,
            parameters: IndexMap::new(),
        }
    }

    pub fn parameter(mut self, parameter: SemanticUri, ty: SemanticUri) -> Self {
        self.parameters.insert(parameter.normalize_parameter(), ty);
        self
    }

    pub fn command(&self) -> &SemanticUri {
        &self.command
    }

    pub fn parameters(&self) -> &IndexMap<SemanticUri, SemanticUri> {
        &self.parameters
    }

    pub fn takes_direct(&self) -> bool {
        self.parameters.contains_key(&SemanticUri::direct_parameter())
    }

    pub fn takes_target(&self) -> bool {
        self.parameters.contains_key(&SemanticUri::target_parameter())
    }

    /// How well `arguments` fit: `None` if some argument has no matching
    /// parameter or a value of the wrong type. Otherwise the number of
    /// exact type matches, then the number of arguments minus the number
    /// of parameters.
    fn score(&self, arguments: &Arguments, reflection: &Reflection) -> Option<(usize, isize)> {
        let mut parameters = self.parameters.clone();
        parameters
            .entry(SemanticUri::target_parameter())
            .or_insert_with(|| Types::Item.uri());

        let mut exact = 0;
        for (parameter, value) in arguments.iter() {
            let expected = parameters.get(parameter)?;
            match value {
                Value::Null | Value::Specifier(_) => {}
                value => {
                    let actual = value.type_uri();
                    if actual == *expected {
                        exact += 1;
                    } else if !reflection.is_a(&actual, expected) {
                        return None;
                    }
                }
            }
        }
        let count = arguments.len() as isize - parameters.len() as isize;
        Some((exact, count))
    }
}

pub type Implementation = Arc<dyn Fn(&mut Context, &Arguments) -> Result<Value> + Send + Sync>;

#[derive(Clone)]
pub struct Function {
    signature: Signature,
    implementation: Implementation,
}

impl Function {
    pub fn new<F>(signature: Signature, implementation: F) -> Self
    where
        F: Fn(&mut Context, &Arguments) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            signature,
            implementation: Arc::new(implementation),
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn call(&self, context: &mut Context, arguments: &Arguments) -> Result<Value> {
        (self.implementation)(context, arguments)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Functions grouped by the command they implement, in registration order.
#[derive(Clone, Debug, Default)]
pub struct FunctionSet {
    by_command: FxHashMap<SemanticUri, Vec<Function>>,
}

impl FunctionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, function: Function) {
        self.by_command
            .entry(function.signature.command.clone())
            .or_default()
            .push(function);
    }

    pub fn functions(&self, command: &SemanticUri) -> &[Function] {
        self.by_command.get(command).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The function for `command` that best fits `arguments`. Among equal
    /// scores the most recently added wins.
    pub fn best_match(
        &self,
        command: &SemanticUri,
        arguments: &Arguments,
        reflection: &Reflection,
    ) -> Option<&Function> {
        let mut best: Option<((usize, isize), &Function)> = None;
        for function in self.functions(command) {
            let Some(score) = function.signature.score(arguments, reflection) else {
                continue;
            };
            if best.is_none_or(|(best_score, _)| score >= best_score) {
                best = Some((score, function));
            }
        }
        best.map(|(_, function)| function)
    }
}

// ============================================================================
// LOCAL MODULE
// ============================================================================

/// Handlers defined by a script.
#[derive(Debug, Default)]
pub struct LocalModule {
    name: SmolStr,
    functions: RwLock<FunctionSet>,
}

impl LocalModule {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            functions: RwLock::new(FunctionSet::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_function(&self, function: Function) {
        self.functions.write().add(function);
    }

    pub fn function_count(&self) -> usize {
        self.functions.read().by_command.values().map(Vec::len).sum()
    }
}

impl Module for LocalModule {
    fn handle(
        &self,
        context: &mut Context,
        command: &CommandInfo,
        arguments: &Arguments,
    ) -> Result<Option<Value>> {
        let reflection = context.reflection();
        let function = {
            let functions = self.functions.read();
            match functions.best_match(command.uri(), arguments, &reflection) {
                Some(function) => function.clone(),
                None => return Ok(None),
            }
        };

        let signature = function.signature();
        if signature.takes_direct() && !signature.takes_target() && arguments.direct().is_none() {
            if let Some(target) = arguments.target() {
                let mut arguments = arguments.clone();
                arguments.insert(SemanticUri::direct_parameter(), target.clone());
                return function.call(context, &arguments).map(Some);
            }
        }
        function.call(context, arguments).map(Some)
    }

    fn as_local(&self) -> Option<&LocalModule> {
        Some(self)
    }
}
