//! The stack of module levels commands propagate through.
//!
//! Each level is itself a stack of modules. A command is offered to the
//! top level's modules from the top down, then to the next level, and so
//! on to the core module at the very bottom.

use std::sync::Arc;

use super::module::{Function, LocalModule, Module};
use crate::base::Stack;

#[derive(Debug, Clone)]
pub struct ModuleStack {
    levels: Stack<Stack<Arc<dyn Module>>>,
}

impl ModuleStack {
    pub fn new(bottom: Arc<dyn Module>) -> Self {
        Self {
            levels: Stack::new(Stack::new(bottom)),
        }
    }

    /// Start a new level whose bottom module is `module`.
    pub fn push_level(&mut self, module: Arc<dyn Module>) {
        self.levels.push(Stack::new(module));
    }

    pub fn pop_level(&mut self) -> Option<Stack<Arc<dyn Module>>> {
        self.levels.pop()
    }

    /// Push `module` onto the top level.
    pub fn push(&mut self, module: Arc<dyn Module>) {
        self.levels.top_mut().push(module);
    }

    /// Pop the top module of the top level. A level's bottom module stays.
    pub fn pop(&mut self) -> Option<Arc<dyn Module>> {
        self.levels.top_mut().pop()
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Every module in the order a command is offered to them.
    pub fn handlers(&self) -> Vec<Arc<dyn Module>> {
        self.levels
            .iter_top_down()
            .flat_map(|level| level.iter_top_down().cloned())
            .collect()
    }

    /// Add a script function to the top level's local module, or push a
    /// new script level to hold it.
    pub fn add_function(&mut self, function: Function) {
        if let Some(local) = self.levels.top().bottom().as_local() {
            local.add_function(function);
            return;
        }
        let local = LocalModule::new("script");
        local.add_function(function);
        self.push_level(Arc::new(local));
    }
}
