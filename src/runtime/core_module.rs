//! The module at the bottom of every module stack.

use super::arguments::Arguments;
use super::context::Context;
use super::error::Result;
use super::module::Module;
use super::reflection::CommandInfo;
use super::value::Value;
use crate::terms::predefined::{Commands, Parameters};

/// Built-in `get` and `count`. Declines everything else.
#[derive(Debug, Default)]
pub struct CoreModule;

impl Module for CoreModule {
    fn handle(
        &self,
        context: &mut Context,
        command: &CommandInfo,
        arguments: &Arguments,
    ) -> Result<Option<Value>> {
        let subject = || {
            arguments
                .direct()
                .or_else(|| arguments.target())
                .cloned()
                .unwrap_or(Value::Unspecified)
        };

        if *command.uri() == Commands::Get.uri() {
            return context.get(&subject()).map(Some);
        }
        if *command.uri() == Commands::Count.uri() {
            let element_type = match arguments.get(&Parameters::CountEach.uri()) {
                Some(Value::Type(info)) => Some(info.uri().clone()),
                _ => None,
            };
            return context
                .count(&subject(), element_type.as_ref())
                .map(|count| Some(Value::Integer(count as i64)));
        }
        Ok(None)
    }
}
