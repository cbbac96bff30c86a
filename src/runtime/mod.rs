//! The runtime dispatch core.
//!
//! This module runs compiled scripts against host and remote objects.
//!
//! ## Key Types
//!
//! - [`Context`] - One script run: module, frame and target stacks
//! - [`Value`], [`Object`] - What scripts compute with
//! - [`Reflection`] - Runtime views of types, properties, constants and commands
//! - [`Module`], [`LocalModule`], [`Function`] - Command handlers
//! - [`RemoteApplication`], [`RemoteChannel`] - Commands sent to other processes
//!
//! ## Dispatch
//!
//! ```text
//! run(command, arguments)
//!     │
//!     ▼
//! module stack, top level first    ← each level's modules, top down
//!     │
//!     ▼
//! first module returning a value   ← declines fall through
//!     │
//!     ▼
//! CommandNotHandled                ← nothing accepted
//! ```
//!
//! Depends on [`crate::terms`], [`crate::loading`] and [`crate::specifier`].

mod arguments;
mod config;
mod context;
mod core_module;
mod error;
mod frame_stack;
mod module;
mod module_stack;
mod object;
mod reflection;
mod remote;
mod resolve;
mod resource;
mod value;

pub use arguments::Arguments;
pub use config::RuntimeConfig;
pub use context::Context;
pub use core_module::CoreModule;
pub use error::{ErrorCategory, ErrorKind, Result, RuntimeError, UnencodableKind};
pub use frame_stack::{FrameStack, Slot};
pub use module::{Function, FunctionSet, Implementation, LocalModule, Module, Signature};
pub use module_stack::ModuleStack;
pub use object::Object;
pub use reflection::{
    CommandInfo, ConstantInfo, ParameterInfo, PropertyInfo, Reflected, Reflection,
    ReflectionTable, TypeInfo,
};
pub use remote::{RemoteApplication, RemoteChannel, RemoteError, RemoteModule, RemoteRequest};
pub use resource::{ResolvedResource, ResourceResolver, import_resource_terms};
pub use value::{InsertionPoint, Value};
