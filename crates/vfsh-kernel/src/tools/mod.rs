//! Tool system for vfsh.
//!
//! Every command is a tool: a name, a schema used for argument parsing and
//! `help`, and a synchronous `execute` that returns an [`ExecResult`].
//!
//! [`ExecResult`]: crate::result::ExecResult

pub mod builtin;
mod context;
mod registry;
mod traits;

pub use builtin::register_builtins;
pub use context::ExecContext;
pub use registry::ToolRegistry;
pub use traits::{FlagSchema, Tool, ToolArgs, ToolSchema};
