//! Built-in tools for vfsh.
//!
//! These tools are always available and cover navigation and inspection of
//! the active filesystem.

mod cat;
mod cd;
mod echo;
mod exit;
mod find;
mod help;
mod ls;
mod pwd;
mod tree;

use super::ToolRegistry;

/// Register all built-in tools with the registry.
pub fn register_builtins(registry: &mut ToolRegistry) {
    registry.register(echo::Echo);
    registry.register(cat::Cat);
    registry.register(ls::Ls);
    registry.register(pwd::Pwd);
    registry.register(cd::Cd);
    registry.register(find::Find);
    registry.register(tree::Tree);
    registry.register(exit::Exit);
    registry.register(help::Help);
}
