//! cd: Change working directory.

use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};

/// Cd tool: change current working directory.
pub struct Cd;

impl Tool for Cd {
    fn name(&self) -> &str {
        "cd"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("cd", "Change current working directory").usage("cd [path]")
    }

    fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        if args.positional.len() > 1 {
            return ExecResult::failure(1, "cd: too many arguments");
        }
        let path = args.get_positional(0).unwrap_or("~");

        if ctx.fs.change_directory(path) {
            ExecResult::success("")
        } else if ctx.fs.exists(path) {
            ExecResult::failure(1, format!("cd: {}: Not a directory", path))
        } else {
            ExecResult::failure(1, format!("cd: {}: No such file or directory", path))
        }
    }
}
