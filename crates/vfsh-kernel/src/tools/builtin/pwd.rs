//! pwd: Print working directory.

use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};

/// Pwd tool: prints the absolute path of the current directory.
pub struct Pwd;

impl Tool for Pwd {
    fn name(&self) -> &str {
        "pwd"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("pwd", "Print current working directory")
    }

    fn execute(&self, _args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        ExecResult::success(ctx.fs.current_path())
    }
}
