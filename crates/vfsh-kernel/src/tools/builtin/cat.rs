//! cat: Concatenate and print files.

use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};

/// Cat tool: print file contents.
pub struct Cat;

impl Tool for Cat {
    fn name(&self) -> &str {
        "cat"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("cat", "Print file contents").usage("cat <path>...")
    }

    fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        if args.positional.is_empty() {
            return ExecResult::failure(1, "cat: missing file operand");
        }

        let mut out = String::new();
        let mut errors = Vec::new();
        for path in &args.positional {
            match ctx.fs.read_file(path) {
                Some(content) => out.push_str(&content),
                None if ctx.fs.is_directory(path) => {
                    errors.push(format!("cat: {}: Is a directory", path));
                }
                None => errors.push(format!("cat: {}: No such file or directory", path)),
            }
        }

        let code = if errors.is_empty() { 0 } else { 1 };
        ExecResult::from_output(code, out, errors.join("\n"))
    }
}
