//! echo: Print arguments.

use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};

/// Echo tool: prints its arguments separated by spaces.
pub struct Echo;

impl Tool for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("echo", "Print arguments separated by spaces")
            .usage("echo [word...]")
            .raw()
    }

    fn execute(&self, args: ToolArgs, _ctx: &mut ExecContext) -> ExecResult {
        ExecResult::success(args.positional.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::testing::{args, sample_ctx};

    #[test]
    fn joins_words() {
        let mut ctx = sample_ctx();
        let result = Echo.execute(args(&["hello", "world"]), &mut ctx);
        assert!(result.ok());
        assert_eq!(result.out, "hello world");
    }

    #[test]
    fn no_args_prints_nothing() {
        let mut ctx = sample_ctx();
        let result = Echo.execute(ToolArgs::new(), &mut ctx);
        assert_eq!(result.out, "");
    }
}
