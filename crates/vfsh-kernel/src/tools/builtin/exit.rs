//! exit: Leave the shell.

use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};

/// Exit tool: asks the shell to stop after this command.
pub struct Exit;

impl Tool for Exit {
    fn name(&self) -> &str {
        "exit"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("exit", "Exit the shell").usage("exit [status]")
    }

    fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        if args.positional.len() > 1 {
            return ExecResult::failure(1, "exit: too many arguments");
        }

        match args.get_positional(0).map(str::parse::<i32>) {
            None => {
                ctx.request_exit(0);
                ExecResult::success("")
            }
            Some(Ok(code)) => {
                ctx.request_exit(code);
                ExecResult::from_output(code, "", "")
            }
            Some(Err(_)) => {
                let word = args.get_positional(0).unwrap_or_default();
                ctx.request_exit(2);
                ExecResult::failure(2, format!("exit: {}: numeric argument required", word))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::testing::{args, sample_ctx};

    #[test]
    fn exit_defaults_to_zero() {
        let mut ctx = sample_ctx();
        let result = Exit.execute(ToolArgs::new(), &mut ctx);
        assert!(result.ok());
        assert_eq!(ctx.exit_requested(), Some(0));
    }

    #[test]
    fn exit_with_status() {
        let mut ctx = sample_ctx();
        let result = Exit.execute(args(&["3"]), &mut ctx);
        assert_eq!(result.code, 3);
        assert_eq!(ctx.exit_requested(), Some(3));
    }

    #[test]
    fn exit_with_garbage_still_exits() {
        let mut ctx = sample_ctx();
        let result = Exit.execute(args(&["soon"]), &mut ctx);
        assert_eq!(result.code, 2);
        assert_eq!(result.err, "exit: soon: numeric argument required");
        assert_eq!(ctx.exit_requested(), Some(2));
    }

    #[test]
    fn exit_too_many_does_not_exit() {
        let mut ctx = sample_ctx();
        let result = Exit.execute(args(&["1", "2"]), &mut ctx);
        assert_eq!(result.code, 1);
        assert_eq!(ctx.exit_requested(), None);
    }
}
