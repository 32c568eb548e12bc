//! find: Search for entries by name.
//!
//! Matching is a case-sensitive substring test on the final path component,
//! not a glob. Both orders are accepted:
//!
//! ```text
//! find [start] -name <needle>
//! find <needle> [start]
//! ```

use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};

/// Find tool: recursive name search.
pub struct Find;

impl Tool for Find {
    fn name(&self) -> &str {
        "find"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("find", "Find entries whose name contains a substring")
            .usage("find [start] -name <needle> | find <needle> [start]")
            .option("name", "Substring to match against entry names")
    }

    fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let (needle, start, extra) = match args.get_named("name") {
            Some(needle) => (Some(needle), args.get_positional(0), 1),
            None => (args.get_positional(0), args.get_positional(1), 2),
        };
        if args.positional.len() > extra {
            return ExecResult::failure(1, "find: too many arguments");
        }
        let Some(needle) = needle else {
            return ExecResult::failure(1, "find: missing search pattern");
        };
        let start = start.unwrap_or(".");

        if !ctx.fs.is_directory(start) && ctx.fs.read_file(start).is_none() {
            return ExecResult::failure(1, format!("find: '{}': No such file or directory", start));
        }

        ExecResult::success(ctx.fs.find_files(needle, start).join("\n"))
    }
}
