//! help: List commands or describe one.

use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};

/// Help tool: reads the schemas the shell placed in the context.
pub struct Help;

impl Tool for Help {
    fn name(&self) -> &str {
        "help"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("help", "List commands, or show usage for one").usage("help [command]")
    }

    fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        match args.get_positional(0) {
            None => ExecResult::success(overview(&ctx.tool_schemas)),
            Some(name) => match ctx.tool_schemas.iter().find(|s| s.name == name) {
                Some(schema) => ExecResult::success(detail(schema)),
                None => ExecResult::failure(1, format!("help: no help topics match '{}'", name)),
            },
        }
    }
}

fn overview(schemas: &[ToolSchema]) -> String {
    let width = schemas.iter().map(|s| s.name.len()).max().unwrap_or(0);
    let mut lines = vec!["Available commands:".to_string()];
    lines.extend(
        schemas
            .iter()
            .map(|s| format!("  {:<width$}  {}", s.name, s.description)),
    );
    lines.join("\n")
}

fn detail(schema: &ToolSchema) -> String {
    let mut lines = vec![
        format!("Usage: {}", schema.usage),
        String::new(),
        schema.description.clone(),
    ];
    if !schema.flags.is_empty() {
        lines.push(String::new());
        lines.push("Options:".to_string());
        for flag in &schema.flags {
            let dashes = if flag.name.chars().count() == 1 { "-" } else { "--" };
            let value = if flag.takes_value { " <value>" } else { "" };
            lines.push(format!(
                "  {}{}{}  {}",
                dashes, flag.name, value, flag.description
            ));
        }
    }
    lines.join("\n")
}
